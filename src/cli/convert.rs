/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fs::File;
use std::io::BufWriter;

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches, ValueEnum};

use bitgraph::bitset::BitsetDense;
use bitgraph::io::{dimacs, edgelist, matrix01, read_undirected};

pub const COMMAND_NAME: &str = "convert";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Dimacs,
    Edges,
    Matrix01,
}

#[derive(Args, Debug)]
#[command(about = "Convert a graph file between formats (undirected only).", long_about = None)]
struct CliArgs {
    /// Source path (format auto-detected: DIMACS, MTX, edge-list, or 0/1 matrix).
    source: String,
    /// Destination path.
    dest: String,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dimacs)]
    format: OutputFormat,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    let mut g = read_undirected::<BitsetDense>(&args.source)?;
    g.set_name(args.source.clone());

    let mut out = BufWriter::new(File::create(&args.dest)?);
    match args.format {
        OutputFormat::Dimacs => dimacs::write_dimacs_undirected(&g, &mut out)?,
        OutputFormat::Edges => edgelist::write_edgelist_undirected(&g, &mut out)?,
        OutputFormat::Matrix01 => matrix01::write_matrix01_undirected(&g, &mut out)?,
    }
    log::info!("wrote {} vertices, {} edges to {}", g.number_of_vertices(), g.number_of_edges(true)?, args.dest);
    Ok(())
}
