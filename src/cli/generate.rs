/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fs::File;
use std::io::BufWriter;

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};

use bitgraph::bitset::BitsetDense;
use bitgraph::graph::UGraph;
use bitgraph::io::dimacs;
use bitgraph::rng::SeededRng;

pub const COMMAND_NAME: &str = "generate";

#[derive(Args, Debug)]
#[command(about = "Generate an Erdős–Rényi G(n, p) undirected graph.", long_about = None)]
struct CliArgs {
    /// Number of vertices.
    n: usize,
    /// Edge probability, in [0, 1].
    p: f64,
    /// Destination DIMACS file.
    dest: String,

    #[arg(short, long, default_value_t = 0)]
    /// RNG seed, for reproducible output.
    seed: u64,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    let mut g: UGraph<BitsetDense> = UGraph::new(args.n)?;
    let mut rng = SeededRng::new(args.seed);
    g.gen_random_edges(args.p, &mut rng);
    g.set_name(format!("G({}, {})", args.n, args.p));

    let mut out = BufWriter::new(File::create(&args.dest)?);
    dimacs::write_dimacs_undirected(&g, &mut out)?;
    log::info!("generated {} vertices, {} edges", args.n, g.number_of_edges(true)?);
    Ok(())
}
