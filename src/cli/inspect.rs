/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};

use bitgraph::bitset::BitsetDense;
use bitgraph::io;

pub const COMMAND_NAME: &str = "inspect";

#[derive(Args, Debug)]
#[command(about = "Print vertex/edge counts and density for a graph file.", long_about = None)]
struct CliArgs {
    /// Path to a DIMACS, Matrix Market, edge-list, or 0/1 matrix file.
    source: String,

    #[arg(short, long)]
    /// Treat the file as directed rather than undirected.
    directed: bool,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    if args.directed {
        let mut g = io::read_directed::<BitsetDense>(&args.source)?;
        let n = g.number_of_vertices();
        let m = g.number_of_edges(true);
        println!("vertices: {n}");
        println!("edges: {m}");
        println!("density: {:.6}", g.density(true));
        println!("block_density: {:.6}", g.block_density());
        println!("self_loop_present: {}", g.is_self_loop_present());
    } else {
        let mut g = io::read_undirected::<BitsetDense>(&args.source)?;
        let n = g.number_of_vertices();
        let m = g.number_of_edges(true)?;
        println!("vertices: {n}");
        println!("edges: {m}");
        println!("density: {:.6}", g.density(true)?);
        println!("block_density: {:.6}", g.block_density());
    }
    Ok(())
}
