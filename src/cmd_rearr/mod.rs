//! Subcommand modules for the `rearr` binary.

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use rearr::libs::gap::{GapIndex, GenomeGaps};
use rearr::libs::pipeline::Config;

pub mod edges;
pub mod find;
pub mod gaps;

/// Options shared by every subcommand that builds the edge graph.
pub fn graph_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("infile")
            .required(true)
            .index(1)
            .help("Pairwise alignment in MAF format"),
    )
    .arg(
        Arg::new("gap1")
            .long("gap1")
            .short('1')
            .num_args(1)
            .value_name("FILE")
            .help("Assembly gaps of genome 1, AGP or UCSC gap table"),
    )
    .arg(
        Arg::new("gap2")
            .long("gap2")
            .short('2')
            .num_args(1)
            .value_name("FILE")
            .help("Assembly gaps of genome 2, AGP or UCSC gap table"),
    )
    .arg(
        Arg::new("mismap")
            .long("mismap")
            .short('m')
            .num_args(1)
            .value_name("PROB")
            .default_value("1e-5")
            .value_parser(clap::value_parser!(f64))
            .help("Omit alignments with mismap probability > PROB"),
    )
    .arg(
        Arg::new("distance")
            .long("distance")
            .short('d')
            .num_args(1)
            .value_name("DIST")
            .default_value("1000000000")
            .value_parser(clap::value_parser!(u64))
            .help("Maximum distance between facing alignment ends"),
    )
    .arg(
        Arg::new("outfile")
            .long("outfile")
            .short('o')
            .num_args(1)
            .default_value("stdout")
            .help("Output filename. [stdout] for screen"),
    )
}

fn load_gaps(args: &ArgMatches, id: &str) -> anyhow::Result<GenomeGaps> {
    match args.get_one::<String>(id) {
        Some(path) => GenomeGaps::from_path(path)
            .with_context(|| format!("failed to read gaps from {}", path)),
        None => Ok(GenomeGaps::default()),
    }
}

pub fn graph_config(args: &ArgMatches) -> anyhow::Result<(GapIndex, Config)> {
    let gaps = GapIndex::new(load_gaps(args, "gap1")?, load_gaps(args, "gap2")?);
    let config = Config {
        max_mismap: *args.get_one::<f64>("mismap").unwrap(),
        max_distance: *args.get_one::<u64>("distance").unwrap(),
    };
    Ok((gaps, config))
}
