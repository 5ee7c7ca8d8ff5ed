use anyhow::Context;
use clap::*;
use rearr::libs::pipeline::Analysis;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("find")
        .about("Find rearrangements in a one-to-one alignment of 2 genomes")
        .after_help(
            r###"
Reads pair-wise local alignments of genome 1 (first sequence of each block)
and genome 2 (second sequence), links alignment ends that abut each other,
and prints every linked group that is not explained by collinear alignment,
a scaffold end join, or an insertion filling an assembly gap.

Output, one rearrangement per line:

    name:coordinate[     start of an alignment
    name:coordinate]     end of an alignment
    gapLEN1,LEN2         assembly gaps between the neighbouring ends

Coordinates are zero-based on the forward strand.

Notes:
* The alignment should be one-to-one, e.g. from `last-split` run both ways
* Gap files are AGP or UCSC `gap` tables; only N/U gaps are used
* Without a gap file, no assembly gaps are assumed for that genome

Examples:
1. Plain run:
   rearr find hg19-mm10.maf

2. With assembly gaps of both genomes:
   rearr find hg19-mm10.maf -1 hg19.agp -2 mm10.gap.txt.gz

3. Only link alignment ends closer than 1 Mbp:
   rearr find hg19-mm10.maf -d 1000000

"###,
        );
    super::graph_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let (gaps, config) = super::graph_config(args)?;

    //----------------------------
    // Ops
    //----------------------------
    let reader = rearr::reader(infile).with_context(|| format!("could not open {}", infile))?;
    let analysis = Analysis::from_maf(reader, &gaps, &config)
        .with_context(|| format!("failed to process {}", infile))?;

    for (class, count) in analysis.class_counts() {
        log::info!("{} {} chains", count, class);
    }

    //----------------------------
    // Output
    //----------------------------
    let mut writer = rearr::writer(args.get_one::<String>("outfile").unwrap())?;
    analysis.write_report(&mut writer, &gaps)?;
    writer.flush()?;

    Ok(())
}
