use anyhow::Context;
use clap::*;
use rearr::libs::pipeline::Analysis;
use std::io::Write;

pub fn make_subcommand() -> Command {
    let cmd = Command::new("edges")
        .about("Show alignment ends and their facing links")
        .after_help(
            r###"
Prints one tab-separated row per alignment end after facing links are
resolved:

    serial  genome  name  coordinate  start|end  aligned  facing  class

`facing` is -1 when the end abuts no other alignment. `class` is the class
of the chain the end belongs to.

Examples:
1. Why are two alignments not linked?
   rearr edges hg19-mm10.maf -1 hg19.agp | grep chr7

"###,
        );
    super::graph_args(cmd)
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let (gaps, config) = super::graph_config(args)?;

    let reader = rearr::reader(infile).with_context(|| format!("could not open {}", infile))?;
    let analysis = Analysis::from_maf(reader, &gaps, &config)
        .with_context(|| format!("failed to process {}", infile))?;

    let mut class_of = vec![None; analysis.edges.len()];
    for (chain, class) in &analysis.chains {
        for &serial in &chain.edges {
            class_of[serial] = Some(*class);
        }
    }

    let mut writer = rearr::writer(args.get_one::<String>("outfile").unwrap())?;
    for edge in &analysis.edges {
        let facing = edge
            .facing
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-1".to_string());
        let class = class_of[edge.serial]
            .map(|c| c.as_str())
            .unwrap_or("-");
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            edge.serial,
            edge.genome,
            edge.name,
            edge.coordinate,
            edge.end_type.as_str(),
            edge.aligned,
            facing,
            class
        ))?;
    }
    writer.flush()?;

    Ok(())
}
