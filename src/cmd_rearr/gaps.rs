use anyhow::Context;
use clap::*;
use rearr::libs::gap::GenomeGaps;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("gaps")
        .about("Show the assembly gaps read from an AGP or gap file")
        .after_help(
            r###"
Prints the gaps that `find` would use, sorted, one per line:

    name  begin  end  ordered|unordered

Coordinates are zero-based, half-open. Unordered gaps lie on sequences whose
order or orientation is not trusted; only those prevent two alignment ends
from being linked.

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("AGP file or UCSC gap table"),
        )
        .arg(
            Arg::new("unordered")
                .long("unordered")
                .short('u')
                .action(ArgAction::SetTrue)
                .help("Only list unordered gaps"),
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

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let gaps = GenomeGaps::from_path(infile)
        .with_context(|| format!("failed to read gaps from {}", infile))?;

    let set = if args.get_flag("unordered") {
        &gaps.unordered
    } else {
        &gaps.all
    };

    let mut writer = rearr::writer(args.get_one::<String>("outfile").unwrap())?;
    for gap in set.iter() {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\n",
            gap.name,
            gap.begin,
            gap.end,
            if gap.is_ordered {
                "ordered"
            } else {
                "unordered"
            }
        ))?;
    }
    writer.flush()?;

    Ok(())
}
