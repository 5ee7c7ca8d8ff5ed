extern crate clap;
use clap::*;

mod cmd_rearr;

fn main() -> anyhow::Result<()> {
    let app = Command::new("rearr")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`rearr` - find genome rearrangements in pairwise alignments")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more: -v for progress, -vv for every chain"),
        )
        .subcommand(cmd_rearr::find::make_subcommand())
        .subcommand(cmd_rearr::edges::make_subcommand())
        .subcommand(cmd_rearr::gaps::make_subcommand())
        .after_help(
            r###"Subcommands:

* find  - Report rearranged chains of a one-to-one alignment
* edges - Show alignment ends and their facing links
* gaps  - Show the assembly gaps read from an AGP or gap file

Input files may be gzipped; use `stdin` to read standard input.

"###,
        );

    let matches = app.get_matches();

    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    match matches.subcommand() {
        Some(("find", sub_matches)) => cmd_rearr::find::execute(sub_matches),
        Some(("edges", sub_matches)) => cmd_rearr::edges::execute(sub_matches),
        Some(("gaps", sub_matches)) => cmd_rearr::gaps::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
