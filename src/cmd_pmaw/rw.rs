use clap::*;
use pmaw::libs::strategy::Strategy;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("rw")
        .about("Counts relative words of two texts")
        .after_help(
            r###"
A relative word aWb occurs at most --f1 times in a text, while aW and Wb
both occur at least --f2 times. With the defaults (f1 = 0, f2 = 1) these are
exactly the minimal absent words.

Examples:
1. Rare words flanked by frequent ones:
   pmaw rw a.fa b.fa --f1 1 --f2 5
"###,
        )
        .arg(
            Arg::new("f1")
                .long("f1")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(u32))
                .help("Maximal frequency of the word"),
        )
        .arg(
            Arg::new("f2")
                .long("f2")
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(u32))
                .help("Minimal frequency of both flanks"),
        );

    super::common_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let f1 = *args.get_one::<u32>("f1").unwrap();
    let f2 = *args.get_one::<u32>("f2").unwrap();
    if f1 >= f2 {
        log::warn!("--f1 {} is not below --f2 {}", f1, f2);
    }

    let report = super::run_strategy(args, Strategy::RelativeWord { f1, f2 })?;
    super::write_counts(args, &report)
}
