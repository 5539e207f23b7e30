use clap::*;
use pmaw::libs::strategy::Strategy;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("lw")
        .about("Weighted-length distance between two texts")
        .after_help(
            r###"
Sums 1/|w|^2 over the MAWs w of each text, minus twice the sum over MAWs
shared by both. Identical texts score 0.

Examples:
1. pmaw lw --literal ACGT ACGA

2. pmaw lw a.fa b.fa -p 4 -o lw.tsv
"###,
        );

    super::common_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let report = super::run_strategy(args, Strategy::AbsoluteMaw)?;

    let mut writer = pmaw::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_fmt(format_args!("#lw\n"))?;
    writer.write_fmt(format_args!("{:.6}\n", report.weighted_length))?;
    writer.flush()?;

    Ok(())
}
