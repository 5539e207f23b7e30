use clap::*;
use pmaw::libs::strategy::Strategy;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("present")
        .about("Counts MAWs of the first text that occur in the second")
        .after_help(
            r###"
Reports, in the `both` column, the minimal absent words of <text1> that are
substrings of <text2>. The other two columns are always 0.

Examples:
1. Words missing from a reference but present in a sample:
   pmaw present ref.fa sample.fa --words present.txt
"###,
        );

    super::common_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let report = super::run_strategy(args, Strategy::AsymmetricPresence)?;
    super::write_counts(args, &report)
}
