use clap::*;
use pmaw::libs::strategy::Strategy;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("kernel")
        .about("Markovian string kernel between two texts")
        .after_help(
            r###"
Compares the observed frequency of every word with the one expected from its
two (k-1)-mers, corrected for text length. Output columns:
1. N: cross term
2. D1, D2: self terms of each text
3. score: N / sqrt(D1 * D2), NaN when undefined

--minlen and --words are ignored.

Examples:
1. pmaw kernel a.fa b.fa -p 8
"###,
        );

    super::common_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let report = super::run_strategy(args, Strategy::Kernel)?;

    let score = match report.kernel_score() {
        Some(score) => score,
        None => {
            log::warn!(
                "kernel score is undefined: D1 * D2 is not positive (D1 = {}, D2 = {})",
                report.kernel.d1,
                report.kernel.d2
            );
            f64::NAN
        }
    };

    let mut writer = pmaw::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_fmt(format_args!("#N\tD1\tD2\tscore\n"))?;
    writer.write_fmt(format_args!(
        "{}\t{}\t{}\t{}\n",
        report.kernel.n, report.kernel.d1, report.kernel.d2, score
    ))?;
    writer.flush()?;

    Ok(())
}
