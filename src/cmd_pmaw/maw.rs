use clap::*;
use pmaw::libs::strategy::Strategy;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("maw")
        .about("Counts minimal absent words of two texts")
        .after_help(
            r###"
A minimal absent word (MAW) of a text is a word that does not occur in it,
while both its longest proper prefix and suffix do. Only A, C, G, T form
words; any other character, and every FASTA record boundary, separates them.

Output is one TSV line with the number of MAWs shared by both texts and the
number of MAWs of each text.

Examples:
1. Two literal sequences:
   pmaw maw --literal ACGT ACGA

2. Two genomes on 8 threads, keeping shared MAWs of length 10 or more:
   pmaw maw a.fa.gz b.fa.gz -p 8 --minlen 10 --words shared.txt
"###,
        );

    super::common_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let report = super::run_strategy(args, Strategy::AbsoluteMaw)?;
    super::write_counts(args, &report)
}
