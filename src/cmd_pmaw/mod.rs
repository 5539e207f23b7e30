//! Subcommand modules for the `pmaw` binary.

use clap::*;
use pmaw::libs::run::{Report, Run};
use pmaw::libs::sink::SharedSink;
use pmaw::libs::strategy::Strategy;
use pmaw::libs::text::TextIndex;

pub mod kernel;
pub mod lw;
pub mod maw;
pub mod present;
pub mod rw;

/// Arguments shared by every subcommand.
pub fn common_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("text1")
            .required(true)
            .index(1)
            .help("First input FASTA file, .gz ok, [stdin] for screen"),
    )
    .arg(
        Arg::new("text2")
            .required(true)
            .index(2)
            .help("Second input FASTA file"),
    )
    .arg(
        Arg::new("literal")
            .long("literal")
            .action(ArgAction::SetTrue)
            .help("Treat the inputs as sequences instead of filenames"),
    )
    .arg(
        Arg::new("minlen")
            .long("minlen")
            .num_args(1)
            .default_value("0")
            .value_parser(value_parser!(usize))
            .help("Only report words of at least this length"),
    )
    .arg(
        Arg::new("parallel")
            .long("parallel")
            .short('p')
            .num_args(1)
            .default_value("1")
            .value_parser(value_parser!(usize))
            .help("Number of threads"),
    )
    .arg(
        Arg::new("words")
            .long("words")
            .num_args(1)
            .help("Append the words found in both texts to this file"),
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

fn load(input: &str, literal: bool) -> anyhow::Result<TextIndex> {
    if literal {
        Ok(TextIndex::from_ascii(input.as_bytes()))
    } else {
        pmaw::load_text(input)
    }
}

/// Loads both texts and runs `strategy` on them.
pub fn run_strategy(args: &ArgMatches, strategy: Strategy) -> anyhow::Result<Report> {
    let literal = args.get_flag("literal");
    let minlen = *args.get_one::<usize>("minlen").unwrap();
    let parallel = *args.get_one::<usize>("parallel").unwrap();

    let infile1 = args.get_one::<String>("text1").unwrap();
    let infile2 = args.get_one::<String>("text2").unwrap();
    if !literal && infile1 == "stdin" && infile2 == "stdin" {
        anyhow::bail!("only one input can be read from stdin");
    }

    let (text1, text2) = rayon::join(|| load(infile1, literal), || load(infile2, literal));
    let (text1, text2) = (text1?, text2?);
    if text1.is_empty() || text2.is_empty() {
        log::warn!("empty input text");
    }

    let mut run = Run::new(&text1, &text2).minlen(minlen).cores(parallel);
    if let Some(words) = args.get_one::<String>("words") {
        run = run.words(SharedSink::append(words)?);
    }

    Ok(run.execute(strategy)?)
}

/// Writes the three word counts under a header.
pub fn write_counts(args: &ArgMatches, report: &Report) -> anyhow::Result<()> {
    let mut writer = pmaw::writer(args.get_one::<String>("outfile").unwrap())?;

    writer.write_fmt(format_args!("#both\ttext1\ttext2\n"))?;
    writer.write_fmt(format_args!(
        "{}\t{}\t{}\n",
        report.counts.both, report.counts.text1, report.counts.text2
    ))?;
    writer.flush()?;

    Ok(())
}
