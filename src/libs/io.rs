use crate::libs::text::TextIndex;
use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};

/// ```
/// use std::io::BufRead;
/// let reader = pmaw::reader("tests/fasta/t1.fa").unwrap();
/// assert_eq!(reader.lines().count(), 4);
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// Loads every record of a FASTA file into one text, records separated by
/// a boundary symbol.
///
/// ```
/// let text = pmaw::load_text("tests/fasta/t1.fa").unwrap();
/// assert_eq!(text.len(), 9);
/// ```
pub fn load_text(input: &str) -> anyhow::Result<TextIndex> {
    let mut fa_in = noodles_fasta::io::Reader::new(reader(input)?);

    let mut seqs = vec![];
    for result in fa_in.records() {
        let record = result.with_context(|| format!("malformed FASTA in {}", input))?;
        seqs.push(record.sequence().get(..).unwrap_or_default().to_vec());
    }
    if seqs.is_empty() {
        log::warn!("{}: no FASTA records", input);
    }

    Ok(TextIndex::from_records(seqs.iter().map(|s| s.as_slice())))
}
