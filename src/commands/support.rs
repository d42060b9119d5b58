use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::SequenceBatch;
use crate::coreseed::CoreDir;
use crate::sequence::Sequence;
use crate::tabbed::TabbedReader;
use crate::writer::{Format, SequenceWriter};

/// Open `--input` or the standard input as buffered text.
pub(crate) fn open_input(input: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(std::io::stdin()))),
    }
}

/// Create the output directory if it does not exist yet.
pub(crate) fn ensure_dir(dir: &Path, verbose: bool) -> Result<()> {
    if !dir.is_dir() {
        if verbose {
            eprintln!("Creating directory {}.", dir.display());
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
    }
    Ok(())
}

/// Read a whole FASTA stream (plain or gzipped) into owned sequences.
pub(crate) fn read_fasta(input: Box<dyn BufRead>) -> Result<Vec<Sequence>> {
    let (reader, _compression) =
        niffler::get_reader(Box::new(input)).context("cannot read sequence input")?;
    let reader = bio::io::fasta::Reader::new(BufReader::new(reader));
    let mut sequences = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed FASTA input")?;
        let residues = std::str::from_utf8(record.seq())
            .context("non-text residues in FASTA input")?
            .to_string();
        sequences.push(Sequence::new(
            record.id(),
            record.desc().unwrap_or(""),
            residues,
        ));
    }
    Ok(sequences)
}

/// Look up a peg and store it in the batch as a positive example,
/// suppressing it in its genome. Unknown genomes and pegs are skipped.
pub(crate) fn store_positive(
    batch: &mut SequenceBatch,
    core: &mut CoreDir,
    peg_id: &str,
    verbose: bool,
) -> Result<()> {
    if let Some(pegs) = core.pegs_for_feature(peg_id)? {
        match pegs.get(peg_id).cloned() {
            Some(seq) => batch.store_sequence(&seq, pegs, "1"),
            None => {
                if verbose {
                    eprintln!("{} not found in genome.", peg_id);
                }
            }
        }
    }
    Ok(())
}

/// For every positive already in the batch, sample up to `extra`
/// unconsumed neighbors from the same genome and store them as
/// counter-examples. Short reads are fine; a genome with nothing left
/// simply contributes fewer negatives.
pub(crate) fn add_counter_examples(
    batch: &mut SequenceBatch,
    core: &mut CoreDir,
    extra: usize,
) -> Result<()> {
    if extra == 0 {
        return Ok(());
    }
    let targets: Vec<Sequence> = batch.iter().cloned().collect();
    let mut buffer: Vec<Sequence> = Vec::with_capacity(extra);
    for target in targets {
        let pegs = match core.pegs_for_feature(&target.id)? {
            Some(pegs) => pegs,
            None => continue,
        };
        buffer.clear();
        pegs.find_close(&target, extra, &mut buffer);
        for neg in &buffer {
            batch.store_sequence(neg, pegs, "0");
        }
    }
    Ok(())
}

/// Shuffle a completed batch and write it out as a training set. When
/// `fix` is 0 the column count is computed from the batch itself.
pub(crate) fn write_training<W: Write>(
    mut batch: SequenceBatch,
    format: Format,
    fix: usize,
    sink: W,
    verbose: bool,
) -> Result<()> {
    let count = batch.len();
    if verbose {
        eprintln!("Shuffling {} sequences.", count);
    }
    batch.shuffle(count);
    let width = if fix > 0 { fix } else { batch.longest().max(1) };
    if verbose {
        eprintln!("Producing output with {} data columns.", width);
    }
    let mut writer = SequenceWriter::training(format, sink, width)?;
    for seq in batch.iter() {
        writer.write_seq(seq)?;
    }
    writer.close()?;
    Ok(())
}

/// Write the sequences as prediction input for each model named in the
/// control file (model name and input width per line, no headers).
pub(crate) fn write_prediction_files(
    sequences: &[Sequence],
    control: &Path,
    out_dir: &Path,
    format: Format,
    verbose: bool,
) -> Result<()> {
    let file = File::open(control)
        .with_context(|| format!("cannot open control file {}", control.display()))?;
    let mut reader = TabbedReader::headerless(BufReader::new(file), 2);
    while let Some(line) = reader.next_line()? {
        let model = line.get(0)?;
        let width: usize = line
            .get(1)?
            .trim()
            .parse()
            .with_context(|| format!("control file line {}: bad model width", line.number))?;
        let out_file = out_dir.join(format!("{}{}", model, format.suffix()));
        if verbose {
            eprintln!(
                "Creating output in {} with width {}.",
                out_file.display(),
                width
            );
        }
        let sink = File::create(&out_file)
            .with_context(|| format!("cannot create {}", out_file.display()))?;
        let mut writer = SequenceWriter::prediction(format, sink, width)?;
        for seq in sequences {
            writer.write_seq(seq)?;
        }
        writer.close()?;
    }
    Ok(())
}

/// Progress bar for a scan over every genome in the directory.
pub(crate) fn genome_progress(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    fn tiny_org_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let peg_dir = dir.path().join("100.1/Features/peg");
        fs::create_dir_all(&peg_dir).unwrap();
        fs::write(
            peg_dir.join("fasta"),
            concat!(
                ">fig|100.1.peg.1 target\nMSWVAKYLPT\n",
                ">fig|100.1.peg.2 close\nMPRLLAAA\n",
                ">fig|100.1.peg.3 far\nMPR\n",
            ),
        )
        .unwrap();
        dir
    }

    #[test]
    fn positives_then_counter_examples_then_training_rows() {
        let dir = tiny_org_dir();
        let mut core = CoreDir::new(false, dir.path());
        let mut batch = SequenceBatch::with_capacity(4);

        store_positive(&mut batch, &mut core, "fig|100.1.peg.1", false).unwrap();
        store_positive(&mut batch, &mut core, "fig|100.1.peg.99", false).unwrap();
        store_positive(&mut batch, &mut core, "fig|999.9.peg.1", false).unwrap();
        assert_eq!(batch.len(), 1);

        add_counter_examples(&mut batch, &mut core, 1).unwrap();
        assert_eq!(batch.len(), 2);
        let labels: Vec<&str> = batch.iter().map(|seq| seq.comment.as_str()).collect();
        assert!(labels.contains(&"1") && labels.contains(&"0"));

        let mut out = Vec::new();
        write_training(batch, Format::Tab, 0, &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        // computed width is the longest sequence, 10 residues
        assert_eq!(lines.next().unwrap().split('\t').count(), 11);
        let rows: HashSet<&str> = lines.collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|row| row.starts_with("1.0\tM\tS\tW")));
        assert!(rows.iter().any(|row| row.starts_with("0.0\tM\tP\tR")));
    }

    #[test]
    fn counter_examples_are_never_reused_across_positives() {
        let dir = tiny_org_dir();
        let mut core = CoreDir::new(false, dir.path());
        let mut batch = SequenceBatch::with_capacity(6);
        store_positive(&mut batch, &mut core, "fig|100.1.peg.1", false).unwrap();
        store_positive(&mut batch, &mut core, "fig|100.1.peg.2", false).unwrap();

        // only one unconsumed peg remains; the second positive gets nothing
        add_counter_examples(&mut batch, &mut core, 2).unwrap();
        let ids: Vec<&str> = batch.iter().map(|seq| seq.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        let unique: HashSet<&&str> = ids.iter().collect();
        assert_eq!(unique.len(), 3);
    }
}
