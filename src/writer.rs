use std::io::{BufWriter, Write};

use clap::ValueEnum;

use crate::error::Result;
use crate::sequence::Sequence;

/// Supported dataset encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// FASTA with the class label in the description
    Fasta,
    /// tab-delimited fixed-width columns, label leading
    Tab,
    /// comma-delimited fixed-width columns, label trailing
    Comma,
}

impl Format {
    /// File suffix for outputs in this format.
    pub fn suffix(self) -> &'static str {
        match self {
            Format::Fasta => ".fa",
            Format::Tab => ".tbl",
            Format::Comma => ".csv",
        }
    }
}

/// Whether the leading/trailing metadata column carries the class label
/// (training sets) or the sequence identifier (prediction sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Training,
    Prediction,
}

/// Serializes labeled sequences in one of the supported encodings.
///
/// The delimited formats pad every row to a fixed number of residue
/// columns: the column right after the last real residue holds `*`, and
/// the rest hold `-`. Sequences longer than the width are truncated
/// without a `*`. The header row is written at construction time.
pub struct SequenceWriter<W: Write> {
    format: Format,
    mode: Mode,
    width: usize,
    out: BufWriter<W>,
    line: String,
}

impl<W: Write> SequenceWriter<W> {
    /// Open a writer for a training set: delimited rows carry a
    /// `1.0`/`0.0` or `0`/`1` class column derived from the label.
    pub fn training(format: Format, sink: W, width: usize) -> Result<Self> {
        SequenceWriter::open(format, Mode::Training, sink, width)
    }

    /// Open a writer for a prediction set: the class column is replaced
    /// by the sequence identifier, usable as row metadata downstream.
    pub fn prediction(format: Format, sink: W, width: usize) -> Result<Self> {
        SequenceWriter::open(format, Mode::Prediction, sink, width)
    }

    fn open(format: Format, mode: Mode, sink: W, width: usize) -> Result<Self> {
        let mut writer = SequenceWriter {
            format,
            mode,
            width,
            out: BufWriter::new(sink),
            line: String::with_capacity(width * 4 + 10),
        };
        writer.write_header()?;
        Ok(writer)
    }

    fn write_header(&mut self) -> Result<()> {
        self.line.clear();
        match (self.format, self.mode) {
            (Format::Fasta, _) => return Ok(()),
            (Format::Tab, Mode::Training) => {
                self.line.push_str("found\t");
                format_header(&mut self.line, self.width, '\t');
            }
            (Format::Tab, Mode::Prediction) => {
                self.line.push_str("seq_id\t");
                format_header(&mut self.line, self.width, '\t');
            }
            (Format::Comma, Mode::Training) => {
                format_header(&mut self.line, self.width, ',');
                self.line.push_str(",class");
            }
            (Format::Comma, Mode::Prediction) => {
                format_header(&mut self.line, self.width, ',');
                self.line.push_str(",peg_id");
            }
        }
        writeln!(self.out, "{}", self.line)?;
        Ok(())
    }

    /// Write one sequence record.
    pub fn write(&mut self, id: &str, label: &str, residues: &str) -> Result<()> {
        self.line.clear();
        match self.format {
            Format::Fasta => {
                writeln!(self.out, ">{} {}", id, label)?;
                writeln!(self.out, "{}", residues)?;
                return Ok(());
            }
            Format::Tab => {
                match self.mode {
                    Mode::Training => self
                        .line
                        .push_str(if label == "0" { "0.0\t" } else { "1.0\t" }),
                    Mode::Prediction => {
                        self.line.push_str(id);
                        self.line.push('\t');
                    }
                }
                format_cells(&mut self.line, residues, self.width, '\t');
            }
            Format::Comma => {
                format_cells(&mut self.line, residues, self.width, ',');
                self.line.push(',');
                match self.mode {
                    Mode::Training => self.line.push_str(label),
                    Mode::Prediction => self.line.push_str(id),
                }
            }
        }
        writeln!(self.out, "{}", self.line)?;
        Ok(())
    }

    pub fn write_seq(&mut self, seq: &Sequence) -> Result<()> {
        self.write(&seq.id, &seq.comment, &seq.residues)
    }

    /// Flush and release the output sink. Dropping the writer also
    /// flushes, but through here a disk-full error still surfaces.
    pub fn close(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Fit a residue string to `width` delimited columns: residues first,
/// then a single `*` end marker, then `-` padding. An empty sequence
/// gets `-` in the first column and no marker.
fn format_cells(line: &mut String, residues: &str, width: usize, delim: char) {
    let bytes = residues.as_bytes();
    let n = bytes.len();
    line.push(if n > 0 { bytes[0] as char } else { '-' });
    for i in 1..width {
        let chr = if i < n {
            bytes[i] as char
        } else if i == n {
            '*'
        } else {
            '-'
        };
        line.push(delim);
        line.push(chr);
    }
}

/// Column names `p1..pN` for the delimited headers.
fn format_header(line: &mut String, width: usize, delim: char) {
    line.push_str("p1");
    for i in 2..=width {
        line.push(delim);
        line.push('p');
        line.push_str(&i.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: Format, mode: Mode, width: usize, rows: &[(&str, &str, &str)]) -> String {
        let mut buf = Vec::new();
        let mut writer = match mode {
            Mode::Training => SequenceWriter::training(format, &mut buf, width).unwrap(),
            Mode::Prediction => SequenceWriter::prediction(format, &mut buf, width).unwrap(),
        };
        for (id, label, residues) in rows {
            writer.write(id, label, residues).unwrap();
        }
        writer.close().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn fasta_rows() {
        let text = render(
            Format::Fasta,
            Mode::Training,
            0,
            &[("fig|1.1.peg.1", "1", "MAB"), ("fig|1.1.peg.2", "0", "MC")],
        );
        assert_eq!(text, ">fig|1.1.peg.1 1\nMAB\n>fig|1.1.peg.2 0\nMC\n");
    }

    #[test]
    fn tab_training_header_and_labels() {
        let text = render(
            Format::Tab,
            Mode::Training,
            5,
            &[("a", "1", "MAB"), ("b", "0", "MC")],
        );
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "found\tp1\tp2\tp3\tp4\tp5");
        assert_eq!(lines.next().unwrap(), "1.0\tM\tA\tB\t*\t-");
        assert_eq!(lines.next().unwrap(), "0.0\tM\tC\t*\t-\t-");
    }

    #[test]
    fn comma_training_trails_raw_label() {
        let text = render(Format::Comma, Mode::Training, 4, &[("a", "0", "MAB")]);
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "p1,p2,p3,p4,class");
        assert_eq!(lines.next().unwrap(), "M,A,B,*,0");
    }

    #[test]
    fn prediction_modes_carry_the_id() {
        let tab = render(Format::Tab, Mode::Prediction, 3, &[("pegA", "x", "MA")]);
        assert_eq!(tab, "seq_id\tp1\tp2\tp3\npegA\tM\tA\t*\n");
        let comma = render(Format::Comma, Mode::Prediction, 3, &[("pegA", "x", "MA")]);
        assert_eq!(comma, "p1,p2,p3,peg_id\nM,A,*,pegA\n");
    }

    #[test]
    fn truncation_drops_the_end_marker() {
        let text = render(Format::Comma, Mode::Training, 3, &[("a", "1", "MABCD")]);
        assert_eq!(text.lines().nth(1).unwrap(), "M,A,B,1");
    }

    #[test]
    fn empty_sequence_pads_without_marker() {
        let text = render(Format::Comma, Mode::Training, 3, &[("a", "1", "")]);
        assert_eq!(text.lines().nth(1).unwrap(), "-,-,-,1");
    }

    #[test]
    fn suffixes() {
        assert_eq!(Format::Fasta.suffix(), ".fa");
        assert_eq!(Format::Tab.suffix(), ".tbl");
        assert_eq!(Format::Comma.suffix(), ".csv");
    }
}
