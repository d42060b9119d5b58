use std::io::BufRead;

use anyhow::{bail, Context, Result};

/// Reader for tab-delimited text input with optional headers.
///
/// Columns can be addressed by header name, by 1-based index, or by `0`
/// for the last column, matching the `--col` conventions of the command
/// drivers. Blank lines are skipped.
pub struct TabbedReader<R: BufRead> {
    input: R,
    headers: Vec<String>,
    line_no: usize,
}

/// One data line, split into fields.
pub struct Line {
    pub fields: Vec<String>,
    pub number: usize,
}

impl Line {
    /// Field by 0-based column index; short lines are an error.
    pub fn get(&self, idx: usize) -> Result<&str> {
        match self.fields.get(idx) {
            Some(field) => Ok(field),
            None => bail!(
                "line {} has only {} fields, needed column {}",
                self.number,
                self.fields.len(),
                idx + 1
            ),
        }
    }
}

impl<R: BufRead> TabbedReader<R> {
    /// Open input whose first line is a tab-delimited header row.
    pub fn new(mut input: R) -> Result<Self> {
        let mut header = String::new();
        let n = input
            .read_line(&mut header)
            .context("cannot read header line")?;
        if n == 0 {
            bail!("input is empty, expected a header line");
        }
        let headers = split_fields(&header);
        Ok(TabbedReader {
            input,
            headers,
            line_no: 1,
        })
    }

    /// Open headerless input with a known column count; columns are
    /// addressable only by index.
    pub fn headerless(input: R, columns: usize) -> Self {
        TabbedReader {
            input,
            headers: (1..=columns).map(|i| i.to_string()).collect(),
            line_no: 0,
        }
    }

    /// Resolve a column spec to a 0-based index: a header name, a
    /// 1-based index, or `0` meaning the last column.
    pub fn find_field(&self, spec: &str) -> Result<usize> {
        let spec = spec.trim();
        if let Ok(idx) = spec.parse::<usize>() {
            if idx == 0 {
                if self.headers.is_empty() {
                    bail!("input has no columns");
                }
                return Ok(self.headers.len() - 1);
            }
            if idx > self.headers.len() {
                bail!(
                    "column {} requested but input has only {} columns",
                    idx,
                    self.headers.len()
                );
            }
            return Ok(idx - 1);
        }
        match self.headers.iter().position(|h| h == spec) {
            Some(idx) => Ok(idx),
            None => bail!(
                "column \"{}\" not found; input columns are: {}",
                spec,
                self.headers.join(", ")
            ),
        }
    }

    /// Read the next non-blank data line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            let n = self
                .input
                .read_line(&mut buf)
                .with_context(|| format!("read error after line {}", self.line_no))?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if buf.trim().is_empty() {
                continue;
            }
            return Ok(Some(Line {
                fields: split_fields(&buf),
                number: self.line_no,
            }));
        }
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split('\t')
        .map(str::to_string)
        .collect()
}
