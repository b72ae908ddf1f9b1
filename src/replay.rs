//! # Recorded Sample Replay
//!
//! Streams recorded accelerometer data into the classifier for offline
//! evaluation. The input is a whitespace-delimited text file with one sample
//! per row:
//!
//! ```text
//! TIME X Y Z TRUTH
//! ```
//!
//! where TIME is seconds since the start of the recording, X/Y/Z are the
//! acceleration axes in g, and TRUTH is the reference sleep-stage label the
//! recording was annotated with. Rows must be ordered by time and spaced at
//! the configured sample rate; the reader does not validate timing.
//!
//! Rows are parsed one at a time while iterating, so replaying a full night
//! of data needs no more memory than a single line buffer.

use crate::AccelSample;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a recorded data file.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Reading the underlying file failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A row did not hold exactly 5 numeric fields
    #[error("line {line}: expected 5 numeric fields (TIME X Y Z TRUTH)")]
    Parse { line: usize },
}

/// Streaming reader over a recorded data file.
///
/// Iterates `Result<AccelSample, ReplayError>`; blank lines are skipped.
pub struct Replay<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl Replay<BufReader<File>> {
    /// Open a recorded data file for replay.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> Replay<R> {
    /// Wrap any buffered reader producing rows in the recorded format.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for Replay<R> {
    type Item = Result<AccelSample, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_row(&line, self.line_no));
        }
    }
}

/// Parse one non-empty row into a sample; exactly 5 numeric fields required.
fn parse_row(line: &str, line_no: usize) -> Result<AccelSample, ReplayError> {
    let mut values = [0.0f32; 5];
    let mut fields = line.split_whitespace();

    for slot in values.iter_mut() {
        *slot = fields
            .next()
            .and_then(|field| field.parse().ok())
            .ok_or(ReplayError::Parse { line: line_no })?;
    }
    if fields.next().is_some() {
        return Err(ReplayError::Parse { line: line_no });
    }

    Ok(AccelSample {
        time_s: values[0],
        accel: [values[1], values[2], values[3]],
        truth: values[4],
    })
}
