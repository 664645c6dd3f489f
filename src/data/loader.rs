//! Pulse file loader
//!
//! Reads whitespace-delimited pulse records of the form
//!
//! ```text
//! # string om time[ns] charge[pe]
//! 1 23 10433.0 1.275
//! ```
//!
//! Only the third (time) and fourth (charge) fields are used. Lines that
//! cannot be parsed are dropped and counted, never fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::point_set::{PointSet, Sample};
use crate::error::{D2Error, Result};

/// Line accounting for a single load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadSummary {
    /// Data lines turned into samples
    pub accepted: usize,
    /// Lines starting with the comment marker
    pub comments: usize,
    /// Non-empty data lines that failed to parse
    pub skipped: usize,
}

/// Loaded pulses: raw samples plus the normalized 2D point set
#[derive(Debug, Clone)]
pub struct PulseData {
    pub samples: Vec<Sample>,
    pub points: PointSet,
    pub summary: LoadSummary,
}

impl PulseData {
    /// Normalized time column, in file order
    pub fn normalized_times(&self) -> Vec<f64> {
        self.points.column(0).to_vec()
    }
}

/// Parser settings for pulse files
#[derive(Debug, Clone)]
pub struct PulseLoader {
    pub comment_marker: char,
    pub time_field: usize,
    pub charge_field: usize,
}

impl Default for PulseLoader {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            time_field: 2,
            charge_field: 3,
        }
    }
}

impl PulseLoader {
    /// Load and normalize a pulse file
    pub fn load(&self, path: &Path) -> Result<PulseData> {
        let file = File::open(path)?;
        self.read(BufReader::new(file), &path.display().to_string())
    }

    /// Load and normalize pulses from any buffered reader.
    ///
    /// `source` only labels log lines and the error for an empty input.
    pub fn read<R: BufRead>(&self, mut reader: R, source: &str) -> Result<PulseData> {
        let min_fields = self.time_field.max(self.charge_field) + 1;
        let mut samples = Vec::new();
        let mut summary = LoadSummary::default();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            // Bytes that are not UTF-8 make the line malformed, not the file
            let line = match std::str::from_utf8(&buf) {
                Ok(text) => text.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    summary.skipped += 1;
                    log::debug!("{}:{}: skipping non-UTF-8 line ({})", source, line_no, e);
                    continue;
                }
            };
            if line.starts_with(self.comment_marker) {
                summary.comments += 1;
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            match self.parse_fields(&fields, min_fields) {
                Some(sample) => {
                    samples.push(sample);
                    summary.accepted += 1;
                }
                None => {
                    summary.skipped += 1;
                    log::debug!("{}:{}: skipping malformed line {:?}", source, line_no, line);
                }
            }
        }

        if samples.is_empty() {
            return Err(D2Error::Data(source.to_string()));
        }
        if summary.skipped > 0 {
            log::warn!(
                "{}: skipped {} malformed line(s), kept {}",
                source,
                summary.skipped,
                summary.accepted
            );
        }
        log::info!("Loaded {} pulses from {}", samples.len(), source);

        let points = PointSet::from_samples(&samples).normalized();
        Ok(PulseData {
            samples,
            points,
            summary,
        })
    }

    fn parse_fields(&self, fields: &[&str], min_fields: usize) -> Option<Sample> {
        if fields.len() < min_fields {
            return None;
        }
        let time: f64 = fields[self.time_field].parse().ok()?;
        let charge: f64 = fields[self.charge_field].parse().ok()?;
        if !time.is_finite() || !charge.is_finite() {
            return None;
        }
        Some(Sample { time, charge })
    }
}

/// Load a pulse file with the default record layout
pub fn load_pulses(path: &Path) -> Result<PulseData> {
    PulseLoader::default().load(path)
}
