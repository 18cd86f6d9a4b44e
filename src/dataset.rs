//! Dataset loading and the derived depth index
//!
//! A [`Dataset`] is built once from delimited text and is read-only
//! thereafter: records plus a sorted, duplicate-free index of every depth
//! that appears in the table. Computations take the dataset by shared
//! reference, so concurrent callers need no synchronization.

use std::path::Path;

use tracing::{info, warn};

use crate::constants::DEPTH_EPSILON;
use crate::depth::{filter_rows, DepthMatch};
use crate::record::{self, Column, DecoRecord};
use crate::{parser, Error, Result};

/// Parsed decompression table: records and their depth index
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DecoRecord>,
    depths: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from delimited text. Never fails; malformed input
    /// degrades to fewer records.
    pub fn from_csv(text: &str) -> Self {
        let rows = parser::parse(text);
        let records = record::to_records(&rows);
        let depths = build_depth_index(&records);
        if records.is_empty() {
            warn!("Dataset contains no records");
        } else {
            info!(
                "Loaded {} records across {} distinct depths",
                records.len(),
                depths.len()
            );
        }
        Dataset { records, depths }
    }

    /// Read a dataset from a file
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read dataset {}", path.display()), e))?;
        Ok(Self::from_csv(&text))
    }

    /// All records, in table order
    pub fn records(&self) -> &[DecoRecord] {
        &self.records
    }

    /// Distinct tabulated depths, ascending
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Number of records in the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a target depth to the row set at the nearest deeper tabulated
    /// depth. See [`filter_rows`].
    pub fn filter_by_depth(&self, target: f64) -> DepthMatch {
        filter_rows(target, &self.records, &self.depths)
    }
}

fn build_depth_index(records: &[DecoRecord]) -> Vec<f64> {
    let mut depths: Vec<f64> = records
        .iter()
        .filter_map(|r| r.numeric(Column::Depth))
        .collect();
    depths.sort_by(f64::total_cmp);
    depths.dedup_by(|a, b| (*a - *b).abs() < DEPTH_EPSILON);
    depths
}
