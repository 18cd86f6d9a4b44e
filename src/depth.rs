//! Depth snapping and row-set resolution
//!
//! Requested depths rarely land exactly on a tabulated depth, so every
//! lookup rounds UP to the nearest deeper tabulated depth; rounding down
//! would select a shorter schedule than the dive requires. The same
//! ascending-scan rule serves two independent tables: the decompression
//! dataset and the fixed IMCA TUP limit table.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::constants::{DEPTH_EPSILON, IMCA_TUP_LIMITS};
use crate::record::{Column, DecoRecord};

/// Find the smallest depth in an ascending list at or beyond `target`.
///
/// The epsilon absorbs floating round-off from upstream subtraction and
/// division, so a target of 18.000000000000004 still resolves to 18.
pub fn resolve_deeper(target: f64, depths: &[f64]) -> Option<f64> {
    depths
        .iter()
        .copied()
        .find(|d| target <= d + DEPTH_EPSILON)
}

/// Outcome of resolving a target depth against the dataset
#[derive(Debug, Clone)]
pub struct DepthMatch {
    /// Records at the depth actually used (possibly empty)
    pub rows: Vec<DecoRecord>,
    /// The depth the rows belong to, or `None` when nothing matched
    pub used_depth: Option<f64>,
    /// Whether the used depth differs from the target (true whenever no
    /// candidate existed at all)
    pub snapped: bool,
    /// The depth the target originally snapped to, kept for diagnostics
    /// even when that depth turned out to hold no rows
    pub candidate: Option<f64>,
}

/// Snap `target` upward, then walk strictly deeper indexed depths until one
/// with at least one matching record is found.
///
/// A record belongs to depth `d` when its `Depth` cell, numerically coerced,
/// is within [`DEPTH_EPSILON`] of `d`.
pub fn filter_rows(target: f64, records: &[DecoRecord], depths: &[f64]) -> DepthMatch {
    let Some(candidate) = resolve_deeper(target, depths) else {
        debug!("No tabulated depth at or beyond {}", target);
        return DepthMatch {
            rows: Vec::new(),
            used_depth: None,
            snapped: true,
            candidate: None,
        };
    };

    let start = depths
        .iter()
        .position(|d| (d - candidate).abs() < DEPTH_EPSILON)
        .unwrap_or(depths.len());

    for &depth in &depths[start..] {
        let rows: Vec<DecoRecord> = records
            .iter()
            .filter(|r| {
                r.numeric(Column::Depth)
                    .is_some_and(|v| (v - depth).abs() < DEPTH_EPSILON)
            })
            .cloned()
            .collect();
        if !rows.is_empty() {
            let snapped = (depth - target).abs() >= DEPTH_EPSILON;
            debug!(
                "Resolved target {} to depth {} ({} row(s), snapped: {})",
                target,
                depth,
                rows.len(),
                snapped
            );
            return DepthMatch {
                rows,
                used_depth: Some(depth),
                snapped,
                candidate: Some(candidate),
            };
        }
    }

    DepthMatch {
        rows: Vec::new(),
        used_depth: None,
        snapped: true,
        candidate: Some(candidate),
    }
}

/// An IMCA TUP bottom-time limit resolved for a depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImcaLimit {
    /// Tabulated depth the request snapped to, msw
    pub depth: f64,
    /// Bottom-time limit in minutes
    pub minutes: u32,
}

impl fmt::Display for ImcaLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min @ {} msw", self.minutes, self.depth)
    }
}

/// Look up the IMCA TUP limit for a depth with the same snap-upward rule
pub fn imca_limit(target: f64) -> Option<ImcaLimit> {
    IMCA_TUP_LIMITS
        .iter()
        .find(|(depth, _)| target <= depth + DEPTH_EPSILON)
        .map(|&(depth, minutes)| ImcaLimit { depth, minutes })
}
