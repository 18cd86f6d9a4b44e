//! Primary computation entry point
//!
//! A single synchronous pure function of the inputs and the read-only
//! dataset: derive the bell depth, classify the inspired PO2, resolve the
//! IMCA limit and the table row set, pick the governing row for the planned
//! bottom time, and accumulate both roles' oxygen doses. Any host (CLI,
//! batch job, test harness) can call it on demand; identical inputs against
//! an unmutated dataset produce bit-identical outputs.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::constants::{
    EAD_NITROGEN_DIVISOR, MSW_PER_ATM, PO2_OK_MAX, PO2_WARN_MAX, PO2_WARN_MIN,
};
use crate::dataset::Dataset;
use crate::depth::{imca_limit, ImcaLimit};
use crate::exposure::{accumulate, inspired_po2, RoundedTotals};
use crate::record::{Column, DecoRecord};

/// Inputs to the primary computation
#[derive(Debug, Clone, Copy)]
pub struct DiveInputs {
    /// Planned maximum depth, msw
    pub max_depth: f64,
    /// Breathing-gas oxygen percentage, open interval (0, 100)
    pub o2_percent: f64,
    /// Planned bottom time in minutes, if known
    pub dive_time: Option<f64>,
}

impl DiveInputs {
    /// Whether the inputs admit a computation. Out-of-range values are a
    /// normal display-fallback state, not an error.
    pub fn is_valid(&self) -> bool {
        self.max_depth.is_finite()
            && self.max_depth > 0.0
            && self.o2_percent.is_finite()
            && self.o2_percent > 0.0
            && self.o2_percent < 100.0
    }
}

/// Tri-state classification of the inspired PO2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Po2Band {
    Ok,
    Warn,
    Bad,
}

impl Po2Band {
    /// Classify an (unrounded) inspired PO2 in bar.
    ///
    /// The bands are ok <= 1.39, warn in [1.40, 1.49], bad otherwise; a
    /// value strictly between 1.39 and 1.40 classifies as bad.
    pub fn classify(po2: f64) -> Self {
        if po2 <= PO2_OK_MAX {
            Po2Band::Ok
        } else if (PO2_WARN_MIN..=PO2_WARN_MAX).contains(&po2) {
            Po2Band::Warn
        } else {
            Po2Band::Bad
        }
    }
}

impl fmt::Display for Po2Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Po2Band::Ok => write!(f, "ok"),
            Po2Band::Warn => write!(f, "warn"),
            Po2Band::Bad => write!(f, "bad"),
        }
    }
}

/// Result of the primary computation: either a fully populated report or a
/// well-defined fallback view, never ad hoc nullable fields
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Computation {
    Resolved(DiveReport),
    Fallback(FallbackReport),
}

/// Fully populated computation outputs
#[derive(Debug, Clone, Serialize)]
pub struct DiveReport {
    /// Safety-adjusted equivalent air depth, rounded to 1 decimal, msw
    pub bell_depth: f64,
    /// Inspired PO2 at depth, rounded to 2 decimals, bar
    pub po2: f64,
    /// Classification of the unrounded PO2
    pub po2_band: Po2Band,
    /// IMCA TUP limit for the raw dive depth, when one is listed
    pub imca_limit: Option<ImcaLimit>,
    /// Dataset depth the bell depth resolved to
    pub used_depth: Option<f64>,
    /// Whether the used depth differs from the bell depth
    pub snapped: bool,
    /// Rows at the used depth
    pub rows: Vec<DecoRecord>,
    /// Index into `rows` of the first row whose bottom time covers the
    /// planned dive time
    pub selected_row: Option<usize>,
    /// Rounded exposure totals, present once a row is selected
    pub totals: Option<RoundedTotals>,
    /// Human-readable description of which dataset depth was used
    pub status: String,
}

/// Fallback view for invalid inputs: all rows, no computed outputs
#[derive(Debug, Clone, Serialize)]
pub struct FallbackReport {
    pub rows: Vec<DecoRecord>,
    pub status: String,
}

/// Round to a fixed number of decimal places, half away from zero
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Run the full lookup and exposure computation for one set of inputs.
pub fn compute(inputs: &DiveInputs, dataset: &Dataset) -> Computation {
    if !inputs.is_valid() {
        debug!("Inputs out of range, falling back to full table view");
        return Computation::Fallback(FallbackReport {
            rows: dataset.records().to_vec(),
            status: format!("Showing all {} rows", dataset.len()),
        });
    }

    let fo2 = inputs.o2_percent / 100.0;
    let bell_depth = round_to(
        ((1.0 - fo2) / EAD_NITROGEN_DIVISOR) * (inputs.max_depth + MSW_PER_ATM) - MSW_PER_ATM,
        1,
    );
    let po2 = inspired_po2(inputs.max_depth, inputs.o2_percent);

    let matched = dataset.filter_by_depth(bell_depth);

    let selected_row = inputs
        .dive_time
        .filter(|t| t.is_finite() && *t > 0.0)
        .and_then(|dive_time| {
            matched.rows.iter().position(|row| {
                row.numeric(Column::BottomTime)
                    .is_some_and(|bottom| bottom >= dive_time)
            })
        });

    let totals = selected_row.map(|index| {
        accumulate(
            &matched.rows[index],
            inputs.max_depth,
            inputs.o2_percent,
            bell_depth,
        )
        .rounded()
    });

    let status = match matched.used_depth {
        None => match matched.candidate {
            Some(candidate) => format!(
                "No table rows for bell depth {} msw; next dataset depth is {} msw but no rows exist",
                bell_depth, candidate
            ),
            None => format!(
                "No table for bell depth {} msw and no deeper dataset depth available",
                bell_depth
            ),
        },
        Some(used) if matched.snapped => format!(
            "Bell depth {} msw snapped to dataset depth {} msw ({} row(s))",
            bell_depth,
            used,
            matched.rows.len()
        ),
        Some(used) => format!(
            "Showing {} row(s) for dataset depth {} msw",
            matched.rows.len(),
            used
        ),
    };

    Computation::Resolved(DiveReport {
        bell_depth,
        po2: round_to(po2, 2),
        po2_band: Po2Band::classify(po2),
        imca_limit: imca_limit(inputs.max_depth),
        used_depth: matched.used_depth,
        snapped: matched.snapped,
        rows: matched.rows,
        selected_row,
        totals,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        let header: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        let text = format!(
            "{}\n\
             15,120,1.0,,,,,,,,,,,,,5,10,20,40\n\
             27,60,1.5,,,,,,5,10,,15,,,,20,51.5,83,146\n\
             27,90,1.5,,,,,,10,15,,20,,,,25,71.5,110,190\n\
             36,30,2.0,,,5,,10,,10,,10,,10,,10,57,95,170\n",
            header.join(",")
        );
        Dataset::from_csv(&text)
    }

    #[test]
    fn test_invalid_inputs_fall_back_to_all_rows() {
        let dataset = sample_dataset();
        for inputs in [
            DiveInputs { max_depth: 0.0, o2_percent: 32.0, dive_time: Some(60.0) },
            DiveInputs { max_depth: 30.0, o2_percent: 0.0, dive_time: None },
            DiveInputs { max_depth: 30.0, o2_percent: 100.0, dive_time: None },
            DiveInputs { max_depth: f64::NAN, o2_percent: 32.0, dive_time: None },
            DiveInputs { max_depth: 30.0, o2_percent: f64::INFINITY, dive_time: None },
        ] {
            match compute(&inputs, &dataset) {
                Computation::Fallback(view) => {
                    assert_eq!(view.rows.len(), 4);
                    assert_eq!(view.status, "Showing all 4 rows");
                }
                Computation::Resolved(_) => panic!("expected fallback for {:?}", inputs),
            }
        }
    }

    #[test]
    fn test_resolved_report_snaps_and_selects_row() {
        let dataset = sample_dataset();
        let inputs = DiveInputs {
            max_depth: 30.0,
            o2_percent: 32.0,
            dive_time: Some(70.0),
        };
        let Computation::Resolved(report) = compute(&inputs, &dataset) else {
            panic!("expected resolved report");
        };

        // bell depth = ((1 - 0.32) / 0.775) * 40 - 10 = 25.0967... -> 25.1
        assert_eq!(report.bell_depth, 25.1);
        // pO2 = 0.32 * 4 = 1.28
        assert_eq!(report.po2, 1.28);
        assert_eq!(report.po2_band, Po2Band::Ok);
        assert_eq!(report.imca_limit.map(|l| l.minutes), Some(180));
        assert_eq!(report.used_depth, Some(27.0));
        assert!(report.snapped);
        assert_eq!(report.rows.len(), 2);
        // First row at 27 msw covers only 60 min; 70 min selects the second
        assert_eq!(report.selected_row, Some(1));
        let totals = report.totals.expect("totals for selected row");
        assert!(totals.diver_otu > 0);
        assert!(totals.bellman_otu > 0);
        assert!(totals.diver_esot > totals.bellman_esot);
        assert!(report.status.contains("snapped"));
    }

    #[test]
    fn test_no_dive_time_means_no_selection_or_totals() {
        let dataset = sample_dataset();
        let inputs = DiveInputs {
            max_depth: 30.0,
            o2_percent: 32.0,
            dive_time: None,
        };
        let Computation::Resolved(report) = compute(&inputs, &dataset) else {
            panic!("expected resolved report");
        };
        assert_eq!(report.selected_row, None);
        assert_eq!(report.totals, None);
    }

    #[test]
    fn test_dive_time_beyond_every_row() {
        let dataset = sample_dataset();
        let inputs = DiveInputs {
            max_depth: 30.0,
            o2_percent: 32.0,
            dive_time: Some(500.0),
        };
        let Computation::Resolved(report) = compute(&inputs, &dataset) else {
            panic!("expected resolved report");
        };
        assert_eq!(report.selected_row, None);
        assert_eq!(report.totals, None);
    }

    #[test]
    fn test_bell_depth_beyond_table() {
        let dataset = sample_dataset();
        let inputs = DiveInputs {
            max_depth: 60.0,
            o2_percent: 21.0,
            dive_time: Some(30.0),
        };
        let Computation::Resolved(report) = compute(&inputs, &dataset) else {
            panic!("expected resolved report");
        };
        assert_eq!(report.used_depth, None);
        assert!(report.snapped);
        assert!(report.rows.is_empty());
        assert!(report.status.contains("no deeper dataset depth"));
    }

    #[test]
    fn test_po2_band_thresholds() {
        assert_eq!(Po2Band::classify(1.39), Po2Band::Ok);
        assert_eq!(Po2Band::classify(1.40), Po2Band::Warn);
        assert_eq!(Po2Band::classify(1.49), Po2Band::Warn);
        // The bands leave a gap between 1.39 and 1.40
        assert_eq!(Po2Band::classify(1.395), Po2Band::Bad);
        assert_eq!(Po2Band::classify(1.50), Po2Band::Bad);
        assert_eq!(Po2Band::classify(0.21), Po2Band::Ok);
    }

    #[test]
    fn test_idempotence() {
        let dataset = sample_dataset();
        let inputs = DiveInputs {
            max_depth: 30.0,
            o2_percent: 32.0,
            dive_time: Some(70.0),
        };
        let first = serde_json::to_string(&compute(&inputs, &dataset)).unwrap();
        let second = serde_json::to_string(&compute(&inputs, &dataset)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(25.0967, 1), 25.1);
        assert_eq!(round_to(1.284, 2), 1.28);
        assert_eq!(round_to(1.285, 2), 1.29);
        assert_eq!(round_to(2.0, 1), 2.0);
    }
}
