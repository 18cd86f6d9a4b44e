//! Application constants for the decompression table calculator
//!
//! This module contains the fixed physiological constants, the compiled-in
//! ascent-stop schedule, and the IMCA TUP limit table used throughout the
//! application.

use crate::record::Column;

// =============================================================================
// Numeric Tolerances
// =============================================================================

/// Comparison tolerance for depth values.
///
/// Absorbs floating-point round-off introduced by the equivalent-air-depth
/// subtraction/division upstream of every table lookup.
pub const DEPTH_EPSILON: f64 = 1e-9;

// =============================================================================
// Physiology Constants
// =============================================================================

/// Metres of seawater per atmosphere of hydrostatic pressure
pub const MSW_PER_ATM: f64 = 10.0;

/// Oxygen fraction of air, as a percentage
pub const AIR_O2_PERCENT: f64 = 21.0;

/// Nitrogen divisor in the safety-adjusted equivalent air depth (bell depth)
pub const EAD_NITROGEN_DIVISOR: f64 = 0.775;

/// Inspired PO2 above which pulmonary oxygen toxicity accrues (bar)
pub const OTU_PO2_THRESHOLD: f64 = 0.5;

/// OTU dose exponent
pub const OTU_EXPONENT: f64 = 0.833;

/// ESOT dose exponent
pub const ESOT_EXPONENT: f64 = 2.285;

/// Upper bound of the acceptable inspired PO2 band (bar)
pub const PO2_OK_MAX: f64 = 1.39;

/// Lower bound of the caution inspired PO2 band (bar)
pub const PO2_WARN_MIN: f64 = 1.40;

/// Upper bound of the caution inspired PO2 band (bar)
pub const PO2_WARN_MAX: f64 = 1.49;

// =============================================================================
// Ascent Stop Schedule
// =============================================================================

/// One physical decompression stop: its table column, depth, and breathing gas
#[derive(Debug, Clone, Copy)]
pub struct StopSpec {
    /// Table column holding the stop time in minutes
    pub column: Column,
    /// Stop depth in msw
    pub depth: f64,
    /// Breathing-gas oxygen percentage at this stop
    pub o2_percent: f64,
}

/// Fixed physical sequence of ascent stops from 24 msw to 3 msw.
///
/// Diver and bellman share this schedule once past the bottom segment, so
/// each stop's dose is credited to both roles identically.
pub const DECOMPRESSION_STOPS: &[StopSpec] = &[
    StopSpec { column: Column::Air24, depth: 24.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::Air21, depth: 21.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::Air18, depth: 18.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::AirTup15, depth: 15.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::Oxygen15, depth: 15.0, o2_percent: 100.0 },
    StopSpec { column: Column::Air12, depth: 12.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::Oxygen12, depth: 12.0, o2_percent: 100.0 },
    StopSpec { column: Column::Air9, depth: 9.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::Oxygen9, depth: 9.0, o2_percent: 100.0 },
    StopSpec { column: Column::Air6, depth: 6.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::Oxygen6, depth: 6.0, o2_percent: 100.0 },
    StopSpec { column: Column::Air3, depth: 3.0, o2_percent: AIR_O2_PERCENT },
    StopSpec { column: Column::Oxygen3, depth: 3.0, o2_percent: 100.0 },
];

// =============================================================================
// IMCA TUP Limits
// =============================================================================

/// IMCA TUP bottom-time limits as (depth msw, minutes) pairs, ascending by depth
pub const IMCA_TUP_LIMITS: &[(f64, u32)] = &[
    (9.0, 240),
    (12.0, 240),
    (15.0, 240),
    (18.0, 240),
    (19.0, 240),
    (20.0, 240),
    (21.0, 240),
    (22.0, 240),
    (23.0, 180),
    (24.0, 180),
    (25.0, 180),
    (26.0, 180),
    (27.0, 180),
    (28.0, 180),
    (29.0, 180),
    (30.0, 180),
    (31.0, 180),
    (32.0, 180),
    (33.0, 180),
    (36.0, 180),
    (39.0, 180),
    (42.0, 180),
    (45.0, 180),
    (48.0, 180),
    (51.0, 180),
];
