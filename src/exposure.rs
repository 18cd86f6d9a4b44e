//! Oxygen exposure physiology: dose calculation and per-dive accumulation
//!
//! Two cumulative dose metrics are tracked per role: OTU (pulmonary oxygen
//! toxicity) and ESOT (CNS-equivalent surface oxygen time). The exponents
//! and threshold are fixed physiological constants; do not adjust them
//! without revalidating against the published tables.

use std::ops::AddAssign;

use serde::Serialize;

use crate::constants::{
    AIR_O2_PERCENT, DECOMPRESSION_STOPS, ESOT_EXPONENT, MSW_PER_ATM, OTU_EXPONENT,
    OTU_PO2_THRESHOLD,
};
use crate::record::{Column, DecoRecord};

/// A single oxygen dose: OTU and ESOT accrued over one segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Exposure {
    pub otu: f64,
    pub esot: f64,
}

impl AddAssign for Exposure {
    fn add_assign(&mut self, rhs: Self) {
        self.otu += rhs.otu;
        self.esot += rhs.esot;
    }
}

/// Inspired oxygen partial pressure in bar, using the linear hydrostatic
/// approximation of one atmosphere per 10 msw.
pub fn inspired_po2(depth: f64, o2_percent: f64) -> f64 {
    (o2_percent / 100.0) * (depth / MSW_PER_ATM + 1.0)
}

/// Oxygen dose for breathing a gas at a depth for a duration.
///
/// Pure and total: degenerate inputs (`time <= 0`, `depth < 0`,
/// `o2_percent <= 0`) yield a zero dose rather than an error.
pub fn exposure(depth: f64, o2_percent: f64, time: f64) -> Exposure {
    if time <= 0.0 || depth < 0.0 || o2_percent <= 0.0 {
        return Exposure::default();
    }

    let po2 = inspired_po2(depth, o2_percent);
    let otu_factor = if po2 > OTU_PO2_THRESHOLD {
        ((po2 - OTU_PO2_THRESHOLD) / OTU_PO2_THRESHOLD).powf(OTU_EXPONENT)
    } else {
        0.0
    };

    Exposure {
        otu: time * otu_factor,
        esot: time * po2.powf(ESOT_EXPONENT),
    }
}

/// Cumulative doses for the two roles of a bell run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RoleTotals {
    pub diver: Exposure,
    pub bellman: Exposure,
}

/// Presentation form of [`RoleTotals`]: integers rounded half away from zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundedTotals {
    pub diver_otu: i64,
    pub diver_esot: i64,
    pub bellman_otu: i64,
    pub bellman_esot: i64,
}

impl RoleTotals {
    /// Round the totals for display. Half-way values round away from zero
    /// (all doses are non-negative, so this is plain `f64::round`).
    pub fn rounded(&self) -> RoundedTotals {
        RoundedTotals {
            diver_otu: self.diver.otu.round() as i64,
            diver_esot: self.diver.esot.round() as i64,
            bellman_otu: self.bellman.otu.round() as i64,
            bellman_esot: self.bellman.esot.round() as i64,
        }
    }
}

/// Accumulate both roles' doses across a resolved table row.
///
/// Segment order is fixed: first the bottom segment (`BottomTime` plus
/// `TimeTillFirstStop`, diver on the dive gas at dive depth, bellman on air
/// at bell depth), then the thirteen ascent stops from 24 msw to 3 msw,
/// where both roles share depth and gas. Blank or garbage cells contribute
/// zero and never abort the walk.
pub fn accumulate(
    record: &DecoRecord,
    dive_depth: f64,
    o2_percent: f64,
    bell_depth: f64,
) -> RoleTotals {
    let mut totals = RoleTotals::default();

    let bottom_time = record.numeric(Column::BottomTime).unwrap_or(0.0);
    let transit_time = record.numeric(Column::TimeToFirstStop).unwrap_or(0.0);
    let bottom_segment = bottom_time + transit_time;
    if bottom_segment > 0.0 {
        totals.diver += exposure(dive_depth, o2_percent, bottom_segment);
        totals.bellman += exposure(bell_depth, AIR_O2_PERCENT, bottom_segment);
    }

    for stop in DECOMPRESSION_STOPS {
        let stop_time = record.numeric(stop.column).unwrap_or(0.0);
        if stop_time > 0.0 {
            let dose = exposure(stop.depth, stop.o2_percent, stop_time);
            totals.diver += dose;
            totals.bellman += dose;
        }
    }

    totals
}
