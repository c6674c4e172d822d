//! Phase classification for the lunar cycle

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The four phases of a lunar cycle.
///
/// Each phase covers a quarter of the cycle-completion range:
///
/// - `0.00..0.25` — waxing crescent
/// - `0.25..0.50` — waxing gibbous
/// - `0.50..0.75` — waning gibbous
/// - `0.75..1.00` — waning crescent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waxing crescent.
    WaxingCrescent,
    /// Waxing gibbous.
    WaxingGibbous,
    /// Waning gibbous.
    WaningGibbous,
    /// Waning crescent.
    WaningCrescent,
}

impl Phase {
    /// The phase at the given point in the lunar cycle.
    ///
    /// Indices outside `[0, 1)` are range-reduced into the cycle first, so
    /// the classification is total.
    pub fn at(cycle_index: f64) -> Self {
        let index = cycle_index.rem_euclid(1.0);
        if index < 0.25 {
            Phase::WaxingCrescent
        } else if index < 0.5 {
            Phase::WaxingGibbous
        } else if index < 0.75 {
            Phase::WaningGibbous
        } else {
            Phase::WaningCrescent
        }
    }

    /// The range of the phase in the lunar cycle.
    pub fn range(&self) -> Range<f64> {
        match self {
            Phase::WaxingCrescent => 0.0..0.25,
            Phase::WaxingGibbous => 0.25..0.5,
            Phase::WaningGibbous => 0.5..0.75,
            Phase::WaningCrescent => 0.75..1.0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::WaxingCrescent => "Waxing Crescent",
            Phase::WaxingGibbous => "Waxing Gibbous",
            Phase::WaningGibbous => "Waning Gibbous",
            Phase::WaningCrescent => "Waning Crescent",
        };
        write!(f, "{}", name)
    }
}
