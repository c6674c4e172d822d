//! Phase-transition dates within a lunar cycle
//!
//! Locates the true Julian dates of the four named transitions (new moon,
//! first quarter, full moon, second quarter) of the synodic month that
//! encloses a query instant, plus the following new moon. The mean-phase
//! polynomial and periodic correction tables are the classical 1900-epoch
//! series from `moontool.c`.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{J1900, JULIAN_CENTURY_DAYS, SYNODIC_MONTH};
use crate::moon::{MoonError, MoonSnapshot, Result};
use crate::time::JulianDate;

/// Bound on the synodic-month bracketing search. The initial index estimate
/// is within one or two months of the target, so this is never approached.
const MAX_BRACKET_STEPS: usize = 24;

/// The named transitions of the lunar cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// New moon.
    New,
    /// First quarter.
    First,
    /// Full moon.
    Full,
    /// Second quarter.
    Second,
}

impl Transition {
    /// The point in the lunar cycle at which the transition occurs.
    pub fn cycle_offset(&self) -> f64 {
        match self {
            Transition::New => 0.0,
            Transition::First => 0.25,
            Transition::Full => 0.5,
            Transition::Second => 0.75,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Transition::New => "New Moon",
            Transition::First => "First Quarter",
            Transition::Full => "Full Moon",
            Transition::Second => "Second Quarter",
        };
        write!(f, "{}", name)
    }
}

/// The computed date of one named transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Which transition this record describes.
    pub transition: Transition,
    /// The instant of the transition.
    pub date: DateTime<Utc>,
    /// The same instant as a Julian date.
    pub julian_date: JulianDate,
}

/// Time of the mean new moon for the synodic month of index `k`.
///
/// `k` counts synodic months from the start of 1900; a non-integer value
/// denotes a point partway through a cycle. The `julian_date` argument only
/// feeds the slow polynomial terms, expressed in Julian centuries from
/// 1900 January 0.5.
pub fn mean_phase(julian_date: JulianDate, k: f64) -> JulianDate {
    let t = (julian_date.value() - J1900) / JULIAN_CENTURY_DAYS;
    let t2 = t * t;
    let t3 = t2 * t;

    JulianDate::new(
        2_415_020.759_33
            + SYNODIC_MONTH * k
            + 0.000_117_8 * t2
            - 0.000_000_155 * t3
            + 0.000_33 * (166.56 + 132.87 * t - 0.009_173 * t2).to_radians().sin(),
    )
}

/// True time of the given transition in the synodic month of index `k`.
///
/// Applies the periodic correction series for new/full moons or the
/// alternate series for the quarters, the latter including a sign-branched
/// final adjustment for first versus last quarter.
pub fn true_phase(k: f64, transition: Transition) -> JulianDate {
    let offset = transition.cycle_offset();
    let k = k + offset;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;

    // Mean time of phase
    let mut pt = 2_415_020.759_33
        + SYNODIC_MONTH * k
        + 0.000_117_8 * t2
        - 0.000_000_155 * t3
        + 0.000_33 * (166.56 + 132.87 * t - 0.009_173 * t2).to_radians().sin();

    // Sun's mean anomaly
    let m = 359.2242 + 29.105_356_08 * k - 0.000_033_3 * t2 - 0.000_003_47 * t3;

    // Moon's mean anomaly
    let mprime = 306.0253 + 385.816_918_06 * k + 0.010_730_6 * t2 + 0.000_012_36 * t3;

    // Moon's argument of latitude
    let f = 21.2964 + 390.670_506_46 * k - 0.001_652_8 * t2 - 0.000_002_39 * t3;

    if offset < 0.01 || (offset - 0.5).abs() < 0.01 {
        // Corrections for new and full moon
        pt += (0.1734 - 0.000_393 * t) * m.to_radians().sin()
            + 0.0021 * (2.0 * m).to_radians().sin()
            - 0.4068 * mprime.to_radians().sin()
            + 0.0161 * (2.0 * mprime).to_radians().sin()
            - 0.0004 * (3.0 * mprime).to_radians().sin()
            + 0.0104 * (2.0 * f).to_radians().sin()
            - 0.0051 * (m + mprime).to_radians().sin()
            - 0.0074 * (m - mprime).to_radians().sin()
            + 0.0004 * (2.0 * f + m).to_radians().sin()
            - 0.0004 * (2.0 * f - m).to_radians().sin()
            - 0.0006 * (2.0 * f + mprime).to_radians().sin()
            + 0.0010 * (2.0 * f - mprime).to_radians().sin()
            + 0.0005 * (m + 2.0 * mprime).to_radians().sin();
    } else if (offset - 0.25).abs() < 0.01 || (offset - 0.75).abs() < 0.01 {
        pt += (0.1721 - 0.0004 * t) * m.to_radians().sin()
            + 0.0021 * (2.0 * m).to_radians().sin()
            - 0.6280 * mprime.to_radians().sin()
            + 0.0089 * (2.0 * mprime).to_radians().sin()
            - 0.0004 * (3.0 * mprime).to_radians().sin()
            + 0.0079 * (2.0 * f).to_radians().sin()
            - 0.0119 * (m + mprime).to_radians().sin()
            - 0.0047 * (m - mprime).to_radians().sin()
            + 0.0003 * (2.0 * f + m).to_radians().sin()
            - 0.0004 * (2.0 * f - m).to_radians().sin()
            - 0.0006 * (2.0 * f + mprime).to_radians().sin()
            + 0.0021 * (2.0 * f - mprime).to_radians().sin()
            + 0.0003 * (m + 2.0 * mprime).to_radians().sin()
            + 0.0004 * (m - 2.0 * mprime).to_radians().sin()
            - 0.0003 * (2.0 * m + mprime).to_radians().sin();

        if offset < 0.5 {
            // First quarter correction
            pt += 0.0028 - 0.0004 * m.to_radians().cos() + 0.0003 * mprime.to_radians().cos();
        } else {
            // Last quarter correction
            pt += -0.0028 + 0.0004 * m.to_radians().cos() - 0.0003 * mprime.to_radians().cos();
        }
    }

    JulianDate::new(pt)
}

/// The five transitions of the lunar cycle enclosing `date`.
///
/// Records are in fixed positional order — new moon, first quarter, full
/// moon, second quarter, next new moon — and strictly increasing in time;
/// the query instant lies within the cycle the records span.
pub fn transitions_for(date: DateTime<Utc>) -> Result<Vec<TransitionRecord>> {
    // Step back 45 days to land in the previous synodic month, then derive
    // the initial month index from that civil year and month.
    let back_dated = date - Duration::days(45);
    let year = back_dated.year() as f64;
    let month = back_dated.month() as f64;

    let target = JulianDate::from_datetime(&date);
    let mut k1 = ((year + (month - 1.0) / 12.0 - 1900.0) * 12.3685).floor();
    let mut start = mean_phase(target, k1);
    let mut cursor = start;

    // Linear forward search: the estimate is at most a few months off and
    // each step advances one whole synodic month.
    let mut bracketed = false;
    for step in 0..MAX_BRACKET_STEPS {
        cursor = cursor + SYNODIC_MONTH;
        let end = mean_phase(cursor, k1 + 1.0);
        if start.value() <= target.value() && target.value() < end.value() {
            debug!(
                "bracketed {} in synodic month k = {} after {} steps",
                target, k1, step
            );
            bracketed = true;
            break;
        }
        start = end;
        k1 += 1.0;
    }
    if !bracketed {
        return Err(MoonError::BracketSearchOverrun(MAX_BRACKET_STEPS));
    }
    let k2 = k1 + 1.0;

    let mut records = Vec::with_capacity(5);
    for transition in [
        Transition::New,
        Transition::First,
        Transition::Full,
        Transition::Second,
    ] {
        records.push(record(k1, transition)?);
    }
    records.push(record(k2, Transition::New)?);
    Ok(records)
}

fn record(k: f64, transition: Transition) -> Result<TransitionRecord> {
    let julian_date = true_phase(k, transition);
    Ok(TransitionRecord {
        transition,
        date: julian_date.to_datetime()?,
        julian_date,
    })
}

impl MoonSnapshot {
    /// The transitions of the lunar cycle enclosing this snapshot's instant.
    pub fn transitions(&self) -> Result<Vec<TransitionRecord>> {
        transitions_for(self.date)
    }

    /// The upcoming transitions of the current lunar cycle.
    pub fn next_transitions(&self) -> Result<Vec<TransitionRecord>> {
        let mut upcoming = self.transitions()?;
        upcoming.retain(|record| record.date >= self.date);
        Ok(upcoming)
    }

    /// The next transition of the current lunar cycle.
    ///
    /// The enclosing cycle always ends after the query instant, so a
    /// well-formed record set has at least one future entry; an empty set
    /// is reported as [`MoonError::NoUpcomingTransition`] rather than
    /// indexed blindly.
    pub fn next_transition(&self) -> Result<TransitionRecord> {
        self.next_transitions()?
            .into_iter()
            .next()
            .ok_or(MoonError::NoUpcomingTransition)
    }
}
