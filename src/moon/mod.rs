//! Lunar ephemeris calculations
//!
//! An astronomical model of the Moon using the classical low-precision
//! algorithm from John Walker's `moontool.c` (Astronomical Algorithms class
//! formulas, epoch 1980.0 orbital elements). A [`MoonSnapshot`] captures the
//! Moon's position and illumination state for a single instant; the
//! [`phase`] and [`transition`] submodules classify the lunar cycle and
//! locate the dates of its named transitions.

pub mod phase;
pub mod transition;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    EPOCH_1980_JD, MOON_ANGULAR_SIZE, MOON_ECCENTRICITY, MOON_INCLINATION,
    MOON_MEAN_LONGITUDE_EPOCH, MOON_MEAN_PERIGEE_EPOCH, MOON_NODE_MEAN_LONGITUDE_EPOCH,
    MOON_PARALLAX, MOON_SEMI_MAJOR_AXIS, SUN_ANGULAR_SIZE, SUN_ECLIPTIC_LONGITUDE_EPOCH,
    SUN_ECLIPTIC_LONGITUDE_PERIGEE, SUN_SEMI_MAJOR_AXIS, SYNODIC_MONTH,
};
use crate::math::{fixangle, kepler, MathError};
use crate::time::{JulianDate, TimeError};

pub use phase::Phase;
pub use transition::{Transition, TransitionRecord};

/// Error type for lunar calculations
#[derive(Debug, Error)]
pub enum MoonError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("synodic month bracketing search overran {0} steps")]
    BracketSearchOverrun(usize),

    #[error("no upcoming transition in the cycle record set")]
    NoUpcomingTransition,
}

/// Result type for lunar calculations
pub type Result<T> = std::result::Result<T, MoonError>;

/// The position and illumination state of the Moon at one instant.
///
/// Immutable once computed. The cycle-completion fraction runs over
/// `0.0..1.0` with transitions at `0.0` (new), `0.25` (first quarter),
/// `0.5` (full) and `0.75` (second quarter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonSnapshot {
    /// The instant this snapshot describes.
    pub date: DateTime<Utc>,
    /// Completed fraction of the current lunar cycle, in `[0, 1)`.
    pub cycle_index: f64,
    /// Percentage of the Moon's disc illuminated by the Sun.
    pub illuminated: f64,
    /// Days passed since the previous new moon.
    pub age: f64,
    /// Geocentric distance to the Moon, in kilometers.
    pub distance: f64,
    /// The Moon's angular diameter, in degrees.
    pub angular_diameter: f64,
    /// The Moon's ecliptic longitude, in degrees.
    pub ecliptic_longitude: f64,
    /// The Moon's ecliptic latitude, in degrees.
    pub ecliptic_latitude: f64,
    /// The Moon's parallax, in degrees.
    pub parallax: f64,
    /// Geocentric distance to the Sun, in kilometers.
    pub sun_distance: f64,
    /// The Sun's angular diameter, in degrees.
    pub sun_angular_diameter: f64,
}

impl MoonSnapshot {
    /// Compute the Moon's state at a civil instant.
    ///
    /// Total for any finite instant; dates far from epoch 1980.0 lose
    /// physical accuracy but still compute. The only failure path is a
    /// Kepler solver non-convergence fault, which the bounded lunar
    /// eccentricity cannot reach in practice.
    pub fn at(date: DateTime<Utc>) -> Result<Self> {
        Self::compute(date, JulianDate::from_datetime(&date))
    }

    /// Compute the Moon's state at a Julian date.
    pub fn at_julian_date(julian_date: JulianDate) -> Result<Self> {
        let date = julian_date.to_datetime()?;
        Self::compute(date, julian_date)
    }

    /// The phase of the Moon at this snapshot's instant.
    pub fn phase(&self) -> Phase {
        Phase::at(self.cycle_index)
    }

    fn compute(date: DateTime<Utc>, julian_date: JulianDate) -> Result<Self> {
        // Days since epoch 1980.0; every element below is a linear rate or
        // periodic correction applied to this interval.
        let jd = julian_date.value() - EPOCH_1980_JD;

        // Sun's mean anomaly, then referred to the perigee
        let n = fixangle((360.0 / 365.2422) * jd);
        let m = fixangle(n + SUN_ECLIPTIC_LONGITUDE_EPOCH - SUN_ECLIPTIC_LONGITUDE_PERIGEE);

        // Eccentric anomaly, then true anomaly via the half-angle tangent
        let eccentric = kepler(m, MOON_ECCENTRICITY)?;
        let tan_half = ((1.0 + MOON_ECCENTRICITY) / (1.0 - MOON_ECCENTRICITY)).sqrt()
            * (eccentric / 2.0).tan();
        let true_anomaly = 2.0 * tan_half.atan().to_degrees();

        // Sun's geometric ecliptic longitude
        let lambda_sun = fixangle(true_anomaly + SUN_ECLIPTIC_LONGITUDE_PERIGEE);

        // Orbital distance factor
        let f = (1.0 + MOON_ECCENTRICITY * true_anomaly.to_radians().cos())
            / (1.0 - MOON_ECCENTRICITY * MOON_ECCENTRICITY);
        let sun_distance = SUN_SEMI_MAJOR_AXIS / f;
        let sun_angular_diameter = f * SUN_ANGULAR_SIZE;

        // Moon's mean longitude, mean anomaly, and node mean longitude
        let moon_longitude = fixangle(13.176_396_6 * jd + MOON_MEAN_LONGITUDE_EPOCH);
        let moon_anomaly = fixangle(moon_longitude - 0.111_404_1 * jd - MOON_MEAN_PERIGEE_EPOCH);
        let node_longitude = fixangle(MOON_NODE_MEAN_LONGITUDE_EPOCH - 0.052_953_9 * jd);

        // Perturbation corrections
        let evection =
            1.2739 * (2.0 * (moon_longitude - lambda_sun) - moon_anomaly).to_radians().sin();
        let annual_equation = 0.1858 * m.to_radians().sin();
        let a3 = 0.37 * m.to_radians().sin();

        let corrected_anomaly = moon_anomaly + evection - annual_equation - a3;

        // Equation of the centre
        let centre_equation = 6.2886 * corrected_anomaly.to_radians().sin();
        let a4 = 0.214 * (2.0 * corrected_anomaly).to_radians().sin();

        // Corrected longitude, then the variation
        let corrected_longitude =
            moon_longitude + evection + centre_equation - annual_equation + a4;
        let variation = 0.6583 * (2.0 * (corrected_longitude - lambda_sun)).to_radians().sin();

        // True longitude
        let true_longitude = corrected_longitude + variation;

        // Corrected node longitude, then the spherical projection onto the
        // ecliptic using the orbital inclination
        let corrected_node = node_longitude - 0.16 * m.to_radians().sin();
        let y = (true_longitude - corrected_node).to_radians().sin()
            * MOON_INCLINATION.to_radians().cos();
        let x = (true_longitude - corrected_node).to_radians().cos();
        let ecliptic_longitude = y.atan2(x).to_degrees() + corrected_node;
        let ecliptic_latitude = ((true_longitude - corrected_node).to_radians().sin()
            * MOON_INCLINATION.to_radians().sin())
        .asin()
        .to_degrees();

        // Age of the Moon in degrees, and the illuminated fraction
        let age_degrees = true_longitude - lambda_sun;
        let illuminated_fraction = (1.0 - age_degrees.to_radians().cos()) / 2.0;

        // Geocentric distance from the orbit equation
        let distance = (MOON_SEMI_MAJOR_AXIS * (1.0 - MOON_ECCENTRICITY * MOON_ECCENTRICITY))
            / (1.0 + MOON_ECCENTRICITY * (corrected_anomaly + centre_equation).to_radians().cos());

        // Angular diameter and parallax scale inversely with distance
        let distance_fraction = distance / MOON_SEMI_MAJOR_AXIS;
        let angular_diameter = MOON_ANGULAR_SIZE / distance_fraction;
        let parallax = MOON_PARALLAX / distance_fraction;

        let cycle_index = fixangle(age_degrees) / 360.0;

        Ok(MoonSnapshot {
            date,
            cycle_index,
            illuminated: illuminated_fraction * 100.0,
            age: SYNODIC_MONTH * cycle_index,
            distance,
            angular_diameter,
            ecliptic_longitude,
            ecliptic_latitude,
            parallax,
            sun_distance,
            sun_angular_diameter,
        })
    }
}

impl fmt::Display for MoonSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f, "Phase: {}", self.phase())?;
        writeln!(f, "Age: {:.2} days", self.age)?;
        writeln!(f, "Distance: {:.6} km", self.distance)?;
        writeln!(f, "Illuminated: {:.2} %", self.illuminated)?;
        writeln!(f, "Angular Diameter: {:.6}", self.angular_diameter)?;
        writeln!(f, "Ecliptic Longitude: {:.6}", self.ecliptic_longitude)?;
        writeln!(f, "Ecliptic Latitude: {:.6}", self.ecliptic_latitude)?;
        write!(f, "Parallax: {:.6}", self.parallax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SYNODIC_MONTH;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use std::f64::consts::TAU;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_cycle_index_in_range() {
        for year in [1900, 1969, 1980, 2000, 2023, 2100] {
            for month in 1..=12 {
                let snapshot = MoonSnapshot::at(utc(year, month, 15, 6)).unwrap();
                assert!(
                    (0.0..1.0).contains(&snapshot.cycle_index),
                    "cycle index {} out of range at {}-{}",
                    snapshot.cycle_index,
                    year,
                    month
                );
            }
        }
    }

    #[test]
    fn test_illumination_identity() {
        // illuminated and age are algebraically tied to the cycle index.
        for day in 1..=28 {
            let snapshot = MoonSnapshot::at(utc(2023, 3, day, 0)).unwrap();
            let expected = (1.0 - (TAU * snapshot.cycle_index).cos()) / 2.0 * 100.0;
            assert_relative_eq!(snapshot.illuminated, expected, max_relative = 1e-6);
            assert_relative_eq!(
                snapshot.age,
                SYNODIC_MONTH * snapshot.cycle_index,
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn test_known_state_january_2023() {
        // New moon was 2022-12-23; by New Year's Day the Moon is a waxing
        // gibbous around nine and a half days old.
        let snapshot = MoonSnapshot::at(utc(2023, 1, 1, 0)).unwrap();
        assert_eq!(snapshot.phase(), Phase::WaxingGibbous);
        assert!(snapshot.age > 8.5 && snapshot.age < 10.5, "age {}", snapshot.age);
        assert!(
            snapshot.illuminated > 55.0 && snapshot.illuminated < 90.0,
            "illuminated {}",
            snapshot.illuminated
        );
    }

    #[test]
    fn test_distance_bounds() {
        // The orbit equation keeps the distance between perigee and apogee.
        for month in 1..=12 {
            let snapshot = MoonSnapshot::at(utc(2023, month, 10, 12)).unwrap();
            assert!(
                snapshot.distance > 350_000.0 && snapshot.distance < 410_000.0,
                "distance {} km out of bounds",
                snapshot.distance
            );
            assert!(snapshot.angular_diameter > 0.4 && snapshot.angular_diameter < 0.7);
        }
    }

    #[test]
    fn test_sun_distance_bounds() {
        // The model applies the lunar eccentricity to the solar orbit, so
        // the distance swings about 5.5% either side of the semi-major
        // axis; near the July aphelion it sits at the far end.
        let snapshot = MoonSnapshot::at(utc(2023, 7, 4, 0)).unwrap();
        assert!(
            snapshot.sun_distance > SUN_SEMI_MAJOR_AXIS && snapshot.sun_distance < 1.06 * SUN_SEMI_MAJOR_AXIS,
            "sun distance {}",
            snapshot.sun_distance
        );
        assert_relative_eq!(
            snapshot.sun_angular_diameter,
            SUN_ANGULAR_SIZE * SUN_SEMI_MAJOR_AXIS / snapshot.sun_distance,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_julian_date_constructor_agrees() {
        let date = utc(2023, 1, 1, 0);
        let by_date = MoonSnapshot::at(date).unwrap();
        let by_jd = MoonSnapshot::at_julian_date(JulianDate::from_datetime(&date)).unwrap();
        assert_relative_eq!(by_date.cycle_index, by_jd.cycle_index, max_relative = 1e-9);
        assert_relative_eq!(by_date.distance, by_jd.distance, max_relative = 1e-9);
    }

    #[test]
    fn test_display_rendering() {
        let snapshot = MoonSnapshot::at(utc(2023, 1, 1, 0)).unwrap();
        let rendered = snapshot.to_string();
        assert!(rendered.contains("Phase: Waxing Gibbous"));
        assert!(rendered.contains("Age:"));
        assert!(rendered.contains("Illuminated:"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let snapshot = MoonSnapshot::at(utc(2023, 1, 1, 0)).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: MoonSnapshot = serde_json::from_str(&json).unwrap();

        // JSON decimal printing can drift by a last ULP, so compare
        // field-wise at a tight tolerance rather than bitwise.
        assert_eq!(snapshot.date, back.date);
        assert_relative_eq!(snapshot.cycle_index, back.cycle_index, max_relative = 1e-12);
        assert_relative_eq!(snapshot.illuminated, back.illuminated, max_relative = 1e-12);
        assert_relative_eq!(snapshot.age, back.age, max_relative = 1e-12);
        assert_relative_eq!(snapshot.distance, back.distance, max_relative = 1e-12);
        assert_relative_eq!(
            snapshot.angular_diameter,
            back.angular_diameter,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            snapshot.ecliptic_longitude,
            back.ecliptic_longitude,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            snapshot.ecliptic_latitude,
            back.ecliptic_latitude,
            max_relative = 1e-12
        );
        assert_relative_eq!(snapshot.parallax, back.parallax, max_relative = 1e-12);
        assert_relative_eq!(snapshot.sun_distance, back.sun_distance, max_relative = 1e-12);
        assert_relative_eq!(
            snapshot.sun_angular_diameter,
            back.sun_angular_diameter,
            max_relative = 1e-12
        );
    }
}
