//! Constants module for lunar and solar calculations
//!
//! Orbital elements and epoch references follow the low-precision model
//! used by John Walker's `moontool.c`, anchored at epoch 1980.0.

// Time constants
/// Hours in a day
pub const DAY_HOURS: f64 = 24.0;
/// Minutes in a day
pub const DAY_MINUTES: f64 = DAY_HOURS * 60.0;
/// Seconds in a day
pub const DAY_S: f64 = DAY_MINUTES * 60.0;
/// Days in a Julian year
pub const JULIAN_YEAR_DAYS: f64 = 365.25;
/// Hours in a Julian year
pub const JULIAN_YEAR_HOURS: f64 = JULIAN_YEAR_DAYS * 24.0;
/// Minutes in a Julian year
pub const JULIAN_YEAR_MINUTES: f64 = JULIAN_YEAR_HOURS * 60.0;
/// Seconds in a Julian year
pub const JULIAN_YEAR_S: f64 = JULIAN_YEAR_MINUTES * 60.0;
/// Years in a Julian century
pub const JULIAN_CENTURY_YEARS: f64 = 100.0;
/// Days in a Julian century
pub const JULIAN_CENTURY_DAYS: f64 = JULIAN_CENTURY_YEARS * JULIAN_YEAR_DAYS;
/// Seconds in a Julian century
pub const JULIAN_CENTURY_S: f64 = JULIAN_CENTURY_YEARS * JULIAN_YEAR_S;

// Epoch constants
/// Julian date of the Unix epoch (1970-01-01T00:00:00Z).
///
/// This is the single zero-point offset shared by every instant/Julian-date
/// conversion in the crate. Julian date 0.0 is noon UTC, 1 January 4713 BCE
/// in the Julian calendar (24 November 4714 BCE proleptic Gregorian).
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;
/// Julian date of 1900 January 0.5, the time base for the mean-phase
/// polynomials in the transition solver
pub const J1900: f64 = 2_415_020.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Julian date of epoch 1980.0 (1980 January 0.0), the anchor for the
/// orbital elements below
pub const EPOCH_1980_JD: f64 = 2_444_238.5;

// Epoch 1980.0 orbital elements
/// Ecliptic longitude of the Sun at epoch 1980.0, in degrees
pub const SUN_ECLIPTIC_LONGITUDE_EPOCH: f64 = 278.833_540;
/// Ecliptic longitude of the Sun at perigee, in degrees
pub const SUN_ECLIPTIC_LONGITUDE_PERIGEE: f64 = 282.596_403;
/// Moon's mean longitude at epoch 1980.0, in degrees
pub const MOON_MEAN_LONGITUDE_EPOCH: f64 = 64.975_464;
/// Mean longitude of the Moon's perigee at epoch 1980.0, in degrees
pub const MOON_MEAN_PERIGEE_EPOCH: f64 = 349.383_063;
/// Mean longitude of the Moon's ascending node at epoch 1980.0, in degrees
pub const MOON_NODE_MEAN_LONGITUDE_EPOCH: f64 = 151.950_429;

// Moon constants
/// Inclination of the Moon's orbit, in degrees
pub const MOON_INCLINATION: f64 = 5.145_396;
/// Eccentricity of the Moon's orbit
pub const MOON_ECCENTRICITY: f64 = 0.054_900;
/// Moon's angular size, in degrees, at semi-major axis distance
pub const MOON_ANGULAR_SIZE: f64 = 0.5181;
/// Semi-major axis of the Moon's orbit, in kilometers
pub const MOON_SEMI_MAJOR_AXIS: f64 = 384_401.0;
/// Moon's parallax, in degrees, at semi-major axis distance
pub const MOON_PARALLAX: f64 = 0.9507;
/// Synodic month (new Moon to new Moon), in days
pub const SYNODIC_MONTH: f64 = 29.530_588_68;
/// Base Julian date for E. W. Brown's numbered series of lunations
/// (1923 January 16)
pub const LUNATIONS_BASE: f64 = 2_423_436.0;

// Sun constants
/// Semi-major axis of Earth's orbit around the Sun, in kilometers
pub const SUN_SEMI_MAJOR_AXIS: f64 = 1.495_85e8;
/// Sun's angular size, in degrees, at semi-major axis distance
pub const SUN_ANGULAR_SIZE: f64 = 0.533_128;

// Earth constants
/// Earth's radius, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6_378.16;
/// Eccentricity of Earth's orbit
pub const EARTH_ECCENTRICITY: f64 = 0.016_718;
