//! Angular math helpers for the lunar ephemeris
//!
//! Range reduction, arc-second conversion, and a Newton-Raphson solver for
//! Kepler's equation. All functions are pure; the solver is the only one
//! that can fail.

use std::f64::consts::TAU;

use log::trace;
use thiserror::Error;

/// Error type for math operations
#[derive(Debug, Error)]
pub enum MathError {
    #[error(
        "Kepler solver did not converge after {iterations} iterations \
         (mean anomaly {mean_anomaly} deg, eccentricity {eccentricity})"
    )]
    KeplerDidNotConverge {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
    },
}

/// Result type for math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Convergence tolerance for the Kepler solver, in radians
const KEPLER_TOLERANCE: f64 = 1e-6;

/// Iteration cap for the Kepler solver. The eccentricities used here
/// (< 0.1) converge in under 10 iterations.
const KEPLER_MAX_ITERATIONS: usize = 50;

/// Range-reduces an angle in degrees to `[0, 360)`.
///
/// Negative inputs reduce to a non-negative angle:
///
/// ```
/// use moonfield::math::fixangle;
/// assert_eq!(fixangle(-90.0), 270.0);
/// assert_eq!(fixangle(720.5), 0.5);
/// ```
pub fn fixangle(degrees: f64) -> f64 {
    degrees - 360.0 * (degrees / 360.0).floor()
}

/// Range-reduces an angle in radians to `[0, 2*pi)`.
pub fn fixangle_rad(radians: f64) -> f64 {
    radians - TAU * (radians / TAU).floor()
}

/// Converts arc-seconds to degrees.
pub fn arcsec_to_degrees(arcsec: f64) -> f64 {
    arcsec / 3600.0
}

/// Solves Kepler's equation `E - e*sin(E) = M` by Newton-Raphson iteration.
///
/// The mean anomaly is given in degrees; the returned eccentric anomaly is
/// in radians. Iteration starts at `E = M` and stops once the residual
/// drops below 1e-6 radians.
///
/// Returns [`MathError::KeplerDidNotConverge`] if the iteration cap is
/// reached, which cannot happen for the bounded orbital eccentricities
/// this crate uses but is reported rather than returned unconverged.
pub fn kepler(mean_anomaly_degrees: f64, eccentricity: f64) -> Result<f64> {
    let m = mean_anomaly_degrees.to_radians();
    let mut e = m;

    for iteration in 0..KEPLER_MAX_ITERATIONS {
        let delta = e - eccentricity * e.sin() - m;
        if delta.abs() <= KEPLER_TOLERANCE {
            trace!(
                "kepler converged after {} iterations: E = {} rad",
                iteration,
                e
            );
            return Ok(e);
        }
        e -= delta / (1.0 - eccentricity * e.cos());
    }

    Err(MathError::KeplerDidNotConverge {
        mean_anomaly: mean_anomaly_degrees,
        eccentricity,
        iterations: KEPLER_MAX_ITERATIONS,
    })
}
