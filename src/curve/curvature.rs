//! Curvature of a parallel edge from its rank within its group.
//!
//! Curvature is linear in rank inside a group, and the largest bend a group
//! can reach saturates as the group grows:
//!
//! ```text
//! max_curvature(m) = amplitude * (1 - e^(-m / amplitude)) * base_curvature
//! curvature(r, m)  = max_curvature(m) * r / m
//! ```

use crate::error::CurvatureError;

/// Curvature of a single bent edge as drawn by the curved-edge renderer.
pub const DEFAULT_EDGE_CURVATURE: f64 = 0.25;

/// Asymptotic bound on the bend of the outermost edge, in units of
/// [`DEFAULT_EDGE_CURVATURE`].
pub const DEFAULT_AMPLITUDE: f64 = 3.5;

/// Tuning for the curvature function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveConfig {
	/// Saturation bound, in multiples of `base_curvature`.
	pub amplitude: f64,
	/// Curvature unit the amplitude is scaled by.
	pub base_curvature: f64,
}

impl Default for CurveConfig {
	fn default() -> Self {
		Self {
			amplitude: DEFAULT_AMPLITUDE,
			base_curvature: DEFAULT_EDGE_CURVATURE,
		}
	}
}

impl CurveConfig {
	/// Curvature of the outermost edge of a group whose max rank is `max_rank`.
	pub fn max_curvature(&self, max_rank: i64) -> Result<f64, CurvatureError> {
		if max_rank <= 0 {
			return Err(CurvatureError::InvalidMaxRank(max_rank));
		}
		let decay = (-(max_rank as f64) / self.amplitude).exp();
		Ok(self.amplitude * (1.0 - decay) * self.base_curvature)
	}

	/// Curvature for the edge of rank `rank` in a group whose max rank is
	/// `max_rank`. Negative ranks bend the other way by the same amount.
	pub fn curvature(&self, rank: i64, max_rank: i64) -> Result<f64, CurvatureError> {
		let max = self.max_curvature(max_rank)?;
		let magnitude = max * rank.unsigned_abs() as f64 / max_rank as f64;
		Ok(if rank < 0 { -magnitude } else { magnitude })
	}

	/// Upper bound no group's max curvature ever reaches.
	pub fn limit(&self) -> f64 {
		self.amplitude * self.base_curvature
	}
}

/// [`CurveConfig::curvature`] with the default configuration.
pub fn curvature(rank: i64, max_rank: i64) -> Result<f64, CurvatureError> {
	CurveConfig::default().curvature(rank, max_rank)
}

/// [`CurveConfig::max_curvature`] with the default configuration.
pub fn max_curvature(max_rank: i64) -> Result<f64, CurvatureError> {
	CurveConfig::default().max_curvature(max_rank)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn symmetric_in_rank() {
		for m in 1..=12 {
			for r in -m..=m {
				assert_eq!(curvature(-r, m).unwrap(), -curvature(r, m).unwrap());
			}
		}
	}

	#[test]
	fn rank_zero_is_straight() {
		for m in [1, 2, 7, 1000] {
			assert_eq!(curvature(0, m).unwrap(), 0.0);
		}
	}

	#[test]
	fn max_curvature_grows_and_saturates() {
		let limit = CurveConfig::default().limit();
		let mut previous = 0.0;
		for m in 1..=60 {
			let current = max_curvature(m).unwrap();
			assert!(current > previous, "not increasing at {m}");
			assert!(current < limit, "reached limit at {m}");
			previous = current;
		}
	}

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-12
	}

	#[test]
	fn outermost_rank_gets_max_curvature() {
		let m = 4;
		assert!(close(curvature(m, m).unwrap(), max_curvature(m).unwrap()));
		let (half, full) = (curvature(2, m).unwrap(), curvature(4, m).unwrap());
		assert!(close(half * 2.0, full));
	}

	#[test]
	fn non_positive_max_rank_is_rejected() {
		assert_eq!(curvature(0, 0), Err(CurvatureError::InvalidMaxRank(0)));
		assert_eq!(curvature(1, -3), Err(CurvatureError::InvalidMaxRank(-3)));
		assert!(max_curvature(0).is_err());
	}

	#[test]
	fn config_scales_curvature() {
		let config = CurveConfig {
			amplitude: 3.5,
			base_curvature: 0.5,
		};
		let doubled = config.curvature(1, 1).unwrap();
		assert!(close(doubled, 2.0 * curvature(1, 1).unwrap()));
	}
}
