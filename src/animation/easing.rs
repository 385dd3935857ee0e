//! Easing functions for progress animation.
//!
//! Provides the easing curves used to shape the morph progress over time.
//! All functions are designed for <100ns evaluation time.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control value.
        c1: f32,
        /// Second control value.
        c2: f32,
    },
    /// Symmetric power ease-in-out: slow at both ends.
    /// Exponent 2 is the common "power1.inOut" tween curve.
    PowerInOut {
        /// Curve exponent (1 = linear).
        exponent: f32,
    },
}

impl EasingFunction {
    /// Quadratic ease-in-out, the stock curve for progress tweens.
    pub const POWER1_IN_OUT: EasingFunction = EasingFunction::PowerInOut { exponent: 2.0 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::SqrtOut => t.sqrt(),
            EasingFunction::CubicHermite { c1, c2 } => {
                // f(t) = c0(1-t)³ + c1·3t(1-t)² + c2·3(1-t)t² + c3·t³
                // where c0=0.0, c3=1.0
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
            EasingFunction::PowerInOut { exponent } => {
                if t < 0.5 {
                    0.5 * (2.0 * t).powf(*exponent)
                } else {
                    1.0 - 0.5 * (2.0 - 2.0 * t).powf(*exponent)
                }
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::POWER1_IN_OUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_hermite_endpoints() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let in_out = EasingFunction::POWER1_IN_OUT;
        assert_eq!(in_out.evaluate(-3.0), 0.0);
        assert_eq!(in_out.evaluate(3.0), 1.0);
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.5), 0.75); // 1 - (1-0.5)² = 0.75
    }

    #[test]
    fn test_power_in_out_is_symmetric() {
        let in_out = EasingFunction::POWER1_IN_OUT;
        assert_eq!(in_out.evaluate(0.0), 0.0);
        assert_eq!(in_out.evaluate(0.5), 0.5);
        assert_eq!(in_out.evaluate(1.0), 1.0);
        assert!((in_out.evaluate(0.25) - 0.125).abs() < 1e-6);
        let sum = in_out.evaluate(0.2) + in_out.evaluate(0.8);
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_serde_uses_kind_tag() {
        let json = serde_json::to_value(EasingFunction::POWER1_IN_OUT).unwrap();
        assert_eq!(json["kind"], "power_in_out");
        assert_eq!(json["exponent"], 2.0);
        let back: EasingFunction = serde_json::from_value(json).unwrap();
        assert_eq!(back, EasingFunction::POWER1_IN_OUT);
    }
}
