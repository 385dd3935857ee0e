//! Source/target pairing for the shader blend.
//!
//! A [`MorphPair`] is what the renderer consumes: two equal-length position
//! buffers and the progress scalar that mixes them. The equal-length check
//! lives here, at the boundary, so the GPU never sees mismatched buffers.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::interpolation::{lerp_position, InterpolationContext};
use crate::error::MorphError;
use crate::points::EqualizedPointSet;

/// Which loaded models to morph between, by index into the model list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[schemars(title = "Pair", inline)]
#[serde(default)]
pub struct PairSelection {
    /// Model shown at progress 0.
    #[schemars(title = "Source Model", range(min = 0))]
    pub source: usize,
    /// Model shown at progress 1.
    #[schemars(title = "Target Model", range(min = 0))]
    pub target: usize,
}

impl Default for PairSelection {
    fn default() -> Self {
        Self {
            source: 1,
            target: 3,
        }
    }
}

impl PairSelection {
    /// Build a [`MorphPair`] from the selected entries of `sets`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::PairIndexOutOfRange`] if either index is past
    /// the end of `sets`, or [`MorphError::ShapeMismatch`] if the two sets
    /// were not equalized together.
    pub fn select(
        &self,
        sets: &[EqualizedPointSet],
    ) -> Result<MorphPair, MorphError> {
        let pick = |index: usize| {
            sets.get(index).cloned().ok_or(MorphError::PairIndexOutOfRange {
                index,
                available: sets.len(),
            })
        };
        MorphPair::new(pick(self.source)?, pick(self.target)?)
    }
}

/// Two equal-length point buffers plus the blend progress.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphPair {
    source: EqualizedPointSet,
    target: EqualizedPointSet,
    progress: f32,
}

impl MorphPair {
    /// Pair `source` with `target`, starting at progress 0.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::ShapeMismatch`] if the counts differ. Debug
    /// builds also assert, since a mismatch is a programming error.
    pub fn new(
        source: EqualizedPointSet,
        target: EqualizedPointSet,
    ) -> Result<Self, MorphError> {
        debug_assert_eq!(
            source.count(),
            target.count(),
            "morph pair buffers must have equal length"
        );
        if source.count() != target.count() {
            return Err(MorphError::ShapeMismatch {
                source: source.count(),
                target: target.count(),
            });
        }
        Ok(Self {
            source,
            target,
            progress: 0.0,
        })
    }

    /// Buffer bound as the shader's `position` attribute.
    pub fn source(&self) -> &EqualizedPointSet {
        &self.source
    }

    /// Buffer bound as the shader's `position_target` attribute.
    pub fn target(&self) -> &EqualizedPointSet {
        &self.target
    }

    /// Points per buffer.
    pub fn count(&self) -> usize {
        self.source.count()
    }

    /// Current blend progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set the blend progress, clamped to [0, 1].
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Blended point at `index` (CPU mirror of the vertex shader).
    pub fn sample(&self, index: usize) -> Option<Vec3> {
        let ctx = InterpolationContext::linear(self.progress);
        Some(lerp_position(
            &ctx,
            self.source.point(index)?,
            self.target.point(index)?,
        ))
    }

    /// Write the blended flat buffer into `out`, replacing its contents.
    pub fn blend_into(&self, out: &mut Vec<f32>) {
        let t = self.progress;
        out.clear();
        out.extend(
            self.source
                .as_flat()
                .iter()
                .zip(self.target.as_flat())
                .map(|(a, b)| a * (1.0 - t) + b * t),
        );
    }

    /// The blended flat buffer.
    pub fn blend(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.source.as_flat().len());
        self.blend_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::{equalize_seeded, PointSet};

    fn equalized(counts: &[usize]) -> Vec<EqualizedPointSet> {
        let sets: Vec<PointSet> = counts
            .iter()
            .enumerate()
            .map(|(k, &n)| {
                let pts: Vec<Vec3> =
                    (0..n).map(|i| Vec3::splat((k * 100 + i) as f32)).collect();
                PointSet::from_points(&pts)
            })
            .collect();
        equalize_seeded(&sets, 17).unwrap()
    }

    #[test]
    fn default_selection_is_second_and_fourth_model() {
        let sel = PairSelection::default();
        assert_eq!((sel.source, sel.target), (1, 3));
    }

    #[test]
    fn select_rejects_missing_models() {
        let sets = equalized(&[2, 3]);
        let err = PairSelection::default().select(&sets).unwrap_err();
        assert!(matches!(
            err,
            MorphError::PairIndexOutOfRange {
                index: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn endpoints_reproduce_each_buffer() {
        let sets = equalized(&[3, 5, 2, 4]);
        let mut pair = PairSelection::default().select(&sets).unwrap();
        assert_eq!(pair.count(), 5);
        assert_eq!(pair.blend(), sets[1].as_flat());
        pair.set_progress(1.0);
        assert_eq!(pair.blend(), sets[3].as_flat());
    }

    #[test]
    fn sample_matches_blend() {
        let sets = equalized(&[4, 4]);
        let mut pair = PairSelection { source: 0, target: 1 }
            .select(&sets)
            .unwrap();
        pair.set_progress(0.25);
        let flat = pair.blend();
        let p = pair.sample(2).unwrap();
        assert_eq!(p.to_array(), [flat[6], flat[7], flat[8]]);
        // 2 + (102 - 2) * 0.25
        assert!((p.x - 27.0).abs() < 1e-4);
        assert!(pair.sample(4).is_none());
    }

    #[test]
    fn progress_is_clamped() {
        let sets = equalized(&[1, 1]);
        let mut pair = MorphPair::new(sets[0].clone(), sets[1].clone()).unwrap();
        pair.set_progress(1.7);
        assert_eq!(pair.progress(), 1.0);
        pair.set_progress(-0.2);
        assert_eq!(pair.progress(), 0.0);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn mismatched_lengths_are_an_error() {
        let a = equalized(&[2]).remove(0);
        let b = equalized(&[5]).remove(0);
        let err = MorphPair::new(a, b).unwrap_err();
        assert!(matches!(err, MorphError::ShapeMismatch { source: 2, target: 5 }));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "equal length")]
    fn mismatched_lengths_fail_loudly_in_debug() {
        let a = equalized(&[2]).remove(0);
        let b = equalized(&[5]).remove(0);
        let _ = MorphPair::new(a, b);
    }
}
