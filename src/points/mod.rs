//! Particle position data.
//!
//! A [`PointSet`] is the flat `x, y, z, x, y, z, ...` buffer pulled out of a
//! loaded mesh. [`equalize()`] turns a list of them into
//! [`EqualizedPointSet`]s that all share one length, so a shader can blend
//! any two of them index by index.

/// Pad-or-copy resampling to a common point count.
pub mod equalize;

use glam::Vec3;

pub use self::equalize::{
    equalize, equalize_seeded, equalize_to, max_count,
};
use crate::error::MorphError;

/// Floats per point in a flat position buffer.
pub const COMPONENTS: usize = 3;

/// An ordered set of 3D points stored as a flat `f32` buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet {
    array: Vec<f32>,
}

impl PointSet {
    /// Wrap a flat position buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::MalformedPointSet`] if the length is not a
    /// multiple of three.
    pub fn from_flat(array: Vec<f32>) -> Result<Self, MorphError> {
        if array.len() % COMPONENTS != 0 {
            return Err(MorphError::MalformedPointSet { len: array.len() });
        }
        Ok(Self { array })
    }

    /// Build a set from individual points.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut array = Vec::with_capacity(points.len() * COMPONENTS);
        for p in points {
            array.extend_from_slice(&p.to_array());
        }
        Self { array }
    }

    /// Number of points.
    #[must_use]
    pub fn count(&self) -> usize {
        self.array.len() / COMPONENTS
    }

    /// Whether the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// The flat `count * 3` buffer.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        &self.array
    }

    /// Consume the set, returning its flat buffer.
    #[must_use]
    pub fn into_flat(self) -> Vec<f32> {
        self.array
    }

    /// Point at `index`, if in range.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Vec3> {
        let start = index.checked_mul(COMPONENTS)?;
        let end = start.checked_add(COMPONENTS)?;
        self.array.get(start..end).map(Vec3::from_slice)
    }

    /// Iterate over the points in order.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.array.chunks_exact(COMPONENTS).map(Vec3::from_slice)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty set.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.points();
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// A [`PointSet`] that has been resampled to a shared length.
///
/// Only the equalizer creates these, so every set produced by one
/// [`equalize()`] call has the same [`count`](Self::count).
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizedPointSet {
    inner: PointSet,
}

impl EqualizedPointSet {
    pub(crate) fn new(inner: PointSet) -> Self {
        Self { inner }
    }

    /// Number of points (the shared `max_count`).
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.count()
    }

    /// The flat `count * 3` buffer, ready for upload.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        self.inner.as_flat()
    }

    /// View as a plain point set.
    #[must_use]
    pub fn as_point_set(&self) -> &PointSet {
        &self.inner
    }

    /// Consume, returning the flat buffer.
    #[must_use]
    pub fn into_flat(self) -> Vec<f32> {
        self.inner.into_flat()
    }

    /// Point at `index`, if in range.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.inner.point(index)
    }

    /// Iterate over the points in order.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.inner.points()
    }
}
