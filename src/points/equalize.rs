//! Resample point sets of different sizes to one shared length.
//!
//! Every set is grown to the largest count in the batch. Points that exist
//! are copied verbatim; each missing slot is filled with a point drawn
//! uniformly at random, with replacement, from the same set. The tail is
//! therefore noisy duplicates of the original shape, never zeros and never
//! a periodic repeat.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{EqualizedPointSet, PointSet, COMPONENTS};
use crate::error::MorphError;

/// Largest point count in `sets` (0 for an empty slice).
#[must_use]
pub fn max_count(sets: &[PointSet]) -> usize {
    sets.iter().map(PointSet::count).max().unwrap_or(0)
}

/// Equalize every set to the largest count in the batch.
///
/// The whole batch is validated before any output is built, so either every
/// set is equalized or none is.
///
/// # Errors
///
/// - [`MorphError::NoPointSets`] if `sets` is empty.
/// - [`MorphError::EmptyPointSet`] if any set has zero points.
pub fn equalize<R: Rng + ?Sized>(
    sets: &[PointSet],
    rng: &mut R,
) -> Result<Vec<EqualizedPointSet>, MorphError> {
    if sets.is_empty() {
        return Err(MorphError::NoPointSets);
    }
    if let Some(index) = sets.iter().position(PointSet::is_empty) {
        return Err(MorphError::EmptyPointSet { index });
    }

    let max = max_count(sets);
    let mut out = Vec::with_capacity(sets.len());
    for (i, set) in sets.iter().enumerate() {
        log::debug!(
            "equalize set {i}: {} points, {} resampled",
            set.count(),
            max - set.count()
        );
        out.push(pad_or_copy(set, max, rng));
    }
    Ok(out)
}

/// Equalize a single set to `max_count` points.
///
/// # Errors
///
/// - [`MorphError::EmptyPointSet`] if the set has zero points.
/// - [`MorphError::TargetTooSmall`] if `max_count` is below the set's count.
pub fn equalize_to<R: Rng + ?Sized>(
    set: &PointSet,
    max_count: usize,
    rng: &mut R,
) -> Result<EqualizedPointSet, MorphError> {
    if set.is_empty() {
        return Err(MorphError::EmptyPointSet { index: 0 });
    }
    if max_count < set.count() {
        return Err(MorphError::TargetTooSmall {
            count: set.count(),
            max_count,
        });
    }
    Ok(pad_or_copy(set, max_count, rng))
}

/// [`equalize`] with a [`StdRng`] seeded from `seed`. Same input and seed
/// always give the same output.
///
/// # Errors
///
/// Same as [`equalize`].
pub fn equalize_seeded(
    sets: &[PointSet],
    seed: u64,
) -> Result<Vec<EqualizedPointSet>, MorphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    equalize(sets, &mut rng)
}

/// Copy the existing prefix, then draw the tail with replacement.
/// Callers guarantee `set` is non-empty and `max_count >= set.count()`.
fn pad_or_copy<R: Rng + ?Sized>(
    set: &PointSet,
    max_count: usize,
    rng: &mut R,
) -> EqualizedPointSet {
    let src = set.as_flat();
    let count = set.count();

    let mut array = Vec::with_capacity(max_count * COMPONENTS);
    array.extend_from_slice(src);
    for _ in count..max_count {
        let r = rng.random_range(0..count) * COMPONENTS;
        array.extend_from_slice(&src[r..r + COMPONENTS]);
    }

    EqualizedPointSet::new(PointSet { array })
}
