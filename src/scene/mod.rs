//! Particle scene: the equalized model set and the active morph pair.
//!
//! Loading equalizes every model once. Re-pairing afterwards only picks
//! different entries out of the equalized list. Loads are tracked by a
//! [`SceneLoader`] generation so a slow load that finishes after a newer
//! one started is dropped instead of overwriting it.

/// JSON model sets.
pub mod model;
/// Procedural point-cloud generators.
pub mod shapes;

use rand::Rng;

pub use self::model::{ModelMesh, ModelSet};
use crate::error::MorphError;
use crate::morph::{MorphPair, PairSelection};
use crate::points::{equalize, EqualizedPointSet};

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Generation number this ticket was issued for.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Issues load tickets and decides which results are still wanted.
///
/// Only the most recently issued ticket is current. There is no abort:
/// superseded loads run to completion and their results are discarded.
#[derive(Debug, Default)]
pub struct SceneLoader {
    generation: u64,
    finished: bool,
}

impl SceneLoader {
    /// Loader with no load issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding any in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.finished = false;
        LoadTicket(self.generation)
    }

    /// Whether `ticket` is the latest issued and hasn't been finished.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation && !self.finished
    }

    /// Whether a current load is still waiting on its result.
    pub fn is_loading(&self) -> bool {
        self.generation > 0 && !self.finished
    }

    /// Accept `result` if `ticket` is current, else drop it.
    pub fn finish_load<T>(&mut self, ticket: LoadTicket, result: T) -> Option<T> {
        if !self.is_current(ticket) {
            log::warn!(
                "discarding stale load {} (current is {})",
                ticket.0,
                self.generation
            );
            return None;
        }
        self.finished = true;
        Some(result)
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Equalized point sets for one loaded model set, plus the active pair.
#[derive(Debug, Clone)]
pub struct ParticleScene {
    names: Vec<String>,
    sets: Vec<EqualizedPointSet>,
    selection: PairSelection,
    pair: MorphPair,
    /// Bumped whenever the pair buffers change.
    generation: u64,
    /// Generation the renderer last uploaded.
    rendered_generation: Option<u64>,
}

impl ParticleScene {
    /// Equalize `models` and pair the `selection`.
    ///
    /// # Errors
    ///
    /// Whatever [`ModelSet::point_sets`], [`equalize`], or
    /// [`PairSelection::select`] report. Nothing is kept on error.
    pub fn build<R: Rng + ?Sized>(
        models: &ModelSet,
        selection: PairSelection,
        rng: &mut R,
    ) -> Result<Self, MorphError> {
        let point_sets = models.point_sets()?;
        let sets = equalize(&point_sets, rng)?;
        let pair = selection.select(&sets)?;
        log::info!(
            "scene ready: {} models x {} points, pair {} -> {}",
            sets.len(),
            pair.count(),
            selection.source,
            selection.target
        );
        Ok(Self {
            names: models.names(),
            sets,
            selection,
            pair,
            generation: 0,
            rendered_generation: None,
        })
    }

    /// Pair different models without re-equalizing. On error the current
    /// pair is kept.
    ///
    /// # Errors
    ///
    /// [`MorphError::PairIndexOutOfRange`] for an index past the model list.
    pub fn reselect(&mut self, selection: PairSelection) -> Result<(), MorphError> {
        let mut pair = selection.select(&self.sets)?;
        pair.set_progress(self.pair.progress());
        self.pair = pair;
        self.selection = selection;
        self.generation += 1;
        log::info!(
            "morph pair now {} -> {}",
            selection.source,
            selection.target
        );
        Ok(())
    }

    /// The active pair.
    pub fn pair(&self) -> &MorphPair {
        &self.pair
    }

    /// Mutable access to the active pair (for progress updates).
    pub fn pair_mut(&mut self) -> &mut MorphPair {
        &mut self.pair
    }

    /// Active selection.
    pub fn selection(&self) -> PairSelection {
        self.selection
    }

    /// All equalized sets, in model order.
    pub fn sets(&self) -> &[EqualizedPointSet] {
        &self.sets
    }

    /// Model names, in model order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Points per equalized set.
    pub fn point_count(&self) -> usize {
        self.pair.count()
    }

    /// Whether the pair buffers changed since the last `mark_rendered()`.
    pub fn is_dirty(&self) -> bool {
        self.rendered_generation != Some(self.generation)
    }

    /// Record that the renderer holds the current pair buffers.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = Some(self.generation);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn build_equalizes_every_model() {
        let scene =
            ParticleScene::build(&ModelSet::demo(), PairSelection::default(), &mut rng())
                .unwrap();
        assert_eq!(scene.sets().len(), 4);
        assert!(scene.sets().iter().all(|s| s.count() == 1014));
        assert_eq!(scene.point_count(), 1014);
        assert_eq!(scene.names()[1], "torus");
        assert!(scene.is_dirty());
    }

    #[test]
    fn build_rejects_out_of_range_selection() {
        let models = ModelSet::from_json(r#"{"meshes":[{"positions":[1,2,3]}]}"#)
            .unwrap();
        let err = ParticleScene::build(&models, PairSelection::default(), &mut rng())
            .unwrap_err();
        assert!(matches!(err, MorphError::PairIndexOutOfRange { .. }));
    }

    #[test]
    fn reselect_keeps_sets_and_progress() {
        let mut scene =
            ParticleScene::build(&ModelSet::demo(), PairSelection::default(), &mut rng())
                .unwrap();
        scene.mark_rendered();
        scene.pair_mut().set_progress(0.4);
        let before = scene.sets().to_vec();

        scene
            .reselect(PairSelection { source: 0, target: 2 })
            .unwrap();
        assert_eq!(scene.sets(), before.as_slice());
        assert_eq!(scene.pair().source(), &before[0]);
        assert_eq!(scene.pair().target(), &before[2]);
        assert_eq!(scene.pair().progress(), 0.4);
        assert!(scene.is_dirty());
    }

    #[test]
    fn failed_reselect_keeps_the_old_pair() {
        let mut scene =
            ParticleScene::build(&ModelSet::demo(), PairSelection::default(), &mut rng())
                .unwrap();
        scene.mark_rendered();
        let err = scene
            .reselect(PairSelection { source: 0, target: 9 })
            .unwrap_err();
        assert!(matches!(
            err,
            MorphError::PairIndexOutOfRange { index: 9, available: 4 }
        ));
        assert_eq!(scene.selection(), PairSelection::default());
        assert!(!scene.is_dirty());
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut loader = SceneLoader::new();
        let first = loader.begin_load();
        let second = loader.begin_load();
        assert!(loader.is_loading());
        assert_eq!(loader.finish_load(first, "old"), None);
        assert_eq!(loader.finish_load(second, "new"), Some("new"));
        assert!(!loader.is_loading());
    }

    #[test]
    fn ticket_is_only_honored_once() {
        let mut loader = SceneLoader::new();
        let ticket = loader.begin_load();
        assert_eq!(loader.finish_load(ticket, 1), Some(1));
        assert_eq!(loader.finish_load(ticket, 2), None);
        assert_eq!(ticket.generation(), 1);
    }
}
