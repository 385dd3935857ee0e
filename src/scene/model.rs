//! Model-set input.
//!
//! A model set is the list of meshes whose vertex positions become the
//! morph targets. On disk it is JSON:
//!
//! ```json
//! { "meshes": [ { "name": "sphere", "positions": [0.0, 3.0, 0.0, ...] } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::shapes;
use crate::error::MorphError;
use crate::points::{PointSet, COMPONENTS};

/// One mesh: a name and its flat `x, y, z` vertex positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMesh {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Flat vertex positions.
    pub positions: Vec<f32>,
}

/// Ordered list of meshes. Index order is what [`PairSelection`] refers to.
///
/// [`PairSelection`]: crate::morph::PairSelection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelSet {
    /// Meshes in load order.
    pub meshes: Vec<ModelMesh>,
}

impl ModelSet {
    /// Read and validate a JSON model set.
    ///
    /// # Errors
    ///
    /// [`MorphError::Io`] if the file can't be read, otherwise whatever
    /// [`ModelSet::from_json`] returns.
    pub fn load(path: &Path) -> Result<Self, MorphError> {
        let json = std::fs::read_to_string(path)?;
        let set = Self::from_json(&json)?;
        log::info!(
            "loaded {} meshes from {}",
            set.meshes.len(),
            path.display()
        );
        Ok(set)
    }

    /// Parse and validate a JSON model set.
    ///
    /// # Errors
    ///
    /// [`MorphError::ModelLoad`] if the JSON is malformed, holds no meshes,
    /// or any mesh's position buffer is empty or not a multiple of three.
    pub fn from_json(json: &str) -> Result<Self, MorphError> {
        let set: Self = serde_json::from_str(json)
            .map_err(|e| MorphError::ModelLoad(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    fn validate(&self) -> Result<(), MorphError> {
        if self.meshes.is_empty() {
            return Err(MorphError::ModelLoad("model set has no meshes".into()));
        }
        for (i, mesh) in self.meshes.iter().enumerate() {
            let len = mesh.positions.len();
            if len == 0 || len % COMPONENTS != 0 {
                return Err(MorphError::ModelLoad(format!(
                    "mesh {i} ({:?}) has {len} position floats",
                    mesh.name
                )));
            }
        }
        Ok(())
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// [`MorphError::ModelLoad`] if serialization fails (non-finite floats).
    pub fn to_json(&self) -> Result<String, MorphError> {
        serde_json::to_string(self)
            .map_err(|e| MorphError::ModelLoad(e.to_string()))
    }

    /// Convert every mesh into a [`PointSet`].
    ///
    /// # Errors
    ///
    /// [`MorphError::MalformedPointSet`] for a buffer that isn't a multiple
    /// of three.
    pub fn point_sets(&self) -> Result<Vec<PointSet>, MorphError> {
        self.meshes
            .iter()
            .map(|mesh| PointSet::from_flat(mesh.positions.clone()))
            .collect()
    }

    /// Mesh names in order.
    pub fn names(&self) -> Vec<String> {
        self.meshes.iter().map(|m| m.name.clone()).collect()
    }

    /// Built-in set of four procedural shapes with distinct point counts.
    ///
    /// Index 0 is the radius-3 sphere placeholder; the default pair
    /// (1, 3) morphs the torus into the helix.
    pub fn demo() -> Self {
        Self {
            meshes: vec![
                shapes::to_mesh("sphere", &shapes::sphere(3.0, 32, 16)),
                shapes::to_mesh("torus", &shapes::torus(2.5, 0.8, 16, 48)),
                shapes::to_mesh("cube", &shapes::cube(4.0, 12)),
                shapes::to_mesh("helix", &shapes::helix(2.0, 6.0, 5.0, 400)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_small_set() {
        let json = r#"{"meshes":[
            {"name":"a","positions":[0,0,0, 1,1,1]},
            {"positions":[2,2,2]}
        ]}"#;
        let set = ModelSet::from_json(json).unwrap();
        assert_eq!(set.names(), vec!["a".to_owned(), String::new()]);
        let sets = set.point_sets().unwrap();
        assert_eq!(sets[0].count(), 2);
        assert_eq!(sets[1].count(), 1);
    }

    #[test]
    fn rejects_bad_json() {
        let err = ModelSet::from_json("{\"meshes\": [").unwrap_err();
        assert!(matches!(err, MorphError::ModelLoad(_)));
    }

    #[test]
    fn rejects_empty_and_ragged_meshes() {
        let err = ModelSet::from_json(r#"{"meshes":[]}"#).unwrap_err();
        assert!(matches!(err, MorphError::ModelLoad(_)));

        let err = ModelSet::from_json(r#"{"meshes":[{"positions":[]}]}"#)
            .unwrap_err();
        assert!(matches!(err, MorphError::ModelLoad(_)));

        let err =
            ModelSet::from_json(r#"{"meshes":[{"name":"x","positions":[1,2]}]}"#)
                .unwrap_err();
        assert!(err.to_string().contains("\"x\""));
    }

    #[test]
    fn demo_has_four_distinct_sizes() {
        let demo = ModelSet::demo();
        let counts: Vec<usize> = demo
            .point_sets()
            .unwrap()
            .iter()
            .map(PointSet::count)
            .collect();
        assert_eq!(counts, vec![561, 833, 1014, 400]);
    }

    #[test]
    fn json_round_trip_preserves_demo() {
        let demo = ModelSet::demo();
        let back = ModelSet::from_json(&demo.to_json().unwrap()).unwrap();
        assert_eq!(back.meshes.len(), 4);
        assert_eq!(back.meshes[3].positions.len(), 1200);
    }

    #[test]
    fn load_reports_missing_files_as_io() {
        let err = ModelSet::load(Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, MorphError::Io(_)));
    }
}
