//! Browser bindings.
//!
//! The JS side owns the scene (loader, camera, renderer); these exports
//! give it the equalizer and a CPU blend. Typed arrays cross the boundary
//! as `Float32Array`; failures come back as string `JsValue`s.

use js_sys::{Array, Float32Array};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::error::MorphError;
use crate::morph::MorphPair;
use crate::points::{equalize, equalize_seeded, EqualizedPointSet, PointSet};

/// Install the panic hook and route `log` to the browser console.
#[wasm_bindgen(js_name = start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // Already initialized by an earlier call.
        log::debug!("console_log: {e}");
    }
}

/// Equalize an array of `Float32Array` position buffers to one length.
///
/// With a `seed` the padding is reproducible; without one it draws from
/// the browser's crypto RNG.
///
/// # Errors
///
/// A string describing the first invalid buffer, or a non-array entry.
#[wasm_bindgen(js_name = equalizePositions)]
pub fn equalize_positions(
    arrays: &Array,
    seed: Option<u64>,
) -> Result<Array, JsValue> {
    let flat = arrays
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value
                .dyn_into::<Float32Array>()
                .map(|a| a.to_vec())
                .map_err(|_| JsValue::from_str(&format!("entry {i} is not a Float32Array")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let equalized = equalize_flat(flat, seed).map_err(to_js)?;
    Ok(equalized
        .iter()
        .map(|buf| JsValue::from(Float32Array::from(buf.as_slice())))
        .collect())
}

/// Blend two equal-length position buffers at `progress`.
///
/// # Errors
///
/// A string if the buffers differ in length or aren't multiples of three.
#[wasm_bindgen(js_name = blendPositions)]
pub fn blend_positions(
    source: &Float32Array,
    target: &Float32Array,
    progress: f32,
) -> Result<Float32Array, JsValue> {
    let blended = blend_flat(source.to_vec(), target.to_vec(), progress)
        .map_err(to_js)?;
    Ok(Float32Array::from(blended.as_slice()))
}

fn to_js(e: MorphError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn equalize_flat(
    arrays: Vec<Vec<f32>>,
    seed: Option<u64>,
) -> Result<Vec<Vec<f32>>, MorphError> {
    let sets = arrays
        .into_iter()
        .map(PointSet::from_flat)
        .collect::<Result<Vec<_>, _>>()?;
    let equalized = match seed {
        Some(seed) => equalize_seeded(&sets, seed)?,
        None => equalize(&sets, &mut StdRng::from_os_rng())?,
    };
    Ok(equalized.into_iter().map(EqualizedPointSet::into_flat).collect())
}

fn blend_flat(
    source: Vec<f32>,
    target: Vec<f32>,
    progress: f32,
) -> Result<Vec<f32>, MorphError> {
    let source = PointSet::from_flat(source)?;
    let target = PointSet::from_flat(target)?;
    if source.count() != target.count() {
        return Err(MorphError::ShapeMismatch {
            source: source.count(),
            target: target.count(),
        });
    }
    let mut pair = MorphPair::new(
        EqualizedPointSet::new(source),
        EqualizedPointSet::new(target),
    )?;
    pair.set_progress(progress);
    Ok(pair.blend())
}
