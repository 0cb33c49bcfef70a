#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod memory;

use std::fmt;

use geom::{Frame, Point3, RmfFrames, rmf_sweep};
use memory::{
    EncodeOptions, MemoryRecord, ReconstructOptions, encode_flat, points_from_flat, reconstruct,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A host that already installed a logger keeps it.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not initialize rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Encode a row-major `(N, columns)` coordinate buffer into a memory record.
///
/// `levels` defaults to three.
#[wasm_bindgen(js_name = encodeCurve)]
pub fn encode_curve(coords: &[f64], columns: u32, levels: Option<u32>) -> Result<JsValue, JsValue> {
    let record = encode_coords(coords, columns as usize, levels).map_err(to_js_error)?;
    debug_log!("encodeCurve: {} samples, L = {}", record.len(), record.length);
    serde_wasm_bindgen::to_value(&record).map_err(|err| JsError::new(&err.to_string()).into())
}

/// Rebuild a polyline (array of `[x, y, z]`) from a record produced by `encodeCurve`.
///
/// At most one of `step` and `sampleCount` may be given. `start` is an
/// `[x, y, z]` array and `frame` a `{ tangent, normal, binormal }` object; when
/// omitted the curve starts at the origin with the world-axis frame.
#[wasm_bindgen(js_name = reconstructCurve)]
pub fn reconstruct_curve(
    record: JsValue,
    step: Option<f64>,
    sample_count: Option<u32>,
    start: JsValue,
    frame: JsValue,
) -> Result<JsValue, JsValue> {
    let record: MemoryRecord = serde_wasm_bindgen::from_value(record).map_err(to_js_error)?;
    let start: Option<[f64; 3]> = optional_from_value(start)?;
    let frame: Option<Frame> = optional_from_value(frame)?;
    let points =
        reconstruct_record(&record, step, sample_count, start, frame).map_err(to_js_error)?;
    debug_log!("reconstructCurve: {} points", points.len());
    serde_wasm_bindgen::to_value(&points).map_err(|err| JsError::new(&err.to_string()).into())
}

/// Rotation-minimizing frames for a row-major `(N, columns)` coordinate buffer.
#[wasm_bindgen(js_name = rmfSweep)]
pub fn rmf_sweep_coords(coords: &[f64], columns: u32) -> Result<JsValue, JsValue> {
    let frames = sweep_coords(coords, columns as usize).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&frames).map_err(|err| JsError::new(&err.to_string()).into())
}

fn encode_coords(coords: &[f64], columns: usize, levels: Option<u32>) -> memory::Result<MemoryRecord> {
    let mut options = EncodeOptions::default();
    if let Some(levels) = levels {
        options = options.with_levels(levels as usize);
    }
    encode_flat(coords, columns, &options)
}

fn optional_from_value<T: DeserializeOwned>(value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value).map(Some).map_err(to_js_error)
}

fn reconstruct_record(
    record: &MemoryRecord,
    step: Option<f64>,
    sample_count: Option<u32>,
    start: Option<[f64; 3]>,
    frame: Option<Frame>,
) -> memory::Result<Vec<[f64; 3]>> {
    let defaults = ReconstructOptions::default();
    let options = ReconstructOptions {
        step,
        sample_count: sample_count.map(|count| count as usize),
        start: start.map_or(defaults.start, Point3::from),
        frame: frame.unwrap_or(defaults.frame),
    };
    let points = reconstruct(record, &options)?;
    Ok(points.into_iter().map(Point3::to_array).collect())
}

fn sweep_coords(coords: &[f64], columns: usize) -> memory::Result<RmfFrames> {
    let points = points_from_flat(coords, columns)?;
    Ok(rmf_sweep(&points))
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_coords, reconstruct_record, sweep_coords};
    use crate::geom::{Frame, Vec3};
    use crate::memory::CurveMemoryError;

    fn zigzag() -> Vec<f64> {
        vec![
            0.0, 0.0, 0.0, //
            1.0, 0.5, 0.0, //
            2.0, 0.0, 0.5, //
            3.0, 0.5, 1.0, //
            4.0, 0.0, 1.0,
        ]
    }

    #[test]
    fn encode_coords_honours_levels() {
        let record = encode_coords(&zigzag(), 3, Some(2)).expect("valid buffer");
        assert_eq!(record.len(), 5);
        assert_eq!(record.pack.levels.len(), 2);

        let record = encode_coords(&zigzag(), 3, None).expect("valid buffer");
        assert_eq!(record.pack.levels.len(), 3);
    }

    #[test]
    fn encode_coords_rejects_bad_shape() {
        assert!(matches!(
            encode_coords(&zigzag(), 2, None),
            Err(CurveMemoryError::InvalidFlatShape { .. })
        ));
    }

    #[test]
    fn reconstruct_record_checks_arguments() {
        let record = encode_coords(&zigzag(), 3, None).expect("valid buffer");
        assert_eq!(
            reconstruct_record(&record, Some(0.1), Some(10), None, None),
            Err(CurveMemoryError::ConflictingArguments)
        );

        let points =
            reconstruct_record(&record, None, Some(8), None, None).expect("valid arguments");
        assert_eq!(points.len(), 8);
        assert_eq!(points[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn reconstruct_record_places_curve_at_start_and_frame() {
        let record = encode_coords(&zigzag(), 3, None).expect("valid buffer");
        let start = [2.0, -1.0, 4.0];
        let frame = Frame::new(Vec3::Z, Vec3::X, Vec3::Y);

        let default = reconstruct_record(&record, None, Some(16), None, None).expect("valid");
        let placed =
            reconstruct_record(&record, None, Some(16), Some(start), Some(frame)).expect("valid");
        assert_eq!(placed.len(), default.len());
        assert_eq!(placed[0], start);

        // World frame (X, Y, Z) mapped onto (Z, X, Y): the default walk's
        // x/y/z offsets become z/x/y offsets of the placed walk.
        for (a, b) in default.iter().zip(&placed) {
            assert!((b[2] - start[2] - a[0]).abs() < 1e-9);
            assert!((b[0] - start[0] - a[1]).abs() < 1e-9);
            assert!((b[1] - start[1] - a[2]).abs() < 1e-9);
        }
    }

    #[test]
    fn sweep_coords_returns_one_frame_per_point() {
        let frames = sweep_coords(&zigzag(), 3).expect("valid buffer");
        assert_eq!(frames.len(), 5);
        assert!(sweep_coords(&[0.0; 4], 3).is_err());
    }
}
