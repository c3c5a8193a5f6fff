//! Facade smoke tests, run with `wasm-pack test --headless`
#![cfg(target_arch = "wasm32")]

use sandfall_engine::Sandfall;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn placeholder_sketch_steps_and_replays() {
    let mut sketch = Sandfall::with_placeholder(Some(r#"{"resolutionScale": 4}"#.to_string())).unwrap();
    assert!(sketch.cols() > 0 && sketch.rows() > 0);
    assert!(!sketch.toggle_replay());

    for _ in 0..8 {
        sketch.step();
    }
    assert_eq!(sketch.cached_frames(), 8);
    assert_eq!(sketch.frame_pixels().len() % 3, 0);

    assert!(sketch.toggle_replay());
    sketch.step();
    assert!(sketch.is_replaying());
}

#[wasm_bindgen_test]
fn bad_config_json_is_rejected() {
    assert!(Sandfall::with_placeholder(Some("{oops".to_string())).is_err());
}

#[wasm_bindgen_test]
fn export_produces_png() {
    let mut sketch = Sandfall::from_rgba(&[255; 16 * 16 * 4], 16, 16, None).unwrap();
    sketch.step();
    let png = sketch.export_png(Some(1)).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}
