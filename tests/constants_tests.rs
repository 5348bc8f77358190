// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so the browser constants are included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use globe_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn depth_cue_limits_are_ordered() {
    assert!(WIDTH_BACK > 0.0 && WIDTH_BACK < WIDTH_FRONT);
    assert!(OPACITY_BACK >= 0.0 && OPACITY_BACK < OPACITY_FRONT);
    assert!(OPACITY_FRONT <= 1.0);
    assert!(DEPTH_OPACITY_EXPONENT > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_clears_the_sphere() {
    // The nearest badge edge must stay in front of the near plane.
    assert!(CAMERA_Z - SPHERE_RADIUS - WIDTH_FRONT > Z_NEAR);
    assert!(CAMERA_Z + SPHERE_RADIUS < Z_FAR);
    assert!(FOV_Y_DEG > 0.0 && FOV_Y_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn texture_planning_bounds() {
    assert!(MIN_FONT_PX < MAX_FONT_PX);
    assert!(LABEL_WIDTH_BUDGET > 0.0 && LABEL_WIDTH_BUDGET <= 1.0);
    assert!(2.0 * ICON_PAD < BASE_CANVAS_W);
    assert!(PLACEHOLDER_INSET > 0.0 && PLACEHOLDER_INSET < 0.5);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(ICON_CDN_BASE.starts_with("https://"));
    assert!(!ICON_CDN_BASE.ends_with('/'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scheduler_tuning_is_sane() {
    assert!(RELEASE_GRACE_SEC > 0.0);
    assert!(DRAG_VELOCITY_CARRY > 0.0 && DRAG_VELOCITY_CARRY <= 1.0);
    assert!(MOMENTUM_STOP_THRESHOLD > 0.0);
    assert!(RELAX_STEP > 0.0 && RELAX_STEP <= 1.0);
    assert!(RELAX_ITERATIONS > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn browser_constants() {
    assert!(!CONTAINER_ID.is_empty() && !CONTAINER_ID.starts_with('#'));
    assert!(CANVAS_STYLE.contains("touch-action:none"));
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
    assert!(ROOT_OBSERVED_ATTRIBUTES.contains(&"data-theme"));
    assert!(BODY_OBSERVED_ATTRIBUTES.contains(&"class"));
    assert!(DARK_SCHEME_QUERY.contains("prefers-color-scheme"));
    assert!(INITIAL_INSTANCE_CAPACITY > 0);
    // Must fit the i32 setTimeout delay and leave a slow CDN a few seconds.
    assert!(ICON_TIMEOUT_MS >= 1000 && ICON_TIMEOUT_MS <= i32::MAX as u32);
}
