// Host-side tests for the per-frame scene step: build, drag, theme swaps.

use globe_core::*;
use std::collections::HashMap;

const TRIO: &[BadgeSpec] = &[
    BadgeSpec { id: "rust", label: "Rust" },
    BadgeSpec { id: "git", label: "Git" },
    BadgeSpec { id: "linux", label: "Linux" },
];

// Records the palette the texture was painted with.
#[derive(Clone, Debug, PartialEq)]
struct PaletteTex {
    id: &'static str,
    palette: Palette,
}

fn paint(spec: &BadgeSpec, mode: ThemeMode) -> GeneratedTexture<PaletteTex> {
    GeneratedTexture {
        texture: PaletteTex {
            id: spec.id,
            palette: palette(mode),
        },
        aspect: 1.5,
    }
}

fn scene(density: f32, mode: ThemeMode) -> GlobeScene<PaletteTex> {
    let config = GlobeConfig {
        density,
        ..GlobeConfig::default()
    };
    let mut scene = GlobeScene::new(config, TRIO, 42, mode);
    scene.resize(1280, 720);
    scene
}

fn position_bits(scene: &GlobeScene<PaletteTex>) -> Vec<[u32; 3]> {
    scene
        .registry()
        .badges()
        .iter()
        .map(|b| b.position().to_array().map(f32::to_bits))
        .collect()
}

#[test]
fn build_places_each_label_per_density() {
    let mut s = scene(2.0, ThemeMode::Light);
    assert_eq!(s.build_with(paint), 6);

    let mut per_label: HashMap<&str, usize> = HashMap::new();
    for b in s.registry().badges() {
        *per_label.entry(b.spec.label).or_default() += 1;
    }
    assert_eq!(per_label.len(), 3);
    assert!(per_label.values().all(|&c| c == 2));
}

#[test]
fn frame_instances_sit_on_sphere_sorted_far_to_near() {
    let mut s = scene(2.0, ThemeMode::Light);
    s.build_with(paint);
    let radius = s.config().radius;

    for _ in 0..30 {
        let frame = s.update(1.0 / 60.0);
        assert_eq!(frame.instances.len(), 6);
        let dists: Vec<f32> = frame
            .instances
            .iter()
            .map(|i| frame.eye.distance(i.position))
            .collect();
        assert!(dists.windows(2).all(|w| w[0] >= w[1]));
        for inst in &frame.instances {
            assert!((inst.position.length() - radius).abs() < 1e-4);
            assert!(inst.opacity >= s.config().opacity_back - 1e-5);
            assert!(inst.opacity <= s.config().opacity_front + 1e-5);
            assert!(inst.size.x > 0.0 && inst.size.y > 0.0);
        }
        let mut seen: Vec<usize> = frame.instances.iter().map(|i| i.badge).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..6).collect::<Vec<_>>());
    }
}

#[test]
fn empty_registry_renders_nothing() {
    let mut s = scene(1.0, ThemeMode::Light);
    let frame = s.update(1.0 / 60.0);
    assert!(frame.instances.is_empty());
}

#[test]
fn drag_release_coasts_then_autorotates_same_direction() {
    let mut s = scene(1.0, ThemeMode::Light);
    s.build_with(paint);
    s.pointer_down(0.0, 0.0);
    s.pointer_move(100.0, 0.0);
    s.pointer_up();
    assert_eq!(s.rotation_mode(), RotationMode::Coasting);
    let st = s.rotation().state();
    assert!(st.velocity_yaw > 0.0);
    assert_eq!(st.velocity_pitch, 0.0);

    let mut resumed = false;
    for _ in 0..2000 {
        s.update(1.0 / 60.0);
        if s.rotation_mode() == RotationMode::IdleAutorotating {
            resumed = true;
            break;
        }
    }
    assert!(resumed);
    let (yaw_sign, _) = DIAGONALS[s.rotation().state().phase_index];
    assert!(yaw_sign > 0.0);
}

#[test]
fn theme_round_trip_restores_palette_and_keeps_positions() {
    let mut s = scene(2.0, ThemeMode::Light);
    s.build_with(paint);
    let positions = position_bits(&s);
    let original: Vec<PaletteTex> = s.registry().badges().iter().map(|b| b.texture.clone()).collect();

    assert!(s.set_mode(ThemeMode::Dark));
    s.refresh_with(paint);
    assert_eq!(position_bits(&s), positions);
    for b in s.registry().badges() {
        assert_eq!(b.mode, ThemeMode::Dark);
        assert_eq!(b.texture.palette, palette(ThemeMode::Dark));
    }

    assert!(s.set_mode(ThemeMode::Light));
    s.refresh_with(paint);
    assert_eq!(position_bits(&s), positions);
    let restored: Vec<PaletteTex> = s.registry().badges().iter().map(|b| b.texture.clone()).collect();
    assert_eq!(restored, original);
}

#[test]
fn repeated_mode_signal_is_not_a_change() {
    let mut s = scene(1.0, ThemeMode::Dark);
    assert!(!s.set_mode(ThemeMode::Dark));
    assert!(s.set_mode(ThemeMode::Light));
    assert!(!s.set_mode(ThemeMode::Light));
    assert_eq!(s.mode(), ThemeMode::Light);
}

#[test]
fn query_override_pins_mode() {
    let config = GlobeConfig::from_query("?theme=dark");
    let mut s: GlobeScene<PaletteTex> = GlobeScene::new(config, TRIO, 1, ThemeMode::Light);
    assert_eq!(s.mode(), ThemeMode::Dark);
    assert!(!s.set_mode(ThemeMode::Light));
    assert_eq!(s.mode(), ThemeMode::Dark);
    assert_eq!(s.build_params().mode, ThemeMode::Dark);
}

#[test]
fn rebuild_discards_in_flight_refresh() {
    let mut s = scene(1.0, ThemeMode::Light);
    s.build_with(paint);
    s.set_mode(ThemeMode::Dark);
    let ticket = s.begin_refresh();
    assert_eq!(s.build_with(paint), 3);
    assert!(!s.apply_refresh(&ticket, 0, paint(&TRIO[0], ThemeMode::Light)));
    assert!(s.registry().badges().iter().all(|b| b.mode == ThemeMode::Dark));
}
