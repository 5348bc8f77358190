// Host-side tests for theme resolution and palettes.

use globe_core::*;

fn signals(query: Option<&str>, markers: &[&str], prefers_dark: Option<bool>) -> ThemeSignals {
    let mut s = ThemeSignals {
        query: query.map(str::to_string),
        prefers_dark,
        ..Default::default()
    };
    for m in markers {
        s.push_marker(*m);
    }
    s
}

#[test]
fn query_override_wins() {
    let s = signals(Some("dark"), &["light"], Some(false));
    assert_eq!(resolve_mode(&s), ThemeMode::Dark);
}

#[test]
fn invalid_query_falls_through_to_markers() {
    let s = signals(Some("purple"), &["dark"], Some(false));
    assert_eq!(resolve_mode(&s), ThemeMode::Dark);
}

#[test]
fn first_valid_marker_wins() {
    assert_eq!(resolve_mode(&signals(None, &["light", "dark"], Some(true))), ThemeMode::Light);
    assert_eq!(resolve_mode(&signals(None, &["sepia", "dark"], None)), ThemeMode::Dark);
}

#[test]
fn os_preference_then_light_default() {
    assert_eq!(resolve_mode(&signals(None, &[], Some(true))), ThemeMode::Dark);
    assert_eq!(resolve_mode(&signals(None, &[], Some(false))), ThemeMode::Light);
    assert_eq!(resolve_mode(&signals(None, &[], None)), ThemeMode::Light);
}

#[test]
fn mode_parses_and_displays() {
    assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
    assert_eq!("light".parse::<ThemeMode>(), Ok(ThemeMode::Light));
    let err = "Dark".parse::<ThemeMode>().unwrap_err();
    assert!(err.to_string().contains("Dark"));
    assert_eq!(ThemeMode::Dark.to_string(), "dark");
    assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
}

#[test]
fn palette_values() {
    let dark = palette(ThemeMode::Dark);
    assert_eq!(dark.label.to_css(), "#ffffff");
    assert_eq!(dark.label_stroke.to_css(), "rgba(0,0,0,0.5)");
    assert_eq!(dark.icon_tint.to_hex(), "ffffff");

    let light = palette(ThemeMode::Light);
    assert_eq!(light.label.to_css(), "#1a1a1a");
    assert_eq!(light.label_stroke.to_css(), "rgba(255,255,255,0.6)");
    assert_eq!(light.icon_tint.to_hex(), "1a1a1a");
}

#[test]
fn palette_is_pure() {
    for mode in [ThemeMode::Dark, ThemeMode::Light] {
        assert_eq!(palette(mode), palette(mode));
    }
    assert_ne!(palette(ThemeMode::Dark), palette(ThemeMode::Light));
}

#[test]
fn tracker_reports_only_changes() {
    let mut t = ModeTracker::new(ThemeMode::Light);
    assert_eq!(t.observe(ThemeMode::Light), None);
    assert_eq!(t.observe(ThemeMode::Dark), Some(ThemeMode::Dark));
    assert_eq!(t.observe(ThemeMode::Dark), None);
    assert_eq!(t.current(), ThemeMode::Dark);
}
