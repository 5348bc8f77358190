// Host-side tests for query overrides and configuration defaults.

use globe_core::*;

#[test]
fn parses_theme_and_speed() {
    let q = QueryOverrides::parse("?theme=dark&speed=fast");
    assert_eq!(q.theme, Some(ThemeMode::Dark));
    assert_eq!(q.speed, Some(SpeedPreset::Fast));
}

#[test]
fn ignores_unknown_keys_and_invalid_values() {
    let q = QueryOverrides::parse("?foo=bar&theme=blue&speed=warp&flag");
    assert_eq!(q, QueryOverrides::default());
    assert_eq!(QueryOverrides::parse(""), QueryOverrides::default());
}

#[test]
fn presets_match_documented_tuples() {
    let slow = SpeedPreset::Slow.profile();
    assert_eq!(slow.angular_speed, 0.18);
    assert_eq!(slow.phase_duration, 7.0);
    assert_eq!(slow.drag_sensitivity, 0.004);
    assert_eq!(slow.momentum_damping, 0.96);

    let normal = SpeedProfile::default();
    assert_eq!(normal, SpeedPreset::Normal.profile());
    assert_eq!(normal.angular_speed, 0.30);
    assert_eq!(normal.phase_duration, 5.0);
    assert_eq!(normal.drag_sensitivity, 0.005);
    assert_eq!(normal.momentum_damping, 0.95);

    let fast = SpeedPreset::Fast.profile();
    assert_eq!(fast.angular_speed, 0.50);
    assert_eq!(fast.phase_duration, 3.5);
    assert_eq!(fast.momentum_damping, 0.93);
}

#[test]
fn speed_parse_error_names_value() {
    let err = "turbo".parse::<SpeedPreset>().unwrap_err();
    assert_eq!(err, ParseSpeedError("turbo".to_string()));
    assert!(err.to_string().contains("turbo"));
}

#[test]
fn config_from_query_applies_overrides() {
    let cfg = GlobeConfig::from_query("speed=slow&theme=light");
    assert_eq!(cfg.speed, SpeedPreset::Slow.profile());
    assert_eq!(cfg.theme_override, Some(ThemeMode::Light));
    assert_eq!(cfg.radius, GlobeConfig::default().radius);
}

#[test]
fn default_config_values() {
    let cfg = GlobeConfig::default();
    assert_eq!(cfg.radius, 2.15);
    assert_eq!(cfg.density, 1.0);
    assert_eq!(cfg.theme_override, None);
    assert!((cfg.mid_width() - 0.41).abs() < 1e-6);
}

#[test]
fn query_values_are_percent_and_plus_decoded() {
    let q = QueryOverrides::parse("?theme=dar%6B&speed=fast+");
    assert_eq!(q.theme, Some(ThemeMode::Dark));
    assert_eq!(q.speed, Some(SpeedPreset::Fast));
    assert_eq!(query_value("?theme=%20light%20", "theme").as_deref(), Some("light"));
    assert_eq!(query_value("theme=dark", "theme").as_deref(), Some("dark"));
    assert_eq!(query_value("?speed=slow", "theme"), None);
}

#[test]
fn first_occurrence_of_a_key_wins() {
    let q = QueryOverrides::parse("?theme=light&theme=dark");
    assert_eq!(q.theme, Some(ThemeMode::Light));
}

#[test]
fn encoded_theme_override_outranks_page_markers() {
    let search = "?theme=dar%6B";
    let mut signals = ThemeSignals {
        query: query_value(search, "theme"),
        ..Default::default()
    };
    signals.push_marker("light");
    assert_eq!(resolve_mode(&signals), ThemeMode::Dark);
    assert_eq!(GlobeConfig::from_query(search).theme_override, Some(ThemeMode::Dark));
}
