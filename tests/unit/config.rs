use super::*;

#[test]
fn style_parsing_accepts_aliases_in_any_case() {
    assert_eq!("frames".parse::<Style>().unwrap(), Style::Frames);
    assert_eq!("FRAME".parse::<Style>().unwrap(), Style::Frames);
    assert_eq!("u".parse::<Style>().unwrap(), Style::Up);
    assert_eq!("Down".parse::<Style>().unwrap(), Style::Down);
    assert_eq!("l".parse::<Style>().unwrap(), Style::Left);
    assert_eq!(" RIGHT ".parse::<Style>().unwrap(), Style::Right);
    assert!(matches!(
        "diagonal".parse::<Style>().unwrap_err(),
        PtvError::Validation(_)
    ));
}

#[test]
fn style_maps_to_direction_and_scaling() {
    assert_eq!(Style::Frames.scroll_direction(), None);
    assert_eq!(Style::Right.scroll_direction(), Some(ScrollDirection::Right));
    assert_eq!(Style::Frames.scale_mode(), ScaleMode::Fit);
    assert_eq!(Style::Down.scale_mode(), ScaleMode::Width);
    assert_eq!(Style::Left.scale_mode(), ScaleMode::Height);
}

#[test]
fn resolution_parsing() {
    assert_eq!(parse_resolution("1280x720").unwrap(), (1280, 720));
    assert_eq!(parse_resolution("640X480").unwrap(), (640, 480));
    assert_eq!(parse_resolution("0x0").unwrap(), (0, 0));
    assert!(parse_resolution("1280").is_err());
    assert!(parse_resolution("-2x4").is_err());
    assert!(parse_resolution("axb").is_err());
}

#[test]
fn defaults_match_an_empty_document() {
    let parsed = Settings::from_json_str("{}").unwrap();
    assert_eq!(parsed, Settings::default());
    assert_eq!((parsed.width, parsed.height), (1280, 720));
    assert_eq!(parsed.style, Style::Frames);
    assert_eq!(parsed.dpi, 150);
}

#[test]
fn json_overrides_and_style_alias() {
    let parsed =
        Settings::from_json_str(r#"{ "style": "u", "fps": 30, "duration": 12.5, "reverse": true }"#)
            .unwrap();
    assert_eq!(parsed.style, Style::Up);
    assert_eq!(parsed.fps, 30.0);
    assert_eq!(parsed.duration, 12.5);
    assert!(parsed.reverse);

    let json = serde_json::to_string(&parsed).unwrap();
    assert!(json.contains(r#""style":"UP""#));
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    assert!(Settings::from_json_str(r#"{ "colour": "red" }"#).is_err());
    assert!(Settings::from_json_str(r#"{ "fps": 0 }"#).is_err());
    assert!(Settings::from_json_str(r#"{ "seconds_per_item": -1 }"#).is_err());
    assert!(Settings::from_json_str(r#"{ "style": "sideways" }"#).is_err());
    assert!(Settings::from_json_str(r#"{ "dpi": 0 }"#).is_err());
}

#[test]
fn summary_lists_the_effective_values() {
    let s = Settings {
        width: 0,
        ..Settings::default()
    };
    let text = s.to_string();
    assert!(text.contains("Resolution: autox720"));
    assert!(text.contains("Style: FRAMES"));
    assert!(!text.contains("Duration"));
}

#[test]
fn missing_file_is_an_error() {
    assert!(Settings::from_json_path(Path::new("target/no/such/settings.json")).is_err());
}
