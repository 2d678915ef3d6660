use std::io::Write;

use fitsview_core::api::{PreviewParams, SlitParams, SpectrumParams};
use fitsview_core::config::AppConfig;
use fitsview_core::data_url::data_url_bytes;
use fitsview_core::error::FitsViewError;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    config.validate().unwrap();
    assert_eq!(config.percent_clip, 1.0);
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn test_toml_round_trip() {
    let mut config = AppConfig::default();
    config.server_url = "https://fits.example.org".into();
    config.instruments = vec!["NXST".into(), "ALPHA".into()];
    let text = config.to_toml_string().unwrap();
    assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = AppConfig::from_toml_str("timeline_fps = 8.0\n").unwrap();
    assert_eq!(config.timeline_fps, 8.0);
    assert_eq!(config.server_url, AppConfig::default().server_url);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = AppConfig::from_toml_str("frames_api_path = \"/api/frames\"").unwrap_err();
    assert!(matches!(err, FitsViewError::Config(_)));
    assert!(AppConfig::from_toml_str("server_url = \"not a url\"").is_err());
    assert!(AppConfig::from_toml_str("timeline_fps = 0.0").is_err());
    assert!(AppConfig::from_toml_str("percent_clip = \"high\"").is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server_url = \"http://10.0.0.2:8080\"").unwrap();
    writeln!(file, "flags = [\"cloudy\"]").unwrap();

    let config = AppConfig::load_or_default(Some(file.path())).unwrap();
    assert_eq!(config.server_url, "http://10.0.0.2:8080");
    assert_eq!(config.flags, vec!["cloudy".to_string()]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, FitsViewError::Io(_)));
    assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
}

// ---------------------------------------------------------------------------
// Endpoint URLs
// ---------------------------------------------------------------------------

#[test]
fn test_endpoints_resolve_against_server_root() {
    let config = AppConfig::default();
    assert_eq!(
        config.fits_endpoint("preview").unwrap().as_str(),
        "http://127.0.0.1:5000/fits/preview"
    );
    assert_eq!(
        config.search_endpoint().unwrap().as_str(),
        "http://127.0.0.1:5000/api/search"
    );
    assert_eq!(
        config.frames_endpoint("a b/c").unwrap().as_str(),
        "http://127.0.0.1:5000/api/files/a%20b%2Fc/frames"
    );
}

#[test]
fn test_frames_endpoint_escapes_id_as_path_segment() {
    let config = AppConfig::default();
    assert_eq!(
        config.frames_endpoint("x+y?z").unwrap().as_str(),
        "http://127.0.0.1:5000/api/files/x+y%3Fz/frames"
    );

    let config = AppConfig {
        frames_api_path: "/v2/{file_id}".into(),
        ..AppConfig::default()
    };
    assert_eq!(
        config.frames_endpoint("42").unwrap().as_str(),
        "http://127.0.0.1:5000/v2/42"
    );
}

#[test]
fn test_resolve_keeps_absolute_urls() {
    let config = AppConfig::default();
    assert_eq!(
        config.resolve("https://cdn.example.org/t.png").unwrap().as_str(),
        "https://cdn.example.org/t.png"
    );
    assert_eq!(
        config.resolve("/static/frames/0.png").unwrap().as_str(),
        "http://127.0.0.1:5000/static/frames/0.png"
    );
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

#[test]
fn test_request_params_encode_booleans_and_clip() {
    let preview = PreviewParams {
        file_id: "f".into(),
        z: 3,
        percent_clip: 1.0,
        apply_correction: false,
    };
    assert_eq!(
        preview.query_pairs(),
        vec![
            ("file_id", "f".to_string()),
            ("z", "3".to_string()),
            ("percent_clip", "1.0".to_string()),
            ("apply_correction", "false".to_string()),
        ]
    );

    let slit = SlitParams {
        file_id: "f".into(),
        x: 12,
        percent_clip: 0.5,
        apply_correction: true,
    };
    assert_eq!(slit.query_pairs()[2].1, "0.5");
    assert_eq!(slit.query_pairs()[3].1, "true");

    let spectrum = SpectrumParams {
        file_id: "f".into(),
        x: 1,
        y: 2,
        apply_correction: true,
    };
    let keys: Vec<&str> = spectrum.query_pairs().iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["file_id", "x", "y", "apply_correction"]);
}

// ---------------------------------------------------------------------------
// Data URLs
// ---------------------------------------------------------------------------

#[test]
fn test_data_url_payload() {
    assert_eq!(data_url_bytes("data:text/plain;base64,aGk=").unwrap(), b"hi");
    assert_eq!(data_url_bytes("aGk=").unwrap(), b"hi");
}

#[test]
fn test_data_url_errors() {
    assert!(matches!(
        data_url_bytes("data:image/png,raw"),
        Err(FitsViewError::MalformedResponse(_))
    ));
    assert!(data_url_bytes("data:image/png;base64").is_err());
    assert!(data_url_bytes("data:image/png;base64,@@@").is_err());
}
