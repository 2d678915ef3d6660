mod common;

use std::path::Path;

use common::{png_data_url, Call, FakeBackend, RecordingObserver};
use fitsview_core::error::FitsViewError;
use fitsview_core::mapping::{DrawTransform, PixelCoord};
use fitsview_core::status::{self, StatusLevel};
use fitsview_core::viewer::{
    shape_label, summarize_header, SliceControl, ViewOutcome, ViewerEvent, ViewerSession,
};

fn session(backend: &FakeBackend) -> (ViewerSession<&FakeBackend, RecordingObserver>, RecordingObserver) {
    let observer = RecordingObserver::default();
    (ViewerSession::new(backend, observer.clone(), 1.0), observer)
}

fn upload(session: &mut ViewerSession<&FakeBackend, RecordingObserver>) -> SliceControl {
    session.upload(Path::new("/tmp/sun.fits")).unwrap()
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[test]
fn test_upload_3d_enables_slice_control() {
    let backend = FakeBackend::with_shape(vec![10, 256, 512]);
    let (mut session, _) = session(&backend);

    let slice = upload(&mut session);
    assert_eq!(
        slice,
        SliceControl {
            enabled: true,
            max: 9,
            value: 0
        }
    );
    assert_eq!(session.state().file_id(), Some("abc123"));
    assert_eq!(session.state().current_z(), 0);
    assert_eq!(session.state().preview_size(), Some([512, 256]));
}

#[test]
fn test_upload_2d_hides_slice_control() {
    let backend = FakeBackend::with_shape(vec![256, 512]);
    let (mut session, _) = session(&backend);

    let slice = upload(&mut session);
    assert!(!slice.enabled);
    assert_eq!(session.set_slice(3), None);
    // Slice rejected: no requests beyond the upload.
    assert_eq!(backend.calls().len(), 1);
}

#[test]
fn test_upload_emits_busy_status_first_and_settles() {
    let backend = FakeBackend::default();
    let (mut session, observer) = session(&backend);
    upload(&mut session);

    let events = observer.events();
    match events.first() {
        Some(ViewerEvent::Status(s)) => {
            assert_eq!(s.level, StatusLevel::Warning);
            assert_eq!(s.text, status::UPLOADING);
        }
        other => panic!("expected busy status first, got {other:?}"),
    }
    assert!(matches!(events.last(), Some(ViewerEvent::UploadSettled)));
    assert!(events
        .iter()
        .any(|e| matches!(e, ViewerEvent::FileLoaded { file_id, .. } if file_id == "abc123")));
    assert!(observer
        .statuses()
        .iter()
        .any(|s| s.level == StatusLevel::Success && s.text == status::UPLOAD_SUCCESS));
}

#[test]
fn test_upload_server_error_shows_message_and_keeps_state() {
    let backend = FakeBackend {
        upload_error: Some("Unsupported file".to_string()),
        ..FakeBackend::default()
    };
    let (mut session, observer) = session(&backend);

    let err = session.upload(Path::new("/tmp/bad.fits")).unwrap_err();
    assert!(matches!(err, FitsViewError::Server { .. }));
    assert!(session.state().file().is_none());

    let last_status = observer.statuses().pop().unwrap();
    assert_eq!(last_status.level, StatusLevel::Danger);
    assert_eq!(last_status.text, "Unsupported file");
    assert!(matches!(
        observer.events().last(),
        Some(ViewerEvent::UploadSettled)
    ));
}

#[test]
fn test_upload_with_bad_preview_leaves_state_untouched() {
    let backend = FakeBackend {
        upload_preview: Some("data:image/png;base64,not-an-image".to_string()),
        ..FakeBackend::default()
    };
    let (mut session, observer) = session(&backend);

    let err = session.upload(Path::new("/tmp/b.fits")).unwrap_err();
    assert!(matches!(err, FitsViewError::MalformedResponse(_)));
    assert!(session.state().file().is_none());
    assert!(session.state().last_preview().is_none());

    let last_status = observer.statuses().pop().unwrap();
    assert!(last_status.text.starts_with("Upload failed: "));
}

#[test]
fn test_upload_resets_selection_and_slice() {
    let backend = FakeBackend::default();
    let (mut session, _) = session(&backend);
    upload(&mut session);
    session.set_slice(4);
    session.select_pixel(PixelCoord { x: 10, y: 20 }).unwrap();

    upload(&mut session);
    assert_eq!(session.state().current_z(), 0);
    assert_eq!(session.state().last_click(), None);
    assert!(session.state().last_slit().is_none());
}

// ---------------------------------------------------------------------------
// Preview refresh
// ---------------------------------------------------------------------------

#[test]
fn test_set_slice_clamps_and_refreshes_preview() {
    let backend = FakeBackend::default();
    let (mut session, _) = session(&backend);
    upload(&mut session);
    backend.clear_calls();

    let report = session.set_slice(42).unwrap();
    assert_eq!(session.state().current_z(), 9);
    assert_eq!(report.preview, ViewOutcome::Rendered);
    assert_eq!(report.slit, ViewOutcome::Skipped);

    match backend.calls().as_slice() {
        [Call::Preview(p)] => {
            assert_eq!(p.z, 9);
            assert_eq!(p.query_pairs()[2], ("percent_clip", "1.0".to_string()));
        }
        other => panic!("unexpected calls {other:?}"),
    }
}

#[test]
fn test_correction_toggle_refreshes_all_views_with_selection() {
    let backend = FakeBackend::default();
    let (mut session, _) = session(&backend);
    upload(&mut session);
    session.select_pixel(PixelCoord { x: 5, y: 6 }).unwrap();
    backend.clear_calls();

    let report = session.set_correction(true);
    assert!(report.preview.is_rendered());
    assert!(report.slit.is_rendered());
    assert!(report.spectrum.is_rendered());

    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    match &calls[..] {
        [Call::Preview(p), Call::Slit(s), Call::Spectrum(sp)] => {
            assert!(p.apply_correction && s.apply_correction && sp.apply_correction);
            assert_eq!(s.x, 5);
            assert_eq!((sp.x, sp.y), (5, 6));
        }
        other => panic!("unexpected calls {other:?}"),
    }
}

#[test]
fn test_refresh_without_file_is_noop() {
    let backend = FakeBackend::default();
    let (mut session, _) = session(&backend);
    let report = session.refresh();
    assert_eq!(report.preview, ViewOutcome::Skipped);
    assert!(backend.calls().is_empty());
}

#[test]
fn test_preview_failure_does_not_block_slit_and_spectrum() {
    let backend = FakeBackend {
        fail_preview: true,
        ..FakeBackend::default()
    };
    let (mut session, observer) = session(&backend);
    upload(&mut session);
    session.select_pixel(PixelCoord { x: 1, y: 1 }).unwrap();
    observer.clear();

    let report = session.refresh();
    assert!(matches!(report.preview, ViewOutcome::Failed(ref m) if m.contains("preview exploded")));
    assert!(report.slit.is_rendered());
    assert!(report.spectrum.is_rendered());
    assert!(observer
        .statuses()
        .iter()
        .any(|s| s.level == StatusLevel::Danger && s.text.starts_with(status::PREVIEW_FAILED)));
}

#[test]
fn test_open_existing_requests_preview() {
    let backend = FakeBackend::default();
    let (mut session, observer) = session(&backend);

    let report = session.open_existing("cat-7");
    assert!(report.preview.is_rendered());
    assert_eq!(session.state().file_id(), Some("cat-7"));
    assert!(!session.state().slice_control().enabled);
    assert!(observer
        .events()
        .iter()
        .any(|e| matches!(e, ViewerEvent::Preview(img) if img.size() == [512, 256])));
}

// ---------------------------------------------------------------------------
// Pixel selection
// ---------------------------------------------------------------------------

#[test]
fn test_select_pixel_renders_slit_and_spectrum() {
    let backend = FakeBackend::default();
    let (mut session, observer) = session(&backend);
    upload(&mut session);

    let report = session.select_pixel(PixelCoord { x: 100, y: 50 }).unwrap();
    assert_eq!(report.preview, ViewOutcome::Skipped);
    assert!(report.slit.is_rendered());
    assert!(report.spectrum.is_rendered());
    assert_eq!(session.state().last_click(), Some(PixelCoord { x: 100, y: 50 }));
    assert_eq!(session.state().last_slit().map(|i| i.size()), Some([4, 10]));
    assert_eq!(session.state().last_spectrum().map(|s| s.points().len()), Some(3));
    assert!(observer
        .statuses()
        .iter()
        .any(|s| s.text == status::EXTRACTING_SUCCESS));
}

#[test]
fn test_off_image_pixel_is_rejected_without_request() {
    let backend = FakeBackend::default();
    let (mut session, _) = session(&backend);
    upload(&mut session);
    backend.clear_calls();

    let err = session.select_pixel(PixelCoord { x: 512, y: 0 }).unwrap_err();
    assert!(matches!(err, FitsViewError::OutOfBounds { .. }));
    assert_eq!(session.state().last_click(), None);
    assert!(backend.calls().is_empty());
}

#[test]
fn test_select_pixel_without_file() {
    let backend = FakeBackend::default();
    let (mut session, _) = session(&backend);
    let err = session.select_pixel(PixelCoord { x: 0, y: 0 }).unwrap_err();
    assert!(matches!(err, FitsViewError::NoFileLoaded));
}

#[test]
fn test_slit_failure_keeps_spectrum() {
    let backend = FakeBackend {
        fail_slit: true,
        ..FakeBackend::default()
    };
    let (mut session, observer) = session(&backend);
    upload(&mut session);

    let report = session.select_pixel(PixelCoord { x: 3, y: 3 }).unwrap();
    assert!(matches!(report.slit, ViewOutcome::Failed(_)));
    assert!(report.spectrum.is_rendered());
    assert!(session.state().last_slit().is_none());
    assert!(session.state().last_spectrum().is_some());
    assert!(!observer
        .statuses()
        .iter()
        .any(|s| s.text == status::EXTRACTING_SUCCESS));
}

#[test]
fn test_click_through_transform_selects_center_pixel() {
    let backend = FakeBackend {
        image_size: (100, 100),
        ..FakeBackend::default()
    };
    let (mut session, _) = session(&backend);
    upload(&mut session);

    let transform = DrawTransform::contain([400.0, 400.0], [100, 100]).unwrap();
    let pixel = transform.to_data(200.0, 200.0).unwrap();
    session.select_pixel(pixel).unwrap();
    assert_eq!(session.state().last_click(), Some(PixelCoord { x: 50, y: 50 }));
}

// ---------------------------------------------------------------------------
// Header summary
// ---------------------------------------------------------------------------

#[test]
fn test_summarize_header_orders_fields() {
    let summary = summarize_header(&common::sample_header());
    assert_eq!(
        summary,
        "OBJECT=Sun | DATE-OBS=2024-11-06T22:53:10 | EXPTIME=0.5 | NAXIS=10×256×512"
    );
}

#[test]
fn test_summarize_header_empty() {
    assert_eq!(
        summarize_header(&Default::default()),
        "No header information"
    );
}

#[test]
fn test_shape_label() {
    assert_eq!(shape_label(&[10, 512, 512]), "10×512×512");
    assert_eq!(shape_label(&[]), "-");
}

#[test]
fn test_png_helper_roundtrips_size() {
    let img = fitsview_core::data_url::DecodedImage::from_data_url(&png_data_url(7, 3)).unwrap();
    assert_eq!(img.size(), [7, 3]);
    assert_eq!(img.rgba.len(), 7 * 3 * 4);
}

// ---------------------------------------------------------------------------
// Spectrum series
// ---------------------------------------------------------------------------

#[test]
fn test_spectrum_uses_wavelength_axis_when_lengths_match() {
    let series = fitsview_core::viewer::SpectrumSeries {
        wavelength: vec![500.0, 501.0],
        intensity: vec![3.0, f64::NAN],
    };
    assert_eq!(series.x_label(), "Wavelength (pix)");
    assert_eq!(series.points(), vec![[500.0, 3.0]]);
}

#[test]
fn test_spectrum_falls_back_to_index_axis() {
    let series = fitsview_core::viewer::SpectrumSeries {
        wavelength: vec![],
        intensity: vec![3.0, 4.0],
    };
    assert_eq!(series.x_label(), "Pixel index");
    assert_eq!(series.points(), vec![[0.0, 3.0], [1.0, 4.0]]);
}

#[test]
fn test_null_wavelength_reads_as_index_axis() {
    let response: fitsview_core::api::SpectrumResponse =
        serde_json::from_str(r#"{"wavelength":null,"intensity":[1.0,2.0]}"#).unwrap();
    let series = fitsview_core::viewer::SpectrumSeries::from(response);
    assert!(!series.has_wavelength());
    assert_eq!(series.x_label(), "Pixel index");
    assert_eq!(series.points(), vec![[0.0, 1.0], [1.0, 2.0]]);
}

#[test]
fn test_null_intensity_reads_as_empty_series() {
    let response: fitsview_core::api::SpectrumResponse =
        serde_json::from_str(r#"{"wavelength":[500.0],"intensity":null}"#).unwrap();
    assert!(response.intensity.is_empty());
    assert!(fitsview_core::viewer::SpectrumSeries::from(response).is_empty());
}
