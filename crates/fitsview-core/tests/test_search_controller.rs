mod common;

use chrono::NaiveDate;
use serde_json::json;
use url::Url;

use common::{result_item, Call, FakeBackend};
use fitsview_core::api::{SearchResponse, SearchResultItem};
use fitsview_core::search::{Facet, QuickRange, ResultCard, SearchController, SearchPhase};

fn location() -> Url {
    Url::parse("http://127.0.0.1:5000/search?q=sun&instrument=NXST").unwrap()
}

fn backend_with(items: Vec<SearchResultItem>) -> FakeBackend {
    let total = items.len() as u64;
    FakeBackend {
        search_response: Some(SearchResponse { items, total }),
        ..FakeBackend::default()
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[test]
fn test_new_controller_is_idle_with_location_state() {
    let controller = SearchController::new(location());
    assert_eq!(controller.phase(), &SearchPhase::Idle);
    assert_eq!(controller.state().query(), "sun");
    assert!(controller.state().is_active(Facet::Instrument, "NXST"));
    assert_eq!(controller.summary(), "");
}

#[test]
fn test_initial_search_does_not_rewrite_location() {
    let backend = backend_with(vec![result_item("a")]);
    let mut controller = SearchController::new(location());

    controller.execute_search(&backend, false);
    assert_eq!(controller.location(), &location());
    assert_eq!(controller.phase(), &SearchPhase::Rendered);
    assert_eq!(
        backend.calls(),
        vec![Call::Search("q=sun&instrument=NXST&sort=-observed_at".into())]
    );
}

#[test]
fn test_search_replaces_location_query() {
    let backend = backend_with(vec![]);
    let mut controller = SearchController::new(location());
    controller.state_mut().toggle_facet(Facet::Flag, "cloudy");

    controller.execute_search(&backend, true);
    assert_eq!(
        controller.location().as_str(),
        "http://127.0.0.1:5000/search?q=sun&instrument=NXST&flags=cloudy&sort=-observed_at"
    );
    assert_eq!(controller.location().path(), "/search");
}

#[test]
fn test_begin_then_finish_split() {
    let mut controller = SearchController::new(location());
    let query = controller.begin_search(true);
    assert_eq!(controller.phase(), &SearchPhase::Searching);
    assert_eq!(controller.summary(), "Searching...");
    assert!(query.starts_with("q=sun"));

    controller.finish_search(Ok(SearchResponse {
        items: vec![result_item("x"), result_item("y")],
        total: 120,
    }));
    assert_eq!(controller.phase(), &SearchPhase::Rendered);
    assert_eq!(controller.items().len(), 2);
    assert_eq!(controller.total(), 120);
    assert_eq!(controller.summary(), "120 results");
}

#[test]
fn test_failed_search_renders_empty_state() {
    let backend = FakeBackend {
        search_response: None,
        ..FakeBackend::default()
    };
    let mut controller = SearchController::new(location());
    controller.finish_search(Ok(SearchResponse {
        items: vec![result_item("old")],
        total: 1,
    }));

    let phase = controller.execute_search(&backend, true).clone();
    assert_eq!(phase, SearchPhase::Failed("search exploded".into()));
    assert!(controller.items().is_empty());
    assert_eq!(controller.total(), 0);
    assert_eq!(controller.summary(), "Something went wrong while searching.");
}

#[test]
fn test_empty_result_message() {
    let backend = backend_with(vec![]);
    let mut controller = SearchController::new(location());
    controller.execute_search(&backend, false);
    assert_eq!(controller.summary(), "No matching observations.");
}

#[test]
fn test_chip_removal_then_search_drops_parameter() {
    let backend = backend_with(vec![]);
    let mut controller = SearchController::new(location());
    let key = controller
        .chips()
        .into_iter()
        .find(|c| c.label == "NXST")
        .map(|c| c.key)
        .unwrap();

    controller.remove_chip(&key);
    controller.execute_search(&backend, true);
    assert_eq!(controller.location().query(), Some("q=sun&sort=-observed_at"));
}

#[test]
fn test_quick_range_populates_dates() {
    let mut controller = SearchController::new(location());
    let now = NaiveDate::from_ymd_opt(2024, 11, 6)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let (from, to) = controller.apply_quick_range(QuickRange::Today, now);
    assert_eq!(from, "2024-11-06 00:00:00");
    assert_eq!(to, "2024-11-06 08:00:00");
    assert_eq!(controller.state().date_from(), Some(from.as_str()));
    assert_eq!(controller.state().date_to(), Some(to.as_str()));
}

// ---------------------------------------------------------------------------
// Result cards
// ---------------------------------------------------------------------------

#[test]
fn test_result_card_fallbacks() {
    let card = ResultCard::new(&result_item("f-1"), "/static/img/placeholder.png");
    assert_eq!(card.target, "(unknown target)");
    assert_eq!(card.filename, "f-1");
    assert_eq!(card.frames, "-");
    assert_eq!(card.shape, "-");
    assert_eq!(card.flags, "");
    assert_eq!(card.thumb_url, "/static/img/placeholder.png");
    assert_eq!(card.observed_at, "");
}

#[test]
fn test_result_card_formatting() {
    let item = SearchResultItem {
        file_id: "f-2".into(),
        filename: Some("nxst_20241106_225310.658925_l1.fits".into()),
        target: Some("Sun".into()),
        exptime: Some(json!(0.5)),
        frames: Some(12),
        shape: Some(json!([12, 256, 512])),
        flags: vec!["cloudy".into(), "saturated".into()],
        thumb_url: Some("/thumbs/f-2.png".into()),
        ..SearchResultItem::default()
    };
    let card = ResultCard::new(&item, "/placeholder.png");
    assert_eq!(card.target, "Sun");
    assert_eq!(card.exposure, "0.50 s");
    assert_eq!(card.frames, "12");
    assert_eq!(card.shape, "12×256×512");
    assert_eq!(card.flags, "cloudy, saturated");
    assert_eq!(card.thumb_url, "/thumbs/f-2.png");
    // No date_obs: taken from the file name.
    assert_eq!(card.observed_at, "2024-11-06 22:53:10");
}

#[test]
fn test_result_card_prefers_date_obs_and_text_exposure() {
    let item = SearchResultItem {
        file_id: "f-3".into(),
        date_obs: Some("2024-01-01T00:00:00".into()),
        exptime: Some(json!("n/a")),
        ..SearchResultItem::default()
    };
    let card = ResultCard::new(&item, "");
    assert_eq!(card.observed_at, "2024-01-01T00:00:00");
    assert_eq!(card.exposure, "n/a s");
}

#[test]
fn test_search_response_accepts_numeric_ids() {
    let response: SearchResponse = serde_json::from_value(json!({
        "items": [{"file_id": 42, "filename": "a.fits", "flags": ["cloudy"]}],
        "total": 1
    }))
    .unwrap();
    assert_eq!(response.items[0].file_id, "42");
    assert_eq!(response.items[0].flags, vec!["cloudy".to_string()]);
}
