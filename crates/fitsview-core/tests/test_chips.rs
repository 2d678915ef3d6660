use fitsview_core::search::{chips, remove_chip, ChipKey, Facet, Range, SearchState};

fn labels(state: &SearchState) -> Vec<String> {
    chips(state).into_iter().map(|c| c.label).collect()
}

#[test]
fn test_no_filters_no_chips() {
    assert!(chips(&SearchState::default()).is_empty());
}

#[test]
fn test_chip_order_and_labels() {
    let mut state = SearchState::default();
    state.set_frames(Range {
        min: None,
        max: Some(20),
    });
    state.toggle_facet(Facet::Flag, "cloudy");
    state.toggle_facet(Facet::Instrument, "NXST");
    state.set_date_range(Some("2024-11-01 00:00:00".into()), None);
    state.set_query("sun");
    state.set_exposure(Range {
        min: Some(0.5),
        max: Some(2.0),
    });

    assert_eq!(
        labels(&state),
        vec![
            "sun",
            "2024-11-01 00:00:00 ~ …",
            "NXST",
            "cloudy",
            "Exposure 0.5~2s",
            "Frames …~20",
        ]
    );
}

#[test]
fn test_removing_instrument_chip_drops_parameter() {
    let mut state = SearchState::default();
    state.toggle_facet(Facet::Instrument, "A");
    assert!(state.to_query_string().contains("instrument=A"));

    let chip = chips(&state)
        .into_iter()
        .find(|c| c.label == "A")
        .unwrap();
    assert_eq!(chip.key, ChipKey::Facet(Facet::Instrument, "A".to_string()));

    remove_chip(&mut state, &chip.key);
    assert!(!state.to_query_string().contains("instrument"));
    assert!(!state.is_active(Facet::Instrument, "A"));
}

#[test]
fn test_removing_one_instrument_keeps_others() {
    let mut state = SearchState::default();
    state.toggle_facet(Facet::Instrument, "A");
    state.toggle_facet(Facet::Instrument, "B");
    remove_chip(&mut state, &ChipKey::Facet(Facet::Instrument, "A".into()));
    assert!(state.to_query_string().contains("instrument=B&"));
}

#[test]
fn test_removing_range_chips_clears_both_ends() {
    let mut state = SearchState::default();
    state.set_exposure_text("1", "5");
    state.set_frames_text("2", "9");
    state.set_date_range(Some("a".into()), Some("b".into()));

    remove_chip(&mut state, &ChipKey::Exposure);
    remove_chip(&mut state, &ChipKey::Frames);
    remove_chip(&mut state, &ChipKey::DateRange);
    assert_eq!(state, SearchState::default());
}

#[test]
fn test_removing_query_chip() {
    let mut state = SearchState::default();
    state.set_query("moon");
    state.set_page(5);
    remove_chip(&mut state, &ChipKey::Query);
    assert_eq!(state.query(), "");
    assert_eq!(state.page(), 1);
}
