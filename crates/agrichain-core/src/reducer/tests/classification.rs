use pretty_assertions::assert_eq;

use super::*;

// The Tamil Nadu request drives the documented fallback plan: the first two
// tasks are fetch work, the next two are analysis work, in plan order.
#[test]
fn fallback_plan_splits_into_fetch_and_analysis_items_in_order() {
    let mut state = state();
    to_fetching(&mut state);
    apply(&mut state, RunEvent::FetchDone);

    let fetch_labels: Vec<&str> = state
        .fetch_items
        .iter()
        .map(|item| item.label.as_str())
        .collect();
    let analysis_labels: Vec<&str> = state
        .analysis_items
        .iter()
        .map(|item| item.label.as_str())
        .collect();

    assert_eq!(
        fetch_labels,
        vec![
            "Fetch weather data for Tamil Nadu, India.",
            "Fetch local soil and NDVI data"
        ]
    );
    assert_eq!(
        analysis_labels,
        vec![
            "Analyze weather and soil patterns",
            "Detect pest and disease risks"
        ]
    );
}

#[test]
fn classification_is_deterministic_for_the_same_plan() {
    let mut first = state();
    let mut second = state();
    to_fetching(&mut first);
    to_fetching(&mut second);

    assert_eq!(first.fetch_items, second.fetch_items);

    apply(&mut first, RunEvent::FetchDone);
    apply(&mut second, RunEvent::FetchDone);
    assert_eq!(first.analysis_items, second.analysis_items);
}

#[test]
fn item_labels_are_always_a_subset_of_the_plan() {
    let mut state = state();
    to_monitoring(&mut state);

    for item in state.fetch_items.iter().chain(state.analysis_items.iter()) {
        assert!(state.plan.contains(&item.label));
    }
}

#[test]
fn mixed_case_tasks_are_still_classified() {
    let mut state = state();
    apply(
        &mut state,
        RunEvent::Start {
            request_text: "Check the orchard".to_string(),
        },
    );
    apply(
        &mut state,
        RunEvent::PlanReady {
            tasks: vec![
                "FETCH canopy imagery".to_string(),
                "Inspect irrigation lines".to_string(),
                "DETECT fungal outbreaks".to_string(),
            ],
        },
    );

    assert_eq!(state.fetch_items.len(), 1);
    assert_eq!(state.fetch_items[0].label, "FETCH canopy imagery");

    apply(&mut state, RunEvent::FetchDone);
    assert_eq!(state.analysis_items.len(), 1);
    assert_eq!(state.analysis_items[0].label, "DETECT fungal outbreaks");
}
