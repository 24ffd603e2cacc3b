use pretty_assertions::assert_eq;

use super::*;

#[test]
fn history_ids_stay_strictly_increasing_across_runs() {
    let mut state = state();
    complete_run(&mut state, "first run");
    apply(&mut state, RunEvent::Reset);
    complete_run(&mut state, "second run");
    apply(&mut state, RunEvent::Reset);
    complete_run(&mut state, "third run");

    for pair in state.history.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
    assert_eq!(state.history.len(), 5);
}

#[test]
fn history_is_append_only_and_never_reordered() {
    let mut state = state();
    let seeded: Vec<HistoryEntry> = state.history.clone();
    complete_run(&mut state, "newest");

    assert_eq!(state.history[..seeded.len()], seeded[..]);
    assert_eq!(state.history.last().map(|e| e.summary.as_str()), Some("newest"));
}

#[test]
fn fresh_id_is_one_past_the_current_maximum() {
    let mut state = state();
    assert_eq!(state.next_history_id(), 3);

    complete_run(&mut state, "one more");
    assert_eq!(state.history.last().map(|e| e.id), Some(3));
    assert_eq!(state.next_history_id(), 4);
}

#[test]
fn start_and_reset_preserve_history_exactly() {
    let mut state = state();
    complete_run(&mut state, "kept across runs");
    let history = state.history.clone();

    apply(
        &mut state,
        RunEvent::Start {
            request_text: "Analyze my farm conditions in Kerala, India.".to_string(),
        },
    );
    assert_eq!(state.history, history);

    apply(&mut state, RunEvent::Reset);
    assert_eq!(state.history, history);
}
