use std::sync::Arc;

use rowloom::runtimes::{ExecutionPolicy, ExecutionTracker, RunStatus};

fn summary_with(results: &[(&str, bool)]) -> rowloom::runtimes::ExecutionSummary {
    let mut tracker = ExecutionTracker::new("g");
    for (name, success) in results {
        tracker.start_node(name);
        tracker.end_node(name, *success, None);
    }
    tracker.finish(RunStatus::Completed);
    tracker.summary()
}

#[test]
fn all_nodes_succeeded_requires_every_result() {
    let policy = ExecutionPolicy::AllNodesSucceeded;
    assert!(policy.evaluate(&summary_with(&[("a", true), ("b", true)])));
    assert!(!policy.evaluate(&summary_with(&[("a", true), ("b", false)])));
}

#[test]
fn all_nodes_succeeded_is_vacuously_true_for_no_results() {
    let policy = ExecutionPolicy::AllNodesSucceeded;
    assert!(policy.evaluate(&summary_with(&[])));
}

#[test]
fn critical_nodes_only_ignores_other_failures() {
    let policy = ExecutionPolicy::CriticalNodesOnly(vec!["pay".to_string()]);
    assert!(policy.evaluate(&summary_with(&[("pay", true), ("notify", false)])));
    assert!(!policy.evaluate(&summary_with(&[("pay", false), ("notify", true)])));
}

#[test]
fn unvisited_critical_node_counts_as_failed_not_an_error() {
    let policy = ExecutionPolicy::CriticalNodesOnly(vec!["pay".to_string()]);
    assert!(!policy.evaluate(&summary_with(&[("notify", true)])));
}

#[test]
fn critical_node_visited_twice_must_succeed_both_times() {
    let policy = ExecutionPolicy::CriticalNodesOnly(vec!["pay".to_string()]);
    assert!(!policy.evaluate(&summary_with(&[("pay", true), ("pay", false)])));
}

#[test]
fn custom_policy_sees_the_whole_summary() {
    let policy = ExecutionPolicy::Custom(Arc::new(|summary| summary.execution_path.len() <= 2));
    assert!(policy.evaluate(&summary_with(&[("a", false), ("b", false)])));
    assert!(!policy.evaluate(&summary_with(&[("a", true), ("b", true), ("c", true)])));
}

#[test]
fn tracker_results_are_immutable_once_recorded() {
    let mut tracker = ExecutionTracker::new("g");
    tracker.start_node("a");
    tracker.end_node("a", true, None);

    // A second end for the same node has nothing open to close.
    tracker.end_node("a", false, Some("late write".to_string()));
    tracker.finish(RunStatus::Completed);

    // Recording after finish is ignored.
    tracker.start_node("b");
    tracker.end_node("b", true, None);

    let summary = tracker.summary();
    assert_eq!(summary.results.len(), 1);
    assert!(summary.results[0].success());
    assert_eq!(summary.execution_path, vec!["a"]);
}

#[test]
fn tracker_records_path_in_visit_order() {
    let mut tracker = ExecutionTracker::new("g");
    for name in ["a", "b", "a"] {
        tracker.start_node(name);
        tracker.end_node(name, true, None);
    }
    tracker.finish(RunStatus::Completed);
    assert_eq!(tracker.summary().execution_path, vec!["a", "b", "a"]);
}
