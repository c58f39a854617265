use rowloom::runtimes::{ExecutionTracker, RunStatus};
use rowloom::telemetry::{FormatterMode, SummaryFormatter};

fn sample_summary() -> rowloom::runtimes::ExecutionSummary {
    let mut tracker = ExecutionTracker::new("support");
    tracker.start_node("Triage");
    tracker.end_node("Triage", true, None);
    tracker.start_node("Billing");
    tracker.end_node("Billing", false, Some("card declined".to_string()));
    tracker.abort("node 'Billing' failed with no failure edge: card declined");
    tracker.finish(RunStatus::Aborted);
    tracker.summary()
}

#[test]
fn plain_mode_renders_without_ansi_codes() {
    let lines = SummaryFormatter::with_mode(FormatterMode::Plain).render(&sample_summary());
    assert!(lines.iter().all(|l| !l.contains('\x1b')));
    assert!(lines[0].contains("graph support"));
    assert!(lines[0].contains("aborted"));
}

#[test]
fn colored_mode_highlights_failures() {
    let lines = SummaryFormatter::with_mode(FormatterMode::Colored).render(&sample_summary());
    let billing = lines.iter().find(|l| l.contains("Billing")).unwrap();
    assert!(billing.contains("\x1b[31m"));
    assert!(billing.contains("card declined"));
}

#[test]
fn render_includes_path_and_abort_reason() {
    let lines = SummaryFormatter::with_mode(FormatterMode::Plain).render(&sample_summary());
    let tail = lines.last().unwrap();
    assert!(tail.contains("Triage -> Billing"));
    assert!(tail.contains("no failure edge"));
}

#[test]
fn one_line_per_result_plus_header_and_path() {
    let summary = sample_summary();
    let lines = SummaryFormatter::with_mode(FormatterMode::Plain).render(&summary);
    assert_eq!(lines.len(), summary.results.len() + 2);
}
