//! End-to-end pipeline tests: raw log -> timeline, records, stats, clock.

use serde_json::json;
use traceplay_engine::{CollectSink, Diagnostic, PlaybackClock, PlaybackSpeed};
use traceplay_testing::{EventLogBuilder, parse_jsonl_log};
use traceplay_types::{EntryKind, ToolStatus, session_start_ms};

const SESSION_START: i64 = 1_700_000_000_000;

fn sample_session() -> Vec<traceplay_types::RawEvent> {
    EventLogBuilder::new()
        .status(SESSION_START, "initializing")
        .user(SESSION_START + 1_000, "list the files")
        .tool_start(SESSION_START + 2_000, "call-1", "Bash", json!({"command": "ls"}))
        .token_delta(SESSION_START + 2_100)
        .token_delta(SESSION_START + 2_200)
        .tool_result(SESSION_START + 2_400, "call-1", json!("src\nCargo.toml"))
        .tool_start(SESSION_START + 3_000, "call-2", "Read", json!({"file": "Cargo.toml"}))
        .tool_error(SESSION_START + 3_500, "call-2", "permission denied")
        .tool_start(SESSION_START + 4_000, "call-3", "Grep", json!({"pattern": "edition"}))
        .assistant_with_usage(
            SESSION_START + 5_000,
            "two files at the top level",
            "sonnet",
            120,
            40,
        )
        .build()
}

#[test]
fn test_normalize_full_session() {
    let events = sample_session();
    let entries = traceplay_engine::normalize(&events, SESSION_START);

    // 10 raw events: 2 token deltas dropped, 2 completed starts absorbed
    // into their results.
    assert_eq!(entries.len(), 6);
    assert!(entries.len() <= events.len());

    assert!(entries[0].is_startup);
    assert_eq!(entries[1].kind, EntryKind::User);
    assert_eq!(entries[1].time_offset, "0:01");

    let bash = entries[2].tool_call.as_ref().unwrap();
    assert_eq!(bash.status, ToolStatus::Complete);
    assert_eq!(bash.duration_ms, Some(400));
    assert_eq!(bash.start_offset, "0:02");

    let read = entries[3].tool_call.as_ref().unwrap();
    assert_eq!(read.status, ToolStatus::Error);
    assert_eq!(read.error.as_deref(), Some("permission denied"));

    let grep = entries[4].tool_call.as_ref().unwrap();
    assert_eq!(grep.status, ToolStatus::Running);

    let answer = &entries[5];
    assert_eq!(answer.kind, EntryKind::Assistant);
    assert_eq!(answer.model.as_deref(), Some("sonnet"));
    assert_eq!(answer.usage.unwrap().total_tokens, 160);
}

#[test]
fn test_reconcile_and_aggregate_full_session() {
    let events = sample_session();
    let records = traceplay_engine::reconcile(&events, SESSION_START);

    assert_eq!(records.len(), 3);
    assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let stats = traceplay_engine::aggregate(&records);
    assert_eq!(stats.total_calls, 3);
    assert_eq!(stats.error_count, 1);
    assert!(stats.error_count <= stats.total_calls);
    assert_eq!(stats.total_duration_ms, 900);
    assert_eq!(stats.avg_duration_ms, 450.0);
    assert_eq!(stats.tool_breakdown.len(), 3);
}

#[test]
fn test_both_generations_produce_the_same_timeline_shape() {
    for events in [
        EventLogBuilder::new(),
        EventLogBuilder::agent_runtime(),
    ]
    .map(|b| {
        b.user(SESSION_START, "go")
            .tool_start(SESSION_START + 100, "c1", "Read", json!({"file": "a.rs"}))
            .tool_result(SESSION_START + 350, "c1", json!("fn main() {}"))
            .build()
    }) {
        let entries = traceplay_engine::normalize(&events, SESSION_START);
        assert_eq!(entries.len(), 2);
        let call = entries[1].tool_call.as_ref().unwrap();
        assert_eq!(call.tool, "Read");
        assert_eq!(call.duration_ms, Some(250));

        let records = traceplay_engine::reconcile(&events, SESSION_START);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, ToolStatus::Complete);
    }
}

#[test]
fn test_orphan_result_record_free_but_displayed() {
    let events = EventLogBuilder::new()
        .user(SESSION_START, "go")
        .tool_result(SESSION_START + 500, "ghost", json!("late output"))
        .build();

    let mut sink = CollectSink::default();
    let records = traceplay_engine::reconcile_with(&events, SESSION_START, &mut sink);
    assert!(records.is_empty());
    assert_eq!(
        sink.diagnostics,
        vec![Diagnostic::OrphanResult {
            call_id: "ghost".to_string()
        }]
    );

    // The normalizer still shows the result as a standalone tool entry.
    let entries = traceplay_engine::normalize(&events, SESSION_START);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].kind, EntryKind::Tool);
    assert_eq!(
        entries[1].tool_call.as_ref().unwrap().status,
        ToolStatus::Complete
    );
}

#[test]
fn test_clock_replays_session_timeline() {
    let events = sample_session();
    let total = 5_000;
    let mut clock = PlaybackClock::new(&events, total);

    assert_eq!(clock.current_event_index(), Some(0));

    clock.play();
    clock.frame(0);
    clock.frame(1_000);
    assert_eq!(clock.current_ms(), 1_000);

    clock.set_speed(PlaybackSpeed::X4);
    clock.frame(1_500);
    assert_eq!(clock.current_ms(), 3_000);
    // Token deltas share the tool window; index counts raw events.
    assert_eq!(clock.index_at(3_000), Some(6));

    clock.frame(2_500);
    assert_eq!(clock.current_ms(), total);
    assert!(!clock.is_playing());
    assert_eq!(clock.progress(), 100.0);

    // Replay-from-start semantics at the end of the timeline.
    clock.play();
    assert_eq!(clock.current_ms(), 0);
}

#[test]
fn test_pipeline_from_jsonl_fixture() {
    let log = r#"
        {"id":"a","type":"user","timestamp":1000,"data":{"content":"hello"}}
        {"id":"b","type":"tool:start","timestamp":1200,"data":{"id":"x","tool":"Read"}}
        {"id":"c","type":"tool:result","timestamp":1600,"data":{"id":"x","output":"ok"}}
    "#;
    let events = parse_jsonl_log(log).unwrap();

    let entries = traceplay_engine::normalize(&events, 1000);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].tool_call.as_ref().unwrap().duration_ms, Some(400));

    let stats = traceplay_engine::aggregate(&traceplay_engine::reconcile(&events, 1000));
    assert_eq!(stats.total_calls, 1);
    assert_eq!(stats.avg_duration_ms, 400.0);
}

#[test]
fn test_session_start_parse_is_the_engine_precondition() {
    assert!(session_start_ms("2026-08-25T10:00:00Z").is_ok());
    assert!(session_start_ms("yesterday-ish").is_err());
}
