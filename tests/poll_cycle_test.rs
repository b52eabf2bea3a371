//! End-to-end tests for the poll cycle with scripted API and recording sink

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use serde_json::{json, Value};

use homework_bot::{Clock, HomeworkApi, HomeworkBot, MessageSink, PollError};

/// API stub that replays a scripted queue of responses and records cursors
struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value, PollError>>>,
    seen_cursors: Mutex<Vec<i64>>,
}

impl ScriptedApi {
    fn new(responses: Vec<Result<Value, PollError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            seen_cursors: Mutex::new(Vec::new()),
        }
    }

    fn seen_cursors(&self) -> Vec<i64> {
        self.seen_cursors.lock().unwrap().clone()
    }
}

impl HomeworkApi for &ScriptedApi {
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError> {
        self.seen_cursors.lock().unwrap().push(from_date);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted API ran out of responses")
    }
}

/// Sink that records every delivered message; can be switched to fail
struct RecordingSink {
    sent: Mutex<Vec<String>>,
    broken: AtomicBool,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            broken: AtomicBool::new(false),
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }
}

impl MessageSink for &RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, text: &str) -> Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            bail!("sink is down");
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clock with a fixed start time and no real sleeping
struct TestClock {
    start: i64,
}

impl Clock for &TestClock {
    fn now_unix(&self) -> i64 {
        self.start
    }

    async fn sleep(&self, _duration: Duration) {}
}

fn hw_response(items: Value, current_date: i64) -> Result<Value, PollError> {
    Ok(json!({"homeworks": items, "current_date": current_date}))
}

const APPROVED_HW1: &str = "Changed review status of \"hw1\". \
    Work has been reviewed: the reviewer liked everything. Hooray!";

#[tokio::test]
async fn test_single_status_change_is_notified_and_cursor_advances() {
    // Given: the API reports one approved homework at server time 1000
    let api = ScriptedApi::new(vec![hw_response(
        json!([{"homework_name": "hw1", "status": "approved"}]),
        1000,
    )]);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    // When: one poll cycle runs
    bot.poll_once().await;

    // Then: exactly the mapped verdict text is delivered
    assert_eq!(sink.sent(), vec![APPROVED_HW1.to_string()]);
    // And: the first fetch used the startup cursor, then advanced to 1000
    assert_eq!(api.seen_cursors(), vec![500]);
    assert_eq!(bot.cursor(), 1000);
}

#[tokio::test]
async fn test_repeated_identical_status_is_deduplicated() {
    // Given: two cycles return the same homework with the same status
    let items = json!([{"homework_name": "hw1", "status": "approved"}]);
    let api = ScriptedApi::new(vec![
        hw_response(items.clone(), 1000),
        hw_response(items, 1000),
    ]);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    bot.poll_once().await;
    bot.poll_once().await;

    // Then: only the first cycle produced a message
    assert_eq!(sink.sent().len(), 1);
    // And: the second fetch started from the advanced cursor
    assert_eq!(api.seen_cursors(), vec![500, 1000]);
}

#[tokio::test]
async fn test_http_error_reported_once_until_error_changes() {
    // Given: two consecutive 503s, then a different failure
    let api = ScriptedApi::new(vec![
        Err(PollError::HttpStatus {
            url: "https://example.com/api".to_string(),
            status: 503,
        }),
        Err(PollError::HttpStatus {
            url: "https://example.com/api".to_string(),
            status: 503,
        }),
        Err(PollError::MissingHomeworksKey),
    ]);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    bot.poll_once().await;
    bot.poll_once().await;

    // Then: the repeated 503 is reported exactly once
    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("Bot failure:"));
    assert!(sent[0].contains("503"));

    // When: a different error kind appears
    bot.poll_once().await;

    // Then: it is reported as a new message
    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].contains("homeworks"));
}

#[tokio::test]
async fn test_success_does_not_clear_error_dedup_retroactively() {
    // Given: 503, then a clean empty cycle, then the same 503 again
    let err_503 = || {
        Err(PollError::HttpStatus {
            url: "https://example.com/api".to_string(),
            status: 503,
        })
    };
    let api = ScriptedApi::new(vec![err_503(), hw_response(json!([]), 2000), err_503()]);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    bot.poll_once().await;
    bot.poll_once().await;
    bot.poll_once().await;

    // Then: the error record survives the successful cycle, no second report
    assert_eq!(sink.sent().len(), 1);
    // And: the clean cycle still advanced the cursor
    assert_eq!(api.seen_cursors(), vec![500, 500, 2000]);
}

#[tokio::test]
async fn test_bad_item_aborts_whole_cycle_before_any_send() {
    // Given: one good item followed by one with an undocumented status
    let api = ScriptedApi::new(vec![hw_response(
        json!([
            {"homework_name": "hw1", "status": "approved"},
            {"homework_name": "hw2", "status": "burned"},
        ]),
        1000,
    )]);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    bot.poll_once().await;

    // Then: no status message went out, only the error report
    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("undocumented homework status: burned"));
    // And: the cursor did not advance past the failed cycle
    assert_eq!(bot.cursor(), 500);
}

#[tokio::test]
async fn test_failed_send_is_retried_next_cycle() {
    // Given: the same status change arrives twice while the sink is down once
    let items = json!([{"homework_name": "hw1", "status": "approved"}]);
    let api = ScriptedApi::new(vec![
        hw_response(items.clone(), 1000),
        hw_response(items, 1100),
    ]);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    // When: the first delivery fails
    sink.set_broken(true);
    bot.poll_once().await;
    assert!(sink.sent().is_empty());
    // And: a send failure never aborts the cycle, the cursor still advances
    assert_eq!(bot.cursor(), 1000);

    // Then: the next cycle delivers the message once the sink recovers
    sink.set_broken(false);
    bot.poll_once().await;
    assert_eq!(sink.sent(), vec![APPROVED_HW1.to_string()]);
}

#[tokio::test]
async fn test_many_idempotent_cycles_never_resend_or_crash() {
    // Given: ten identical valid responses
    let items = json!([{"homework_name": "hw1", "status": "reviewing"}]);
    let responses = (0..10).map(|_| hw_response(items.clone(), 3000)).collect();
    let api = ScriptedApi::new(responses);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    for _ in 0..10 {
        bot.poll_once().await;
    }

    // Then: exactly one notification across all cycles
    assert_eq!(sink.sent().len(), 1);
    assert_eq!(bot.cursor(), 3000);
}

#[tokio::test]
async fn test_status_change_produces_new_notification() {
    // Given: the same homework moves from reviewing to rejected
    let api = ScriptedApi::new(vec![
        hw_response(json!([{"homework_name": "hw1", "status": "reviewing"}]), 1000),
        hw_response(json!([{"homework_name": "hw1", "status": "rejected"}]), 1100),
    ]);
    let sink = RecordingSink::new();
    let clock = TestClock { start: 500 };
    let mut bot = HomeworkBot::new(&api, &sink, &clock, Duration::from_secs(600));

    bot.poll_once().await;
    bot.poll_once().await;

    // Then: both transitions are delivered, in order
    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].contains("taken for review"));
    assert!(sent[1].contains("the reviewer has remarks"));
    assert_eq!(bot.cursor(), 1100);
}
