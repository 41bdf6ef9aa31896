//! BDD step definitions for the poll loop feature

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_bot::api_client::ReviewApi;
use homework_bot::engine::Delivery;
use homework_bot::notifier::Notifier;
use homework_bot::state::MessageKind;
use homework_bot::{Config, HomeworkBotBuilder, HomeworkBotError, Secrets};

use crate::steps::doubles::{RecordingNotifier, ScriptedReviewApi};
use crate::world::HomeworkBotWorld;

fn test_secrets() -> Secrets {
    Secrets {
        practicum_token: "practicum-token".to_string(),
        telegram_token: "123:telegram-token".to_string(),
        telegram_chat_id: "42".to_string(),
    }
}

fn api(world: &mut HomeworkBotWorld) -> Arc<ScriptedReviewApi> {
    world
        .api
        .get_or_insert_with(|| Arc::new(ScriptedReviewApi::default()))
        .clone()
}

fn notifier(world: &mut HomeworkBotWorld) -> Arc<RecordingNotifier> {
    world
        .notifier
        .get_or_insert_with(|| Arc::new(RecordingNotifier::default()))
        .clone()
}

fn build_bot(world: &mut HomeworkBotWorld, start_time: i64) {
    let api = api(world);
    let notifier = notifier(world);
    let bot = HomeworkBotBuilder::new(Config::default(), test_secrets())
        .with_review_api(api as Arc<dyn ReviewApi>)
        .with_notifier(notifier as Arc<dyn Notifier>)
        .with_start_time(start_time)
        .build()
        .expect("bot should build");
    world.bot = Some(bot);
}

fn parse_delivery(s: &str) -> Delivery {
    match s {
        "sent" => Delivery::Sent,
        "failed" => Delivery::Failed,
        "suppressed" => Delivery::Suppressed,
        other => panic!("Unknown delivery: {}", other),
    }
}

fn parse_kind(s: &str) -> MessageKind {
    match s {
        "status" => MessageKind::Status,
        "error" => MessageKind::Error,
        other => panic!("Unknown message kind: {}", other),
    }
}

#[given(expr = "a bot started at Unix time {int}")]
fn bot_started_at(world: &mut HomeworkBotWorld, start_time: i64) {
    build_bot(world, start_time);
}

#[given(expr = "the review API will answer with {string}")]
fn api_will_answer(world: &mut HomeworkBotWorld, body: String) {
    let body = serde_json::from_str(&body).expect("scenario body must be valid JSON");
    api(world).push_body(body);
}

#[given("the review API will be unreachable")]
fn api_will_be_unreachable(world: &mut HomeworkBotWorld) {
    api(world).push_error(HomeworkBotError::Transport {
        endpoint: "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string(),
        reason: "connection refused".to_string(),
    });
}

#[given(expr = "the review API will answer with HTTP status {int}")]
fn api_will_answer_status(world: &mut HomeworkBotWorld, status: u16) {
    api(world).push_error(HomeworkBotError::HttpStatus {
        endpoint: "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string(),
        status,
    });
}

#[given("the chat is unavailable")]
fn chat_unavailable(world: &mut HomeworkBotWorld) {
    notifier(world).set_failing(true);
}

#[when(expr = "the bot polls {int} time(s)")]
async fn bot_polls(world: &mut HomeworkBotWorld, times: usize) {
    let bot = world.bot.as_mut().expect("bot not built");
    for _ in 0..times {
        let report = bot.engine_mut().poll_once().await;
        world.reports.push(report);
    }
}

#[then(expr = "the cursor should be {int}")]
fn cursor_should_be(world: &mut HomeworkBotWorld, cursor: i64) {
    let bot = world.bot.as_ref().expect("bot not built");
    assert_eq!(bot.engine().state().cursor, cursor);
}

#[then(expr = "the review API should have been asked from {int}")]
fn api_asked_from(world: &mut HomeworkBotWorld, cursor: i64) {
    let cursors = api(world).requested_cursors();
    assert_eq!(cursors.first(), Some(&cursor), "requested: {cursors:?}");
}

#[then(expr = "the chat should have received {int} message(s)")]
fn chat_received(world: &mut HomeworkBotWorld, count: usize) {
    let attempts = notifier(world).attempts();
    assert_eq!(attempts.len(), count, "attempts: {attempts:?}");
}

#[then(expr = "the last chat message should be {string}")]
fn last_chat_message(world: &mut HomeworkBotWorld, expected: String) {
    let attempts = notifier(world).attempts();
    assert_eq!(attempts.last(), Some(&expected));
}

#[then(expr = "cycle {int} should be a(n) {word} message that was {word}")]
fn cycle_outcome(world: &mut HomeworkBotWorld, cycle: usize, kind: String, delivery: String) {
    let report = world
        .reports
        .get(cycle - 1)
        .unwrap_or_else(|| panic!("cycle {} did not run", cycle));
    assert_eq!(report.kind, parse_kind(&kind), "{report:?}");
    assert_eq!(report.delivery, parse_delivery(&delivery), "{report:?}");
}
