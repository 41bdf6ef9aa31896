//! Test doubles shared by the step definitions

use std::collections::VecDeque;
use std::sync::Mutex;

use homework_bot::api_client::ReviewApi;
use homework_bot::notifier::Notifier;
use homework_bot::HomeworkBotError;
use serde_json::Value;

/// A review API that plays back queued answers and records each cursor it was asked for
#[derive(Debug, Default)]
pub struct ScriptedReviewApi {
    answers: Mutex<VecDeque<homework_bot::Result<Value>>>,
    requested_cursors: Mutex<Vec<i64>>,
}

impl ScriptedReviewApi {
    pub fn push_body(&self, body: Value) {
        self.answers.lock().unwrap().push_back(Ok(body));
    }

    pub fn push_error(&self, error: HomeworkBotError) {
        self.answers.lock().unwrap().push_back(Err(error));
    }

    pub fn requested_cursors(&self) -> Vec<i64> {
        self.requested_cursors.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReviewApi for ScriptedReviewApi {
    async fn fetch(&self, from_date: i64) -> homework_bot::Result<Value> {
        self.requested_cursors.lock().unwrap().push(from_date);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HomeworkBotError::Http("no scripted answer".to_string())))
    }
}

/// A notifier that records every delivery attempt and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    failing: Mutex<bool>,
    attempts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, text: &str) -> homework_bot::Result<()> {
        self.attempts.lock().unwrap().push(text.to_string());
        if *self.failing.lock().unwrap() {
            Err(HomeworkBotError::Notifier("chat unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}
