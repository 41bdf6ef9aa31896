//! BDD test world for the homework bot

use std::sync::Arc;

use cucumber::World;
use homework_bot::engine::CycleReport;
use homework_bot::response::ApiResponse;
use homework_bot::HomeworkBot;

use crate::steps::doubles::{RecordingNotifier, ScriptedReviewApi};

#[derive(Debug, Default, World)]
pub struct HomeworkBotWorld {
    // Validation and formatting
    pub body: Option<serde_json::Value>,
    pub validation_result: Option<homework_bot::Result<ApiResponse>>,
    pub format_result: Option<homework_bot::Result<String>>,

    // Poll loop
    pub api: Option<Arc<ScriptedReviewApi>>,
    pub notifier: Option<Arc<RecordingNotifier>>,
    pub bot: Option<HomeworkBot>,
    pub reports: Vec<CycleReport>,
}
