//! Review statuses and the notification text built from them

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::HomeworkBotError;

/// Sent when the answer lists no submissions
pub const NO_NEW_HOMEWORKS: &str = "Новых работ нет.";

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Human verdict for this status
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| HomeworkBotError::UnknownStatus(s.to_string()))
    }
}

/// Build the notification text for one submission.
///
/// Fails on a missing `status`, a status outside the verdict table, or a
/// missing `homework_name`, checked in that order.
pub fn parse_status(submission: &Value) -> crate::Result<String> {
    let fields = submission
        .as_object()
        .ok_or(HomeworkBotError::Shape("Запись о работе"))?;

    let status = fields
        .get("status")
        .ok_or(HomeworkBotError::MissingKey("status"))?;
    let status: HomeworkStatus = match status {
        Value::String(s) => s.parse()?,
        other => return Err(HomeworkBotError::UnknownStatus(other.to_string())),
    };

    let name = fields
        .get("homework_name")
        .ok_or(HomeworkBotError::MissingName)?;
    let name = match name {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
