//! Shape checks for decoded review API answers

use serde_json::Value;

use crate::HomeworkBotError;

/// A review API answer that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Submissions, most recent first
    pub homeworks: Vec<Value>,
    /// Server clock at answer time, used as the next cursor
    pub current_date: i64,
}

/// Validate a decoded answer.
///
/// Checks run in a fixed order so that a body with several defects always
/// reports the same one: mapping, `homeworks` present, `current_date`
/// present, `current_date` an integer, `homeworks` a list.
pub fn check_response(body: &Value) -> crate::Result<ApiResponse> {
    let map = body
        .as_object()
        .ok_or(HomeworkBotError::Shape("Ответ API"))?;

    let homeworks = map
        .get("homeworks")
        .ok_or(HomeworkBotError::MissingKey("homeworks"))?;
    let current_date = map
        .get("current_date")
        .ok_or(HomeworkBotError::MissingKey("current_date"))?;

    let current_date = current_date
        .as_i64()
        .ok_or(HomeworkBotError::WrongType {
            key: "current_date",
            expected: "целое число",
        })?;
    let homeworks = homeworks
        .as_array()
        .ok_or(HomeworkBotError::WrongType {
            key: "homeworks",
            expected: "список",
        })?;

    Ok(ApiResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}
