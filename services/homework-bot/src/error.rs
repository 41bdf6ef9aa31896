//! Error types for the homework bot
//!
//! The `Display` text of the poll-cycle variants is user facing: the engine
//! forwards it to the chat verbatim, so it is written in Russian.

/// Errors that can occur in the homework bot
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    #[error("Отсутствуют обязательные переменные окружения: {}", .0.join(", "))]
    ConfigMissing(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Эндпоинт {endpoint} недоступен: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Эндпоинт {endpoint} вернул статус {status}, ожидался 200")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Ответ API не является JSON: {0}")]
    MalformedBody(String),

    #[error("{0} не является словарём")]
    Shape(&'static str),

    #[error("Отсутствует ключ '{0}' в ответе API")]
    MissingKey(&'static str),

    #[error("Ключ '{key}' имеет неверный тип: ожидался {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("Неожиданный статус домашней работы: {0}")]
    UnknownStatus(String),

    #[error("Отсутствует ключ 'homework_name' в ответе API")]
    MissingName,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;
