//! Homework bot - review status relay
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and relays them to a Telegram chat.

pub mod api_client;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod response;
pub mod state;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Secrets};
pub use engine::{CycleReport, Delivery, Engine};
pub use error::{HomeworkBotError, Result};

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::api_client::{PracticumClient, ReviewApi};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::state::PollState;
use crate::telegram::TelegramNotifier;

/// Assembles a [`HomeworkBot`] from configuration, with optional injected parts
pub struct HomeworkBotBuilder {
    config: Config,
    secrets: Secrets,
    http: Option<Arc<dyn HttpClient>>,
    api: Option<Arc<dyn ReviewApi>>,
    notifier: Option<Arc<dyn Notifier>>,
    cancel: Option<CancellationToken>,
    start_time: Option<i64>,
}

impl HomeworkBotBuilder {
    pub fn new(config: Config, secrets: Secrets) -> Self {
        Self {
            config,
            secrets,
            http: None,
            api: None,
            notifier: None,
            cancel: None,
            start_time: None,
        }
    }

    /// Use this HTTP client for both the review API and Telegram
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_review_api(mut self, api: Arc<dyn ReviewApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Pretend the bot starts at this Unix time when seeding the cursor
    pub fn with_start_time(mut self, unix_seconds: i64) -> Self {
        self.start_time = Some(unix_seconds);
        self
    }

    pub fn build(self) -> Result<HomeworkBot> {
        self.config.validate()?;

        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::new()),
        };

        let api: Arc<dyn ReviewApi> = match self.api {
            Some(api) => api,
            None => Arc::new(PracticumClient::new(
                &self.config.api,
                &self.secrets.practicum_token,
                Arc::clone(&http),
            )),
        };

        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(TelegramNotifier::new(
                &self.config.telegram,
                &self.secrets.telegram_token,
                &self.secrets.telegram_chat_id,
                Arc::clone(&http),
            )),
        };

        let now = self.start_time.unwrap_or_else(current_unix_time);
        let lookback = i64::try_from(self.config.api.initial_lookback_seconds).map_err(|_| {
            HomeworkBotError::Config("api.initial_lookback_seconds is too large".to_string())
        })?;
        let cursor = now.saturating_sub(lookback);

        let cancel = self.cancel.unwrap_or_default();
        let engine = Engine::new(
            api,
            notifier,
            PollState::new(cursor),
            Duration::from_secs(self.config.polling.retry_period_seconds),
            cancel.clone(),
        );

        Ok(HomeworkBot { engine, cancel })
    }
}

/// A fully assembled bot, ready to poll
#[derive(Debug)]
pub struct HomeworkBot {
    engine: Engine,
    cancel: CancellationToken,
}

impl HomeworkBot {
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Poll until Ctrl-C or until the cancellation token is triggered
    pub async fn start(mut self) -> Result<()> {
        let cancel_for_signal = self.cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for ctrl-c: {}", e);
                return;
            }
            tracing::info!("Shutdown signal received");
            cancel_for_signal.cancel();
        });

        tracing::info!(
            "Homework bot started, cursor={}",
            self.engine.state().cursor
        );
        self.engine.run().await;
        tracing::info!("Homework bot stopped");

        Ok(())
    }
}

fn current_unix_time() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
