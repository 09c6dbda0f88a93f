//! Telegram bot.
//!
//! Turns free-text chat messages into stored expenses and offers a few
//! commands to review and correct them. The bot shares the [`Engine`] with
//! the HTTP server.

use std::sync::Arc;

use chrono_tz::Tz;
use engine::Engine;
use teloxide::prelude::*;

mod commands;
mod handlers;
mod ui;

const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    engine: Arc<Engine>,
    timezone: Tz,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    engine: Arc<Engine>,
    timezone: Tz,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);

        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            engine: self.engine.clone(),
            timezone: self.timezone,
        };

        Dispatcher::builder(bot, handlers::schema())
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    engine: Option<Arc<Engine>>,
    timezone: Option<Tz>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// An empty list lets everyone in.
    pub fn allowed_users(mut self, allowed_users: Vec<UserId>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users);
        }
        self
    }

    pub fn engine(mut self, engine: Arc<Engine>) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    /// IANA name of the zone dates are shown in, e.g. `Europe/Moscow`.
    pub fn timezone(mut self, timezone: &str) -> Result<BotBuilder, String> {
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|err| format!("invalid timezone {timezone:?}: {err}"))?;
        self.timezone = Some(timezone);
        Ok(self)
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        if self.token.is_empty() {
            return Err("missing telegram token".to_string());
        }
        let engine = self.engine.ok_or("missing engine")?;

        Ok(Bot {
            token: self.token,
            allowed_users: self.allowed_users,
            engine,
            timezone: self.timezone.unwrap_or(DEFAULT_TIMEZONE),
        })
    }
}
