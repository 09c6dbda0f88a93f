use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
    types::ParseMode,
};
use uuid::Uuid;

use engine::Category;

use crate::{ConfigParameters, commands::Command, ui};

const DEFAULT_LIST_SIZE: u64 = 10;
const MAX_LIST_SIZE: u64 = 50;

/// Build the message schema: allow-list first, then commands, then free text.
pub(crate) fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .filter(is_allowed)
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_text))
}

fn is_allowed(cfg: ConfigParameters, msg: Message) -> bool {
    let Some(from) = msg.from.as_ref() else {
        return false;
    };
    let allowed = match &cfg.allowed_users {
        None => true,
        Some(ids) => ids.contains(&from.id),
    };
    if !allowed {
        tracing::warn!(user_id = from.id.0, "forbidden");
    }
    allowed
}

fn list_size(arg: &str) -> Option<u64> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Some(DEFAULT_LIST_SIZE);
    }
    arg.parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .map(|n| n.min(MAX_LIST_SIZE))
}

fn category_arg(arg: &str) -> Option<Category> {
    arg.trim()
        .parse::<u8>()
        .ok()
        .and_then(|ordinal| Category::try_from(ordinal).ok())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;

    match cmd {
        Command::Help | Command::Start => {
            bot.send_message(chat_id, ui::help_text()).await?;
        }
        Command::List(arg) => {
            let Some(limit) = list_size(&arg) else {
                bot.send_message(chat_id, ui::LIST_USAGE).await?;
                return Ok(());
            };
            match cfg.engine.list_expenses(limit as i64).await {
                Ok(expenses) => {
                    bot.send_message(chat_id, ui::expense_list(&expenses, cfg.timezone))
                        .parse_mode(ParseMode::Html)
                        .await?;
                }
                Err(err) => {
                    tracing::error!("list expenses failed: {err}");
                    bot.send_message(chat_id, ui::UNEXPECTED).await?;
                }
            }
        }
        Command::Delete(arg) => {
            let Ok(id) = Uuid::parse_str(arg.trim()) else {
                bot.send_message(chat_id, ui::BAD_ID).await?;
                return Ok(());
            };
            let text = match cfg.engine.delete_expense(id).await {
                Ok(true) => ui::DELETED,
                Ok(false) => ui::NOT_FOUND,
                Err(err) => {
                    tracing::error!("delete expense {id} failed: {err}");
                    ui::UNEXPECTED
                }
            };
            bot.send_message(chat_id, text).await?;
        }
        Command::Category(id, ordinal) => {
            let Ok(id) = Uuid::parse_str(id.trim()) else {
                bot.send_message(chat_id, ui::BAD_ID).await?;
                return Ok(());
            };
            let Some(category) = category_arg(&ordinal) else {
                bot.send_message(chat_id, ui::category_usage()).await?;
                return Ok(());
            };
            match cfg.engine.update_expense_category(id, category).await {
                Ok(true) => {
                    bot.send_message(chat_id, ui::category_changed(category))
                        .parse_mode(ParseMode::Html)
                        .await?;
                }
                Ok(false) => {
                    bot.send_message(chat_id, ui::NOT_FOUND).await?;
                }
                Err(err) => {
                    tracing::error!("update category of {id} failed: {err}");
                    bot.send_message(chat_id, ui::UNEXPECTED).await?;
                }
            }
        }
    }

    Ok(())
}

async fn handle_text(bot: Bot, msg: Message, cfg: ConfigParameters) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    if text.trim_start().starts_with('/') {
        bot.send_message(chat_id, ui::UNKNOWN_COMMAND).await?;
        return Ok(());
    }

    let expense = match engine::parse(text) {
        Ok(expense) => expense.with_user(from.id.0 as i64),
        Err(err) => {
            tracing::debug!("unparsable message: {err}");
            bot.send_message(chat_id, ui::parse_error_text(err)).await?;
            return Ok(());
        }
    };

    if let Err(err) = cfg.engine.insert_expense(&expense).await {
        tracing::error!("insert expense failed: {err}");
        bot.send_message(chat_id, ui::SAVE_FAILED).await?;
        return Ok(());
    }

    tracing::info!(id = %expense.id, user_id = expense.user_id, "expense saved");
    bot.send_message(chat_id, ui::expense_saved(&expense, cfg.timezone))
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
