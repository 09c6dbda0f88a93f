//! User facing texts.

use chrono_tz::Tz;
use engine::{Category, Expense, ParseError};
use teloxide::utils::html;

pub(crate) const SAVE_FAILED: &str = "❌ Не получилось записать, может, еще разок попробуем?";
pub(crate) const UNEXPECTED: &str =
    "❌ У меня тут ошибка какая-то выскочила. Попробуй еще разок, может, прокатит.";
pub(crate) const BAD_ID: &str = "❌ Не понял id. Скопируй его из /list";
pub(crate) const NOT_FOUND: &str = "🤷 Такой записи нет, может, ее уже удалили.";
pub(crate) const DELETED: &str = "🗑 Удалил.";
pub(crate) const EMPTY_LIST: &str = "Пока ничего не записано.";
pub(crate) const LIST_USAGE: &str = "❌ Напиши, сколько показать, например: /list 5";
pub(crate) const UNKNOWN_COMMAND: &str = "❌ Не знаю такой команды. Смотри /help";

const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

pub(crate) fn help_text() -> &'static str {
    "📌 Как пользоваться ботом:

1. Запись трат:
   👉 нал 1500 краска ванная
   👉 карта 3200 двери
   👉 нал 5000 услуги демонтаж

2. Ключевые слова:
   - \"нал\" или \"наличные\" — наличная оплата
   - \"карта\" — оплата по карте
   - \"услуги\", \"материалы\", \"инструменты\", \"мебель\" — категория (опционально)
   - Остальное — описание

3. Команды:
   /help — показать эту справку
   /list [сколько] — последние траты
   /delete id — удалить трату
   /category id номер — сменить категорию"
}

pub(crate) fn parse_error_text(err: ParseError) -> &'static str {
    match err {
        ParseError::EmptyMessage => {
            "❌ Ты отправил пустое сообщение. Смотри, вот пример: `нал 1500 краска ванная`"
        }
        ParseError::NotEnoughData => {
            "❌ Тут мало данных, но вот формат, если вдруг пригодится: `[тип_оплаты] [сумма] [категория] [описание]`"
        }
        ParseError::PaymentTypeNotFound => "❌ Напиши, как заплатил: `нал` или `карта`",
        ParseError::AmountNotFound => {
            "❌ Сумма указана неправильно. Напиши число, например: `1500`"
        }
    }
}

pub(crate) fn category_usage() -> String {
    let mut text = String::from("❌ Нет такой категории. Напиши /category id номер, где номер:\n");
    for category in Category::ALL {
        text.push_str(&format!("\n{} — {}", category.id(), category.label()));
    }
    text
}

pub(crate) fn category_changed(category: Category) -> String {
    format!("✅ Категория теперь: {}", html::escape(category.label()))
}

/// Confirmation sent after a free-text expense was stored (HTML).
pub(crate) fn expense_saved(expense: &Expense, tz: Tz) -> String {
    format!(
        "<b>✅ Записал:</b>\n\n\
         <b>Дата</b>: {}\n\
         <b>Тип</b>: {}\n\
         <b>Сумма</b>: {} ₽\n\
         <b>Описание</b>: {}\n\
         <b>Категория</b>: {}\n",
        html::escape(&expense.created_at.with_timezone(&tz).format(DATE_FORMAT).to_string()),
        html::escape(expense.payment_type.label()),
        html::escape(&expense.amount_fixed()),
        html::escape(&expense.description),
        html::escape(expense.category.label()),
    )
}

/// One line per expense, the id in monospace so it can be copied (HTML).
pub(crate) fn expense_list(expenses: &[Expense], tz: Tz) -> String {
    if expenses.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let mut text = String::from("<b>Последние траты:</b>\n");
    for expense in expenses {
        text.push_str(&format!(
            "\n{} • {} • {} ₽ • {}",
            html::escape(&expense.created_at.with_timezone(&tz).format(DATE_FORMAT).to_string()),
            html::escape(expense.payment_type.label()),
            html::escape(&expense.amount_fixed()),
            html::escape(expense.category.label()),
        ));
        if !expense.description.is_empty() {
            text.push_str(&format!(" • {}", html::escape(&expense.description)));
        }
        text.push_str(&format!("\n{}\n", html::code_inline(&expense.id.to_string())));
    }
    text
}
