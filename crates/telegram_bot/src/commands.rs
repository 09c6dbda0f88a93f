//! Command structs

use teloxide::utils::command::{BotCommands, ParseError};

/// Splits `<id> <ordinal>`. Missing words come back empty so the handler can
/// answer with usage instead of the message falling through to the parser.
pub fn split_pair(input: String) -> Result<(String, String), ParseError> {
    let mut args = input.split_whitespace();
    let first = args.next().unwrap_or_default().to_string();
    let second = args.next().unwrap_or_default().to_string();

    match args.next() {
        Some(_) => Err(ParseError::Custom("too many arguments".into())),
        None => Ok((first, second)),
    }
}

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Команды:")]
pub enum Command {
    #[command(description = "показать справку")]
    Help,
    #[command(description = "показать справку")]
    Start,
    #[command(description = "последние траты: /list [сколько]")]
    List(String),
    #[command(description = "удалить трату: /delete <id>")]
    Delete(String),
    #[command(
        description = "сменить категорию: /category <id> <номер>",
        parse_with = split_pair
    )]
    Category(String, String),
}
