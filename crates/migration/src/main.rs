use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_SQLITE_PATH: &str = "data.db";
/// Same variable the application reads its database file from.
const SQLITE_PATH_VAR: &str = "KUDADELI__DATABASE__SQLITE";
const USAGE: &str = "Usage: cargo run -p migration -- [up [n] | down [n] | fresh | refresh | status]";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Up(Option<u32>),
    Down(u32),
    Fresh,
    Refresh,
    Status,
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Option<Command> {
    let cmd = args.next().unwrap_or_else(|| "up".to_string());
    let steps = match args.next() {
        Some(n) => Some(n.parse::<u32>().ok().filter(|n| *n > 0)?),
        None => None,
    };
    if args.next().is_some() {
        return None;
    }

    match (cmd.as_str(), steps) {
        ("up", steps) => Some(Command::Up(steps)),
        ("down", steps) => Some(Command::Down(steps.unwrap_or(1))),
        ("fresh", None) => Some(Command::Fresh),
        ("refresh", None) => Some(Command::Refresh),
        ("status", None) => Some(Command::Status),
        _ => None,
    }
}

/// `DATABASE_URL` wins; otherwise the application's sqlite file.
fn database_url(database_url: Option<String>, sqlite_path: Option<String>) -> String {
    database_url.unwrap_or_else(|| {
        let path = sqlite_path.unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string());
        format!("sqlite:{path}?mode=rwc")
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let Some(cmd) = parse_command(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let db_url = database_url(
        std::env::var("DATABASE_URL").ok(),
        std::env::var(SQLITE_PATH_VAR).ok(),
    );
    let db = Database::connect(&db_url).await?;

    match cmd {
        Command::Up(steps) => migration::Migrator::up(&db, steps).await?,
        Command::Down(steps) => migration::Migrator::down(&db, Some(steps)).await?,
        Command::Fresh => migration::Migrator::fresh(&db).await?,
        Command::Refresh => migration::Migrator::refresh(&db).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
