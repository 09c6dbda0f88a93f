//! Expense ledger core.
//!
//! - [`parse`] turns a free-text chat line into an unsaved [`Expense`].
//! - [`Engine`] persists expenses with soft-delete semantics and exposes the
//!   freshness watermark ([`Engine::latest_updated_at`]) used for conditional
//!   reads.

pub use category::Category;
pub use error::{EngineError, ParseError};
pub use expenses::Expense;
pub use ops::{Engine, EngineBuilder};
pub use parser::parse;
pub use payment::PaymentType;

mod category;
mod error;
pub mod expenses;
mod ops;
mod parser;
mod payment;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
