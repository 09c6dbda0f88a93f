use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{app, run_with_listener};

mod categories;
mod expenses;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{ExpenseList, ExpenseView};
    }

    pub mod category {
        pub use api_types::category::{CategoryUpdate, CategoryView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    NotFound(String),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidId(_)
        | EngineError::InvalidCategory(_)
        | EngineError::InvalidPaymentType(_)
        | EngineError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
