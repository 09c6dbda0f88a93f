use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
};

use std::sync::Arc;

use crate::{categories, expenses};
use engine::Engine;

const ALLOWED_METHODS: &str = "GET, PUT, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, If-None-Match, If-Modified-Since";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    allowed_origins: Arc<Vec<HeaderValue>>,
}

impl ServerState {
    fn allows(&self, origin: &HeaderValue) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

/// CORS for the configured origins only.
///
/// Preflight requests from an allowed origin are answered directly; other
/// requests get the allow headers appended to the handler response.
async fn cors(State(state): State<ServerState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .filter(|origin| state.allows(origin))
        .cloned();

    let Some(origin) = origin else {
        return next.run(request).await;
    };

    let mut response = if request.method() == Method::OPTIONS {
        let mut preflight = Response::new(Body::empty());
        *preflight.status_mut() = StatusCode::NO_CONTENT;
        let headers = preflight.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        preflight
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
    response
}

fn router(state: ServerState) -> Router {
    let v1 = Router::new()
        .route("/expenses", get(expenses::list))
        .route("/expenses/{id}/category", put(expenses::update_category))
        .route("/categories", get(categories::list));

    Router::new()
        .nest("/v1", v1)
        .layer(middleware::from_fn_with_state(state.clone(), cors))
        .with_state(state)
}

/// Builds the HTTP application.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn app(engine: Arc<Engine>, allowed_origins: &[String]) -> Router {
    let allowed_origins = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("ignoring allowed origin {origin:?}: {err}");
                None
            }
        })
        .collect();

    router(ServerState {
        engine,
        allowed_origins: Arc::new(allowed_origins),
    })
}

pub async fn run_with_listener(
    engine: Arc<Engine>,
    allowed_origins: &[String],
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, allowed_origins)).await
}
