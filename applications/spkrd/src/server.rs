/// HTTP routing for the speaker device
use crate::speaker::{melody_too_long, Speaker, MAX_MELODY_LEN};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::put,
    Router,
};
use http_body_util::LengthLimitError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub speaker: Arc<Speaker>,
}

impl AppState {
    pub fn new(speaker: Speaker) -> Self {
        Self {
            speaker: Arc::new(speaker),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/play", put(play))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until the listener fails. Peer addresses are made available to handlers.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

/// PUT /play - write the request body to the speaker
async fn play(
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
    request: Request,
) -> Response {
    // One byte past the limit is enough to know the melody is too long
    let body = match axum::body::to_bytes(request.into_body(), MAX_MELODY_LEN + 1).await {
        Ok(body) => body,
        Err(e) => {
            let e = e.into_inner();
            if e.is::<LengthLimitError>() {
                tracing::warn!(client = %client_addr, "Rejected oversized melody");
                return melody_too_long().into_response();
            }
            tracing::warn!(client = %client_addr, error = %e, "Failed to read request body");
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    let Ok(melody) = std::str::from_utf8(&body) else {
        return (StatusCode::BAD_REQUEST, "Invalid UTF-8 in melody data").into_response();
    };

    match state.speaker.play(melody, client_addr).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}
