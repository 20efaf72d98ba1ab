//! Placeholder highscore endpoint.
//!
//! Only acknowledges `GET /api/highscores`; nothing is stored yet.

use std::{
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use axum::{
    Json, Router,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tokio::{net::TcpListener, signal};

pub const HIGHSCORES_PATH: &str = "/api/highscores";

/// Listen address used by `arrowword serve` when `--addr` is not given.
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

pub fn build_router() -> Router {
    Router::new().route(
        HIGHSCORES_PATH,
        get(highscores).fallback(method_not_allowed),
    )
}

async fn highscores() -> impl IntoResponse {
    Json(json!({
        "ok": true,
        "message": "highscore API is running (no database yet)",
    }))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET")],
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// Serves the endpoint until Ctrl-C.
pub async fn serve(addr: SocketAddr) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("serving {HIGHSCORES_PATH} on {}", listener.local_addr()?);
    axum::serve(listener, build_router())
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
        })
        .await?;
    log::info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{self, Body},
        http::{Method, Request},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn call(method: Method) -> (StatusCode, Option<String>, Value) {
        let response = build_router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(HIGHSCORES_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let allow = response
            .headers()
            .get(header::ALLOW)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, allow, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_get_acknowledges() {
        let (status, _, body) = call(Method::GET).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let (status, allow, body) = call(method).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(allow.as_deref(), Some("GET"));
            assert_eq!(body, json!({ "error": "Method not allowed" }));
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = build_router()
            .oneshot(Request::get("/api/other").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
