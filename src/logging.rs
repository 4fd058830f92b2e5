//! Middleware for logging requests and responses.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, MessageBody};

/// The maximum number of bytes of a request or response body that is logged
/// at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body, in bytes, that is read into memory.
///
/// Matches the default body limit of axum's extractors.
pub const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Request bodies larger than [REQUEST_BODY_LIMIT] bytes are rejected with
/// `400 Bad Request` before they reach the route handlers.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match read_body(body, REQUEST_BODY_LIMIT).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return Error::InvalidRequestBody(
                "Request body is too large or could not be read".to_owned(),
            )
            .into_response();
        }
    };
    log_message("Received request", &parts, &body);

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = match read_body(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody::new("Internal server error while sending the response")),
            )
                .into_response();
        }
    };
    log_message("Sending response", &parts, &body);

    Response::from_parts(parts, Body::from(body))
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, limit).await
}

fn log_message(message: &str, parts: &impl std::fmt::Debug, body: &Bytes) {
    let body = String::from_utf8_lossy(body);
    let truncated = truncate(&body, LOG_BODY_LENGTH_LIMIT);

    if truncated.len() < body.len() {
        tracing::info!("{message}: {parts:#?}\nbody: {truncated}...");
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{message}: {parts:#?}\nbody: {body:?}");
    }
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, middleware, routing::post};
    use axum_test::TestServer;

    use super::{REQUEST_BODY_LIMIT, logging_middleware, truncate};
    use crate::MessageBody;

    fn get_echo_server() -> TestServer {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));

        TestServer::new(app).expect("Could not create test server.")
    }

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate("hello", 64), "hello");
    }

    #[test]
    fn truncates_on_char_boundary() {
        // 'é' is two bytes, so a limit of 2 would split it.
        assert_eq!(truncate("aéb", 2), "a");
        assert_eq!(truncate("aéb", 3), "aé");
    }

    #[tokio::test]
    async fn middleware_passes_body_through() {
        let server = get_echo_server();
        let long_body = "x".repeat(200);

        let response = server.post("/echo").text(&long_body).await;

        response.assert_status_ok();
        response.assert_text(long_body);
    }

    #[tokio::test]
    async fn body_at_the_limit_is_accepted() {
        let server = get_echo_server();
        let body = "x".repeat(REQUEST_BODY_LIMIT);

        let response = server.post("/echo").text(&body).await;

        response.assert_status_ok();
        assert_eq!(response.text().len(), REQUEST_BODY_LIMIT);
    }

    #[tokio::test]
    async fn body_over_the_limit_is_rejected() {
        let server = get_echo_server();
        let body = "x".repeat(REQUEST_BODY_LIMIT + 1);

        let response = server.post("/echo").text(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: MessageBody = response.json();
        assert_eq!(
            body.message,
            "Request body is too large or could not be read"
        );
    }
}
