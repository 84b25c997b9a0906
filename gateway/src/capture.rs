//! In-memory capture of downstream responses.
//!
//! Both interceptors buffer the entire downstream response before deciding
//! what to emit: the status, the headers, and the body all have to be known
//! before a rewrite can be attempted. Agent cards and chat responses are
//! small, so no size cap is applied.

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

/// A downstream response held entirely in memory.
///
/// Nothing is forwarded to the client until the owning interceptor decides:
/// re-emit verbatim via [`IntoResponse`], or swap in a rewritten JSON body
/// via [`CapturedResponse::into_json_response`].
#[derive(Debug)]
pub struct CapturedResponse {
    /// Captured downstream status.
    pub status: StatusCode,
    /// Captured downstream headers, unmodified.
    pub headers: HeaderMap,
    /// The complete downstream body.
    pub body: Bytes,
}

impl CapturedResponse {
    /// Buffer `response` in full.
    pub async fn capture(response: Response) -> Result<Self, axum::Error> {
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await?;
        Ok(Self {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// The captured `Content-Type`, or the empty string when absent.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
    }

    /// Whether the captured `Content-Type` declares a JSON payload.
    pub fn is_json(&self) -> bool {
        self.content_type().contains("application/json")
    }

    /// Emit a rewritten JSON body in place of the captured one.
    ///
    /// The captured headers are kept, except that any stale `Content-Length`
    /// is dropped (the host re-derives it from the new body) and the
    /// `Content-Type` is pinned to `application/json`. The status becomes 200.
    pub fn into_json_response(mut self, body: Vec<u8>) -> Response {
        self.headers.remove(header::CONTENT_LENGTH);
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let mut response = Response::new(Body::from(body));
        *response.headers_mut() = self.headers;
        response
    }
}

impl IntoResponse for CapturedResponse {
    /// Re-emit the captured response byte-identically.
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downstream(status: StatusCode, content_type: &str, body: &str) -> Response {
        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, body.len())
            .header("x-backend", "agent-1")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn capture_buffers_status_headers_and_body() {
        let captured = CapturedResponse::capture(downstream(
            StatusCode::NOT_FOUND,
            "application/json; charset=utf-8",
            "{\"error\":\"missing\"}",
        ))
        .await
        .unwrap();

        assert_eq!(captured.status, StatusCode::NOT_FOUND);
        assert!(captured.is_json());
        assert_eq!(captured.headers.get("x-backend").unwrap(), "agent-1");
        assert_eq!(&captured.body[..], b"{\"error\":\"missing\"}");
    }

    #[tokio::test]
    async fn verbatim_reemission_preserves_everything() {
        let captured =
            CapturedResponse::capture(downstream(StatusCode::BAD_GATEWAY, "text/html", "<html>"))
                .await
                .unwrap();
        let response = captured.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers().get("x-backend").unwrap(), "agent-1");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html>");
    }

    #[tokio::test]
    async fn json_rewrite_drops_stale_content_length() {
        let captured =
            CapturedResponse::capture(downstream(StatusCode::OK, "application/json", "{}"))
                .await
                .unwrap();
        let response = captured.into_json_response(b"{\"rewritten\":true}".to_vec());

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_LENGTH).is_none());
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        // unrelated downstream headers survive the rewrite
        assert_eq!(response.headers().get("x-backend").unwrap(), "agent-1");
    }

    #[tokio::test]
    async fn missing_content_type_is_not_json() {
        let response = Response::new(Body::from("plain"));
        let captured = CapturedResponse::capture(response).await.unwrap();
        assert_eq!(captured.content_type(), "");
        assert!(!captured.is_json());
    }
}
