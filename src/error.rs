use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use oauth2::basic::BasicErrorResponseType;
use oauth2::reqwest::Error as ReqwestClientError;
use oauth2::{HttpClientError, RequestTokenError, StandardErrorResponse};
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum RelayError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("transport failure during token exchange: {0}")]
    TokenTransport(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("identity provider rejected the token request: {0}")]
    Authentication(String),

    #[error("Dataverse returned {status}")]
    Upstream {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },
}

impl
    From<
        RequestTokenError<
            HttpClientError<ReqwestClientError>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    > for RelayError
{
    fn from(
        e: RequestTokenError<
            HttpClientError<ReqwestClientError>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    ) -> Self {
        match e {
            RequestTokenError::ServerResponse(err) => RelayError::Authentication(err.to_string()),
            RequestTokenError::Request(req_e) => RelayError::TokenTransport(req_e.to_string()),
            RequestTokenError::Parse(parse_err, _body) => {
                RelayError::Authentication(format!("unparseable token response: {parse_err}"))
            }
            RequestTokenError::Other(s) => RelayError::Authentication(s),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            // Upstream failures replay the Dataverse status and body verbatim
            // so the caller keeps the original diagnostic detail.
            RelayError::Upstream {
                status,
                content_type,
                body,
            } => {
                let mut resp = (status, body).into_response();
                if let Some(ct) = content_type {
                    resp.headers_mut().insert(header::CONTENT_TYPE, ct);
                }
                resp
            }
            err => {
                error!(error = %err, "relay request failed");
                let message = match &err {
                    RelayError::Authentication(_) | RelayError::TokenTransport(_) => {
                        "error acquiring access token"
                    }
                    _ => "error relaying request to Dataverse",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn upstream_error_replays_status_body_and_content_type() {
        let err = RelayError::Upstream {
            status: StatusCode::NOT_FOUND,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: Bytes::from_static(br#"{"error":{"code":"0x80040217"}}"#),
        };

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":{"code":"0x80040217"}}"#);
    }

    #[tokio::test]
    async fn authentication_error_surfaces_as_internal_error() {
        let resp = RelayError::Authentication("invalid_client".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("access token"));
        assert!(!text.contains("invalid_client"));
    }
}
