//! JSON request decoding with a content-type contract and a validation hook,
//! plus the matching response writer.

use crate::error::{AppError, JsonError};
use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde::{de::DeserializeOwned, Serialize};

pub const APPLICATION_JSON: &str = "application/json";

/// Checked after a payload decodes successfully.
pub trait Validate {
    fn valid(&self) -> bool;
}

/// Extractor for a JSON body that must carry `Content-Type: application/json`
/// and pass [`Validate::valid`].
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

fn has_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case(APPLICATION_JSON))
        .unwrap_or(false)
}

/// Decode and validate raw bytes.
pub fn decode<T>(bytes: &[u8]) -> Result<T, JsonError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(bytes).map_err(|e| JsonError::Malformed(e.to_string()))?;
    if !value.valid() {
        return Err(JsonError::InvalidValue);
    }
    Ok(value)
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(&req) {
            return Err(JsonError::InvalidContentType.into());
        }
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(e.body_text())
            }
        })?;
        Ok(ValidJson(decode(&bytes)?))
    }
}

/// Serialize `value` and write it with the given status and a JSON content type.
pub fn write_json<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_vec(value).map_err(|e| AppError::Internal(format!("encode response: {}", e)))?;
    let mut resp = Response::new(Body::from(body));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    Ok(resp)
}
