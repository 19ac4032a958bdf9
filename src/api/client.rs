//! HR REST API client.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::resource::Resource;
use crate::config::ApiConfig;
use crate::error::{AppError, Result};

/// HR API client.
///
/// Cheap to clone; every background task gets its own copy. Authenticated
/// requests carry the session token as a bearer header.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Collections may come back bare or wrapped in `{"data": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `config` - Base URL (e.g. "http://localhost:8080/api") and timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Replace or drop the bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url, path = path.trim_start_matches('/'))
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{method} {url}");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and reject non-success statuses.
    pub(super) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_from_status(status, &body);
        warn!("API request failed: {err}");
        Err(err)
    }

    pub(super) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AppError::parse(format!("Invalid response body: {e}")))
    }

    /// List a collection, optionally restricted to one information sheet.
    pub async fn list<R: Resource>(&self, information_sheet_id: Option<i64>) -> Result<Vec<R>> {
        let mut builder = self.request(Method::GET, R::PATH);
        if let Some(id) = information_sheet_id {
            builder = builder.query(&[("information_sheet_id", id)]);
        }
        let body: ListBody<R> = self.send_json(builder).await?;
        Ok(body.into_vec())
    }

    pub async fn get<R: Resource>(&self, id: i64) -> Result<R> {
        let path = format!("{}/{id}", R::PATH);
        self.send_json(self.request(Method::GET, &path))
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::not_found(format!("{} {id}", R::NAME)),
                other => other,
            })
    }

    pub async fn create<R: Resource>(&self, input: &R::Input) -> Result<R> {
        self.send_json(self.request(Method::POST, R::PATH).json(input)).await
    }

    pub async fn update<R: Resource>(&self, id: i64, input: &R::Input) -> Result<R> {
        let path = format!("{}/{id}", R::PATH);
        self.send_json(self.request(Method::PUT, &path).json(input)).await
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<()> {
        let path = format!("{}/{id}", R::PATH);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// Check that the API answers at all (any HTTP status counts).
    pub async fn ping(&self) -> Result<()> {
        self.client.get(&self.base_url).send().await?;
        Ok(())
    }
}

/// Map a failed response to an error, preferring the API's own message.
pub fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let message = extract_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            trimmed.chars().take(300).collect()
        }
    });

    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        _ => AppError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InformationSheet;

    fn client(base: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base.to_string(),
            timeout_secs: 10,
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = client("http://localhost:8080/api/");
        assert_eq!(api.base_url(), "http://localhost:8080/api");
        assert_eq!(
            api.url(InformationSheet::PATH),
            "http://localhost:8080/api/information-sheets"
        );
        assert_eq!(api.url("auth/login"), "http://localhost:8080/api/auth/login");
    }

    #[test]
    fn test_token_replaced_and_dropped() {
        let mut api = client("http://localhost:8080/api");
        assert!(!api.has_token());
        api.set_token(Some("abc".to_string()));
        assert!(api.has_token());
        api.set_token(None);
        assert!(!api.has_token());
    }

    #[test]
    fn test_unauthorized() {
        let err = error_from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_validation_uses_json_message() {
        let err = error_from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "employee_number already exists"}"#,
        );
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "employee_number already exists"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_found_and_plain_body() {
        match error_from_status(StatusCode::NOT_FOUND, "no such sheet") {
            AppError::NotFound(msg) => assert_eq!(msg, "no such sheet"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_server_error_falls_back_to_reason() {
        match error_from_status(StatusCode::INTERNAL_SERVER_ERROR, "  ") {
            AppError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_body_shapes() {
        let bare: ListBody<i64> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);

        let wrapped: ListBody<i64> = serde_json::from_str(r#"{"data": [3]}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![3]);
    }
}
