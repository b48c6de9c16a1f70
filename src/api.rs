use gloo_net::http::{Request, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use urlencoding::encode;

use crate::catalog::ActivityCatalog;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request did not complete: {0}")]
    Transport(String),
    #[error("server answered HTTP {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("unreadable response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// The backend as seen by the board. Mutations resolve to the server's `message`.
#[allow(async_fn_in_trait)]
pub trait ActivityApi {
    async fn fetch_catalog(&self) -> Result<ActivityCatalog, ApiError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self { base: base.trim_end_matches('/').to_string() }
    }

    pub fn activities(&self) -> String {
        format!("{}/activities", self.base)
    }

    pub fn signup(&self, activity: &str, email: &str) -> String {
        self.mutation(activity, "signup", email)
    }

    pub fn unregister(&self, activity: &str, email: &str) -> String {
        self.mutation(activity, "unregister", email)
    }

    fn mutation(&self, activity: &str, action: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/{}?email={}",
            self.base,
            encode(activity),
            action,
            encode(email)
        )
    }
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Deserialize)]
struct DetailBody {
    #[serde(default)]
    detail: Value,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

// FastAPI validation errors send `detail` as a list; only plain strings are shown.
fn detail_of(body: &str) -> Option<String> {
    match serde_json::from_str::<DetailBody>(body).ok()?.detail {
        Value::String(s) => Some(s),
        _ => None,
    }
}

pub fn interpret_catalog(status: u16, body: &str) -> Result<ActivityCatalog, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Rejected { status, detail: detail_of(body) });
    }
    Ok(serde_json::from_str(body)?)
}

pub fn interpret_mutation(status: u16, body: &str) -> Result<String, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Rejected { status, detail: detail_of(body) });
    }
    let parsed: MessageBody = serde_json::from_str(body)?;
    Ok(parsed.message)
}

/// `ActivityApi` over the browser's fetch, via gloo-net.
#[derive(Debug, Clone)]
pub struct HttpApi {
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(base: &str) -> Self {
        Self { endpoints: Endpoints::new(base) }
    }
}

async fn send(request: RequestBuilder) -> Result<(u16, String), ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

impl ActivityApi for HttpApi {
    async fn fetch_catalog(&self) -> Result<ActivityCatalog, ApiError> {
        let url = self.endpoints.activities();
        tracing::debug!(%url, "fetching activities");
        let (status, body) = send(Request::get(&url)).await?;
        interpret_catalog(status, &body)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        let url = self.endpoints.signup(activity, email);
        tracing::debug!(%url, "signing up");
        let (status, body) = send(Request::post(&url)).await?;
        interpret_mutation(status, &body)
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        let url = self.endpoints.unregister(activity, email);
        tracing::debug!(%url, "unregistering");
        let (status, body) = send(Request::delete(&url)).await?;
        interpret_mutation(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_names_and_emails_are_percent_encoded() {
        let endpoints = Endpoints::new("");
        assert_eq!(
            endpoints.signup("Programming Class", "test@mergington.edu"),
            "/activities/Programming%20Class/signup?email=test%40mergington.edu"
        );
        assert_eq!(
            endpoints.unregister("Art & Craft/Pottery", "a+b@x.com"),
            "/activities/Art%20%26%20Craft%2FPottery/unregister?email=a%2Bb%40x.com"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let endpoints = Endpoints::new("https://api.example.org/");
        assert_eq!(endpoints.activities(), "https://api.example.org/activities");
    }

    #[test]
    fn successful_mutation_yields_server_message() {
        let msg = interpret_mutation(200, r#"{"message":"Signed up a@b.com for Chess Club"}"#).unwrap();
        assert_eq!(msg, "Signed up a@b.com for Chess Club");
    }

    #[test]
    fn rejected_mutation_carries_detail() {
        match interpret_mutation(400, r#"{"detail":"Student is already signed up"}"#) {
            Err(ApiError::Rejected { status, detail }) => {
                assert_eq!(status, 400);
                assert_eq!(detail.as_deref(), Some("Student is already signed up"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejection_without_string_detail_has_none() {
        let validation = r#"{"detail":[{"loc":["query","email"],"msg":"field required"}]}"#;
        assert!(matches!(
            interpret_mutation(422, validation),
            Err(ApiError::Rejected { status: 422, detail: None })
        ));
        assert!(matches!(
            interpret_mutation(500, "Internal Server Error"),
            Err(ApiError::Rejected { status: 500, detail: None })
        ));
    }

    #[test]
    fn success_with_unreadable_body_is_decode_error() {
        assert!(matches!(interpret_mutation(200, "<html>"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn catalog_requires_success_status_and_json() {
        assert!(matches!(
            interpret_catalog(404, r#"{"detail":"Not Found"}"#),
            Err(ApiError::Rejected { status: 404, .. })
        ));
        assert!(matches!(interpret_catalog(200, "not json"), Err(ApiError::Decode(_))));
        let catalog = interpret_catalog(200, "{}").unwrap();
        assert!(catalog.is_empty());
    }
}
