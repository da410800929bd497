//! Low-level HTTP helpers shared by both providers.
//!
//! Each call is one attempt with its own timeout; failures come back as
//! [`AttemptError`] so the caller decides whether to move on.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::AttemptError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// POST a pre-encoded form body and parse the JSON response.
pub(crate) async fn post_form_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    body: String,
    timeout: Duration,
) -> Result<T, AttemptError> {
    let response = client
        .post(url)
        .timeout(timeout)
        .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .header(reqwest::header::ACCEPT, "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| AttemptError::from_reqwest(url, e))?;

    read_json(url, response).await
}

/// GET a URL and parse the JSON response.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    timeout: Duration,
) -> Result<T, AttemptError> {
    let label = redact_key(&url);
    let response = client
        .get(url)
        .timeout(timeout)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| AttemptError::from_reqwest(&label, e))?;

    read_json(&label, response).await
}

async fn read_json<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, AttemptError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AttemptError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| AttemptError::from_reqwest(url, e))?;
    serde_json::from_str(&body).map_err(|source| AttemptError::Body {
        url: url.to_owned(),
        source,
    })
}

/// Render a URL for logs with any `key` query parameter masked.
pub(crate) fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" {
                "[redacted]".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return redacted.to_string();
    }
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
