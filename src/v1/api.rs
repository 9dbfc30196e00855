/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::GPhotosError;
use bytes::Bytes;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

// Root Photos Library API
pub const API_ORIGIN: &str = "https://photoslibrary.googleapis.com";

// Upper bound on retries for rate limited requests
const MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Directly communicates with the API.
#[derive(Default, Clone)]
pub struct ApiClient {
    creds: Creds,
    https_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client instance from the provided credentials
    pub fn new(creds: Creds) -> Self {
        Self {
            creds,
            https_client: reqwest::Client::new(),
        }
    }

    /// Creates a client whose requests are subject to a deadline. A call that
    /// exceeds it fails instead of hanging the caller.
    pub fn with_timeout(creds: Creds, timeout: Duration) -> Result<Self, GPhotosError> {
        let https_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            creds,
            https_client,
        })
    }

    /// Performs a get request to the API
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<T, GPhotosError> {
        let req_url = params.map_or(reqwest::Url::parse(url), |v| {
            reqwest::Url::parse_with_params(url, v)
        })?;
        let resp = self
            .send_checked(move |c| {
                c.get(req_url.clone())
                    .header("Accept", "application/json")
            })
            .await?;
        Ok(resp.json::<T>().await?)
    }

    /// Performs a post request with a JSON body to the API
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Vec<u8>,
    ) -> Result<T, GPhotosError> {
        let req_url = reqwest::Url::parse(url)?;
        let resp = self
            .send_checked(move |c| {
                c.post(req_url.clone())
                    .header("Content-Type", "application/json")
                    .header("Accept", "application/json")
                    .body(data.clone())
            })
            .await?;
        Ok(resp.json::<T>().await?)
    }

    /// Posts raw bytes to the upload endpoint and returns the response body,
    /// which carries the upload token as plain text.
    pub async fn upload(
        &self,
        url: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, GPhotosError> {
        let req_url = reqwest::Url::parse(url)?;
        let content_type = content_type.to_string();
        let resp = self
            .send_checked(move |c| {
                c.post(req_url.clone())
                    .header("Content-Type", "application/octet-stream")
                    .header("X-Goog-Upload-Content-Type", content_type.clone())
                    .header("X-Goog-Upload-Protocol", "raw")
                    .body(data.clone())
            })
            .await?;
        Ok(resp.text().await?)
    }

    // Sends the built request, turning error statuses into errors. Requests
    // rejected with 429 are retried a bounded number of times, honoring the
    // Retry-After header with some added jitter.
    async fn send_checked(
        &self,
        build: impl Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GPhotosError> {
        let mut attempt = 0;
        loop {
            let resp = build(&self.https_client)
                .bearer_auth(&self.creds.access_token)
                .send()
                .await?;
            let status = resp.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let wait_secs = retry_after_secs(&resp);
                if attempt >= MAX_RETRIES {
                    return Err(GPhotosError::ApiResponseTooManyRequests(wait_secs));
                }
                attempt += 1;
                log::warn!(
                    "rate limited, retrying in {wait_secs}s (attempt {attempt}/{MAX_RETRIES})"
                );
                let jitter = Duration::from_millis(rand::random_range(0..250));
                tokio::time::sleep(Duration::from_secs(wait_secs) + jitter).await;
                continue;
            }
            if !status.is_success() {
                let body = resp.bytes().await?;
                return Err(match serde_json::from_slice::<ErrorBody>(&body) {
                    Ok(body) => GPhotosError::ApiResponse(status.as_u16(), body.error.message),
                    Err(err) => GPhotosError::ApiResponseMalformed(err),
                });
            }
            return Ok(resp);
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish()
    }
}

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// OAuth2 bearer credentials for the API
#[derive(Default, Clone)]
pub struct Creds {
    pub(crate) access_token: String,
}

impl Creds {
    /// Creates credentials from an already acquired OAuth2 access token
    pub fn from_access_token(access_token: &str) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("access_token", &"xxx")
            .finish()
    }
}

fn retry_after_secs(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

// Error envelope returned by the API for non-success statuses
#[derive(Deserialize, Debug)]
struct ErrorBody {
    #[serde(rename = "error")]
    error: ErrorStatus,
}

#[derive(Deserialize, Debug)]
struct ErrorStatus {
    // #[serde(rename = "code")]
    // code: Option<i32>,
    #[serde(rename = "message")]
    message: String,
    // #[serde(rename = "status")]
    // status: Option<String>,
}
