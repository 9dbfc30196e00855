/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::api::{ApiClient, ApiParams, Creds};
use crate::v1::errors::GPhotosError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Cheaply cloneable handle to the API, shared by the domain types.
#[derive(Debug, Default, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    pub fn new(creds: Creds) -> Self {
        Self {
            api_client: Arc::new(ApiClient::new(creds)),
        }
    }

    /// Like [`Client::new`] but applies a per-request deadline.
    pub fn with_timeout(creds: Creds, timeout: Duration) -> Result<Self, GPhotosError> {
        Ok(Self {
            api_client: Arc::new(ApiClient::with_timeout(creds, timeout)?),
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<T, GPhotosError> {
        self.api_client.get(url, params).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Vec<u8>,
    ) -> Result<T, GPhotosError> {
        self.api_client.post(url, data).await
    }

    pub(crate) async fn upload(
        &self,
        url: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, GPhotosError> {
        self.api_client.upload(url, content_type, data).await
    }
}
