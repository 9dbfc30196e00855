/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::media_item::RpcCode;
use num_enum::TryFromPrimitiveError;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum GPhotosError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("Not a supported image file: {0}")]
    UnsupportedImage(String),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u16, String),

    #[error("API Response is malformed: {0:?}")]
    ApiResponseMalformed(serde_json::Error),

    #[error("API Response is a too many requests error. Retry after {0} seconds")]
    ApiResponseTooManyRequests(u64),

    #[error("Media item was not created: {0}, msg: {1}")]
    ItemNotCreated(i32, String),

    #[error("RPC status code is invalid")]
    RpcStatusCode(#[from] TryFromPrimitiveError<RpcCode>),
}
