// src/web/handlers/mod.rs

pub mod advisor;
pub mod automation;
pub mod clients;
pub mod config;
pub mod misc;
pub mod sweep;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::Error;

/// JSON body parsing that reports failures through `ApiError` rather than axum's
/// plain-text rejection.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(serde_json::from_slice(body)?)
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, Error> {
    Ok(Uuid::parse_str(raw)?)
}
