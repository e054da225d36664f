//! Postal code resolution through the ViaCEP-style lookup service.
//!
//! The acquisition engine only sees the `PostalLookup` trait: an 8-digit
//! code either resolves to a street-level address or fails. A code the
//! service does not know and a transport error are surfaced through the
//! same error type, since the caller's recovery (re-prompt) is identical.

use crate::core::error::RegistrarError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub const VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";

const LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAddress {
    /// Normalized 8-digit code, punctuation stripped.
    pub postal_code: String,
    pub street: String,
    pub district: String,
    pub locality: String,
    pub region: String,
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("postal code not found")]
    NotFound,
    #[error("lookup transport failure: {0}")]
    Transport(String),
}

pub trait PostalLookup {
    fn lookup(&self, postal_code: &str) -> Result<ResolvedAddress, LookupError>;
}

#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    // Present (in varying shapes across service versions) only when the
    // code is unknown.
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

pub struct ViaCepClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ViaCepClient {
    pub fn new() -> Result<Self, RegistrarError> {
        Self::with_base_url(VIACEP_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, RegistrarError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl PostalLookup for ViaCepClient {
    fn lookup(&self, postal_code: &str) -> Result<ResolvedAddress, LookupError> {
        let url = format!("{}/{}/json/", self.base_url, postal_code);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(LookupError::Transport(format!(
                "unexpected status {}",
                response.status()
            )));
        }
        let payload: ViaCepPayload = response
            .json()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        if payload.erro.is_some() {
            return Err(LookupError::NotFound);
        }
        Ok(ResolvedAddress {
            postal_code: postal_code.to_string(),
            street: payload.logradouro,
            district: payload.bairro,
            locality: payload.localidade,
            region: payload.uf,
        })
    }
}

/// Deterministic in-memory lookup for tests and offline runs.
#[derive(Default)]
pub struct StaticLookup {
    entries: HashMap<String, ResolvedAddress>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: ResolvedAddress) {
        self.entries.insert(address.postal_code.clone(), address);
    }
}

impl PostalLookup for StaticLookup {
    fn lookup(&self, postal_code: &str) -> Result<ResolvedAddress, LookupError> {
        self.entries
            .get(postal_code)
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}
