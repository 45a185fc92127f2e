// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Read-only access to the hosted donations table over PostgREST

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DONATIONS_QUERY: &str = "/rest/v1/donations?select=*&order=created_at.desc";

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Supabase returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// One row of `donations`, limited to the columns the report reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Donation {
    pub id: serde_json::Value,
    pub status: Option<String>,
    pub food_name: Option<String>,
    pub food_type: Option<String>,
    pub quantity: Option<serde_json::Value>,
    pub unit: Option<String>,
    pub dietary_type: Option<String>,
    pub spice_level: Option<String>,
    pub pickup_city: Option<String>,
    pub pickup_state: Option<String>,
    pub pickup_street_address: Option<String>,
    pub pickup_pin_code: Option<serde_json::Value>,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub contact_person_name: Option<String>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: Option<String>,
    pub expiry_datetime: Option<String>,
}

impl Donation {
    /// Both coordinates present and non-zero
    pub fn has_coordinates(&self) -> bool {
        matches!(
            (self.pickup_latitude, self.pickup_longitude),
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0
        )
    }
}

pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn donations_url(&self) -> String {
        format!("{}{}", self.base_url, DONATIONS_QUERY)
    }

    /// All donations, newest first
    pub async fn fetch_donations(&self) -> Result<Vec<Donation>, SupabaseError> {
        let url = self.donations_url();
        debug!("Fetching {}", url);

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
