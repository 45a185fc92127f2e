// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use std::env;
use thiserror::Error;
use tracing::info;

use crate::report::{render, summarize};
use crate::supabase::SupabaseClient;

/// Names the frontend build uses for the same values
const URL_ALIAS: &str = "VITE_SUPABASE_URL";
const ANON_KEY_ALIAS: &str = "VITE_SUPABASE_ANON_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing Supabase credentials. Please set SUPABASE_URL and SUPABASE_ANON_KEY (or VITE_SUPABASE_URL and VITE_SUPABASE_ANON_KEY)")]
pub struct MissingCredentials;

/// Arguments for check-donations command
#[derive(Args, Debug, Clone)]
pub struct CheckDonationsArgs {
    /// Project URL, e.g. https://<ref>.supabase.co
    #[arg(long, env = "SUPABASE_URL")]
    pub url: Option<String>,

    /// Public anon key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub anon_key: Option<String>,
}

fn usable(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.starts_with("YOUR_"))
}

impl CheckDonationsArgs {
    /// URL and key, falling back to the frontend variable names
    pub fn credentials(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(String, String), MissingCredentials> {
        let url = usable(self.url.clone()).or_else(|| usable(lookup(URL_ALIAS)));
        let key = usable(self.anon_key.clone()).or_else(|| usable(lookup(ANON_KEY_ALIAS)));
        match (url, key) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(MissingCredentials),
        }
    }
}

pub async fn check_donations(args: CheckDonationsArgs) -> Result<()> {
    let (url, key) = args.credentials(|name| env::var(name).ok())?;
    let client = SupabaseClient::new(&url, &key)?;

    println!("🔍 Checking donations in database...\n");
    let donations = client.fetch_donations().await?;
    info!("Fetched {} donations", donations.len());

    print!("{}", render(&summarize(&donations)));
    Ok(())
}
