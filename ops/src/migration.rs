// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Operator instructions for applying a SQL migration by hand
//!
//! The hosted database does not accept raw SQL through its REST surface, so
//! the tool prints the script and the steps to run it instead of executing it.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SQL_PATH: &str = "add_location_columns.sql";
pub const DASHBOARD_URL: &str = "https://app.supabase.com";

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to read migration script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn render_instructions(path: &Path, sql: &str) -> String {
    let heavy = "=".repeat(60);
    let light = "-".repeat(60);
    let mut out = String::new();

    let _ = write!(
        out,
        "{heavy}\nSUPABASE DATABASE MIGRATION\n{heavy}\n\
         \nSQL Script to execute:\n{light}\n{sql}\n{light}\n\
         \n⚠️  MANUAL STEPS REQUIRED:\n\
         \n1. Go to your Supabase Dashboard: {DASHBOARD_URL}\n\
         2. Select your project\n\
         3. Go to 'SQL Editor' in the left sidebar\n\
         4. Click 'New Query'\n\
         5. Copy and paste the SQL script above\n\
         6. Click 'Run' or press Ctrl+Enter\n\
         \nAlternatively, you can run this via Supabase CLI:\n\
         supabase db execute < {path}\n\
         \n{heavy}\n",
        sql = sql.trim_end(),
        path = path.display(),
    );
    out
}

pub fn load_instructions(path: &Path) -> Result<String, MigrationError> {
    let sql = fs::read_to_string(path).map_err(|source| MigrationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(render_instructions(path, &sql))
}
