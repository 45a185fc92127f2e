// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Operator tooling for the food-donation database

pub mod cli;
pub mod migration;
pub mod report;
pub mod supabase;

pub use report::{render, summarize, DonationReport};
pub use supabase::{Donation, SupabaseClient, SupabaseError};
