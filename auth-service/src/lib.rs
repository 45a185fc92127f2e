// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Registration and token service for the food-donation platform

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod store;

pub use api::http_server::{create_app, start_server, AppState};
pub use auth::{TokenPair, TokenService};
pub use config::AuthConfig;
pub use models::{Role, User, UserProfile};
pub use store::{InMemoryUserStore, UserStore};
