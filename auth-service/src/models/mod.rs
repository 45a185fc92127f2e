// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod user;

pub use user::{NewUser, Role, User, UserProfile};
