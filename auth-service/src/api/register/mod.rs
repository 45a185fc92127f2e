// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod handler;
pub mod request;

pub use handler::{register_handler, register_user, RegisterResponse, RegistrationError};
pub use request::{RegisterRequest, ValidRegistration};
