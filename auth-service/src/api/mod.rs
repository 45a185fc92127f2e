// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod http_server;
pub mod register;

pub use errors::{ApiError, ErrorResponse, FieldErrors};
pub use handlers::{AccessResponse, PingResponse};
pub use register::RegisterResponse;
