// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod extractor;
pub mod password;
pub mod tokens;

pub use extractor::AuthenticatedUser;
pub use password::{hash_password, verify_password, PasswordError};
pub use tokens::{TokenClaims, TokenError, TokenPair, TokenService, TokenType};
