// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Registration payload and its field rules
//!
//! All fields are optional at the serde level so that a missing field is
//! reported per field instead of failing the whole body.

use serde::Deserialize;

use crate::api::errors::FieldErrors;
use crate::models::Role;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
const PASSWORD_TOO_SHORT: &str =
    "This password is too short. It must contain at least 8 characters.";
const PASSWORD_NUMERIC: &str = "This password is entirely numeric.";
const PASSWORD_MISMATCH: &str = "Password fields didn't match.";
const INVALID_EMAIL: &str = "Enter a valid email address.";

pub const USERNAME_MAX_CHARS: usize = 150;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PHONE_MAX_CHARS: usize = 20;
pub const ORGANIZATION_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub organization_name: Option<String>,
}

/// Registration that passed every field rule except uniqueness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: Role,
    pub phone: String,
    pub organization_name: String,
}

/// Trimmed, non-blank value of a required text field
pub fn required_text(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some("") => {
            errors.add(field, BLANK);
            None
        }
        Some(v) => Some(v.to_string()),
    }
}

fn max_length_message(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max_chars: Option<usize>,
) -> String {
    let value = value.map(str::trim).unwrap_or_default();
    if let Some(max) = max_chars {
        if value.chars().count() > max {
            errors.add(field, max_length_message(max));
        }
    }
    value.to_string()
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

fn is_plausible_email(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = required_text(&mut errors, "username", self.username.as_deref());
        if let Some(name) = &username {
            if name.chars().count() > USERNAME_MAX_CHARS {
                errors.add("username", max_length_message(USERNAME_MAX_CHARS));
            }
            if !name.chars().all(is_username_char) {
                errors.add("username", INVALID_USERNAME);
            }
        }

        // Passwords are taken verbatim, surrounding whitespace included
        let password = match self.password.as_deref() {
            None => {
                errors.add("password", REQUIRED);
                None
            }
            Some("") => {
                errors.add("password", BLANK);
                None
            }
            Some(p) => {
                if p.chars().count() < PASSWORD_MIN_CHARS {
                    errors.add("password", PASSWORD_TOO_SHORT);
                }
                if p.chars().all(|c| c.is_ascii_digit()) {
                    errors.add("password", PASSWORD_NUMERIC);
                }
                if let Some(confirm) = self.password2.as_deref() {
                    if confirm != p {
                        errors.add("password", PASSWORD_MISMATCH);
                    }
                }
                Some(p.to_string())
            }
        };

        let email = optional_text(&mut errors, "email", self.email.as_deref(), None);
        if !email.is_empty() && !is_plausible_email(&email) {
            errors.add("email", INVALID_EMAIL);
        }

        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => Role::default(),
            Some(value) => value.parse::<Role>().unwrap_or_else(|invalid| {
                errors.add("role", format!("\"{}\" is not a valid choice.", invalid));
                Role::default()
            }),
        };

        let phone = optional_text(
            &mut errors,
            "phone",
            self.phone.as_deref(),
            Some(PHONE_MAX_CHARS),
        );
        let organization_name = optional_text(
            &mut errors,
            "organization_name",
            self.organization_name.as_deref(),
            Some(ORGANIZATION_MAX_CHARS),
        );

        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => Ok(ValidRegistration {
                username,
                password,
                email,
                role,
                phone,
                organization_name,
            }),
            _ => Err(errors),
        }
    }
}
