// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User persistence

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{NewUser, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, assigning the next id. Usernames are unique.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Enable or disable login for a user. Returns the updated user, or
    /// `None` if the id is unknown.
    async fn set_active(&self, id: u64, active: bool) -> Result<Option<User>, StoreError>;
}

#[derive(Default)]
struct Users {
    by_id: HashMap<u64, User>,
    ids_by_username: HashMap<String, u64>,
    last_id: u64,
}

/// Process-local store; contents are lost on restart
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<RwLock<Users>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.inner.write().await;
        if users.ids_by_username.contains_key(&new_user.username) {
            return Err(StoreError::DuplicateUsername(new_user.username));
        }

        users.last_id += 1;
        let user = User {
            id: users.last_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            phone: new_user.phone,
            organization_name: new_user.organization_name,
            is_active: true,
            date_joined: Utc::now(),
        };
        users.ids_by_username.insert(user.username.clone(), user.id);
        users.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.inner.read().await;
        Ok(users
            .ids_by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn set_active(&self, id: u64, active: bool) -> Result<Option<User>, StoreError> {
        let mut users = self.inner.write().await;
        Ok(users.by_id.get_mut(&id).map(|user| {
            user.is_active = active;
            user.clone()
        }))
    }
}
