//! # In-Memory Store
//!
//! One `InMemoryStore` implements every repository trait. It backs the
//! default server wiring and the test suites; a document store slots in
//! behind the same traits without touching callers.

use crate::cart::CartItem;
use crate::catalog::{MenuItem, MenuItemPatch, Review};
use crate::error::{ApiError, ApiResult};
use crate::payment::PaymentRecord;
use crate::store::{
    CartStore, InsertOutcome, MenuStore, PaymentStore, ReviewStore, UserStore,
};
use crate::user::{Role, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory implementation of all store traits
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    menu: RwLock<HashMap<Uuid, MenuItem>>,
    reviews: RwLock<Vec<Review>>,
    carts: RwLock<HashMap<Uuid, CartItem>>,
    payments: RwLock<HashMap<Uuid, PaymentRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed reviews (there is no write endpoint for them)
    pub fn seed_reviews(&self, reviews: Vec<Review>) -> ApiResult<()> {
        let mut guard = self.reviews.write().map_err(|_| poisoned())?;
        *guard = reviews;
        Ok(())
    }
}

fn poisoned() -> ApiError {
    ApiError::StoreFailure("store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let guard = self.users.read().map_err(|_| poisoned())?;
        Ok(guard.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> ApiResult<InsertOutcome> {
        let mut guard = self.users.write().map_err(|_| poisoned())?;
        if guard.values().any(|u| u.email == user.email) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        guard.insert(user.id, user);
        Ok(InsertOutcome::Inserted)
    }

    async fn list(&self) -> ApiResult<Vec<User>> {
        let guard = self.users.read().map_err(|_| poisoned())?;
        Ok(guard.values().cloned().collect())
    }

    async fn set_role(&self, id: Uuid, role: Role) -> ApiResult<()> {
        let mut guard = self.users.write().map_err(|_| poisoned())?;
        let user = guard
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))?;
        user.role = role;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> ApiResult<()> {
        let mut guard = self.users.write().map_err(|_| poisoned())?;
        guard
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))
    }
}

#[async_trait]
impl MenuStore for InMemoryStore {
    async fn list(&self) -> ApiResult<Vec<MenuItem>> {
        let guard = self.menu.read().map_err(|_| poisoned())?;
        Ok(guard.values().cloned().collect())
    }

    async fn find(&self, id: Uuid) -> ApiResult<Option<MenuItem>> {
        let guard = self.menu.read().map_err(|_| poisoned())?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, item: MenuItem) -> ApiResult<()> {
        let mut guard = self.menu.write().map_err(|_| poisoned())?;
        guard.insert(item.id, item);
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: MenuItemPatch) -> ApiResult<()> {
        let mut guard = self.menu.write().map_err(|_| poisoned())?;
        let item = guard
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("menu item {}", id)))?;
        patch.apply(item);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> ApiResult<()> {
        let mut guard = self.menu.write().map_err(|_| poisoned())?;
        guard
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("menu item {}", id)))
    }
}

#[async_trait]
impl ReviewStore for InMemoryStore {
    async fn list(&self) -> ApiResult<Vec<Review>> {
        let guard = self.reviews.read().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl CartStore for InMemoryStore {
    async fn list_for_owner(&self, email: &str) -> ApiResult<Vec<CartItem>> {
        let guard = self.carts.read().map_err(|_| poisoned())?;
        Ok(guard
            .values()
            .filter(|item| item.is_owned_by(email))
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> ApiResult<Option<CartItem>> {
        let guard = self.carts.read().map_err(|_| poisoned())?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, item: CartItem) -> ApiResult<()> {
        let mut guard = self.carts.write().map_err(|_| poisoned())?;
        guard.insert(item.id, item);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        let mut guard = self.carts.write().map_err(|_| poisoned())?;
        Ok(guard.remove(&id).is_some())
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn insert(&self, record: PaymentRecord) -> ApiResult<()> {
        let mut guard = self.payments.write().map_err(|_| poisoned())?;
        guard.insert(record.id, record);
        Ok(())
    }

    async fn find_by_transaction_ref(
        &self,
        transaction_ref: &str,
    ) -> ApiResult<Option<PaymentRecord>> {
        let guard = self.payments.read().map_err(|_| poisoned())?;
        Ok(guard
            .values()
            .find(|r| r.transaction_ref == transaction_ref)
            .cloned())
    }

    async fn list_for_owner(&self, email: &str) -> ApiResult<Vec<PaymentRecord>> {
        let guard = self.payments.read().map_err(|_| poisoned())?;
        Ok(guard
            .values()
            .filter(|r| r.owner_email == email)
            .cloned()
            .collect())
    }

    async fn mark_cart_cleared(&self, id: Uuid) -> ApiResult<()> {
        let mut guard = self.payments.write().map_err(|_| poisoned())?;
        let record = guard
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("payment record {}", id)))?;
        record.cart_cleared = true;
        Ok(())
    }
}
