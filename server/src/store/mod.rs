//! Storage seams for the three collections.
//!
//! Each collection is a trait so services can hold a shared handle to either
//! the Postgres pool or the in-memory store. None of the operations span more
//! than one row: there is no transaction linking a booking to slot capacity or
//! promo usage.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Booking, Experience, PromoCode};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("malformed record: {0}")]
    Corrupt(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ExperienceStore: Send + Sync {
    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError>;

    async fn find_experience(&self, id: &str) -> Result<Option<Experience>, StoreError>;
}

#[async_trait]
pub trait PromoCodeStore: Send + Sync {
    /// Looks up an active code. `code` must already be normalized.
    async fn find_active_promo(&self, code: &str) -> Result<Option<PromoCode>, StoreError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Inserts unconditionally. A reused reference ID yields [`StoreError::Duplicate`].
    async fn insert_booking(&self, booking: &Booking) -> Result<Booking, StoreError>;

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;
}
