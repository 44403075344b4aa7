use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookingStore, ExperienceStore, PromoCodeStore, StoreError};
use crate::models::{Booking, Experience, PromoCode};
use crate::seed;

/// Process-local store used by tests and by `STORE=memory`.
#[derive(Default)]
pub struct MemoryStore {
    experiences: RwLock<Vec<Experience>>,
    promo_codes: RwLock<Vec<PromoCode>>,
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(experiences: Vec<Experience>, promo_codes: Vec<PromoCode>) -> Self {
        Self {
            experiences: RwLock::new(experiences),
            promo_codes: RwLock::new(
                promo_codes
                    .into_iter()
                    .map(|mut promo| {
                        promo.code = promo.code.to_uppercase();
                        promo
                    })
                    .collect(),
            ),
            bookings: RwLock::default(),
        }
    }

    /// Loads the bundled seed catalog.
    pub fn seeded() -> Result<Self, serde_json::Error> {
        Ok(Self::with_catalog(seed::experiences()?, seed::promo_codes()?))
    }

    /// Inserts or replaces a promo code by its normalized code.
    pub async fn put_promo_code(&self, mut promo: PromoCode) {
        promo.code = promo.code.to_uppercase();
        let mut codes = self.promo_codes.write().await;
        match codes.iter_mut().find(|existing| existing.code == promo.code) {
            Some(existing) => *existing = promo,
            None => codes.push(promo),
        }
    }
}

#[async_trait]
impl ExperienceStore for MemoryStore {
    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError> {
        Ok(self.experiences.read().await.clone())
    }

    async fn find_experience(&self, id: &str) -> Result<Option<Experience>, StoreError> {
        Ok(self
            .experiences
            .read()
            .await
            .iter()
            .find(|experience| experience.id == id)
            .cloned())
    }
}

#[async_trait]
impl PromoCodeStore for MemoryStore {
    async fn find_active_promo(&self, code: &str) -> Result<Option<PromoCode>, StoreError> {
        Ok(self
            .promo_codes
            .read()
            .await
            .iter()
            .find(|promo| promo.code == code && promo.is_active)
            .cloned())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<Booking, StoreError> {
        let mut bookings = self.bookings.write().await;
        if bookings.iter().any(|existing| existing.ref_id == booking.ref_id) {
            return Err(StoreError::Duplicate(booking.ref_id.clone()));
        }
        bookings.push(booking.clone());
        Ok(booking.clone())
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.bookings.read().await.clone())
    }
}
