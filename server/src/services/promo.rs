use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{normalize_code, Discount};
use crate::store::PromoCodeStore;
use crate::utils::error::AppError;

/// Validates promo codes. Read-only: a successful validation does not count
/// as a use, so repeated calls never exhaust a code.
#[derive(Clone)]
pub struct PromoService {
    store: Arc<dyn PromoCodeStore>,
}

impl PromoService {
    pub fn new(store: Arc<dyn PromoCodeStore>) -> Self {
        Self { store }
    }

    pub async fn validate(&self, code: Option<&str>) -> Result<Discount, AppError> {
        self.validate_at(code, Utc::now()).await
    }

    pub async fn validate_at(
        &self,
        code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Discount, AppError> {
        let code = code
            .and_then(normalize_code)
            .ok_or_else(|| AppError::ValidationError("Promo code is required".to_string()))?;

        // Inactive and unknown codes look the same to the caller.
        let promo = self
            .store
            .find_active_promo(&code)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid promo code".to_string()))?;

        if promo.is_expired_at(now) {
            return Err(AppError::PromoExpired);
        }
        if promo.is_exhausted() {
            return Err(AppError::PromoExhausted);
        }

        debug!(code = %promo.code, discount_type = %promo.discount_type, "Promo code accepted");
        Ok(promo.discount())
    }
}
