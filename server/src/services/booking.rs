use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::catalog::CatalogService;
use super::pricing;
use super::promo::PromoService;
use super::ref_id::{RefIdSource, ThreadRngRefIds};
use crate::models::{Booking, NewBooking};
use crate::store::{BookingStore, StoreError};
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSettings {
    /// Recompute the quote server-side and reject mismatching payloads.
    pub verify_pricing: bool,
    pub tax_rate: Decimal,
    /// Total insert attempts when a reference ID collides. At least one.
    pub ref_id_attempts: u32,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            verify_pricing: false,
            tax_rate: Decimal::new(59, 3),
            ref_id_attempts: 3,
        }
    }
}

/// Creates and lists bookings.
///
/// Creation is a single insert. No slot capacity is checked or decremented
/// and no promo usage is recorded, so concurrent bookings for the same slot
/// can all succeed and resubmitting a payload creates a second booking.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    catalog: CatalogService,
    promos: PromoService,
    ref_ids: Arc<dyn RefIdSource>,
    settings: BookingSettings,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        catalog: CatalogService,
        promos: PromoService,
        settings: BookingSettings,
    ) -> Self {
        Self {
            store,
            catalog,
            promos,
            ref_ids: Arc::new(ThreadRngRefIds),
            settings,
        }
    }

    pub fn with_ref_ids(mut self, ref_ids: Arc<dyn RefIdSource>) -> Self {
        self.ref_ids = ref_ids;
        self
    }

    pub async fn create(&self, request: NewBooking) -> Result<Booking, AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        if self.settings.verify_pricing {
            self.verify_quote(&request).await?;
        }

        let attempts = self.settings.ref_id_attempts.max(1);
        let mut booking = request.into_booking(self.ref_ids.next_ref_id(), Utc::now());
        let mut attempt = 1;

        loop {
            match self.store.insert_booking(&booking).await {
                Ok(stored) => {
                    info!(
                        ref_id = %stored.ref_id,
                        experience_id = %stored.experience_id,
                        quantity = stored.quantity,
                        total = stored.total,
                        "Booking created"
                    );
                    return Ok(stored);
                }
                Err(StoreError::Duplicate(ref_id)) if attempt < attempts => {
                    warn!(%ref_id, attempt, "Reference ID collision, regenerating");
                    booking.ref_id = self.ref_ids.next_ref_id();
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Booking>, AppError> {
        Ok(self.store.list_bookings().await?)
    }

    async fn verify_quote(&self, request: &NewBooking) -> Result<(), AppError> {
        let experience = match self.catalog.get(&request.experience_id).await {
            Ok(experience) => experience,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::ValidationError("Unknown experience".to_string()))
            }
            Err(e) => return Err(e),
        };

        if experience.slot(&request.date, &request.time).is_none() {
            return Err(AppError::ValidationError("Unknown time slot".to_string()));
        }

        let discount = match request.promo_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                match self.promos.validate(Some(code)).await {
                    Ok(discount) => Some(discount),
                    Err(e @ AppError::PersistenceError(_)) => return Err(e),
                    Err(e) => {
                        return Err(AppError::ValidationError(format!(
                            "Promo code rejected: {}",
                            e.public_message()
                        )))
                    }
                }
            }
            _ => None,
        };

        let quote = pricing::quote(
            experience.price,
            request.quantity,
            self.settings.tax_rate,
            discount.as_ref(),
        )
        .ok_or_else(|| AppError::ValidationError("Order amount is out of range".to_string()))?;

        if (request.subtotal, request.taxes, request.total)
            != (quote.subtotal, quote.taxes, quote.total)
        {
            warn!(
                experience_id = %request.experience_id,
                claimed_total = request.total,
                expected_total = quote.total,
                "Booking price mismatch"
            );
            return Err(AppError::ValidationError(
                "Booking price does not match the current quote".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ref_id;
    use crate::store::MemoryStore;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out queued IDs, then falls back to random ones.
    struct QueuedRefIds(Mutex<VecDeque<String>>);

    impl QueuedRefIds {
        fn new(ids: &[&str]) -> Arc<Self> {
            Arc::new(Self(Mutex::new(
                ids.iter().map(|id| id.to_string()).collect(),
            )))
        }
    }

    impl RefIdSource for QueuedRefIds {
        fn next_ref_id(&self) -> String {
            self.0
                .lock()
                .expect("not poisoned")
                .pop_front()
                .unwrap_or_else(|| ThreadRngRefIds.next_ref_id())
        }
    }

    fn build(settings: BookingSettings) -> (Arc<MemoryStore>, BookingService) {
        let store = Arc::new(MemoryStore::seeded().expect("bundled seed parses"));
        let service = BookingService::new(
            store.clone(),
            CatalogService::new(store.clone()),
            PromoService::new(store.clone()),
            settings,
        );
        (store, service)
    }

    fn request() -> NewBooking {
        NewBooking {
            experience_id: "kayaking-udupi".into(),
            experience_title: "Kayaking".into(),
            date: "Oct 22".into(),
            time: "07:00 am".into(),
            quantity: 2,
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            subtotal: 1998,
            taxes: 118,
            total: 2116,
            promo_code: None,
        }
    }

    #[tokio::test]
    async fn created_booking_is_listed_with_its_ref_id() {
        let (_, service) = build(BookingSettings::default());
        let booking = service.create(request()).await.expect("created");
        assert!(ref_id::is_valid(&booking.ref_id));

        let listed = service.list().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].ref_id, booking.ref_id);
    }

    #[tokio::test]
    async fn identical_payloads_create_distinct_bookings() {
        let (_, service) = build(BookingSettings::default());
        let first = service.create(request()).await.expect("created");
        let second = service.create(request()).await.expect("created");
        assert_ne!(first.ref_id, second.ref_id);
        assert_eq!(service.list().await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn client_totals_are_stored_verbatim_by_default() {
        let (_, service) = build(BookingSettings::default());
        let mut tampered = request();
        tampered.total = 1;
        let booking = service.create(tampered).await.expect("created");
        assert_eq!(booking.total, 1);
    }

    #[tokio::test]
    async fn sold_out_slot_still_accepts_bookings() {
        let (store, service) = build(BookingSettings::default());
        let mut sold_out = request();
        sold_out.time = "1:00 pm".into();
        service.create(sold_out).await.expect("no capacity check");

        let experience = crate::store::ExperienceStore::find_experience(&*store, "kayaking-udupi")
            .await
            .expect("find")
            .expect("seeded");
        let slot = experience.slot("Oct 22", "1:00 pm").expect("slot");
        assert_eq!(slot.available, 0);
        assert!(slot.sold_out);
    }

    #[tokio::test]
    async fn blank_customer_name_is_rejected() {
        let (_, service) = build(BookingSettings::default());
        let mut blank = request();
        blank.full_name = String::new();
        let err = service.create(blank).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(service.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn collision_is_retried_with_a_fresh_id() {
        let (_, service) = build(BookingSettings::default());
        let service = service.with_ref_ids(QueuedRefIds::new(&[
            "HUFAAAAAASO",
            "HUFAAAAAASO",
            "HUFBBBBBBSO",
        ]));

        service.create(request()).await.expect("first");
        let second = service.create(request()).await.expect("retried");
        assert_eq!(second.ref_id, "HUFBBBBBBSO");
    }

    #[tokio::test]
    async fn collision_without_retries_is_a_persistence_error() {
        let (_, service) = build(BookingSettings {
            ref_id_attempts: 1,
            ..BookingSettings::default()
        });
        let service =
            service.with_ref_ids(QueuedRefIds::new(&["HUFAAAAAASO", "HUFAAAAAASO"]));

        service.create(request()).await.expect("first");
        let err = service.create(request()).await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceError(StoreError::Duplicate(_))));
        assert_eq!(service.list().await.expect("list").len(), 1);
    }

    fn verifying() -> BookingSettings {
        BookingSettings {
            verify_pricing: true,
            ..BookingSettings::default()
        }
    }

    #[tokio::test]
    async fn verification_accepts_a_correct_discounted_quote() {
        let (_, service) = build(verifying());
        let mut discounted = request();
        discounted.promo_code = Some("save10".into());
        discounted.total = 1998 + 118 - 200;
        let booking = service.create(discounted).await.expect("quote matches");
        assert_eq!(booking.total, 1916);
        assert_eq!(booking.promo_code.as_deref(), Some("save10"));
    }

    #[tokio::test]
    async fn verification_rejects_tampered_totals() {
        let (_, service) = build(verifying());
        let mut tampered = request();
        tampered.total = 1;
        let err = service.create(tampered).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn verification_rejects_unknown_experience_and_slot() {
        let (_, service) = build(verifying());

        let mut unknown = request();
        unknown.experience_id = "skydiving".into();
        assert!(matches!(
            service.create(unknown).await,
            Err(AppError::ValidationError(_))
        ));

        let mut no_slot = request();
        no_slot.time = "11:59 pm".into();
        assert!(matches!(
            service.create(no_slot).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn verification_rejects_invalid_promo() {
        let (_, service) = build(verifying());
        let mut bogus = request();
        bogus.promo_code = Some("FREEBIE".into());
        let err = service.create(bogus).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref msg) if msg.contains("Invalid promo code")));
    }
}
