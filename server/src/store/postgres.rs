use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::FromRow;
use tracing::info;

use super::{BookingStore, ExperienceStore, PromoCodeStore, StoreError};
use crate::models::{Booking, DateSlot, Experience, PromoCode};

const EXPERIENCE_COLUMNS: &str = "id, title, location, price, image, description, about, dates";

const PROMO_COLUMNS: &str =
    "code, discount_type, discount_value, max_uses, used_count, expiration_date, is_active";

const BOOKING_COLUMNS: &str = "id, ref_id, experience_id, experience_title, slot_date, slot_time, \
     quantity, full_name, email, subtotal, taxes, total, promo_code, created_at, updated_at";

/// Store backed by a shared Postgres pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Replaces the whole catalog and promo collection in one transaction.
    /// Administrative path, never reached from request handling.
    pub async fn replace_catalog(
        &self,
        experiences: &[Experience],
        promo_codes: &[PromoCode],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM experiences")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM promo_codes")
            .execute(&mut *tx)
            .await?;

        for experience in experiences {
            sqlx::query(
                "INSERT INTO experiences (id, title, location, price, image, description, about, dates) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(&experience.id)
            .bind(&experience.title)
            .bind(&experience.location)
            .bind(experience.price)
            .bind(&experience.image)
            .bind(&experience.description)
            .bind(&experience.about)
            .bind(Json(&experience.dates))
            .execute(&mut *tx)
            .await?;
        }

        for promo in promo_codes {
            sqlx::query(
                "INSERT INTO promo_codes \
                 (code, discount_type, discount_value, max_uses, used_count, expiration_date, is_active) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(promo.code.to_uppercase())
            .bind(promo.discount_type.as_str())
            .bind(promo.discount_value)
            .bind(promo.max_uses)
            .bind(promo.used_count)
            .bind(promo.expiration_date)
            .bind(promo.is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            experiences = experiences.len(),
            promo_codes = promo_codes.len(),
            "Catalog replaced"
        );
        Ok(())
    }
}

#[derive(FromRow)]
struct ExperienceRow {
    id: String,
    title: String,
    location: String,
    price: i64,
    image: String,
    description: String,
    about: String,
    dates: Json<Vec<DateSlot>>,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Experience {
            id: row.id,
            title: row.title,
            location: row.location,
            price: row.price,
            image: row.image,
            description: row.description,
            about: row.about,
            dates: row.dates.0,
        }
    }
}

#[derive(FromRow)]
struct PromoCodeRow {
    code: String,
    discount_type: String,
    discount_value: Decimal,
    max_uses: Option<i32>,
    used_count: i32,
    expiration_date: Option<DateTime<Utc>>,
    is_active: bool,
}

impl TryFrom<PromoCodeRow> for PromoCode {
    type Error = StoreError;

    fn try_from(row: PromoCodeRow) -> Result<Self, Self::Error> {
        let discount_type = row
            .discount_type
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("promo code {}: {e}", row.code)))?;

        Ok(PromoCode {
            code: row.code,
            discount_type,
            discount_value: row.discount_value,
            max_uses: row.max_uses,
            used_count: row.used_count,
            expiration_date: row.expiration_date,
            is_active: row.is_active,
        })
    }
}

#[async_trait]
impl ExperienceStore for PgStore {
    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError> {
        let rows: Vec<ExperienceRow> = sqlx::query_as(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences ORDER BY position"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Experience::from).collect())
    }

    async fn find_experience(&self, id: &str) -> Result<Option<Experience>, StoreError> {
        let row: Option<ExperienceRow> = sqlx::query_as(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Experience::from))
    }
}

#[async_trait]
impl PromoCodeStore for PgStore {
    async fn find_active_promo(&self, code: &str) -> Result<Option<PromoCode>, StoreError> {
        let row: Option<PromoCodeRow> = sqlx::query_as(&format!(
            "SELECT {PROMO_COLUMNS} FROM promo_codes WHERE code = $1 AND is_active"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PromoCode::try_from).transpose()
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<Booking, StoreError> {
        let result = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking.id)
        .bind(&booking.ref_id)
        .bind(&booking.experience_id)
        .bind(&booking.experience_title)
        .bind(&booking.date)
        .bind(&booking.time)
        .bind(booking.quantity)
        .bind(&booking.full_name)
        .bind(&booking.email)
        .bind(booking.subtotal)
        .bind(booking.taxes)
        .bind(booking.total)
        .bind(&booking.promo_code)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(stored) => Ok(stored),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Duplicate(booking.ref_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountType;

    fn row(discount_type: &str) -> PromoCodeRow {
        PromoCodeRow {
            code: "FLAT100".into(),
            discount_type: discount_type.into(),
            discount_value: Decimal::new(10000, 2),
            max_uses: Some(50),
            used_count: 3,
            expiration_date: None,
            is_active: true,
        }
    }

    #[test]
    fn promo_row_converts_to_model() {
        let promo = PromoCode::try_from(row("fixed")).expect("valid row");
        assert_eq!(promo.code, "FLAT100");
        assert_eq!(promo.discount_type, DiscountType::Fixed);
        assert_eq!(promo.discount_value, Decimal::from(100));
        assert_eq!(promo.max_uses, Some(50));
        assert_eq!(promo.used_count, 3);
    }

    #[test]
    fn unknown_discount_type_is_corrupt() {
        let err = PromoCode::try_from(row("bogo")).unwrap_err();
        match err {
            StoreError::Corrupt(detail) => assert!(detail.contains("FLAT100"), "{detail}"),
            other => panic!("expected corrupt row, got {other:?}"),
        }
    }
}
