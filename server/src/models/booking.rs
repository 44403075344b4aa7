use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted reservation. Created once and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub ref_id: String,
    pub experience_id: String,
    pub experience_title: String,
    #[sqlx(rename = "slot_date")]
    pub date: String,
    #[sqlx(rename = "slot_time")]
    pub time: String,
    pub quantity: i32,
    pub full_name: String,
    pub email: String,
    pub subtotal: i64,
    pub taxes: i64,
    pub total: i64,
    pub promo_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking fields as submitted by the client; everything but the reference ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub experience_id: String,
    pub experience_title: String,
    pub date: String,
    pub time: String,
    pub quantity: i32,
    pub full_name: String,
    pub email: String,
    pub subtotal: i64,
    pub taxes: i64,
    pub total: i64,
    #[serde(default)]
    pub promo_code: Option<String>,
}

impl NewBooking {
    /// Checks presence of the required fields. Prices are not inspected here.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("experienceId", &self.experience_id),
            ("experienceTitle", &self.experience_title),
            ("date", &self.date),
            ("time", &self.time),
            ("fullName", &self.full_name),
            ("email", &self.email),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(format!("{field} is required"));
        }
        if self.quantity < 1 {
            return Err("quantity must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn into_booking(self, ref_id: String, now: DateTime<Utc>) -> Booking {
        let promo_code = self
            .promo_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        Booking {
            id: Uuid::new_v4(),
            ref_id,
            experience_id: self.experience_id,
            experience_title: self.experience_title,
            date: self.date,
            time: self.time,
            quantity: self.quantity,
            full_name: self.full_name,
            email: self.email,
            subtotal: self.subtotal,
            taxes: self.taxes,
            total: self.total,
            promo_code,
            created_at: now,
            updated_at: now,
        }
    }
}
