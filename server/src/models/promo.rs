use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown discount type '{0}'")]
pub struct UnknownDiscountType(pub String);

impl FromStr for DiscountType {
    type Err = UnknownDiscountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountType::Percentage),
            "fixed" => Ok(DiscountType::Fixed),
            other => Err(UnknownDiscountType(other.to_string())),
        }
    }
}

/// Discount terms returned by a successful promo validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub discount_type: DiscountType,
    #[serde(serialize_with = "serialize_number")]
    pub discount_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(serialize_with = "serialize_number")]
    pub discount_value: Decimal,
    /// `None` (or zero) means unlimited.
    #[serde(default)]
    pub max_uses: Option<i32>,
    #[serde(default)]
    pub used_count: i32,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl PromoCode {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expiration_date, Some(expires) if expires < now)
    }

    /// A zero cap counts as no cap at all.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.max_uses, Some(max) if max > 0 && self.used_count >= max)
    }

    pub fn discount(&self) -> Discount {
        Discount {
            discount_type: self.discount_type,
            discount_value: self.discount_value,
        }
    }
}

/// Trims and upper-cases a user supplied code. Blank input yields `None`.
pub fn normalize_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

// Whole values go out as JSON integers so clients see `100`, not `"100"` or `100.0`.
fn serialize_number<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract().is_zero() {
        if let Some(whole) = value.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match value.to_f64() {
        Some(float) => serializer.serialize_f64(float),
        None => Err(<S::Error as serde::ser::Error>::custom(format!(
            "{value} is not representable"
        ))),
    }
}
