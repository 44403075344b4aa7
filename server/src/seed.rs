//! Bundled catalog used by the `seed` binary and the in-memory store.

use crate::models::{Experience, PromoCode};

const EXPERIENCES: &str = include_str!("../seed/experiences.json");
const PROMO_CODES: &str = include_str!("../seed/promo_codes.json");

pub fn experiences() -> Result<Vec<Experience>, serde_json::Error> {
    serde_json::from_str(EXPERIENCES)
}

pub fn promo_codes() -> Result<Vec<PromoCode>, serde_json::Error> {
    serde_json::from_str(PROMO_CODES)
}
