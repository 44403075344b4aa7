//! Booking reference IDs: `HUF` + six base-36 characters + `SO`.
//!
//! Not cryptographic and not checked for collisions here; the bookings table
//! carries the unique constraint.

use rand::Rng;

pub const PREFIX: &str = "HUF";
pub const SUFFIX: &str = "SO";
pub const BODY_LEN: usize = 6;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(PREFIX.len() + BODY_LEN + SUFFIX.len());
    id.push_str(PREFIX);
    for _ in 0..BODY_LEN {
        id.push(char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]));
    }
    id.push_str(SUFFIX);
    id
}

/// True for strings of the form `HUF[A-Z0-9]{6}SO`.
pub fn is_valid(candidate: &str) -> bool {
    candidate.len() == PREFIX.len() + BODY_LEN + SUFFIX.len()
        && candidate
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.strip_suffix(SUFFIX))
            .is_some_and(|body| body.bytes().all(|b| ALPHABET.contains(&b)))
}

/// Source of fresh reference IDs, swappable for deterministic tests.
pub trait RefIdSource: Send + Sync {
    fn next_ref_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngRefIds;

impl RefIdSource for ThreadRngRefIds {
    fn next_ref_id(&self) -> String {
        generate(&mut rand::thread_rng())
    }
}
