pub mod booking;
pub mod experience;
pub mod promo;

pub use booking::{Booking, NewBooking};
pub use experience::{DateSlot, Experience, TimeSlot};
pub use promo::{normalize_code, Discount, DiscountType, PromoCode};
