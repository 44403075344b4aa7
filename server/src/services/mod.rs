pub mod booking;
pub mod catalog;
pub mod pricing;
pub mod promo;
pub mod ref_id;

pub use booking::{BookingService, BookingSettings};
pub use catalog::CatalogService;
pub use promo::PromoService;
