use std::sync::Arc;

use crate::services::{BookingService, BookingSettings, CatalogService, PromoService};
use crate::store::{BookingStore, ExperienceStore, PromoCodeStore};

/// Services shared by every handler. Cloning is cheap; all clones share one
/// store handle.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub promos: PromoService,
    pub bookings: BookingService,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, settings: BookingSettings) -> Self
    where
        S: ExperienceStore + PromoCodeStore + BookingStore + 'static,
    {
        let catalog = CatalogService::new(store.clone());
        let promos = PromoService::new(store.clone());
        let bookings = BookingService::new(store, catalog.clone(), promos.clone(), settings);

        Self {
            catalog,
            promos,
            bookings,
        }
    }
}
