//! Pricing engine module for the booking platform.
//!
//! Omra trips are priced by allocating passengers to purchased bed slots;
//! every other trip uses a flat per-passenger rate. The back-office booking
//! form calls this module via HTTP/JSON.

pub mod booking;
pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use booking::{finalize_booking, BookingDraft, BookingStatus};
pub use calculators::{allocate, build_slot_inventory, check_capacity, standard_rate};
pub use models::{
    CapacityVerdict, PassengerCounts, PriceBreakdown, RoomPriceSheet, RoomPurchase, Trip, TripKind,
};
pub use routes::router;
pub use services::{PricingError, TripQuote};
