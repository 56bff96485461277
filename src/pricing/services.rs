//! Pricing service functions with database access.
//!
//! These functions load trips through the cache and database, run the pure
//! calculators, and hand validated bookings to the store.

use std::sync::Arc;

use axum::http::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::ErrorResponse;

use super::booking::finalize_booking;
use super::calculators::{check_capacity, quote, unavailable_room_types};
use super::models::{
    BookingRecord, CapacityVerdict, PassengerCounts, PriceBreakdown, RoomPurchase, RoomType,
    Trip, TripKind,
};
use super::queries;
use super::requests::CreateBookingRequest;

/// Pricing calculation error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingError {
    #[error("Not enough beds for this booking: {shortfall} more needed")]
    Capacity { shortfall: u64 },

    #[error("Trip {trip_id} not found")]
    TripNotFound { trip_id: Uuid },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl PricingError {
    pub(crate) fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        let (status, error_type, details) = match self {
            PricingError::Capacity { shortfall } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "capacity_error",
                Some(serde_json::json!({ "shortfall": shortfall })),
            ),
            PricingError::TripNotFound { trip_id } => (
                StatusCode::NOT_FOUND,
                "trip_not_found",
                Some(serde_json::json!({ "trip_id": trip_id })),
            ),
            PricingError::InvalidRequest { .. } => {
                (StatusCode::BAD_REQUEST, "invalid_request", None)
            }
            PricingError::Database { message } => {
                tracing::error!("Pricing database error: {}", message);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_type: "database_error".to_string(),
                        message: "Database error".to_string(),
                        details: None,
                    },
                );
            }
        };

        (
            status,
            ErrorResponse {
                error_type: error_type.to_string(),
                message: self.to_string(),
                details,
            },
        )
    }
}

/// Result of quoting a catalog trip
#[derive(Debug, Clone)]
pub struct TripQuote {
    pub trip_id: Uuid,
    pub kind: TripKind,
    pub currency: String,
    pub breakdown: PriceBreakdown,
    /// Only computed for Omra trips
    pub capacity: Option<CapacityVerdict>,
    pub unavailable_room_types: Vec<RoomType>,
}

/// Load a trip with its pricing model resolved.
///
/// Checks the cache first and falls back to the catalog database, caching
/// whatever it finds.
pub async fn load_trip(
    pool: &PgPool,
    cache: &AppCache,
    trip_id: Uuid,
    default_currency: &str,
) -> Result<Trip, PricingError> {
    if let Some(cached) = cache.trips.get(&trip_id).await {
        tracing::debug!("Cache HIT for trip: {}", trip_id);
        return Ok((*cached).clone());
    }

    tracing::debug!("Cache MISS for trip: {}", trip_id);
    let row = queries::find_trip(pool, trip_id)
        .await
        .map_err(|e| PricingError::Database {
            message: e.to_string(),
        })?
        .ok_or(PricingError::TripNotFound { trip_id })?;

    let trip = Trip::from_row(row, default_currency);
    cache.trips.insert(trip_id, Arc::new(trip.clone())).await;

    Ok(trip)
}

/// Price a booking on a catalog trip.
///
/// Omra quotes include the capacity verdict so the booking form can warn the
/// operator before submitting. Counts and the trip's prices are checked
/// against the input limits first.
pub async fn quote_trip(
    pool: &PgPool,
    cache: &AppCache,
    trip_id: Uuid,
    purchase: RoomPurchase,
    passengers: PassengerCounts,
    default_currency: &str,
) -> Result<TripQuote, PricingError> {
    purchase.validate()?;
    passengers.validate()?;

    let trip = load_trip(pool, cache, trip_id, default_currency).await?;
    trip.validate()?;
    Ok(quote_loaded_trip(&trip, &purchase, &passengers))
}

/// Quote for an already loaded trip
pub fn quote_loaded_trip(
    trip: &Trip,
    purchase: &RoomPurchase,
    passengers: &PassengerCounts,
) -> TripQuote {
    let (capacity, unavailable) = match trip.kind {
        TripKind::Omra => (
            Some(check_capacity(purchase, passengers)),
            unavailable_room_types(&trip.room_prices, purchase),
        ),
        TripKind::Standard => (None, Vec::new()),
    };

    TripQuote {
        trip_id: trip.id,
        kind: trip.kind,
        currency: trip.currency.clone(),
        breakdown: quote(trip, purchase, passengers),
        capacity,
        unavailable_room_types: unavailable,
    }
}

/// Validate and store a booking.
///
/// Capacity is checked before anything is written; the stored booking starts
/// out `PENDING`.
pub async fn create_booking(
    pool: &PgPool,
    cache: &AppCache,
    request: &CreateBookingRequest,
    default_currency: &str,
) -> Result<BookingRecord, PricingError> {
    let trip = load_trip(pool, cache, request.trip_id, default_currency).await?;
    let draft = finalize_booking(&trip, request)?;

    let record = queries::insert_booking(pool, &draft)
        .await
        .map_err(|e| PricingError::Database {
            message: e.to_string(),
        })?;

    tracing::info!(
        booking_id = %record.id,
        trip_id = %record.trip_id,
        computed_price = ?record.computed_price,
        "Booking created"
    );

    Ok(record)
}
