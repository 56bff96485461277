//! Pricing API route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::calculators;
use super::models::{CapacityVerdict, PriceBreakdown};
use super::requests::{
    AllocateRequest, CapacityRequest, CreateBookingRequest, QuoteRequest, SlotInventoryRequest,
    StandardRateRequest,
};
use super::responses::{
    AllocationResponse, BookingResponse, SlotInventoryResponse, TripQuoteResponse,
};
use super::services;

/// Pricing routes, nested under `/api/pricing` by the application router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/slots", post(slots))
        .route("/allocate", post(allocate))
        .route("/capacity", post(capacity))
        .route("/standard", post(standard))
        .route("/trips/:trip_id/quote", post(quote_trip))
        .route("/trips/:trip_id/cache", delete(invalidate_trip))
        .route("/bookings", post(create_booking))
}

/// List the bed slots a room purchase yields, most expensive first
async fn slots(Json(req): Json<SlotInventoryRequest>) -> Result<Json<SlotInventoryResponse>> {
    req.validate()?;

    let slots = calculators::build_slot_inventory(&req.room_prices, &req.rooms);
    Ok(Json(SlotInventoryResponse {
        slot_count: slots.len(),
        slots,
        unavailable_room_types: calculators::unavailable_room_types(&req.room_prices, &req.rooms),
    }))
}

/// Omra allocation against a price sheet supplied by the caller
async fn allocate(Json(req): Json<AllocateRequest>) -> Result<Json<AllocationResponse>> {
    req.validate()?;

    Ok(Json(AllocationResponse {
        breakdown: calculators::allocate(&req.room_prices, &req.rooms, &req.passengers),
        capacity: calculators::check_capacity(&req.rooms, &req.passengers),
        unavailable_room_types: calculators::unavailable_room_types(&req.room_prices, &req.rooms),
    }))
}

async fn capacity(Json(req): Json<CapacityRequest>) -> Result<Json<CapacityVerdict>> {
    req.validate()?;
    Ok(Json(calculators::check_capacity(&req.rooms, &req.passengers)))
}

async fn standard(Json(req): Json<StandardRateRequest>) -> Result<Json<PriceBreakdown>> {
    req.validate()?;
    Ok(Json(calculators::standard_rate(req.base_price, &req.passengers)))
}

/// Quote a catalog trip with its own pricing model
async fn quote_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<TripQuoteResponse>> {
    let quote = services::quote_trip(
        &state.db,
        &state.cache,
        trip_id,
        req.rooms,
        req.passengers,
        &state.config.default_currency,
    )
    .await?;

    Ok(Json(quote.into()))
}

/// Drop a cached trip after an admin edited its prices
async fn invalidate_trip(State(state): State<AppState>, Path(trip_id): Path<Uuid>) -> StatusCode {
    state.cache.invalidate_trip(trip_id).await;
    StatusCode::NO_CONTENT
}

/// Finalize and store a booking
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let record =
        services::create_booking(&state.db, &state.cache, &req, &state.config.default_currency)
            .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}
