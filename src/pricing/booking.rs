//! Booking finalization.
//!
//! Turns an operator's booking request into a draft ready to persist. For Omra
//! trips this is where bed capacity is enforced: pricing itself never fails.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::{allocate, check_capacity};
use super::models::{PassengerCounts, RoomPurchase, Trip, TripKind};
use super::requests::CreateBookingRequest;
use super::services::PricingError;

/// Booking workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated booking, not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub user_id: Uuid,
    pub trip_id: Uuid,
    pub passengers: PassengerCounts,
    /// Room counts, Omra trips only
    pub options: Option<RoomPurchase>,
    /// Allocated grand total, Omra trips only
    pub computed_price: Option<Decimal>,
    pub status: BookingStatus,
}

/// Validate a booking request against its trip.
///
/// Omra bookings fail with [`PricingError::Capacity`] when the purchased beds
/// cannot hold every adult and child.
pub fn finalize_booking(
    trip: &Trip,
    request: &CreateBookingRequest,
) -> Result<BookingDraft, PricingError> {
    if request.trip_id != trip.id {
        return Err(PricingError::InvalidRequest {
            message: format!(
                "Booking references trip {} but trip {} was loaded",
                request.trip_id, trip.id
            ),
        });
    }

    let passengers = request.passengers();
    passengers.validate()?;
    if passengers.bedded() == 0 {
        return Err(PricingError::InvalidRequest {
            message: "A booking needs at least one adult or child".to_string(),
        });
    }

    let (options, computed_price) = match trip.kind {
        TripKind::Omra => {
            let purchase = request.options.unwrap_or_default();
            purchase.validate()?;
            trip.room_prices.validate()?;

            let verdict = check_capacity(&purchase, &passengers);
            if !verdict.sufficient {
                tracing::warn!(
                    trip_id = %trip.id,
                    capacity = verdict.total_capacity,
                    required = verdict.required_beds,
                    "Rejecting booking: not enough beds"
                );
                return Err(PricingError::Capacity {
                    shortfall: verdict.shortfall,
                });
            }

            let breakdown = allocate(&trip.room_prices, &purchase, &passengers);
            (Some(purchase), Some(breakdown.grand_total))
        }
        TripKind::Standard => (None, None),
    };

    Ok(BookingDraft {
        user_id: request.user_id,
        trip_id: trip.id,
        passengers,
        options,
        computed_price,
        status: BookingStatus::default(),
    })
}
