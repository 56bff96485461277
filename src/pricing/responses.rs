//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::models::{
    BookingRecord, CapacityVerdict, PriceBreakdown, RoomPurchase, RoomType, TripKind,
};
use super::services::TripQuote;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// Response for slot inventory listing
#[derive(Debug, Serialize)]
pub struct SlotInventoryResponse {
    pub slots: Vec<Decimal>,
    pub slot_count: usize,
    pub unavailable_room_types: Vec<RoomType>,
}

/// Response for an Omra allocation from an explicit price sheet
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub breakdown: PriceBreakdown,
    pub capacity: CapacityVerdict,
    pub unavailable_room_types: Vec<RoomType>,
}

/// Response for a catalog trip quote
#[derive(Debug, Serialize)]
pub struct TripQuoteResponse {
    pub trip_id: Uuid,
    pub kind: TripKind,
    pub total: MoneyResponse,
    pub breakdown: PriceBreakdown,
    /// Omra trips only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<CapacityVerdict>,
    pub unavailable_room_types: Vec<RoomType>,
}

impl From<TripQuote> for TripQuoteResponse {
    fn from(quote: TripQuote) -> Self {
        Self {
            trip_id: quote.trip_id,
            kind: quote.kind,
            total: MoneyResponse {
                amount: quote.breakdown.grand_total,
                currency: quote.currency,
            },
            breakdown: quote.breakdown,
            capacity: quote.capacity,
            unavailable_room_types: quote.unavailable_room_types,
        }
    }
}

/// Response for a stored booking
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub trip_id: Uuid,
    pub passengers_adult: i64,
    pub passengers_child: i64,
    pub passengers_baby: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RoomPurchase>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub computed_price: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRecord> for BookingResponse {
    fn from(record: BookingRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            trip_id: record.trip_id,
            passengers_adult: record.passengers_adult,
            passengers_child: record.passengers_child,
            passengers_baby: record.passengers_baby,
            options: record.options.map(|json| json.0),
            computed_price: record.computed_price,
            status: record.status,
            created_at: record.created_at,
        }
    }
}
