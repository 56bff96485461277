//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::models::{validate_unit_price, PassengerCounts, RoomPriceSheet, RoomPurchase};
use super::services::PricingError;

/// Request to list the bed slots of a room purchase
#[derive(Debug, Deserialize)]
pub struct SlotInventoryRequest {
    pub room_prices: RoomPriceSheet,
    #[serde(default)]
    pub rooms: RoomPurchase,
}

impl SlotInventoryRequest {
    pub fn validate(&self) -> Result<(), PricingError> {
        self.room_prices.validate()?;
        self.rooms.validate()
    }
}

/// Request to price an Omra booking from an explicit price sheet
#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    pub room_prices: RoomPriceSheet,
    #[serde(default)]
    pub rooms: RoomPurchase,
    #[serde(default)]
    pub passengers: PassengerCounts,
}

impl AllocateRequest {
    pub fn validate(&self) -> Result<(), PricingError> {
        self.room_prices.validate()?;
        self.rooms.validate()?;
        self.passengers.validate()
    }
}

/// Request to check bed capacity
#[derive(Debug, Deserialize)]
pub struct CapacityRequest {
    #[serde(default)]
    pub rooms: RoomPurchase,
    #[serde(default)]
    pub passengers: PassengerCounts,
}

impl CapacityRequest {
    pub fn validate(&self) -> Result<(), PricingError> {
        self.rooms.validate()?;
        self.passengers.validate()
    }
}

/// Request to price a flat-rate trip
#[derive(Debug, Deserialize)]
pub struct StandardRateRequest {
    pub base_price: Decimal,
    #[serde(default)]
    pub passengers: PassengerCounts,
}

impl StandardRateRequest {
    pub fn validate(&self) -> Result<(), PricingError> {
        validate_unit_price("base price", self.base_price)?;
        self.passengers.validate()
    }
}

/// Request to quote a catalog trip
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub rooms: RoomPurchase,
    #[serde(default)]
    pub passengers: PassengerCounts,
}

/// Booking payload submitted by the back-office booking form
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub trip_id: Uuid,
    #[serde(default)]
    pub passengers_adult: u32,
    #[serde(default)]
    pub passengers_child: u32,
    #[serde(default)]
    pub passengers_baby: u32,
    /// Room counts; only read for Omra trips
    #[serde(default)]
    pub options: Option<RoomPurchase>,
}

impl CreateBookingRequest {
    pub fn passengers(&self) -> PassengerCounts {
        PassengerCounts {
            adults: self.passengers_adult,
            children: self.passengers_child,
            babies: self.passengers_baby,
        }
    }
}
