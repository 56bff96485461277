//! Pricing domain models.
//!
//! Value types consumed and produced by the calculators, plus the trip row
//! loaded from the catalog database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::services::PricingError;

/// Most rooms of one type a single booking may buy
pub const MAX_ROOMS_PER_TYPE: u32 = 1_000;

/// Most passengers of one age category on a single booking
pub const MAX_PASSENGERS_PER_CATEGORY: u32 = 10_000;

/// Largest accepted per-bed or per-passenger price.
///
/// Together with the count limits this keeps every total far below
/// `Decimal::MAX`, so the calculators can use plain arithmetic.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000000);

/// Reject negative prices and prices above `MAX_UNIT_PRICE`.
pub fn validate_unit_price(label: &str, price: Decimal) -> Result<(), PricingError> {
    if price < Decimal::ZERO || price > MAX_UNIT_PRICE {
        return Err(PricingError::InvalidRequest {
            message: format!(
                "{} must be between 0 and {}, got {}",
                label, MAX_UNIT_PRICE, price
            ),
        });
    }
    Ok(())
}

/// Pricing model of a trip, decided once when the trip record is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripKind {
    /// Pilgrimage trips priced per purchased bed slot
    Omra,
    /// Everything else, priced at a flat rate per passenger
    Standard,
}

impl TripKind {
    /// Classify a catalog `type` string.
    pub fn from_category(category: &str) -> Self {
        match category.trim().to_lowercase().as_str() {
            "omra" | "religieuse" => TripKind::Omra,
            _ => TripKind::Standard,
        }
    }
}

/// Hotel room types sold on Omra trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Double,
    Triple,
    Quad,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Double, RoomType::Triple, RoomType::Quad];

    /// Number of beds in one room of this type
    pub fn beds(self) -> u32 {
        match self {
            RoomType::Double => 2,
            RoomType::Triple => 3,
            RoomType::Quad => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomType::Double => "double",
            RoomType::Triple => "triple",
            RoomType::Quad => "quad",
        }
    }
}

/// Per-bed prices for each room type of a trip.
///
/// A missing or zero price means the room type is not offered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomPriceSheet {
    #[serde(default)]
    pub double_price: Option<Decimal>,
    #[serde(default)]
    pub triple_price: Option<Decimal>,
    #[serde(default)]
    pub quad_price: Option<Decimal>,
}

impl RoomPriceSheet {
    /// Configured per-bed price, `None` when the type is unavailable.
    pub fn price_for(&self, room_type: RoomType) -> Option<Decimal> {
        let price = match room_type {
            RoomType::Double => self.double_price,
            RoomType::Triple => self.triple_price,
            RoomType::Quad => self.quad_price,
        };
        price.filter(|p| *p > Decimal::ZERO)
    }

    /// Check configured prices against `MAX_UNIT_PRICE`.
    ///
    /// Non-positive prices only mark a type unavailable and are accepted.
    pub fn validate(&self) -> Result<(), PricingError> {
        for room_type in RoomType::ALL {
            if let Some(price) = self.price_for(room_type) {
                validate_unit_price(&format!("{} price", room_type.label()), price)?;
            }
        }
        Ok(())
    }

    /// Parse the price keys out of a trip's `options` JSON object.
    pub fn from_options(options: &serde_json::Value) -> Self {
        Self {
            double_price: options.get("double_price").and_then(json_decimal),
            triple_price: options.get("triple_price").and_then(json_decimal),
            quad_price: options.get("quad_price").and_then(json_decimal),
        }
    }
}

/// Accepts both JSON numbers and numeric strings; non-positive values count as unset.
fn json_decimal(value: &serde_json::Value) -> Option<Decimal> {
    let parsed = match value {
        serde_json::Value::String(s) => s.trim().parse::<Decimal>().ok(),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        },
        _ => None,
    };
    parsed.filter(|d| *d > Decimal::ZERO)
}

/// Rooms bought for one booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPurchase {
    #[serde(default)]
    pub double_count: u32,
    #[serde(default)]
    pub triple_count: u32,
    #[serde(default)]
    pub quad_count: u32,
}

impl RoomPurchase {
    pub fn count_for(&self, room_type: RoomType) -> u32 {
        match room_type {
            RoomType::Double => self.double_count,
            RoomType::Triple => self.triple_count,
            RoomType::Quad => self.quad_count,
        }
    }

    /// Reject purchases above `MAX_ROOMS_PER_TYPE` before any slot is built.
    pub fn validate(&self) -> Result<(), PricingError> {
        for room_type in RoomType::ALL {
            let count = self.count_for(room_type);
            if count > MAX_ROOMS_PER_TYPE {
                return Err(PricingError::InvalidRequest {
                    message: format!(
                        "{} room count {} exceeds the limit of {}",
                        room_type.label(),
                        count,
                        MAX_ROOMS_PER_TYPE
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Passengers on a booking by age category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerCounts {
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub babies: u32,
}

impl PassengerCounts {
    /// Passengers needing their own bed (babies share one)
    pub fn bedded(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children)
    }

    /// Reject categories above `MAX_PASSENGERS_PER_CATEGORY`.
    pub fn validate(&self) -> Result<(), PricingError> {
        let categories = [
            ("adults", self.adults),
            ("children", self.children),
            ("babies", self.babies),
        ];
        for (label, count) in categories {
            if count > MAX_PASSENGERS_PER_CATEGORY {
                return Err(PricingError::InvalidRequest {
                    message: format!(
                        "{} count {} exceeds the limit of {}",
                        label, count, MAX_PASSENGERS_PER_CATEGORY
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Price totals for one booking, in the trip's currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub adults_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub children_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub babies_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
}

/// Whether the purchased beds cover the bedded passengers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityVerdict {
    pub total_capacity: u64,
    pub required_beds: u64,
    pub sufficient: bool,
    pub shortfall: u64,
}

/// Trip row from the catalog database
#[derive(Debug, Clone, FromRow)]
pub struct TripRow {
    pub id: Uuid,
    pub title: String,
    pub trip_type: String,
    pub base_price: Decimal,
    pub options: Option<serde_json::Value>,
    pub currency: Option<String>,
}

/// Trip with its pricing model resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    pub title: String,
    pub kind: TripKind,
    pub base_price: Decimal,
    pub room_prices: RoomPriceSheet,
    pub currency: String,
}

impl Trip {
    pub fn from_row(row: TripRow, default_currency: &str) -> Self {
        let room_prices = row
            .options
            .as_ref()
            .map(RoomPriceSheet::from_options)
            .unwrap_or_default();

        Self {
            id: row.id,
            title: row.title,
            kind: TripKind::from_category(&row.trip_type),
            base_price: row.base_price,
            room_prices,
            currency: row
                .currency
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| default_currency.to_string()),
        }
    }

    /// Check the trip's own prices before pricing a booking with them
    pub fn validate(&self) -> Result<(), PricingError> {
        validate_unit_price("base price", self.base_price)?;
        self.room_prices.validate()
    }

    pub fn is_omra(&self) -> bool {
        self.kind == TripKind::Omra
    }
}

/// Booking row as stored by the booking service
#[derive(Debug, Clone, FromRow)]
pub struct BookingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub trip_id: Uuid,
    pub passengers_adult: i64,
    pub passengers_child: i64,
    pub passengers_baby: i64,
    pub options: Option<Json<RoomPurchase>>,
    pub computed_price: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_trip_kind_from_category() {
        assert_eq!(TripKind::from_category("omra"), TripKind::Omra);
        assert_eq!(TripKind::from_category("Omra"), TripKind::Omra);
        assert_eq!(TripKind::from_category("RELIGIEUSE"), TripKind::Omra);
        assert_eq!(TripKind::from_category(" religieuse "), TripKind::Omra);
        assert_eq!(TripKind::from_category("national"), TripKind::Standard);
        assert_eq!(TripKind::from_category(""), TripKind::Standard);
    }

    #[test]
    fn test_room_type_beds() {
        assert_eq!(RoomType::Double.beds(), 2);
        assert_eq!(RoomType::Triple.beds(), 3);
        assert_eq!(RoomType::Quad.beds(), 4);
    }

    #[test]
    fn test_price_for_treats_zero_as_unavailable() {
        let sheet = RoomPriceSheet {
            double_price: Some(dec!(0)),
            triple_price: Some(dec!(8000)),
            quad_price: None,
        };
        assert_eq!(sheet.price_for(RoomType::Double), None);
        assert_eq!(sheet.price_for(RoomType::Triple), Some(dec!(8000)));
        assert_eq!(sheet.price_for(RoomType::Quad), None);
    }

    #[test]
    fn test_sheet_from_options_numbers_and_strings() {
        let options = json!({
            "double_price": 10000,
            "triple_price": "8000.50",
            "quad_price": 6000.25,
        });
        let sheet = RoomPriceSheet::from_options(&options);
        assert_eq!(sheet.double_price, Some(dec!(10000)));
        assert_eq!(sheet.triple_price, Some(dec!(8000.50)));
        assert_eq!(sheet.quad_price, Some(dec!(6000.25)));
    }

    #[test]
    fn test_sheet_from_options_ignores_garbage() {
        let options = json!({
            "double_price": "n/a",
            "triple_price": null,
            "quad_price": -5,
        });
        assert_eq!(RoomPriceSheet::from_options(&options), RoomPriceSheet::default());
    }

    #[test]
    fn test_trip_from_row() {
        let id = Uuid::new_v4();
        let row = TripRow {
            id,
            title: "Omra Ramadan".to_string(),
            trip_type: "Religieuse".to_string(),
            base_price: dec!(150000),
            options: Some(json!({"double_price": 10000, "quad_price": 6000})),
            currency: None,
        };

        let trip = Trip::from_row(row, "DZD");
        assert_eq!(trip.id, id);
        assert!(trip.is_omra());
        assert_eq!(trip.currency, "DZD");
        assert_eq!(trip.room_prices.double_price, Some(dec!(10000)));
        assert_eq!(trip.room_prices.triple_price, None);
        assert_eq!(trip.room_prices.quad_price, Some(dec!(6000)));
    }

    #[test]
    fn test_trip_from_row_without_options() {
        let row = TripRow {
            id: Uuid::new_v4(),
            title: "Istanbul".to_string(),
            trip_type: "international".to_string(),
            base_price: dec!(50000),
            options: None,
            currency: Some("EUR".to_string()),
        };

        let trip = Trip::from_row(row, "DZD");
        assert_eq!(trip.kind, TripKind::Standard);
        assert_eq!(trip.currency, "EUR");
        assert_eq!(trip.room_prices, RoomPriceSheet::default());
    }

    #[test]
    fn test_bedded_does_not_wrap_near_u32_max() {
        let counts = PassengerCounts {
            adults: u32::MAX,
            children: 2,
            babies: 0,
        };
        assert_eq!(counts.bedded(), u64::from(u32::MAX) + 2);
    }

    #[test]
    fn test_passenger_limits() {
        let counts = PassengerCounts {
            adults: MAX_PASSENGERS_PER_CATEGORY,
            children: 0,
            babies: MAX_PASSENGERS_PER_CATEGORY,
        };
        assert!(counts.validate().is_ok());

        let counts = PassengerCounts {
            adults: 1,
            children: u32::MAX,
            babies: 0,
        };
        let err = counts.validate().unwrap_err();
        assert!(matches!(err, PricingError::InvalidRequest { .. }));
        assert!(err.to_string().contains("children"));
    }

    #[test]
    fn test_room_limits() {
        let rooms = RoomPurchase {
            double_count: MAX_ROOMS_PER_TYPE,
            triple_count: 0,
            quad_count: 0,
        };
        assert!(rooms.validate().is_ok());

        let rooms = RoomPurchase {
            double_count: 0,
            triple_count: 0,
            quad_count: 1_000_000_000,
        };
        let err = rooms.validate().unwrap_err();
        assert!(err.to_string().contains("quad"));
    }

    #[test]
    fn test_price_limits() {
        assert!(validate_unit_price("base price", dec!(0)).is_ok());
        assert!(validate_unit_price("base price", MAX_UNIT_PRICE).is_ok());
        assert!(validate_unit_price("base price", dec!(-1)).is_err());
        assert!(validate_unit_price("base price", Decimal::MAX).is_err());

        let sheet = RoomPriceSheet {
            double_price: Some(Decimal::MAX),
            triple_price: Some(dec!(-5)),
            quad_price: None,
        };
        let err = sheet.validate().unwrap_err();
        assert!(err.to_string().contains("double"));

        let sheet = RoomPriceSheet {
            double_price: None,
            triple_price: Some(dec!(-5)),
            quad_price: Some(dec!(6000)),
        };
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn test_passenger_counts_deserialize_defaults() {
        let counts: PassengerCounts = serde_json::from_value(json!({"adults": 2})).unwrap();
        assert_eq!(counts.adults, 2);
        assert_eq!(counts.children, 0);
        assert_eq!(counts.babies, 0);
        assert_eq!(counts.bedded(), 2);
    }
}
