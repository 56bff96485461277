//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access. Amounts are never
//! rounded here; rounding for display is left to the caller.
//!
//! Callers validate inputs against the limits in `models` first
//! (`MAX_ROOMS_PER_TYPE`, `MAX_PASSENGERS_PER_CATEGORY`, `MAX_UNIT_PRICE`);
//! within those limits no `Decimal` product or sum can overflow.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::models::{
    CapacityVerdict, PassengerCounts, PriceBreakdown, RoomPriceSheet, RoomPurchase, RoomType,
    Trip, TripKind,
};

/// Share of the slot (or base) price charged for a child
pub const CHILD_RATE: Decimal = dec!(0.8);

/// Share of the cheapest purchased bed price (or base price) charged for a baby
pub const BABY_RATE: Decimal = dec!(0.3);

/// Build the per-bed price list for every purchased room, most expensive first.
///
/// Room types without a configured price are skipped even when rooms of that
/// type were purchased. Room counts must be within `MAX_ROOMS_PER_TYPE`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use voyage_pricing::pricing::calculators::build_slot_inventory;
/// use voyage_pricing::pricing::models::{RoomPriceSheet, RoomPurchase};
///
/// let sheet = RoomPriceSheet {
///     double_price: Some(dec!(10000)),
///     triple_price: Some(dec!(8000)),
///     quad_price: None,
/// };
/// let purchase = RoomPurchase { double_count: 1, triple_count: 1, quad_count: 0 };
///
/// assert_eq!(
///     build_slot_inventory(&sheet, &purchase),
///     vec![dec!(10000), dec!(10000), dec!(8000), dec!(8000), dec!(8000)]
/// );
/// ```
pub fn build_slot_inventory(sheet: &RoomPriceSheet, purchase: &RoomPurchase) -> Vec<Decimal> {
    let mut slots: Vec<Decimal> = RoomType::ALL
        .iter()
        .filter_map(|&room_type| {
            sheet
                .price_for(room_type)
                .map(|price| (price, room_beds(purchase, room_type)))
        })
        .flat_map(|(price, beds)| {
            std::iter::repeat(price).take(usize::try_from(beds).unwrap_or(usize::MAX))
        })
        .collect();

    slots.sort_unstable_by(|a, b| b.cmp(a));
    slots
}

/// Beds bought for one room type, widened so it cannot wrap
fn room_beds(purchase: &RoomPurchase, room_type: RoomType) -> u64 {
    u64::from(purchase.count_for(room_type)) * u64::from(room_type.beds())
}

/// Lowest per-bed price among room types that were actually purchased.
///
/// Only types with a positive count and a configured price are considered,
/// not the whole sheet.
pub fn cheapest_purchased_price(sheet: &RoomPriceSheet, purchase: &RoomPurchase) -> Option<Decimal> {
    RoomType::ALL
        .iter()
        .filter(|&&room_type| purchase.count_for(room_type) > 0)
        .filter_map(|&room_type| sheet.price_for(room_type))
        .min()
}

/// Room types bought for this booking that the trip has no price for.
pub fn unavailable_room_types(sheet: &RoomPriceSheet, purchase: &RoomPurchase) -> Vec<RoomType> {
    RoomType::ALL
        .into_iter()
        .filter(|&room_type| {
            purchase.count_for(room_type) > 0 && sheet.price_for(room_type).is_none()
        })
        .collect()
}

/// Price an Omra booking by walking passengers through the bed slots.
///
/// Adults take slots first, then children continue from the same cursor at
/// `CHILD_RATE`. A passenger left without a slot is priced at zero; capacity is
/// enforced separately at finalization. Babies never take a slot and are
/// billed `BABY_RATE` of the cheapest purchased room type.
pub fn allocate(
    sheet: &RoomPriceSheet,
    purchase: &RoomPurchase,
    passengers: &PassengerCounts,
) -> PriceBreakdown {
    let (adults_total, children_total) =
        price_bedded_passengers(build_slot_inventory(sheet, purchase), passengers);

    let baby_base = cheapest_purchased_price(sheet, purchase).unwrap_or(Decimal::ZERO);
    let babies_total = baby_base * BABY_RATE * Decimal::from(passengers.babies);

    PriceBreakdown {
        adults_total,
        children_total,
        babies_total,
        grand_total: adults_total + children_total + babies_total,
    }
}

/// Walk adults then children through the slots with one shared cursor.
fn price_bedded_passengers(slots: Vec<Decimal>, passengers: &PassengerCounts) -> (Decimal, Decimal) {
    let mut cursor = slots.into_iter();

    let adults_total: Decimal = (0..passengers.adults)
        .map(|_| cursor.next().unwrap_or(Decimal::ZERO))
        .sum();

    let children_total: Decimal = (0..passengers.children)
        .map(|_| cursor.next().unwrap_or(Decimal::ZERO) * CHILD_RATE)
        .sum();

    (adults_total, children_total)
}

/// Compare purchased bed capacity with the passengers needing a bed.
///
/// Capacity is counted from rooms alone, whether or not the type is priced.
pub fn check_capacity(purchase: &RoomPurchase, passengers: &PassengerCounts) -> CapacityVerdict {
    let total_capacity = RoomType::ALL
        .iter()
        .map(|&room_type| room_beds(purchase, room_type))
        .fold(0u64, u64::saturating_add);
    let required_beds = passengers.bedded();

    CapacityVerdict {
        total_capacity,
        required_beds,
        sufficient: total_capacity >= required_beds,
        shortfall: required_beds.saturating_sub(total_capacity),
    }
}

/// Flat-rate pricing for non-Omra trips.
pub fn standard_rate(base_price: Decimal, passengers: &PassengerCounts) -> PriceBreakdown {
    let adults_total = base_price * Decimal::from(passengers.adults);
    let children_total = base_price * CHILD_RATE * Decimal::from(passengers.children);
    let babies_total = base_price * BABY_RATE * Decimal::from(passengers.babies);

    PriceBreakdown {
        adults_total,
        children_total,
        babies_total,
        grand_total: adults_total + children_total + babies_total,
    }
}

/// Price a booking with the trip's own pricing model.
///
/// Standard trips ignore the room purchase.
pub fn quote(trip: &Trip, purchase: &RoomPurchase, passengers: &PassengerCounts) -> PriceBreakdown {
    match trip.kind {
        TripKind::Omra => allocate(&trip.room_prices, purchase, passengers),
        TripKind::Standard => standard_rate(trip.base_price, passengers),
    }
}
