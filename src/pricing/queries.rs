//! Database queries for the pricing engine.
//!
//! Trips are read from the catalog's `trips` table (`type`, `base_price`, and
//! the `options` JSONB holding room prices). Bookings go to `bookings`.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::booking::BookingDraft;
use super::models::{BookingRecord, TripRow};

/// Find a live trip by id
pub async fn find_trip(pool: &PgPool, trip_id: Uuid) -> Result<Option<TripRow>, AppError> {
    let trip = sqlx::query_as::<_, TripRow>(
        r#"
        SELECT
            id, title, type AS trip_type, base_price, options, currency
        FROM trips
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(trip_id)
    .fetch_optional(pool)
    .await?;

    Ok(trip)
}

/// List live pilgrimage trips, most recently created first
pub async fn list_omra_trips(pool: &PgPool, limit: i64) -> Result<Vec<TripRow>, AppError> {
    let trips = sqlx::query_as::<_, TripRow>(
        r#"
        SELECT
            id, title, type AS trip_type, base_price, options, currency
        FROM trips
        WHERE LOWER(TRIM(type)) IN ('omra', 'religieuse')
          AND deleted_at IS NULL
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(trips)
}

/// Store a finalized booking and return the stored row
pub async fn insert_booking(pool: &PgPool, draft: &BookingDraft) -> Result<BookingRecord, AppError> {
    let record = sqlx::query_as::<_, BookingRecord>(
        r#"
        INSERT INTO bookings (
            id, user_id, trip_id,
            passengers_adult, passengers_child, passengers_baby,
            options, computed_price, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING
            id, user_id, trip_id,
            passengers_adult, passengers_child, passengers_baby,
            options, computed_price, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(draft.user_id)
    .bind(draft.trip_id)
    .bind(i64::from(draft.passengers.adults))
    .bind(i64::from(draft.passengers.children))
    .bind(i64::from(draft.passengers.babies))
    .bind(draft.options.map(Json))
    .bind(draft.computed_price)
    .bind(draft.status.as_str())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(record)
}
