//! Queries for lazily-created reference data: time zones, countries, offices.
//!
//! Every function here is safe to call concurrently for the same natural
//! key: inserts either tolerate the conflict and re-read the winning row, or
//! overwrite the mutable display fields. Exactly one row per key survives.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{country, office, time_zone};
use crate::model::country::{Country, NewCountry};
use crate::model::office::{NewOffice, Office};
use crate::model::time_zone::{NewTimeZone, TimeZone};

/// ## Summary
/// Finds or creates a time zone row by its unique IANA name.
///
/// Rows are immutable, so a conflicting concurrent insert simply loses and
/// the existing row is returned.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn upsert_time_zone(
    conn: &mut DbConnection<'_>,
    iana_name: &str,
) -> QueryResult<TimeZone> {
    let inserted = diesel::insert_into(time_zone::table)
        .values(&NewTimeZone { iana_name })
        .on_conflict(time_zone::iana_name)
        .do_nothing()
        .returning(TimeZone::as_select())
        .get_result(conn)
        .await
        .optional()?;

    if let Some(tz) = inserted {
        return Ok(tz);
    }

    time_zone::table
        .filter(time_zone::iana_name.eq(iana_name))
        .select(TimeZone::as_select())
        .first(conn)
        .await
}

/// ## Summary
/// Counts time zone rows.
///
/// Used by the connectivity probe; the count also tells a fresh deployment
/// apart from one that has seen bookings.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_time_zones(conn: &mut DbConnection<'_>) -> QueryResult<i64> {
    time_zone::table.count().get_result(conn).await
}

/// ## Summary
/// Upserts a country by its unique ISO code, refreshing the display name
/// and default time zone reference on conflict.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn upsert_country(
    conn: &mut DbConnection<'_>,
    new_country: &NewCountry<'_>,
) -> QueryResult<Country> {
    diesel::insert_into(country::table)
        .values(new_country)
        .on_conflict(country::iso_code)
        .do_update()
        .set((
            country::name.eq(excluded(country::name)),
            country::default_time_zone_id.eq(excluded(country::default_time_zone_id)),
            country::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Country::as_select())
        .get_result(conn)
        .await
}

/// ## Summary
/// Finds or creates an office by its `(country_id, name)` natural key.
///
/// The unique constraint on that pair makes concurrent first creation
/// converge on a single row instead of producing duplicates.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn ensure_office(
    conn: &mut DbConnection<'_>,
    new_office: &NewOffice<'_>,
) -> QueryResult<Office> {
    let inserted = diesel::insert_into(office::table)
        .values(new_office)
        .on_conflict((office::country_id, office::name))
        .do_nothing()
        .returning(Office::as_select())
        .get_result(conn)
        .await
        .optional()?;

    if let Some(office) = inserted {
        return Ok(office);
    }

    office::table
        .filter(office::country_id.eq(new_office.country_id))
        .filter(office::name.eq(new_office.name))
        .select(Office::as_select())
        .first(conn)
        .await
}
