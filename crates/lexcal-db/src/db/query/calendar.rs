//! Queries for the `calendar` table.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::calendar;
use crate::model::calendar::{Calendar, NewCalendar};

/// ## Summary
/// Finds or creates a calendar by its `(owner_lawyer_id, name)` natural key.
///
/// Two concurrent calls for a brand-new lawyer cannot both create: the
/// unique constraint lets one insert win and the other re-reads the row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn ensure(
    conn: &mut DbConnection<'_>,
    new_calendar: &NewCalendar<'_>,
) -> QueryResult<Calendar> {
    let inserted = diesel::insert_into(calendar::table)
        .values(new_calendar)
        .on_conflict((calendar::owner_lawyer_id, calendar::name))
        .do_nothing()
        .returning(Calendar::as_select())
        .get_result(conn)
        .await
        .optional()?;

    if let Some(cal) = inserted {
        return Ok(cal);
    }

    calendar::table
        .filter(calendar::owner_lawyer_id.eq(new_calendar.owner_lawyer_id))
        .filter(calendar::name.eq(new_calendar.name))
        .select(Calendar::as_select())
        .first(conn)
        .await
}

/// ## Summary
/// Inserts a calendar, failing if the owner already has one with the same
/// name.
///
/// ## Errors
/// Returns an error if the natural key already exists or the database
/// operation fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    new_calendar: &NewCalendar<'_>,
) -> QueryResult<Calendar> {
    diesel::insert_into(calendar::table)
        .values(new_calendar)
        .returning(Calendar::as_select())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads the calendars owned by any of the given lawyers, personal
/// calendars first, then oldest first.
///
/// The ordering lets a caller take the first calendar per owner as that
/// lawyer's booking calendar.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn for_owners(
    conn: &mut DbConnection<'_>,
    owner_ids: &[Uuid],
) -> QueryResult<Vec<Calendar>> {
    calendar::table
        .filter(calendar::owner_lawyer_id.eq_any(owner_ids.iter().copied()))
        .order((calendar::is_personal.desc(), calendar::created_at.asc()))
        .select(Calendar::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads a calendar row and locks it for the rest of the transaction.
///
/// The row lock serializes concurrent bookings on one calendar so the
/// read-check-insert sequence cannot interleave; bookings on other
/// calendars are unaffected.
///
/// ## Errors
/// Returns an error if the calendar does not exist or the database
/// operation fails.
pub async fn lock_for_booking(
    conn: &mut DbConnection<'_>,
    calendar_id: Uuid,
) -> QueryResult<Calendar> {
    calendar::table
        .find(calendar_id)
        .select(Calendar::as_select())
        .for_update()
        .first(conn)
        .await
}

/// ## Summary
/// Counts calendars owned by a lawyer.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_for_owner(conn: &mut DbConnection<'_>, owner_id: Uuid) -> QueryResult<i64> {
    calendar::table
        .filter(calendar::owner_lawyer_id.eq(owner_id))
        .count()
        .get_result(conn)
        .await
}
