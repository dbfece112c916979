//! Queries for the `lawyer` table.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::lawyer;
use crate::model::lawyer::{Lawyer, NewLawyer};

/// ## Summary
/// Upserts a lawyer by unique email, refreshing the display name and
/// office on conflict.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn upsert(conn: &mut DbConnection<'_>, new_lawyer: &NewLawyer<'_>) -> QueryResult<Lawyer> {
    diesel::insert_into(lawyer::table)
        .values(new_lawyer)
        .on_conflict(lawyer::email)
        .do_update()
        .set((
            lawyer::full_name.eq(excluded(lawyer::full_name)),
            lawyer::office_id.eq(excluded(lawyer::office_id)),
            lawyer::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Lawyer::as_select())
        .get_result(conn)
        .await
}

/// ## Summary
/// Inserts a lawyer, failing on a duplicate email.
///
/// The caller maps the unique violation to its own conflict error; this
/// layer just lets it surface.
///
/// ## Errors
/// Returns an error if the email already exists or the database operation
/// fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_lawyer: &NewLawyer<'_>) -> QueryResult<Lawyer> {
    diesel::insert_into(lawyer::table)
        .values(new_lawyer)
        .returning(Lawyer::as_select())
        .get_result(conn)
        .await
}

/// ## Summary
/// Looks a lawyer up by normalized email.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_email(
    conn: &mut DbConnection<'_>,
    email: &str,
) -> QueryResult<Option<Lawyer>> {
    lawyer::table
        .filter(lawyer::email.eq(email))
        .select(Lawyer::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Loads all active lawyers ordered by display name ascending.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_active(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Lawyer>> {
    lawyer::table
        .filter(lawyer::is_active.eq(true))
        .order(lawyer::full_name.asc())
        .select(Lawyer::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Counts lawyers registered with the given normalized email.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_by_email(conn: &mut DbConnection<'_>, email: &str) -> QueryResult<i64> {
    lawyer::table
        .filter(lawyer::email.eq(email))
        .count()
        .get_result(conn)
        .await
}
