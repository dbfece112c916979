use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::schema;

/// A named IANA time zone referenced by bookings and reference data.
///
/// Rows are immutable once created and are lazily inserted the first time a
/// zone name is used.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::time_zone)]
#[diesel(check_for_backend(Pg))]
pub struct TimeZone {
    pub id: Uuid,
    /// e.g. `America/Argentina/Buenos_Aires`. Unique.
    pub iana_name: String,
    pub created_at: DateTime<Utc>,
}

/// Insert struct for lazily creating time zone rows
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::time_zone)]
pub struct NewTimeZone<'a> {
    pub iana_name: &'a str,
}
