use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::schema;

/// An office lawyers belong to.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::office)]
#[diesel(check_for_backend(Pg))]
pub struct Office {
    pub id: Uuid,
    /// Unique within its country.
    pub name: String,
    pub country_id: Uuid,
    pub time_zone_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insert struct for creating offices
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::office)]
pub struct NewOffice<'a> {
    pub name: &'a str,
    pub country_id: Uuid,
    pub time_zone_id: Uuid,
}
