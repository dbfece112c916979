use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::schema;

/// A country with a default time zone for its offices.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::country)]
#[diesel(check_for_backend(Pg))]
pub struct Country {
    pub id: Uuid,
    /// ISO 3166-1 alpha-2 code. Unique.
    pub iso_code: String,
    pub name: String,
    pub default_time_zone_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert struct for creating countries
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::country)]
pub struct NewCountry<'a> {
    pub iso_code: &'a str,
    pub name: &'a str,
    pub default_time_zone_id: Uuid,
}
