use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::schema;

/// A registered lawyer.
///
/// The lowercase `email` is the natural key; callers normalize before any
/// lookup or insert.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::lawyer)]
#[diesel(check_for_backend(Pg))]
pub struct Lawyer {
    pub id: Uuid,
    /// Unique, normalized lowercase.
    pub email: String,
    pub full_name: String,
    pub office_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert struct for registering lawyers
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::lawyer)]
pub struct NewLawyer<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
    pub office_id: Uuid,
}
