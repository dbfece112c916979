use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::schema;

/// A booking calendar owned by a lawyer.
///
/// `(owner_lawyer_id, name)` is unique, which makes the find-or-create
/// provisioning path race-free. Exactly one calendar per lawyer carries
/// `is_personal`; that is the one bookings land on.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::calendar)]
#[diesel(check_for_backend(Pg))]
pub struct Calendar {
    pub id: Uuid,
    pub owner_lawyer_id: Uuid,
    pub name: String,
    pub time_zone_id: Uuid,
    pub is_personal: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert struct for creating calendars
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::calendar)]
pub struct NewCalendar<'a> {
    pub owner_lawyer_id: Uuid,
    pub name: &'a str,
    pub time_zone_id: Uuid,
    pub is_personal: bool,
}
