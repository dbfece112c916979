//! Read-only roster projection: lawyers with their booking calendar.

use std::collections::HashMap;

use uuid::Uuid;

use lexcal_db::db::connection::DbConnection;
use lexcal_db::db::query::{calendar, lawyer};
use lexcal_db::model::calendar::Calendar;
use lexcal_db::model::lawyer::Lawyer;

use crate::error::ServiceResult;

/// A roster entry: a lawyer and the calendar bookings land on, if any.
#[derive(Debug, Clone)]
pub struct LawyerWithCalendar {
    pub lawyer: Lawyer,
    pub personal_calendar: Option<Calendar>,
}

/// ## Summary
/// Lists active lawyers ordered by display name ascending, each annotated
/// with their booking calendar.
///
/// Calendar selection is explicit: the personal calendar wins, and only
/// among several personal calendars (which provisioning never creates)
/// does creation order break the tie. A lawyer without any calendar is
/// still listed.
///
/// ## Errors
/// Returns an error if a database operation fails.
#[tracing::instrument(skip(conn))]
pub async fn list_lawyers(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<LawyerWithCalendar>> {
    let lawyers = lawyer::list_active(conn).await?;

    let owner_ids: Vec<Uuid> = lawyers.iter().map(|l| l.id).collect();
    let calendars = calendar::for_owners(conn, &owner_ids).await?;

    // Rows arrive personal-first then oldest-first, so the first calendar
    // seen per owner is the booking calendar.
    let mut first_by_owner: HashMap<Uuid, Calendar> = HashMap::new();
    for cal in calendars {
        first_by_owner.entry(cal.owner_lawyer_id).or_insert(cal);
    }

    Ok(lawyers
        .into_iter()
        .map(|lawyer| {
            let personal_calendar = first_by_owner.remove(&lawyer.id);
            LawyerWithCalendar {
                lawyer,
                personal_calendar,
            }
        })
        .collect())
}
