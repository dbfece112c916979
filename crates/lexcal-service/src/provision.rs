//! Provisioning of reference data and the lawyer→calendar relationship.
//!
//! Every booking depends on a lawyer owning a personal calendar, so this
//! module is the only place either is created. All paths are safe under
//! concurrent first invocation: reference data converges through
//! conflict-tolerant upserts, and the lawyer+calendar pair is written
//! inside a single transaction either idempotently (`ensure_*`) or
//! strictly (`create_*`).

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;

use lexcal_core::constants;
use lexcal_core::util::email::normalize_email;
use lexcal_db::db::connection::DbConnection;
use lexcal_db::db::query::{calendar, lawyer, reference};
use lexcal_db::model::calendar::{Calendar, NewCalendar};
use lexcal_db::model::country::{Country, NewCountry};
use lexcal_db::model::lawyer::{Lawyer, NewLawyer};
use lexcal_db::model::office::{NewOffice, Office};
use lexcal_db::model::time_zone::TimeZone;

use crate::error::{ServiceError, ServiceResult};

/// Reference data every lawyer hangs off of.
#[derive(Debug, Clone)]
pub struct BaseContext {
    pub time_zone: TimeZone,
    pub country: Country,
    pub office: Office,
}

/// A lawyer together with the personal calendar bookings land on.
#[derive(Debug, Clone)]
pub struct ProvisionedLawyer {
    pub base: BaseContext,
    pub lawyer: Lawyer,
    pub calendar: Calendar,
}

/// ## Summary
/// Ensures the base reference rows exist: the UTC time zone, the default
/// country, and the default office.
///
/// Idempotent; each row converges on its natural key under concurrent
/// callers.
///
/// ## Errors
/// Returns an error if a database operation fails.
#[tracing::instrument(skip(conn))]
pub async fn ensure_base_context(conn: &mut DbConnection<'_>) -> ServiceResult<BaseContext> {
    let time_zone = reference::upsert_time_zone(conn, constants::DEFAULT_TIME_ZONE).await?;

    let country = reference::upsert_country(
        conn,
        &NewCountry {
            iso_code: constants::DEFAULT_COUNTRY_ISO_CODE,
            name: constants::DEFAULT_COUNTRY_NAME,
            default_time_zone_id: time_zone.id,
        },
    )
    .await?;

    let office = reference::ensure_office(
        conn,
        &NewOffice {
            name: constants::DEFAULT_OFFICE_NAME,
            country_id: country.id,
            time_zone_id: time_zone.id,
        },
    )
    .await?;

    Ok(BaseContext {
        time_zone,
        country,
        office,
    })
}

/// ## Summary
/// Finds or creates a lawyer by email together with their personal
/// calendar, inside one transaction.
///
/// An existing lawyer gets their display name and office refreshed; the
/// calendar is created at most once thanks to the `(owner, name)` natural
/// key. No interleaving of two concurrent calls can produce a second
/// calendar or a lawyer without one.
///
/// ## Errors
/// Returns an error if a database operation fails.
#[tracing::instrument(skip(conn, email, full_name))]
pub async fn ensure_lawyer_with_calendar(
    conn: &mut DbConnection<'_>,
    email: &str,
    full_name: &str,
) -> ServiceResult<ProvisionedLawyer> {
    let base = ensure_base_context(conn).await?;

    let email = normalize_email(email);
    let full_name = full_name.trim().to_string();
    let office_id = base.office.id;
    let time_zone_id = base.time_zone.id;

    let (lawyer, calendar) = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let lawyer = lawyer::upsert(
                    tx,
                    &NewLawyer {
                        email: &email,
                        full_name: &full_name,
                        office_id,
                    },
                )
                .await?;

                let calendar_name = constants::personal_calendar_name(&lawyer.full_name);
                let calendar = calendar::ensure(
                    tx,
                    &NewCalendar {
                        owner_lawyer_id: lawyer.id,
                        name: &calendar_name,
                        time_zone_id,
                        is_personal: true,
                    },
                )
                .await?;

                Ok((lawyer, calendar))
            }
            .scope_boxed()
        })
        .await?;

    tracing::debug!(lawyer_id = %lawyer.id, calendar_id = %calendar.id, "Lawyer provisioned");

    Ok(ProvisionedLawyer {
        base,
        lawyer,
        calendar,
    })
}

/// ## Summary
/// Strictly registers a new lawyer and their personal calendar in one
/// atomic transaction.
///
/// No partial state is ever visible: either both rows commit or neither
/// does, including across a crash between the two inserts.
///
/// ## Errors
/// Returns [`ServiceError::DuplicateLawyer`] if the email is already
/// registered, or a database error.
#[tracing::instrument(skip(conn, email, full_name))]
pub async fn create_lawyer_with_calendar(
    conn: &mut DbConnection<'_>,
    email: &str,
    full_name: &str,
) -> ServiceResult<ProvisionedLawyer> {
    let base = ensure_base_context(conn).await?;

    let email = normalize_email(email);
    let full_name = full_name.trim().to_string();
    let office_id = base.office.id;
    let time_zone_id = base.time_zone.id;

    let (lawyer, calendar) = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let lawyer = match lawyer::insert(
                    tx,
                    &NewLawyer {
                        email: &email,
                        full_name: &full_name,
                        office_id,
                    },
                )
                .await
                {
                    Ok(lawyer) => lawyer,
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                        return Err(ServiceError::DuplicateLawyer);
                    }
                    Err(err) => return Err(err.into()),
                };

                let calendar_name = constants::personal_calendar_name(&lawyer.full_name);
                let calendar = calendar::insert(
                    tx,
                    &NewCalendar {
                        owner_lawyer_id: lawyer.id,
                        name: &calendar_name,
                        time_zone_id,
                        is_personal: true,
                    },
                )
                .await?;

                Ok((lawyer, calendar))
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(lawyer_id = %lawyer.id, calendar_id = %calendar.id, "Lawyer registered");

    Ok(ProvisionedLawyer {
        base,
        lawyer,
        calendar,
    })
}

/// ## Summary
/// Provisions the well-known demo lawyer and its calendar.
///
/// ## Errors
/// Returns an error if a database operation fails.
pub async fn ensure_demo_lawyer(conn: &mut DbConnection<'_>) -> ServiceResult<ProvisionedLawyer> {
    ensure_lawyer_with_calendar(
        conn,
        constants::DEMO_LAWYER_EMAIL,
        constants::DEMO_LAWYER_NAME,
    )
    .await
}

/// ## Summary
/// Resolves the lawyer and calendar a booking acts on.
///
/// The demo address maps to the fixed demo identity. Any other address is
/// looked up first; an unknown email is silently registered with a
/// placeholder display name — an existing lawyer is never renamed by a
/// mere booking.
///
/// ## Errors
/// Returns an error if a database operation fails.
pub async fn ensure_booking_identity(
    conn: &mut DbConnection<'_>,
    email: &str,
) -> ServiceResult<ProvisionedLawyer> {
    let email = normalize_email(email);

    if email == constants::DEMO_LAWYER_EMAIL {
        return ensure_demo_lawyer(conn).await;
    }

    match lawyer::find_by_email(conn, &email).await? {
        Some(existing) => ensure_lawyer_with_calendar(conn, &email, &existing.full_name).await,
        None => {
            ensure_lawyer_with_calendar(conn, &email, constants::PLACEHOLDER_LAWYER_NAME).await
        }
    }
}
