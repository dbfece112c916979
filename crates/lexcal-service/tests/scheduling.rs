//! Live-database integration tests for provisioning and booking.
//!
//! These run against a real PostgreSQL instance and self-skip unless
//! `LEXCAL_TEST_DATABASE_URL` points at a disposable database. Each test
//! provisions its own lawyer under a unique email so runs do not interfere
//! with each other or with earlier data.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use lexcal_db::db::connection::{DbPool, create_pool};
use lexcal_db::db::enums::AppointmentMode;
use lexcal_db::db::migrate;
use lexcal_db::db::query::{calendar as calendar_query, lawyer as lawyer_query};
use lexcal_service::error::ServiceError;
use lexcal_service::schedule::BookingRequest;
use lexcal_service::{provision, schedule};

async fn test_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var("LEXCAL_TEST_DATABASE_URL") else {
        eprintln!("skipping: LEXCAL_TEST_DATABASE_URL is not set");
        return None;
    };

    migrate::run_pending(&url).await.expect("migrations apply");

    Some(create_pool(&url, 2).await.expect("pool builds"))
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.test", Uuid::new_v4())
}

fn booking(email: &str, starts_at_local: &str, duration_minutes: i64) -> BookingRequest {
    BookingRequest {
        subject: "Consulta".to_string(),
        mode: AppointmentMode::VideoCall,
        starts_at_local: starts_at_local.to_string(),
        duration_minutes,
        scheduled_time_zone: "America/Argentina/Buenos_Aires".to_string(),
        lawyer_email: email.to_string(),
    }
}

#[test_log::test(tokio::test)]
async fn strict_registration_rejects_duplicate_email() {
    let Some(pool) = test_pool().await else { return };
    let mut conn = pool.get().await.expect("connection");

    let email = unique_email("strict");

    let first = provision::create_lawyer_with_calendar(&mut conn, &email, "Ana Pérez")
        .await
        .expect("first registration succeeds");
    assert_eq!(first.lawyer.email, email);
    assert_eq!(first.calendar.name, "Ana Pérez (personal)");
    assert!(first.calendar.is_personal);

    let second = provision::create_lawyer_with_calendar(&mut conn, &email, "Ana Pérez")
        .await
        .expect_err("second registration must fail");
    assert!(matches!(second, ServiceError::DuplicateLawyer));

    // Exactly one lawyer and one calendar survive.
    let lawyers = lawyer_query::count_by_email(&mut conn, &email)
        .await
        .expect("count lawyers");
    assert_eq!(lawyers, 1);

    let calendars = calendar_query::count_for_owner(&mut conn, first.lawyer.id)
        .await
        .expect("count calendars");
    assert_eq!(calendars, 1);
}

#[test_log::test(tokio::test)]
async fn ensure_provisioning_is_idempotent() {
    let Some(pool) = test_pool().await else { return };
    let mut conn = pool.get().await.expect("connection");

    let email = unique_email("ensure");

    let first = provision::ensure_lawyer_with_calendar(&mut conn, &email, "Bruno Díaz")
        .await
        .expect("first ensure succeeds");
    let second = provision::ensure_lawyer_with_calendar(&mut conn, &email, "Bruno Díaz")
        .await
        .expect("second ensure succeeds");

    assert_eq!(first.lawyer.id, second.lawyer.id);
    assert_eq!(first.calendar.id, second.calendar.id);

    let calendars = calendar_query::count_for_owner(&mut conn, first.lawyer.id)
        .await
        .expect("count calendars");
    assert_eq!(calendars, 1);
}

#[test_log::test(tokio::test)]
async fn overlapping_booking_is_rejected_and_abutting_accepted() {
    let Some(pool) = test_pool().await else { return };
    let mut conn = pool.get().await.expect("connection");

    let email = unique_email("booking");

    let first = schedule::create_appointment(&mut conn, &booking(&email, "2024-03-10T01:30", 30))
        .await
        .expect("first booking succeeds");
    assert_eq!(first.appointment.scheduled_offset_minutes, -180);
    assert_eq!(
        first.appointment.starts_at_utc,
        Utc.with_ymd_and_hms(2024, 3, 10, 4, 30, 0).unwrap()
    );
    assert_eq!(
        first.appointment.ends_at_utc,
        Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap()
    );
    assert_eq!(first.time_zone.iana_name, "America/Argentina/Buenos_Aires");

    // 01:45-02:15 overlaps 01:30-02:00.
    let overlapping =
        schedule::create_appointment(&mut conn, &booking(&email, "2024-03-10T01:45", 30))
            .await
            .expect_err("overlapping booking must be rejected");
    match overlapping {
        ServiceError::SchedulingConflict { conflict } => {
            assert_eq!(conflict.start, first.appointment.starts_at_utc);
            assert_eq!(conflict.end, first.appointment.ends_at_utc);
        }
        other => panic!("expected SchedulingConflict, got {other:?}"),
    }

    // 02:00-02:30 abuts the first slot and must fit.
    schedule::create_appointment(&mut conn, &booking(&email, "2024-03-10T02:00", 30))
        .await
        .expect("abutting booking succeeds");

    let listed = schedule::list_appointments(&mut conn, &email)
        .await
        .expect("listing succeeds");
    assert_eq!(listed.len(), 2);
    // Newest start first.
    assert!(listed[0].0.starts_at_utc > listed[1].0.starts_at_utc);
}

#[test_log::test(tokio::test)]
async fn booking_for_unknown_email_registers_placeholder_lawyer() {
    let Some(pool) = test_pool().await else { return };
    let mut conn = pool.get().await.expect("connection");

    let email = unique_email("walkin");

    schedule::create_appointment(&mut conn, &booking(&email, "2024-06-03T10:00", 60))
        .await
        .expect("booking succeeds");

    let lawyer = lawyer_query::find_by_email(&mut conn, &email)
        .await
        .expect("lookup succeeds")
        .expect("lawyer was registered");
    assert_eq!(lawyer.full_name, "New Lawyer");

    // A second booking must not rename the lawyer.
    schedule::create_appointment(&mut conn, &booking(&email, "2024-06-03T11:00", 60))
        .await
        .expect("second booking succeeds");
    let lawyer = lawyer_query::find_by_email(&mut conn, &email)
        .await
        .expect("lookup succeeds")
        .expect("lawyer still present");
    assert_eq!(lawyer.full_name, "New Lawyer");
}

#[test_log::test(tokio::test)]
async fn demo_bootstrap_provisions_fixed_identity() {
    let Some(pool) = test_pool().await else { return };
    let mut conn = pool.get().await.expect("connection");

    let ctx = provision::ensure_demo_lawyer(&mut conn)
        .await
        .expect("bootstrap succeeds");

    assert_eq!(ctx.lawyer.email, "demo.lawyer@challenge.local");
    assert_eq!(ctx.lawyer.full_name, "Demo Lawyer");
    assert_eq!(ctx.calendar.name, "Demo Lawyer (personal)");
    assert_eq!(ctx.base.time_zone.iana_name, "UTC");
    assert_eq!(ctx.base.country.iso_code, "AR");
    assert_eq!(ctx.base.office.name, "Demo Office");

    // Running it again converges on the same rows.
    let again = provision::ensure_demo_lawyer(&mut conn)
        .await
        .expect("bootstrap is idempotent");
    assert_eq!(again.lawyer.id, ctx.lawyer.id);
    assert_eq!(again.calendar.id, ctx.calendar.id);
    assert_eq!(again.base.office.id, ctx.base.office.id);
}
