//! End-to-end reservation lifecycle and concurrency tests.
//!
//! These exercise the full quote → reserve → cancel pipeline through
//! [`ReservationService`], including races between writers competing
//! for the same nights.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, Utc};

use homestay_booking::{
    BookingConfig, BookingError, BookingFilter, InMemoryCatalog, ReservationRequest,
    ReservationService,
};
use homestay_core::{
    Booking, BookingStatus, Bucket, CoreError, GuestDetails, PaymentMethod, Property, PropertyId,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn property(id: PropertyId) -> Property {
    Property {
        id,
        name: format!("Kampung Stay {id}"),
        city: "Kuching".to_string(),
        state: "Sarawak".to_string(),
        base_rate_sen: 10_000,
        weekly_discount_pct: 10,
        monthly_discount_pct: 20,
        min_stay: 1,
        max_stay: 30,
        advance_booking_days: 365,
        max_guests: 6,
        blocked_dates: BTreeSet::new(),
        created_at: Utc::now(),
    }
}

fn service(properties: Vec<Property>) -> ReservationService {
    ReservationService::new(
        Arc::new(InMemoryCatalog::new(properties)),
        BookingConfig::default(),
    )
}

fn request(property_id: PropertyId, check_in: NaiveDate, check_out: NaiveDate) -> ReservationRequest {
    ReservationRequest {
        property_id,
        check_in,
        check_out,
        guest: GuestDetails {
            first_name: "Nurul".to_string(),
            last_name: "Hassan".to_string(),
            email: "nurul@example.com".to_string(),
            phone: "+60 12-345 6789".to_string(),
            guests: 2,
            payment_method: PaymentMethod::BayarCash,
            special_requests: Some("Late check-in around 10pm".to_string()),
        },
        payment_confirmed: true,
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_full_lifecycle() {
    init_tracing();
    let svc = service(vec![property(1)]);
    let today = d(1);

    // Quote first: 7 nights lands in the weekly tier.
    let quote = svc.quote(1, d(10), d(17), 2, today).unwrap();
    assert_eq!(quote.pricing.subtotal_sen, 63_000);
    assert_eq!(quote.pricing.total_sen, 66_780);

    // Reserve freezes the quoted numbers on the record.
    let booking = svc.reserve(&request(1, d(10), d(17)), today).unwrap();
    assert_eq!(booking.total_sen, quote.pricing.total_sen);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.special_requests.as_deref(), Some("Late check-in around 10pm"));

    // The calendar now shows the stay, checkout day free.
    let view = svc.get_availability(1).unwrap();
    assert!(view.blocked_dates.contains(&d(10)));
    assert!(view.blocked_dates.contains(&d(16)));
    assert!(!view.blocked_dates.contains(&d(17)));

    // Cancelling releases every night and the range rebooks cleanly.
    svc.cancel(booking.id, today).unwrap();
    assert!(svc.get_availability(1).unwrap().blocked_dates.is_empty());
    let rebooked = svc.reserve(&request(1, d(10), d(17)), today).unwrap();
    assert!(rebooked.id > booking.id);
}

#[test]
fn test_monthly_tier_reference_amounts() {
    init_tracing();
    let svc = service(vec![property(1)]);
    let quote = svc.quote(1, d(1), d(31), 2, d(1)).unwrap();
    assert_eq!(quote.pricing.nights, 30);
    assert_eq!(quote.pricing.discount_sen, 60_000);
    assert_eq!(quote.pricing.subtotal_sen, 240_000);
    assert_eq!(quote.pricing.taxes_sen, 14_400);
    assert_eq!(quote.pricing.total_sen, 254_400);
}

#[test]
fn test_cancel_rejections() {
    init_tracing();
    let svc = service(vec![property(1)]);
    let booking = svc.reserve(&request(1, d(10), d(13)), d(1)).unwrap();

    // Once the stay has begun there is no cancelling.
    let err = svc.cancel(booking.id, d(10)).unwrap_err();
    assert!(matches!(err, BookingError::PastCheckIn { .. }));

    // Cancelling twice fails the second time.
    svc.cancel(booking.id, d(1)).unwrap();
    let err = svc.cancel(booking.id, d(1)).unwrap_err();
    assert!(matches!(
        err,
        BookingError::AlreadyTerminal {
            status: BookingStatus::Cancelled,
            ..
        }
    ));

    let err = svc.cancel(999, d(1)).unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound(999)));
}

#[test]
fn test_bucket_progression_with_today() {
    init_tracing();
    let svc = service(vec![property(1)]);
    let booking = svc.reserve(&request(1, d(10), d(13)), d(1)).unwrap();

    let bucket_on = |day: u32| {
        svc.get_booking(booking.id, d(day)).unwrap().bucket
    };

    // The booking moves forward through the lifecycle, never back.
    assert_eq!(bucket_on(5), Bucket::Upcoming);
    assert_eq!(bucket_on(10), Bucket::Current);
    assert_eq!(bucket_on(12), Bucket::Current);
    assert_eq!(bucket_on(13), Bucket::Past);
    assert_eq!(bucket_on(20), Bucket::Past);

    // Checkout day itself reads as effective completion.
    let view = svc.get_booking(booking.id, d(13)).unwrap();
    assert_eq!(view.effective_status, BookingStatus::Completed);
    assert_eq!(view.booking.status, BookingStatus::Confirmed);
}

#[test]
fn test_list_bookings_filters() {
    init_tracing();
    let svc = service(vec![property(1), property(2)]);
    let today = d(1);
    svc.reserve(&request(1, d(10), d(13)), today).unwrap();
    svc.reserve(&request(2, d(10), d(13)), today).unwrap();
    svc.reserve(&request(2, d(20), d(22)), today).unwrap();

    let all = svc.list_bookings(BookingFilter::default(), today);
    assert_eq!(all.len(), 3);
    // Creation order
    let ids: Vec<u64> = all.iter().map(|v| v.booking.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);

    let prop_two = svc.list_bookings(
        BookingFilter {
            property_id: Some(2),
            bucket: None,
        },
        today,
    );
    assert_eq!(prop_two.len(), 2);
    assert!(prop_two.iter().all(|v| v.booking.property_id == 2));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_racing_writers_one_winner() {
    init_tracing();
    let svc = Arc::new(service(vec![property(1)]));
    let today = d(1);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || svc.reserve(&request(1, d(10), d(13)), today))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    for result in &results {
        match result {
            Ok(_) => {}
            // Losers see the winner either in their snapshot or at
            // commit time after the retry.
            Err(BookingError::Conflict) => {}
            Err(BookingError::Core(CoreError::DateBlocked { .. })) => {}
            Err(other) => panic!("unexpected loser error: {other}"),
        }
    }

    // Exactly one booking exists and its nights are held.
    let bookings = svc.list_bookings(BookingFilter::default(), today);
    assert_eq!(bookings.len(), 1);
    let view = svc.get_availability(1).unwrap();
    assert_eq!(view.blocked_dates, vec![d(10), d(11), d(12)]);
}

#[test]
fn test_confirmed_stays_never_overlap_under_contention() {
    init_tracing();
    let svc = Arc::new(service(vec![property(1), property(2)]));
    let today = d(1);

    // Deterministic pseudo-random ranges, heavily overlapping.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    let mut attempts = Vec::new();
    for _ in 0..64 {
        let property_id = (next() % 2 + 1) as PropertyId;
        let start = (next() % 20 + 2) as u32;
        let nights = (next() % 5 + 1) as u32;
        attempts.push((property_id, d(start), d(start + nights)));
    }

    let handles: Vec<_> = attempts
        .into_iter()
        .map(|(pid, ci, co)| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || svc.reserve(&request(pid, ci, co), today))
        })
        .collect();

    let mut confirmed: Vec<Booking> = Vec::new();
    for handle in handles {
        if let Ok(booking) = handle.join().unwrap() {
            confirmed.push(booking);
        }
    }
    assert!(!confirmed.is_empty());

    // Per property, committed ranges must be pairwise disjoint.
    for (i, a) in confirmed.iter().enumerate() {
        for b in &confirmed[i + 1..] {
            if a.property_id != b.property_id {
                continue;
            }
            let overlap = a.check_in < b.check_out && b.check_in < a.check_out;
            assert!(
                !overlap,
                "bookings {} and {} overlap on property {}",
                a.id, b.id, a.property_id
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reserve_from_async_tasks() {
    init_tracing();
    let svc = Arc::new(service(vec![property(1)]));
    let today = d(1);

    let mut tasks = Vec::new();
    for offset in 0..6u32 {
        let svc = Arc::clone(&svc);
        tasks.push(tokio::task::spawn_blocking(move || {
            let start = 2 + offset * 3;
            svc.reserve(&request(1, d(start), d(start + 3)), today)
        }));
    }

    for task in tasks {
        // Ranges are disjoint, so every task must succeed.
        task.await.unwrap().unwrap();
    }

    let bookings = svc.list_bookings(BookingFilter::default(), today);
    assert_eq!(bookings.len(), 6);
}
