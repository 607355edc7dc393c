use std::time::Duration;

use tokio::time::Instant;

use catalog_core::cache::{UnavailableOfferings, unavailable_offering_cache_key};
use catalog_core::shape::PurchaseClass;

const TTL: Duration = Duration::from_secs(180);

#[test]
fn test_absent_key_is_available() {
    let cache = UnavailableOfferings::new(TTL);
    let now = Instant::now();
    assert!(!cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", now));
    assert!(cache.is_empty());
}

#[test]
fn test_report_suppresses_exact_key_only() {
    let cache = UnavailableOfferings::new(TTL);
    let t0 = Instant::now();
    cache.mark_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", t0);

    let now = t0 + Duration::from_secs(1);
    assert!(cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", now));
    assert!(!cache.is_unavailable_at(PurchaseClass::OnDemand, "m5.large", "us-x-1a", now));
    assert!(!cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1b", now));
    assert!(!cache.is_unavailable_at(PurchaseClass::Spot, "m5.xlarge", "us-x-1a", now));
}

#[test]
fn test_quarantine_lifts_exactly_one_ttl_after_report() {
    let cache = UnavailableOfferings::new(TTL);
    let t0 = Instant::now();
    cache.mark_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", t0);

    let just_before = t0 + TTL - Duration::from_millis(1);
    assert!(cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", just_before));
    assert!(!cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", t0 + TTL));
}

#[test]
fn test_repeated_reports_slide_the_window() {
    let cache = UnavailableOfferings::new(TTL);
    let t0 = Instant::now();

    // A burst of reports 100s apart: each is inside the previous window.
    let mut last = t0;
    for i in 0..5u64 {
        let at = t0 + Duration::from_secs(100 * i);
        assert!(
            i == 0 || cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", at),
            "suppression lapsed mid-burst at report {i}"
        );
        cache.mark_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", at);
        last = at;
    }

    // Continuous through the whole burst, well past the first report's TTL.
    let mut probe = t0;
    while probe < last + TTL {
        assert!(cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", probe));
        probe += Duration::from_secs(10);
    }

    assert_eq!(
        cache.quarantined_until(PurchaseClass::Spot, "m5.large", "us-x-1a", last),
        Some(last + TTL)
    );
    assert!(!cache.is_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", last + TTL));
}

#[test]
fn test_sweep_reclaims_only_expired_entries() {
    let cache = UnavailableOfferings::new(TTL);
    let t0 = Instant::now();
    cache.mark_unavailable_at(PurchaseClass::Spot, "m5.large", "us-x-1a", t0);
    cache.mark_unavailable_at(
        PurchaseClass::OnDemand,
        "c5.large",
        "us-x-1b",
        t0 + Duration::from_secs(120),
    );

    let now = t0 + Duration::from_secs(200);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.sweep_at(now), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.is_unavailable_at(PurchaseClass::OnDemand, "c5.large", "us-x-1b", now));
}

#[test]
fn test_cache_key_format() {
    assert_eq!(
        unavailable_offering_cache_key(PurchaseClass::Spot, "m5.large", "us-x-1a"),
        "spot:m5.large:us-x-1a"
    );
    assert_eq!(
        unavailable_offering_cache_key(PurchaseClass::OnDemand, "p4d.24xlarge", "us-east-1d"),
        "on-demand:p4d.24xlarge:us-east-1d"
    );
}

#[test]
fn test_concurrent_reports_and_lookups() {
    use std::sync::Arc;
    use std::thread;

    let cache = Arc::new(UnavailableOfferings::new(TTL));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..200 {
                    let zone = format!("zone-{}", i % 4);
                    let shape = format!("shape-{t}");
                    cache.mark_unavailable(PurchaseClass::Spot, &shape, &zone);
                    assert!(cache.is_unavailable(PurchaseClass::Spot, &shape, &zone));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(cache.len(), 8 * 4);
}
