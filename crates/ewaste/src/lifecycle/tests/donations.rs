use std::sync::Arc;

use super::common::*;
use crate::lifecycle::domain::{DonationStatus, PrincipalId, RecordId};
use crate::lifecycle::service::LifecycleError;

#[test]
fn create_starts_available_with_computed_total() {
    let (_, service) = donation_setup();
    let donor = user("bina");

    let mut draft = donation_draft();
    draft.items[0].quantity = Some(3);
    draft.items[0].estimated_value = Some(40.0);

    let record = service.create(&donor, &draft).expect("created");
    assert_eq!(record.donor_id, donor.id);
    assert_eq!(record.status, DonationStatus::Available);
    assert!(record.recipient_id.is_none());
    assert_eq!(record.total_estimated_value, 120.0);
}

#[test]
fn create_with_empty_items_fails_validation() {
    let (_, service) = donation_setup();
    let mut draft = donation_draft();
    draft.items.clear();

    match service.create(&user("bina"), &draft) {
        Err(LifecycleError::Validation(errors)) => {
            assert_eq!(errors.fields(), vec!["items"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn create_requires_donation_purpose() {
    let (_, service) = donation_setup();
    let mut draft = donation_draft();
    draft.donation_purpose = None;

    match service.create(&user("bina"), &draft) {
        Err(LifecycleError::Validation(errors)) => {
            assert_eq!(errors.fields(), vec!["donationPurpose"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn reserve_claims_available_donation_for_caller() {
    let (_, service) = donation_setup();
    let record = service
        .create(&user("bina"), &donation_draft())
        .expect("created");
    let chandra = user("chandra");

    let reserved = service.reserve(&chandra, &record.id).expect("reserved");
    assert_eq!(reserved.status, DonationStatus::Reserved);
    assert_eq!(reserved.recipient_id, Some(chandra.id));
}

#[test]
fn second_reserve_conflicts() {
    let (_, service) = donation_setup();
    let record = service
        .create(&user("bina"), &donation_draft())
        .expect("created");

    service.reserve(&user("chandra"), &record.id).expect("reserved");
    match service.reserve(&user("deepak"), &record.id) {
        Err(LifecycleError::Conflict(_)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn reserve_on_missing_donation_is_not_found() {
    let (_, service) = donation_setup();
    match service.reserve(&user("chandra"), &RecordId("don-999999".to_string())) {
        Err(LifecycleError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn concurrent_reserves_have_exactly_one_winner() {
    let (_, service) = donation_setup();
    let service = Arc::new(service);
    let record = service
        .create(&user("bina"), &donation_draft())
        .expect("created");

    const CLAIMANTS: usize = 16;
    let barrier = Arc::new(std::sync::Barrier::new(CLAIMANTS));
    let mut handles = Vec::with_capacity(CLAIMANTS);
    for claimant in 0..CLAIMANTS {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        let id = record.id.clone();
        handles.push(std::thread::spawn(move || {
            let principal = user(&format!("claimant-{claimant}"));
            barrier.wait();
            service.reserve(&principal, &id).map(|record| {
                record
                    .recipient_id
                    .expect("winner carries recipient")
            })
        }));
    }

    let mut winners: Vec<PrincipalId> = Vec::new();
    let mut conflicts = 0;
    for handle in handles {
        match handle.join().expect("thread completes") {
            Ok(recipient) => winners.push(recipient),
            Err(LifecycleError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, CLAIMANTS - 1);

    let stored = service
        .get(&admin("root"), &record.id)
        .expect("fetched after race");
    assert_eq!(stored.status, DonationStatus::Reserved);
    assert_eq!(stored.recipient_id, Some(winners[0].clone()));
}

#[test]
fn list_shows_plain_users_available_pool_plus_their_own() {
    let (_, service) = donation_setup();
    let bina = user("bina");
    let own = service.create(&bina, &donation_draft()).expect("created");
    let pool = service
        .create(&user("esha"), &donation_draft())
        .expect("created");
    let hidden = service
        .create(&user("esha"), &donation_draft())
        .expect("created");
    service.reserve(&user("farid"), &hidden.id).expect("reserved");

    let listed = service.list(&bina).expect("listed");
    let ids: Vec<_> = listed.iter().map(|record| record.id.clone()).collect();
    assert!(ids.contains(&own.id));
    assert!(ids.contains(&pool.id));
    assert!(!ids.contains(&hidden.id));

    for record in &listed {
        assert!(record.status == DonationStatus::Available || record.donor_id == bina.id);
    }

    let all = service.list(&collector("kiran")).expect("listed");
    assert_eq!(all.len(), 3);
}

#[test]
fn reserved_donation_is_forbidden_to_unrelated_plain_users() {
    let (_, service) = donation_setup();
    let record = service
        .create(&user("bina"), &donation_draft())
        .expect("created");
    service.reserve(&user("chandra"), &record.id).expect("reserved");

    match service.get(&user("farid"), &record.id) {
        Err(LifecycleError::Forbidden) => {}
        other => panic!("expected forbidden, got {other:?}"),
    }
}

#[test]
fn pickup_transition_claims_donation_for_collector() {
    let (_, service) = donation_setup();
    let record = service
        .create(&user("bina"), &donation_draft())
        .expect("created");
    service.reserve(&user("chandra"), &record.id).expect("reserved");

    let kiran = collector("kiran");
    let updated = service
        .transition_status(&kiran, &record.id, DonationStatus::PickedUp, None)
        .expect("picked up");

    assert_eq!(updated.status, DonationStatus::PickedUp);
    assert_eq!(updated.assigned_collector_id, Some(kiran.id));
    assert_eq!(updated.recipient_id, Some(user("chandra").id));
}

#[test]
fn overwriting_back_to_available_drops_the_recipient() {
    let (_, service) = donation_setup();
    let record = service
        .create(&user("bina"), &donation_draft())
        .expect("created");
    service.reserve(&user("chandra"), &record.id).expect("reserved");

    let updated = service
        .transition_status(&admin("root"), &record.id, DonationStatus::Available, None)
        .expect("released");
    assert!(updated.recipient_id.is_none());
}

#[test]
fn donor_can_cancel_before_delivery() {
    let (_, service) = donation_setup();
    let bina = user("bina");
    let record = service.create(&bina, &donation_draft()).expect("created");
    service.reserve(&user("chandra"), &record.id).expect("reserved");

    let cancelled = service.cancel(&bina, &record.id).expect("cancelled");
    assert_eq!(cancelled.status, DonationStatus::Cancelled);
    assert!(cancelled.recipient_id.is_none());
}

#[test]
fn delivered_donation_cannot_be_cancelled() {
    let (_, service) = donation_setup();
    let record = service
        .create(&user("bina"), &donation_draft())
        .expect("created");
    service.reserve(&user("chandra"), &record.id).expect("reserved");
    service
        .transition_status(&collector("kiran"), &record.id, DonationStatus::Delivered, None)
        .expect("delivered");

    match service.cancel(&user("bina"), &record.id) {
        Err(LifecycleError::Conflict(_)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}
