use super::common::*;
use crate::lifecycle::domain::DonationStatus;
use crate::lifecycle::policy::{can_act, AccessTarget, Action};

#[test]
fn anyone_may_create() {
    for principal in [user("u1"), collector("c1"), admin("a1")] {
        assert!(can_act(&principal, AccessTarget::New, Action::Create));
    }
}

#[test]
fn owners_and_privileged_roles_may_read_collections() {
    let (_, service) = collection_setup();
    let owner = user("owner");
    let record = service
        .create(&owner, &collection_draft())
        .expect("created");

    let target = AccessTarget::Collection(&record);
    assert!(can_act(&owner, target, Action::Read));
    assert!(can_act(&collector("c1"), target, Action::Read));
    assert!(can_act(&admin("a1"), target, Action::Read));
    assert!(!can_act(&user("someone-else"), target, Action::Read));
}

#[test]
fn available_donations_are_readable_by_anyone() {
    let (_, service) = donation_setup();
    let donor = user("donor");
    let record = service.create(&donor, &donation_draft()).expect("created");

    let target = AccessTarget::Donation(&record);
    assert_eq!(record.status, DonationStatus::Available);
    assert!(can_act(&user("stranger"), target, Action::Read));
}

#[test]
fn reserved_donations_hide_from_plain_users() {
    let (_, service) = donation_setup();
    let donor = user("donor");
    let record = service.create(&donor, &donation_draft()).expect("created");
    let reserved = service
        .reserve(&user("recipient"), &record.id)
        .expect("reserved");

    let target = AccessTarget::Donation(&reserved);
    assert!(can_act(&donor, target, Action::Read));
    assert!(can_act(&collector("c1"), target, Action::Read));
    assert!(!can_act(&user("stranger"), target, Action::Read));
}

#[test]
fn transition_is_gated_to_privileged_roles() {
    let (_, service) = collection_setup();
    let owner = user("owner");
    let record = service
        .create(&owner, &collection_draft())
        .expect("created");

    let target = AccessTarget::Collection(&record);
    assert!(!can_act(&owner, target, Action::TransitionStatus));
    assert!(can_act(&collector("c1"), target, Action::TransitionStatus));
    assert!(can_act(&admin("a1"), target, Action::TransitionStatus));
}

#[test]
fn cancel_is_owner_or_privileged() {
    let (_, service) = collection_setup();
    let owner = user("owner");
    let record = service
        .create(&owner, &collection_draft())
        .expect("created");

    let target = AccessTarget::Collection(&record);
    assert!(can_act(&owner, target, Action::Cancel));
    assert!(can_act(&collector("c1"), target, Action::Cancel));
    assert!(!can_act(&user("someone-else"), target, Action::Cancel));
}

#[test]
fn any_authenticated_principal_may_reserve() {
    let (_, service) = donation_setup();
    let record = service
        .create(&user("donor"), &donation_draft())
        .expect("created");

    let target = AccessTarget::Donation(&record);
    for principal in [user("u1"), collector("c1"), admin("a1")] {
        assert!(can_act(&principal, target, Action::Reserve));
    }
}

#[test]
fn record_scoped_actions_never_apply_to_new() {
    let principal = admin("a1");
    for action in [Action::Read, Action::Cancel, Action::TransitionStatus, Action::Reserve] {
        assert!(!can_act(&principal, AccessTarget::New, action));
    }
}
