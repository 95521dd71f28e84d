use super::common::*;
use crate::lifecycle::domain::{CollectionCondition, TimeSlot, DEFAULT_COUNTRY};
use crate::lifecycle::draft::{CollectionDraft, DonationDraft, ItemDraft};

#[test]
fn valid_collection_draft_parses() {
    let parsed = collection_draft().validate().expect("valid draft");
    assert_eq!(parsed.items.len(), 1);
    assert_eq!(parsed.preferred_time_slot, TimeSlot::Morning);
    assert_eq!(parsed.pickup_address.country, DEFAULT_COUNTRY);
}

#[test]
fn empty_item_list_is_rejected() {
    let mut draft = collection_draft();
    draft.items.clear();
    let errors = draft.validate().expect_err("missing items");
    assert_eq!(errors.fields(), vec!["items"]);
}

#[test]
fn every_violated_field_is_reported_together() {
    let draft = CollectionDraft {
        items: Vec::new(),
        pickup_address: None,
        preferred_date: Some("next tuesday".to_string()),
        preferred_time_slot: Some("midnight".to_string()),
        notes: None,
    };
    let errors = draft.validate().expect_err("invalid draft");
    let fields = errors.fields();
    assert!(fields.contains(&"items"));
    assert!(fields.contains(&"pickupAddress.street"));
    assert!(fields.contains(&"pickupAddress.city"));
    assert!(fields.contains(&"pickupAddress.state"));
    assert!(fields.contains(&"pickupAddress.zipCode"));
    assert!(fields.contains(&"preferredDate"));
    assert!(fields.contains(&"preferredTimeSlot"));
}

#[test]
fn blank_address_fields_count_as_missing() {
    let mut draft = collection_draft();
    let mut address = address_draft();
    address.city = Some("   ".to_string());
    draft.pickup_address = Some(address);
    let errors = draft.validate().expect_err("blank city");
    assert_eq!(errors.fields(), vec!["pickupAddress.city"]);
}

#[test]
fn zero_quantity_is_rejected_not_clamped() {
    let mut draft = collection_draft();
    draft.items = vec![laptop_item(0, Some(100.0))];
    let errors = draft.validate().expect_err("zero quantity");
    assert_eq!(errors.fields(), vec!["items[0].quantity"]);
}

#[test]
fn negative_estimated_value_is_rejected() {
    let mut draft = collection_draft();
    draft.items = vec![laptop_item(1, Some(-5.0))];
    let errors = draft.validate().expect_err("negative value");
    assert_eq!(errors.fields(), vec!["items[0].estimatedValue"]);
}

#[test]
fn unknown_category_is_rejected_with_item_path() {
    let mut draft = collection_draft();
    draft.items = vec![
        laptop_item(1, None),
        ItemDraft {
            category: Some("fridge".to_string()),
            ..ItemDraft::default()
        },
    ];
    let errors = draft.validate().expect_err("bad category");
    assert_eq!(errors.fields(), vec!["items[1].category"]);
}

#[test]
fn collection_condition_defaults_to_unknown() {
    let mut draft = collection_draft();
    draft.items[0].condition = None;
    let parsed = draft.validate().expect("valid draft");
    assert_eq!(parsed.items[0].condition, CollectionCondition::Unknown);
}

#[test]
fn donation_condition_is_required() {
    let mut draft = donation_draft();
    draft.items[0].condition = None;
    let errors = draft.validate().expect_err("missing condition");
    assert_eq!(errors.fields(), vec!["items[0].condition"]);
}

#[test]
fn donation_purpose_is_required_and_closed() {
    let mut draft = donation_draft();
    draft.donation_purpose = None;
    let errors = draft.validate().expect_err("missing purpose");
    assert_eq!(errors.fields(), vec!["donationPurpose"]);

    let mut draft = donation_draft();
    draft.donation_purpose = Some("resale".to_string());
    let errors = draft.validate().expect_err("unknown purpose");
    assert_eq!(errors.fields(), vec!["donationPurpose"]);
}

#[test]
fn donation_draft_deserializes_from_camel_case_json() {
    let draft: DonationDraft = serde_json::from_value(serde_json::json!({
        "items": [{ "category": "tablet", "condition": "fair", "estimatedValue": 40.0 }],
        "pickupAddress": {
            "street": "2 Park Lane",
            "city": "Pune",
            "state": "Maharashtra",
            "zipCode": "411001"
        },
        "preferredDate": "2026-10-01",
        "preferredTimeSlot": "afternoon",
        "donationPurpose": "charity"
    }))
    .expect("deserializes");
    let parsed = draft.validate().expect("valid draft");
    assert_eq!(parsed.items[0].quantity, 1);
    assert_eq!(parsed.items[0].estimated_value, Some(40.0));
}
