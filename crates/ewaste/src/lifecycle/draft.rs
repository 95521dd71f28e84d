use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    Address, CollectionCondition, DonationCondition, DonationPurpose, Item, ItemCategory, TimeSlot,
    DEFAULT_COUNTRY,
};

/// One violated constraint, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every violated field of a payload, reported together rather than
/// short-circuiting on the first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid payload: ")?;
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

/// Inbound item payload. Closed-set fields stay open strings here so a bad
/// category and a bad time slot in the same payload surface as one combined
/// validation failure instead of a deserialization error on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
}

/// Payload for creating a collection request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDraft {
    #[serde(default)]
    pub items: Vec<ItemDraft>,
    #[serde(default)]
    pub pickup_address: Option<AddressDraft>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time_slot: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for creating a donation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationDraft {
    #[serde(default)]
    pub items: Vec<ItemDraft>,
    #[serde(default)]
    pub pickup_address: Option<AddressDraft>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time_slot: Option<String>,
    #[serde(default)]
    pub donation_purpose: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated attributes ready to become a `Collection`.
#[derive(Debug, Clone)]
pub struct NewCollection {
    pub items: Vec<Item<CollectionCondition>>,
    pub pickup_address: Address,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub notes: Option<String>,
}

/// Validated attributes ready to become a `Donation`.
#[derive(Debug, Clone)]
pub struct NewDonation {
    pub items: Vec<Item<DonationCondition>>,
    pub pickup_address: Address,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub donation_purpose: DonationPurpose,
    pub notes: Option<String>,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn required_text(
    errors: &mut Violations,
    field: &str,
    value: Option<&String>,
    message: &str,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => {
            errors.push(field, message);
            None
        }
    }
}

fn validate_address(errors: &mut Violations, draft: Option<&AddressDraft>) -> Option<Address> {
    let empty = AddressDraft::default();
    let draft = match draft {
        Some(draft) => draft,
        None => &empty,
    };

    let street = required_text(
        errors,
        "pickupAddress.street",
        draft.street.as_ref(),
        "street address is required",
    );
    let city = required_text(
        errors,
        "pickupAddress.city",
        draft.city.as_ref(),
        "city is required",
    );
    let state = required_text(
        errors,
        "pickupAddress.state",
        draft.state.as_ref(),
        "state is required",
    );
    let zip_code = required_text(
        errors,
        "pickupAddress.zipCode",
        draft.zip_code.as_ref(),
        "zip code is required",
    );

    Some(Address {
        street: street?,
        city: city?,
        state: state?,
        zip_code: zip_code?,
        country: draft
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COUNTRY)
            .to_string(),
        landmark: draft.landmark.clone(),
    })
}

fn validate_date(errors: &mut Violations, raw: Option<&String>) -> Option<NaiveDate> {
    match raw {
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("preferredDate", "valid preferred date is required");
                None
            }
        },
        None => {
            errors.push("preferredDate", "valid preferred date is required");
            None
        }
    }
}

fn validate_time_slot(errors: &mut Violations, raw: Option<&String>) -> Option<TimeSlot> {
    match raw.and_then(|slot| TimeSlot::parse(slot)) {
        Some(slot) => Some(slot),
        None => {
            errors.push("preferredTimeSlot", "valid time slot is required");
            None
        }
    }
}

fn validate_item_common(
    errors: &mut Violations,
    index: usize,
    draft: &ItemDraft,
) -> (Option<ItemCategory>, u32, Option<f64>) {
    let category = match draft.category.as_deref().and_then(ItemCategory::parse) {
        Some(category) => Some(category),
        None => {
            errors.push(format!("items[{index}].category"), "valid category is required");
            None
        }
    };

    let quantity = draft.quantity.unwrap_or(1);
    if quantity < 1 {
        errors.push(
            format!("items[{index}].quantity"),
            "quantity must be at least 1",
        );
    }

    let estimated_value = draft.estimated_value;
    if let Some(value) = estimated_value {
        if !value.is_finite() || value < 0.0 {
            errors.push(
                format!("items[{index}].estimatedValue"),
                "estimated value must be a non-negative number",
            );
        }
    }

    (category, quantity, estimated_value)
}

fn validate_collection_items(
    errors: &mut Violations,
    drafts: &[ItemDraft],
) -> Vec<Item<CollectionCondition>> {
    if drafts.is_empty() {
        errors.push("items", "at least one item is required");
        return Vec::new();
    }

    let mut items = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let (category, quantity, estimated_value) = validate_item_common(errors, index, draft);

        // Unset conditions default to unknown on recycling pickups.
        let condition = match draft.condition.as_deref() {
            None => Some(CollectionCondition::Unknown),
            Some(raw) => match CollectionCondition::parse(raw) {
                Some(condition) => Some(condition),
                None => {
                    errors.push(
                        format!("items[{index}].condition"),
                        "valid condition is required",
                    );
                    None
                }
            },
        };

        if let (Some(category), Some(condition)) = (category, condition) {
            items.push(Item {
                category,
                brand: draft.brand.clone(),
                model: draft.model.clone(),
                condition,
                quantity,
                description: draft.description.clone(),
                estimated_value,
            });
        }
    }
    items
}

fn validate_donation_items(
    errors: &mut Violations,
    drafts: &[ItemDraft],
) -> Vec<Item<DonationCondition>> {
    if drafts.is_empty() {
        errors.push("items", "at least one item is required");
        return Vec::new();
    }

    let mut items = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let (category, quantity, estimated_value) = validate_item_common(errors, index, draft);

        let condition = match draft.condition.as_deref().and_then(DonationCondition::parse) {
            Some(condition) => Some(condition),
            None => {
                errors.push(
                    format!("items[{index}].condition"),
                    "valid condition is required",
                );
                None
            }
        };

        if let (Some(category), Some(condition)) = (category, condition) {
            items.push(Item {
                category,
                brand: draft.brand.clone(),
                model: draft.model.clone(),
                condition,
                quantity,
                description: draft.description.clone(),
                estimated_value,
            });
        }
    }
    items
}

impl CollectionDraft {
    pub fn validate(&self) -> Result<NewCollection, ValidationErrors> {
        let mut errors = Violations::default();

        let items = validate_collection_items(&mut errors, &self.items);
        let pickup_address = validate_address(&mut errors, self.pickup_address.as_ref());
        let preferred_date = validate_date(&mut errors, self.preferred_date.as_ref());
        let preferred_time_slot = validate_time_slot(&mut errors, self.preferred_time_slot.as_ref());

        errors.finish()?;
        Ok(NewCollection {
            items,
            // The finish() above guarantees every component parsed.
            pickup_address: pickup_address.expect("validated address"),
            preferred_date: preferred_date.expect("validated date"),
            preferred_time_slot: preferred_time_slot.expect("validated time slot"),
            notes: self.notes.clone(),
        })
    }
}

impl DonationDraft {
    pub fn validate(&self) -> Result<NewDonation, ValidationErrors> {
        let mut errors = Violations::default();

        let items = validate_donation_items(&mut errors, &self.items);
        let pickup_address = validate_address(&mut errors, self.pickup_address.as_ref());
        let preferred_date = validate_date(&mut errors, self.preferred_date.as_ref());
        let preferred_time_slot = validate_time_slot(&mut errors, self.preferred_time_slot.as_ref());

        let donation_purpose = match self
            .donation_purpose
            .as_deref()
            .and_then(DonationPurpose::parse)
        {
            Some(purpose) => Some(purpose),
            None => {
                errors.push("donationPurpose", "valid donation purpose is required");
                None
            }
        };

        errors.finish()?;
        Ok(NewDonation {
            items,
            pickup_address: pickup_address.expect("validated address"),
            preferred_date: preferred_date.expect("validated date"),
            preferred_time_slot: preferred_time_slot.expect("validated time slot"),
            donation_purpose: donation_purpose.expect("validated purpose"),
            notes: self.notes.clone(),
        })
    }
}
