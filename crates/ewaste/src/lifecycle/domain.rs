use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for principals supplied by the external identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub String);

/// Identifier wrapper for lifecycle records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Closed role set. Unknown role strings are rejected at the boundary instead of
/// falling through to a permissive default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Collector,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Collector => "collector",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "user" => Some(Role::User),
            "collector" => Some(Role::Collector),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Collectors and admins share the privileged operations.
    pub const fn is_privileged(self) -> bool {
        match self {
            Role::User => false,
            Role::Collector | Role::Admin => true,
        }
    }
}

/// The authenticated actor issuing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: Role,
}

/// Device categories accepted for both collections and donations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Laptop,
    Desktop,
    Mobile,
    Tablet,
    Monitor,
    Keyboard,
    Mouse,
    Printer,
    Router,
    Other,
}

impl ItemCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ItemCategory::Laptop => "laptop",
            ItemCategory::Desktop => "desktop",
            ItemCategory::Mobile => "mobile",
            ItemCategory::Tablet => "tablet",
            ItemCategory::Monitor => "monitor",
            ItemCategory::Keyboard => "keyboard",
            ItemCategory::Mouse => "mouse",
            ItemCategory::Printer => "printer",
            ItemCategory::Router => "router",
            ItemCategory::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "laptop" => Some(ItemCategory::Laptop),
            "desktop" => Some(ItemCategory::Desktop),
            "mobile" => Some(ItemCategory::Mobile),
            "tablet" => Some(ItemCategory::Tablet),
            "monitor" => Some(ItemCategory::Monitor),
            "keyboard" => Some(ItemCategory::Keyboard),
            "mouse" => Some(ItemCategory::Mouse),
            "printer" => Some(ItemCategory::Printer),
            "router" => Some(ItemCategory::Router),
            "other" => Some(ItemCategory::Other),
            _ => None,
        }
    }
}

/// Condition scale for items scheduled for recycling pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionCondition {
    Working,
    NotWorking,
    Damaged,
    Unknown,
}

impl CollectionCondition {
    pub const fn label(self) -> &'static str {
        match self {
            CollectionCondition::Working => "working",
            CollectionCondition::NotWorking => "not_working",
            CollectionCondition::Damaged => "damaged",
            CollectionCondition::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "working" => Some(CollectionCondition::Working),
            "not_working" => Some(CollectionCondition::NotWorking),
            "damaged" => Some(CollectionCondition::Damaged),
            "unknown" => Some(CollectionCondition::Unknown),
            _ => None,
        }
    }
}

/// Condition scale for donated devices. Required on every donated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl DonationCondition {
    pub const fn label(self) -> &'static str {
        match self {
            DonationCondition::Excellent => "excellent",
            DonationCondition::Good => "good",
            DonationCondition::Fair => "fair",
            DonationCondition::Poor => "poor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "excellent" => Some(DonationCondition::Excellent),
            "good" => Some(DonationCondition::Good),
            "fair" => Some(DonationCondition::Fair),
            "poor" => Some(DonationCondition::Poor),
            _ => None,
        }
    }
}

/// A single device entry within a collection or donation. The condition scale
/// differs between the two record types, so it is a type parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item<C> {
    pub category: ItemCategory,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: C,
    pub quantity: u32,
    pub description: Option<String>,
    pub estimated_value: Option<f64>,
}

/// Embedded pickup address value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub landmark: Option<String>,
}

pub const DEFAULT_COUNTRY: &str = "India";

/// Pickup window within the preferred date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "morning" => Some(TimeSlot::Morning),
            "afternoon" => Some(TimeSlot::Afternoon),
            "evening" => Some(TimeSlot::Evening),
            _ => None,
        }
    }
}

/// Declared intent behind a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationPurpose {
    Education,
    Charity,
    Community,
    Refurbishment,
    Other,
}

impl DonationPurpose {
    pub const fn label(self) -> &'static str {
        match self {
            DonationPurpose::Education => "education",
            DonationPurpose::Charity => "charity",
            DonationPurpose::Community => "community",
            DonationPurpose::Refurbishment => "refurbishment",
            DonationPurpose::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "education" => Some(DonationPurpose::Education),
            "charity" => Some(DonationPurpose::Charity),
            "community" => Some(DonationPurpose::Community),
            "refurbishment" => Some(DonationPurpose::Refurbishment),
            "other" => Some(DonationPurpose::Other),
            _ => None,
        }
    }
}

/// Collection request statuses. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl CollectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CollectionStatus::Pending => "pending",
            CollectionStatus::Scheduled => "scheduled",
            CollectionStatus::InProgress => "in_progress",
            CollectionStatus::Completed => "completed",
            CollectionStatus::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, CollectionStatus::Completed | CollectionStatus::Cancelled)
    }

    /// Statuses whose assignment claims the collection for the acting collector.
    pub const fn claims_collector(self) -> bool {
        matches!(self, CollectionStatus::Scheduled | CollectionStatus::InProgress)
    }
}

/// Donation statuses. `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Available,
    Reserved,
    PickedUp,
    Delivered,
    Cancelled,
}

impl DonationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Reserved => "reserved",
            DonationStatus::PickedUp => "picked_up",
            DonationStatus::Delivered => "delivered",
            DonationStatus::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, DonationStatus::Delivered | DonationStatus::Cancelled)
    }

    pub const fn claims_collector(self) -> bool {
        matches!(self, DonationStatus::PickedUp | DonationStatus::Delivered)
    }

    /// Statuses that carry a recipient reference.
    pub const fn carries_recipient(self) -> bool {
        matches!(
            self,
            DonationStatus::Reserved | DonationStatus::PickedUp | DonationStatus::Delivered
        )
    }
}

/// A request to have e-waste picked up for recycling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: RecordId,
    pub owner_id: PrincipalId,
    pub items: Vec<Item<CollectionCondition>>,
    pub pickup_address: Address,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub status: CollectionStatus,
    pub assigned_collector_id: Option<PrincipalId>,
    pub notes: Option<String>,
    pub total_estimated_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An offer of working devices, claimable by another principal via reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: RecordId,
    pub donor_id: PrincipalId,
    pub recipient_id: Option<PrincipalId>,
    pub items: Vec<Item<DonationCondition>>,
    pub pickup_address: Address,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub status: DonationStatus,
    pub assigned_collector_id: Option<PrincipalId>,
    pub donation_purpose: DonationPurpose,
    pub notes: Option<String>,
    pub total_estimated_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
