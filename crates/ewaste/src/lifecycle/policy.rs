use super::domain::{Collection, Donation, DonationStatus, Principal};

/// Record-level actions gated by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Cancel,
    TransitionStatus,
    Reserve,
}

/// The record an action targets. `New` covers creation, where no record exists
/// yet and the caller becomes the owner.
#[derive(Debug, Clone, Copy)]
pub enum AccessTarget<'a> {
    Collection(&'a Collection),
    Donation(&'a Donation),
    New,
}

impl AccessTarget<'_> {
    fn owned_by(&self, principal: &Principal) -> bool {
        match self {
            AccessTarget::Collection(collection) => collection.owner_id == principal.id,
            AccessTarget::Donation(donation) => donation.donor_id == principal.id,
            AccessTarget::New => false,
        }
    }

    /// Available donations sit in the shared pool and are readable by anyone.
    fn open_to_all_readers(&self) -> bool {
        match self {
            AccessTarget::Donation(donation) => donation.status == DonationStatus::Available,
            AccessTarget::Collection(_) | AccessTarget::New => false,
        }
    }
}

/// Central authorization predicate consulted by every lifecycle operation.
/// Callers resolve the record first; a missing id fails as not-found before
/// this runs, so existence leaks only through the result category.
pub fn can_act(principal: &Principal, target: AccessTarget<'_>, action: Action) -> bool {
    match action {
        Action::Create => true,
        Action::Reserve => !matches!(target, AccessTarget::New),
        Action::Read => {
            if principal.role.is_privileged() {
                !matches!(target, AccessTarget::New)
            } else {
                target.owned_by(principal) || target.open_to_all_readers()
            }
        }
        Action::Cancel => {
            if principal.role.is_privileged() {
                !matches!(target, AccessTarget::New)
            } else {
                target.owned_by(principal)
            }
        }
        Action::TransitionStatus => {
            principal.role.is_privileged() && !matches!(target, AccessTarget::New)
        }
    }
}
