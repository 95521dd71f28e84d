use super::domain::Item;

/// Total estimated value of an item list: `(estimated_value ?? 0) × quantity`,
/// summed across items. Pure and deterministic; invoked once at record creation.
/// Item edits never recompute this implicitly — a future edit operation must
/// call it again itself. Quantities below 1 are rejected by draft validation
/// before this runs, never clamped here.
pub fn estimated_total<C>(items: &[Item<C>]) -> f64 {
    items
        .iter()
        .map(|item| item.estimated_value.unwrap_or(0.0) * f64::from(item.quantity))
        .sum()
}
