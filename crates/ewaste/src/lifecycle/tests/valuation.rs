use crate::lifecycle::domain::{CollectionCondition, Item, ItemCategory};
use crate::lifecycle::valuation::estimated_total;

fn item(quantity: u32, estimated_value: Option<f64>) -> Item<CollectionCondition> {
    Item {
        category: ItemCategory::Laptop,
        brand: None,
        model: None,
        condition: CollectionCondition::Unknown,
        quantity,
        description: None,
        estimated_value,
    }
}

#[test]
fn total_multiplies_value_by_quantity() {
    let items = vec![item(2, Some(500.0))];
    assert_eq!(estimated_total(&items), 1000.0);
}

#[test]
fn missing_values_count_as_zero() {
    let items = vec![item(3, None), item(1, Some(75.5)), item(2, Some(10.0))];
    assert_eq!(estimated_total(&items), 95.5);
}

#[test]
fn empty_list_totals_zero() {
    let items: Vec<Item<CollectionCondition>> = Vec::new();
    assert_eq!(estimated_total(&items), 0.0);
}
