//! Named-entity display categories.

use matrix_model::EntityCategory;

/// Map an entity-type label to its display category.
///
/// Total: labels outside the known set map to [`EntityCategory::Other`].
pub fn entity_category(label: &str) -> EntityCategory {
    match label.trim().to_ascii_uppercase().as_str() {
        "PERSON" => EntityCategory::Person,
        "ORGANIZATION" => EntityCategory::Organization,
        "LOCATION" => EntityCategory::Location,
        "DATE" => EntityCategory::Date,
        "TIME" => EntityCategory::Time,
        "MONEY" => EntityCategory::Money,
        "PERCENT" => EntityCategory::Percent,
        _ => EntityCategory::Other,
    }
}
