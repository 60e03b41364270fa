//! Catálogo de categorías de carga y sus tipos específicos.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Categorías en el orden en que se presentan.
pub const CARGO_CATEGORIES: &[(&str, &[&str])] =
    &[("General Cargo",
       &["Electronics",
         "Textiles & Clothing",
         "Furniture & Home Goods",
         "Books & Documents",
         "Sporting Goods",
         "Toys & Games",
         "Other General Cargo"]),
      ("Food & Beverages",
       &["Fresh Food",
         "Frozen Food",
         "Dry Food Products",
         "Beverages",
         "Perishable Goods",
         "Temperature Controlled"]),
      ("Industrial Goods",
       &["Machinery & Equipment",
         "Raw Materials",
         "Construction Materials",
         "Automotive Parts",
         "Tools & Hardware",
         "Metal Products"]),
      ("Chemicals & Hazardous",
       &["Non-Hazardous Chemicals",
         "Hazardous Materials (DG)",
         "Pharmaceuticals",
         "Cosmetics & Personal Care",
         "Cleaning Products"]),
      ("Bulk Cargo",
       &["Liquid Bulk", "Dry Bulk", "Grain & Agricultural", "Coal & Minerals", "Petroleum Products"]),
      ("Special Cargo",
       &["Oversized/Heavy Lift",
         "Refrigerated",
         "Live Animals",
         "Artwork & Antiques",
         "Medical Equipment",
         "Project Cargo"])];

static BY_CATEGORY: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| CARGO_CATEGORIES.iter().copied().collect());

pub fn categories() -> impl Iterator<Item = &'static str> {
    CARGO_CATEGORIES.iter().map(|(c, _)| *c)
}

/// Tipos disponibles para una categoría. Vacío si la categoría no existe.
pub fn cargo_types(category: &str) -> &'static [&'static str] {
    BY_CATEGORY.get(category).copied().unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_category() {
        assert_eq!(categories().count(), 6);
        assert_eq!(cargo_types("Bulk Cargo").len(), 5);
        assert!(cargo_types("Special Cargo").contains(&"Live Animals"));
        assert!(cargo_types("Unknown").is_empty());
    }
}
