//! Client-side filtering for the product table.

use crate::validation::parse_number;
use crate::ProductListing;

/// Filter inputs as typed by the operator. Blank or unparsable price
/// bounds are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: String,
    pub category: String,
    pub min_price: String,
    pub max_price: String,
}

impl ProductFilter {
    pub fn matches(&self, product: &ProductListing) -> bool {
        let needle = self.name.trim().to_lowercase();
        let name_ok = needle.is_empty() || product.product_name.to_lowercase().contains(&needle);

        let category_ok = self.category.is_empty()
            || product.category_name.as_deref() == Some(self.category.as_str());

        let min_ok = parse_number(&self.min_price).map_or(true, |min| product.price >= min);
        let max_ok = parse_number(&self.max_price).map_or(true, |max| product.price <= max);

        name_ok && category_ok && min_ok && max_ok
    }

    pub fn apply<'a>(&self, products: &'a [ProductListing]) -> Vec<&'a ProductListing> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct category names in first-seen order.
pub fn category_names(products: &[ProductListing]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in products.iter().filter_map(|p| p.category_name.as_ref()) {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}
