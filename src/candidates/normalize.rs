// src/candidates/normalize.rs

pub const PRODUCT: &str = "Product";

/// Collapse the free-text product-management variants into one `Product` bucket.
pub fn normalize_tech(tech: &str) -> String {
    if tech.to_lowercase().contains("product") {
        PRODUCT.to_string()
    } else {
        tech.to_string()
    }
}
