//! Stock-status filter applied to shopping-list views.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Which products a view keeps, by stock status.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFilter {
    /// Keep everything.
    #[default]
    All,
    /// Keep only products currently in stock.
    InStock,
    /// Keep only products that still need to be bought.
    Needed,
}

impl ProductFilter {
    pub fn matches(self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::InStock => product.in_stock,
            ProductFilter::Needed => !product.in_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_select_by_stock_status() {
        let mut milk = Product::new("Milk");
        milk.in_stock = false;
        let mut bread = Product::new("Bread");
        bread.in_stock = true;

        assert!(ProductFilter::All.matches(&milk));
        assert!(ProductFilter::All.matches(&bread));
        assert!(!ProductFilter::InStock.matches(&milk));
        assert!(ProductFilter::InStock.matches(&bread));
        assert!(ProductFilter::Needed.matches(&milk));
        assert!(!ProductFilter::Needed.matches(&bread));
    }
}
