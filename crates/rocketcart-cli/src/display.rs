//! Plain-text rendering of the cart for the terminal.

use std::fmt::Write;

use rocketcart_core::utils::{format_price, truncate_string};
use rocketcart_core::{CartChange, CartItem, CartSummary};

/// Width of the product title column
const TITLE_WIDTH: usize = 36;

pub fn describe_change(change: &CartChange) -> Option<String> {
    match change {
        CartChange::Added(item) => Some(format!("Added {} ({})", item.title, item.id)),
        CartChange::AmountChanged { product_id, from, to } => {
            Some(format!("Product {}: {} -> {}", product_id, from, to))
        }
        CartChange::Removed(item) => Some(format!("Removed {} ({})", item.title, item.id)),
        CartChange::Cleared { removed } => Some(format!("Cleared {} item(s)", removed)),
        CartChange::Unchanged => None,
    }
}

pub fn render_cart(items: &[CartItem]) -> String {
    if items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<width$}  {:>14}  {:>6}  {:>14}",
        "ID",
        "PRODUCT",
        "PRICE",
        "QTY",
        "SUBTOTAL",
        width = TITLE_WIDTH
    );
    for item in items {
        let _ = writeln!(
            out,
            "{:>6}  {:<width$}  {:>14}  {:>6}  {:>14}",
            item.id,
            truncate_string(&item.title, TITLE_WIDTH),
            format_price(item.price),
            item.amount,
            format_price(item.line_total()),
            width = TITLE_WIDTH
        );
    }

    let summary = CartSummary::of(items);
    let _ = writeln!(
        out,
        "{} product(s), {} unit(s), total {}",
        summary.distinct_items,
        summary.total_units,
        format_price(summary.subtotal)
    );
    out
}
