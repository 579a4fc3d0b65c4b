//! Display-only formatting for table cells.

/// Minutes as hours and remaining minutes: `125` → `"2j 5m"`.
pub fn format_duration(minutes: u32) -> String {
    format!("{}j {}m", minutes / 60, minutes % 60)
}

/// Rupiah-prefixed price literal: `850000.0` → `"Rp850000"`.
pub fn format_price(price: f64) -> String {
    format!("Rp{price}")
}
