//! Money arithmetic for cart and order lines.
//!
//! Amounts are `rust_decimal::Decimal` in the store currency's major unit
//! (dollars, not cents).

use rust_decimal::Decimal;

/// `unit_price × quantity` for a single line.
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// The same amount expressed with exactly two decimal places.
pub fn with_cents(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount
}

/// Sum of line subtotals over `(unit_price, quantity)` pairs.
pub fn lines_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| line_subtotal(price, quantity))
        .sum()
}
