//! Price breakdown for a selection: subtotal, taxes, discount and total.
//!
//! Amounts are whole currency units. Rounding is half away from zero, which
//! for the non-negative amounts involved matches the checkout page.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Discount, DiscountType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: i64,
    pub taxes: i64,
    pub discount: i64,
    pub total: i64,
}

fn round_units(amount: Decimal) -> Option<i64> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Percentage discounts apply to the subtotal; fixed ones are a flat amount.
/// Nothing caps the discount at the order total.
pub fn discount_amount(subtotal: i64, discount: &Discount) -> Option<i64> {
    match discount.discount_type {
        DiscountType::Percentage => round_units(
            Decimal::from(subtotal).checked_mul(discount.discount_value)? / Decimal::ONE_HUNDRED,
        ),
        DiscountType::Fixed => round_units(discount.discount_value),
    }
}

/// Returns `None` when an amount does not fit in an `i64`.
pub fn quote(
    unit_price: i64,
    quantity: i32,
    tax_rate: Decimal,
    discount: Option<&Discount>,
) -> Option<Quote> {
    let subtotal = unit_price.checked_mul(i64::from(quantity))?;
    let taxes = round_units(Decimal::from(subtotal).checked_mul(tax_rate)?)?;
    let discount = match discount {
        Some(terms) => discount_amount(subtotal, terms)?,
        None => 0,
    };
    let total = subtotal.checked_add(taxes)?.checked_sub(discount)?;

    Some(Quote {
        subtotal,
        taxes,
        discount,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax_rate() -> Decimal {
        Decimal::new(59, 3)
    }

    fn percent(value: i64) -> Discount {
        Discount {
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(value),
        }
    }

    fn fixed(value: i64) -> Discount {
        Discount {
            discount_type: DiscountType::Fixed,
            discount_value: Decimal::from(value),
        }
    }

    #[test]
    fn two_kayaking_seats_with_ten_percent_off() {
        let q = quote(999, 2, tax_rate(), Some(&percent(10))).expect("fits");
        assert_eq!(q.subtotal, 1998);
        assert_eq!(q.taxes, 118);
        assert_eq!(q.discount, 200);
        assert_eq!(q.total, 1998 + 118 - 200);
    }

    #[test]
    fn no_discount_matches_checkout_page() {
        let q = quote(1299, 1, tax_rate(), None).expect("fits");
        assert_eq!(q.subtotal, 1299);
        // 1299 * 0.059 = 76.641
        assert_eq!(q.taxes, 77);
        assert_eq!(q.discount, 0);
        assert_eq!(q.total, 1376);
    }

    #[test]
    fn fixed_discount_is_flat() {
        let q = quote(899, 3, tax_rate(), Some(&fixed(100))).expect("fits");
        assert_eq!(q.subtotal, 2697);
        assert_eq!(q.discount, 100);
        assert_eq!(q.total, q.subtotal + q.taxes - 100);
    }

    #[test]
    fn fixed_discount_can_push_total_negative() {
        let q = quote(50, 1, Decimal::ZERO, Some(&fixed(100))).expect("fits");
        assert_eq!(q.total, -50);
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 5% of 10 = 0.5
        assert_eq!(discount_amount(10, &percent(5)), Some(1));
        // 5% of 9 = 0.45
        assert_eq!(discount_amount(9, &percent(5)), Some(0));
    }

    #[test]
    fn fractional_percentage_values_are_honoured() {
        let terms = Discount {
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(125, 1),
        };
        // 12.5% of 1000
        assert_eq!(discount_amount(1000, &terms), Some(125));
    }

    #[test]
    fn overflow_yields_none() {
        assert_eq!(quote(i64::MAX, 2, tax_rate(), None), None);
    }
}
