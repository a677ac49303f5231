//! Currency policy: supported currencies, per-payment-method currency rules,
//! and conversions between API decimal amounts and integer smallest units.
//!
//! The tables are immutable statics and safe to read from any thread.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, XPayError};

/// Currency used when a payment method has no rule of its own.
pub const FALLBACK_CURRENCY: &str = "USD";

/// Display and precision information for a supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimal_places: u32,
    pub smallest_unit_name: &'static str,
}

/// Currency rules for one payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentMethodRule {
    pub payment_method: &'static str,
    pub supported_currencies: &'static [&'static str],
    pub default_currency: &'static str,
    pub regions: &'static [&'static str],
}

pub static SUPPORTED_CURRENCIES: [CurrencyInfo; 4] = [
    CurrencyInfo {
        code: "USD",
        name: "US Dollar",
        symbol: "$",
        decimal_places: 2,
        smallest_unit_name: "cents",
    },
    CurrencyInfo {
        code: "GHS",
        name: "Ghanaian Cedi",
        symbol: "₵",
        decimal_places: 2,
        smallest_unit_name: "pesewas",
    },
    CurrencyInfo {
        code: "EUR",
        name: "Euro",
        symbol: "€",
        decimal_places: 2,
        smallest_unit_name: "cents",
    },
    CurrencyInfo {
        code: "GBP",
        name: "British Pound",
        symbol: "£",
        decimal_places: 2,
        smallest_unit_name: "pence",
    },
];

pub static PAYMENT_METHODS: [PaymentMethodRule; 7] = [
    PaymentMethodRule {
        payment_method: "stripe",
        supported_currencies: &["USD", "EUR", "GBP", "GHS"],
        default_currency: "USD",
        regions: &["US", "EU", "GB", "GH"],
    },
    PaymentMethodRule {
        payment_method: "momo",
        supported_currencies: &["GHS"],
        default_currency: "GHS",
        regions: &["GH"],
    },
    PaymentMethodRule {
        payment_method: "momo_liberia",
        supported_currencies: &["USD"],
        default_currency: "USD",
        regions: &["LR"],
    },
    PaymentMethodRule {
        payment_method: "momo_nigeria",
        supported_currencies: &["USD"],
        default_currency: "USD",
        regions: &["NG"],
    },
    PaymentMethodRule {
        payment_method: "momo_uganda",
        supported_currencies: &["USD"],
        default_currency: "USD",
        regions: &["UG"],
    },
    PaymentMethodRule {
        payment_method: "momo_rwanda",
        supported_currencies: &["USD"],
        default_currency: "USD",
        regions: &["RW"],
    },
    PaymentMethodRule {
        payment_method: "xpay_wallet",
        supported_currencies: &["USD", "GHS", "EUR"],
        default_currency: "USD",
        regions: &["US", "GH", "EU"],
    },
];

pub fn currency_info(code: &str) -> Option<&'static CurrencyInfo> {
    SUPPORTED_CURRENCIES.iter().find(|c| c.code == code)
}

pub fn is_supported_currency(code: &str) -> bool {
    currency_info(code).is_some()
}

pub fn payment_method_rule(payment_method: &str) -> Option<&'static PaymentMethodRule> {
    PAYMENT_METHODS
        .iter()
        .find(|rule| rule.payment_method == payment_method)
}

fn require_currency(code: &str) -> Result<&'static CurrencyInfo> {
    currency_info(code).ok_or_else(|| XPayError::validation(format!("Unsupported currency: {code}")))
}

fn unit_factor(info: &CurrencyInfo) -> Decimal {
    Decimal::from(10_i64.pow(info.decimal_places))
}

/// Default currency of a payment method.
///
/// Unknown methods yield [`FALLBACK_CURRENCY`] rather than an error; use
/// [`validate_currency`] when strictness is needed.
pub fn default_currency(payment_method: &str) -> &'static str {
    payment_method_rule(payment_method)
        .map(|rule| rule.default_currency)
        .unwrap_or(FALLBACK_CURRENCY)
}

/// Currencies accepted by a payment method, empty for unknown methods.
pub fn supported_currencies(payment_method: &str) -> &'static [&'static str] {
    payment_method_rule(payment_method)
        .map(|rule| rule.supported_currencies)
        .unwrap_or(&[])
}

/// Check that `currency` may be used with `payment_method`.
pub fn validate_currency(payment_method: &str, currency: &str) -> Result<()> {
    let Some(rule) = payment_method_rule(payment_method) else {
        return Err(XPayError::validation(format!(
            "Unsupported payment method: {payment_method}"
        )));
    };

    if !rule.supported_currencies.contains(&currency) {
        return Err(XPayError::validation(format!(
            "Currency {currency} is not supported for payment method {payment_method}. \
             Supported currencies: {}",
            rule.supported_currencies.join(", ")
        )));
    }

    Ok(())
}

/// Convert a decimal amount into the currency's smallest unit, rounding half
/// away from zero (`10.50` USD becomes `1050`).
pub fn to_smallest_unit(amount: Decimal, currency: &str) -> Result<i64> {
    let info = require_currency(currency)?;
    amount
        .checked_mul(unit_factor(info))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|units| units.to_i64())
        .ok_or_else(|| XPayError::validation(format!("Amount out of range: {amount} {currency}")))
}

/// Convert a smallest-unit amount back into a decimal amount.
pub fn from_smallest_unit(amount: i64, currency: &str) -> Result<Decimal> {
    let info = require_currency(currency)?;
    Ok(Decimal::new(amount, info.decimal_places))
}

/// Render an amount with its currency symbol, e.g. `$1,234.50`.
///
/// When `is_smallest_unit` is set, `amount` is truncated to an integer and
/// converted from the smallest unit first.
pub fn format_amount(amount: Decimal, currency: &str, is_smallest_unit: bool) -> Result<String> {
    let info = require_currency(currency)?;
    let display = if is_smallest_unit {
        let units = amount.trunc().to_i64().ok_or_else(|| {
            XPayError::validation(format!("Amount out of range: {amount} {currency}"))
        })?;
        from_smallest_unit(units, currency)?
    } else {
        amount
    };
    Ok(format!(
        "{}{}",
        info.symbol,
        group_thousands(&fixed_point(display, info.decimal_places))
    ))
}

fn fixed_point(amount: Decimal, decimal_places: u32) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    rounded.to_string()
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// An exact amount of money in a supported currency, held in smallest units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    amount: i64,
    currency: &'static CurrencyInfo,
}

impl Money {
    pub fn new(amount: i64, currency: &str) -> Result<Self> {
        Ok(Self {
            amount,
            currency: require_currency(currency)?,
        })
    }

    /// Build from an API amount string such as `"10.50"`.
    pub fn from_api_amount(amount: &str, currency: &str) -> Result<Self> {
        let info = require_currency(currency)?;
        let parsed: Decimal = amount
            .trim()
            .parse()
            .map_err(|_| XPayError::validation(format!("Invalid amount: {amount}")))?;
        Ok(Self {
            amount: to_smallest_unit(parsed, info.code)?,
            currency: info,
        })
    }

    /// The amount as the API expects it: fixed decimals, no separators.
    pub fn to_api_amount(&self) -> String {
        fixed_point(
            Decimal::new(self.amount, self.currency.decimal_places),
            self.currency.decimal_places,
        )
    }

    /// Smallest-unit amount (e.g. cents).
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &'static str {
        self.currency.code
    }

    pub fn format(&self) -> String {
        format!(
            "{}{}",
            self.currency.symbol,
            group_thousands(&self.to_api_amount())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_currency() {
        assert_eq!(default_currency("stripe"), "USD");
        assert_eq!(default_currency("momo"), "GHS");
        assert_eq!(default_currency("xpay_wallet"), "USD");
        assert_eq!(default_currency("unknown_method"), "USD");
    }

    #[test]
    fn test_validate_currency_supported() {
        assert!(validate_currency("stripe", "USD").is_ok());
        assert!(validate_currency("stripe", "EUR").is_ok());
        assert!(validate_currency("momo", "GHS").is_ok());
        assert!(validate_currency("momo_rwanda", "USD").is_ok());
    }

    #[test]
    fn test_validate_currency_unknown_method() {
        let err = validate_currency("unknown_method", "USD").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Unsupported payment method: unknown_method");
    }

    #[test]
    fn test_validate_currency_unsupported_currency() {
        let err = validate_currency("stripe", "JPY").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.message(),
            "Currency JPY is not supported for payment method stripe. \
             Supported currencies: USD, EUR, GBP, GHS"
        );
    }

    #[test]
    fn test_supported_currencies() {
        assert_eq!(supported_currencies("stripe"), ["USD", "EUR", "GBP", "GHS"]);
        assert_eq!(supported_currencies("momo"), ["GHS"]);
        assert!(supported_currencies("unknown").is_empty());
    }

    #[test]
    fn test_to_smallest_unit() {
        assert_eq!(to_smallest_unit(d("10.00"), "USD").unwrap(), 1000);
        assert_eq!(to_smallest_unit(d("10.50"), "USD").unwrap(), 1050);
        assert_eq!(to_smallest_unit(d("0.01"), "USD").unwrap(), 1);
        assert_eq!(to_smallest_unit(d("0"), "USD").unwrap(), 0);
        assert_eq!(to_smallest_unit(d("25.00"), "GBP").unwrap(), 2500);
        // half away from zero
        assert_eq!(to_smallest_unit(d("0.005"), "USD").unwrap(), 1);
        assert_eq!(to_smallest_unit(d("-0.005"), "USD").unwrap(), -1);
    }

    #[test]
    fn test_from_smallest_unit() {
        assert_eq!(from_smallest_unit(1000, "USD").unwrap(), d("10.00"));
        assert_eq!(from_smallest_unit(1050, "USD").unwrap(), d("10.50"));
        assert_eq!(from_smallest_unit(1, "USD").unwrap(), d("0.01"));
        assert_eq!(from_smallest_unit(5000, "EUR").unwrap(), d("50"));
    }

    #[test]
    fn test_round_trip_all_currencies() {
        for info in &SUPPORTED_CURRENCIES {
            for amount in [d("0"), d("0.01"), d("10.50"), d("99.99"), d("123456.78")] {
                let units = to_smallest_unit(amount, info.code).unwrap();
                assert_eq!(from_smallest_unit(units, info.code).unwrap(), amount);
            }
        }
    }

    #[test]
    fn test_unsupported_currency() {
        let to = to_smallest_unit(d("10"), "JPY").unwrap_err();
        let from = from_smallest_unit(1000, "JPY").unwrap_err();
        let format = format_amount(d("10"), "JPY", false).unwrap_err();

        for err in [to, from, format] {
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.message(), "Unsupported currency: JPY");
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(d("10"), "USD", false).unwrap(), "$10.00");
        assert_eq!(format_amount(d("10.5"), "USD", false).unwrap(), "$10.50");
        assert_eq!(format_amount(d("25.99"), "EUR", false).unwrap(), "€25.99");
        assert_eq!(format_amount(d("100"), "GBP", false).unwrap(), "£100.00");
        assert_eq!(format_amount(d("50.25"), "GHS", false).unwrap(), "₵50.25");
        assert_eq!(format_amount(d("1234567.891"), "USD", false).unwrap(), "$1,234,567.89");
    }

    #[test]
    fn test_format_amount_from_smallest_unit() {
        assert_eq!(format_amount(d("1000"), "USD", true).unwrap(), "$10.00");
        assert_eq!(format_amount(d("1050"), "USD", true).unwrap(), "$10.50");
        assert_eq!(format_amount(d("1050.9"), "USD", true).unwrap(), "$10.50");
        assert_eq!(format_amount(d("-123456"), "USD", true).unwrap(), "$-1,234.56");
    }

    #[test]
    fn test_currency_info() {
        let usd = currency_info("USD").unwrap();
        assert_eq!(usd.name, "US Dollar");
        assert_eq!(usd.symbol, "$");
        assert_eq!(usd.decimal_places, 2);
        assert_eq!(usd.smallest_unit_name, "cents");
        assert!(currency_info("UNKNOWN").is_none());
        assert!(is_supported_currency("GHS"));
        assert!(!is_supported_currency("XYZ"));
    }

    #[test]
    fn test_money() {
        let money = Money::from_api_amount("1234.5", "EUR").unwrap();
        assert_eq!(money.amount(), 123450);
        assert_eq!(money.currency(), "EUR");
        assert_eq!(money.to_api_amount(), "1234.50");
        assert_eq!(money.format(), "€1,234.50");

        assert_eq!(Money::new(99, "USD").unwrap().to_api_amount(), "0.99");
        assert!(Money::from_api_amount("ten", "USD").is_err());
        assert!(Money::new(100, "JPY").is_err());
    }
}
