//! Standalone currency converter over a fixed rate table.
//!
//! Rates are expressed against a single reference currency. Comparison
//! figures in the catalog never pass through here; they are stored in the
//! reporting currency already.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurrencyError {
    #[error("unknown currency code '{0}'")]
    InvalidCurrency(String),
    #[error("rate for '{code}' must be finite and positive, got {rate}")]
    InvalidRate { code: String, rate: f64 },
    #[error("amount must be a finite number")]
    InvalidAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyTable {
    reference: String,
    rates: BTreeMap<String, f64>,
}

impl CurrencyTable {
    /// USD-referenced table used by the converter screen.
    pub fn standard() -> Self {
        let rates = [
            ("USD", 1.0),
            ("EUR", 0.92),
            ("GBP", 0.79),
            ("CAD", 1.36),
            ("AUD", 1.52),
            ("JPY", 149.5),
            ("CHF", 0.88),
            ("SEK", 10.45),
        ]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect();

        Self {
            reference: "USD".to_string(),
            rates,
        }
    }

    pub fn new<I, S>(reference: &str, rates: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = BTreeMap::new();
        for (code, rate) in rates {
            let code = normalize(code.as_ref());
            if !rate.is_finite() || rate <= 0.0 {
                return Err(CurrencyError::InvalidRate { code, rate });
            }
            table.insert(code, rate);
        }

        let reference = normalize(reference);
        if !table.contains_key(&reference) {
            return Err(CurrencyError::InvalidCurrency(reference));
        }

        Ok(Self {
            reference,
            rates: table,
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn rate(&self, code: &str) -> Result<f64, CurrencyError> {
        let code = normalize(code);
        self.rates
            .get(&code)
            .copied()
            .ok_or(CurrencyError::InvalidCurrency(code))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    /// Units of `to` per unit of `from`.
    pub rate: f64,
    pub converted: f64,
}

impl Conversion {
    /// Display value, rounded to cents.
    pub fn display_amount(&self) -> f64 {
        round_to_cents(self.converted)
    }
}

/// `amount / table[from] * table[to]`.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    table: &CurrencyTable,
) -> Result<Conversion, CurrencyError> {
    if !amount.is_finite() {
        return Err(CurrencyError::InvalidAmount);
    }
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;

    Ok(Conversion {
        amount,
        from: normalize(from),
        to: normalize(to),
        rate: to_rate / from_rate,
        converted: amount / from_rate * to_rate,
    })
}

pub fn swap<T>(from: T, to: T) -> (T, T) {
    (to, from)
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_through_reference_rates() {
        let table = CurrencyTable::standard();
        let conversion = convert(1000.0, "USD", "EUR", &table).expect("known codes");

        assert_eq!(conversion.display_amount(), 920.00);
        assert!((conversion.rate - 0.92).abs() < 1e-12);
    }

    #[test]
    fn codes_are_case_insensitive() {
        let table = CurrencyTable::standard();
        let conversion = convert(50.0, " gbp", "usd", &table).expect("known codes");

        assert_eq!(conversion.from, "GBP");
        assert_eq!(conversion.to, "USD");
        assert_eq!(conversion.display_amount(), 63.29);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let table = CurrencyTable::standard();
        let err = convert(10.0, "USD", "XYZ", &table).expect_err("unknown code");
        assert_eq!(err, CurrencyError::InvalidCurrency("XYZ".to_string()));
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        let table = CurrencyTable::standard();
        let err = convert(f64::INFINITY, "USD", "EUR", &table).expect_err("infinite amount");
        assert_eq!(err, CurrencyError::InvalidAmount);
    }

    #[test]
    fn custom_tables_validate_rates_and_reference() {
        let err = CurrencyTable::new("USD", [("USD", 1.0), ("EUR", 0.0)])
            .expect_err("zero rate rejected");
        assert!(matches!(err, CurrencyError::InvalidRate { ref code, .. } if code == "EUR"));

        let err = CurrencyTable::new("NOK", [("USD", 1.0)]).expect_err("missing reference");
        assert_eq!(err, CurrencyError::InvalidCurrency("NOK".to_string()));

        let table = CurrencyTable::new("eur", [("eur", 1.0), ("usd", 1.08)]).expect("valid");
        assert_eq!(table.reference(), "EUR");
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["EUR", "USD"]);
    }

    #[test]
    fn swap_exchanges_codes() {
        assert_eq!(swap("USD", "EUR"), ("EUR", "USD"));
    }
}
