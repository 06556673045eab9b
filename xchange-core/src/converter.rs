//! Client-side conversion between two cached rates.
//!
//! Every rate is expressed against the base currency, so converting between
//! any two codes goes through the base: `amount / from.rate * to.rate`.

use xchange_types::{ConversionError, CurrencyRate};

use crate::config::ServiceConfig;

/// Conversion arithmetic and amount-input helpers.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    base_currency: String,
    default_target: String,
    max_digit_limit: usize,
}

impl CurrencyConverter {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            base_currency: config.base_currency.clone(),
            default_target: config.default_target.clone(),
            max_digit_limit: config.max_digit_limit,
        }
    }

    /// Converts `amount` of `from` into `to`.
    pub fn convert(
        &self,
        amount: f64,
        from: &CurrencyRate,
        to: &CurrencyRate,
    ) -> Result<f64, ConversionError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ConversionError::NonPositiveAmount(amount));
        }
        for rate in [from, to] {
            if !rate.has_usable_rate() {
                return Err(ConversionError::InvalidRate {
                    code: rate.code.clone(),
                    rate: rate.rate,
                });
            }
        }
        Ok(amount / from.rate * to.rate)
    }

    /// Converts between two codes looked up in `rates`.
    ///
    /// The base currency is implied at rate 1 when the list omits it.
    pub fn convert_codes(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        rates: &[CurrencyRate],
    ) -> Result<f64, ConversionError> {
        let from = self.resolve(from, rates)?;
        let to = self.resolve(to, rates)?;
        self.convert(amount, &from, &to)
    }

    fn resolve(&self, code: &str, rates: &[CurrencyRate]) -> Result<CurrencyRate, ConversionError> {
        if let Some(rate) = find(rates, code) {
            return Ok(rate.clone());
        }
        if code.eq_ignore_ascii_case(&self.base_currency) {
            return Ok(CurrencyRate::unnamed(self.base_currency.clone(), 1.0));
        }
        Err(ConversionError::UnknownCurrency(code.to_string()))
    }

    /// The record for the configured default conversion target.
    pub fn default_target<'a>(&self, rates: &'a [CurrencyRate]) -> Option<&'a CurrencyRate> {
        find(rates, &self.default_target)
    }

    /// The record for the configured base currency.
    pub fn base_rate<'a>(&self, rates: &'a [CurrencyRate]) -> Option<&'a CurrencyRate> {
        find(rates, &self.base_currency)
    }

    /// Truncates input to the configured number of characters.
    pub fn limit_input<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.max_digit_limit) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }

    /// Parses the longest numeric prefix of `text`, falling back to 0.
    pub fn parse_amount(&self, text: &str) -> f64 {
        let text = self.limit_input(text.trim());
        let mut end = 0;
        let mut seen_dot = false;
        for (idx, ch) in text.char_indices() {
            match ch {
                '0'..='9' => end = idx + 1,
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
        }
        text[..end].parse().unwrap_or(0.0)
    }

    pub fn format_amount(&self, value: f64) -> String {
        format!("{value:.2}")
    }
}

/// Case-insensitive lookup by currency code.
pub fn find<'a>(rates: &'a [CurrencyRate], code: &str) -> Option<&'a CurrencyRate> {
    rates.iter().find(|r| r.code.eq_ignore_ascii_case(code))
}
