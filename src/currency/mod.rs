use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("INR")
    }
}

/// How digits left of the decimal separator are grouped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroupingStyle {
    /// `1,000,000`
    Thousands,
    /// `10,00,000` (lakh/crore)
    Indian,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub grouping: GroupingStyle,
}

impl LocaleConfig {
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "en-IN" | "hi-IN" => Self {
                language_tag: tag.into(),
                grouping: GroupingStyle::Indian,
                ..Self::default()
            },
            "de-DE" => Self {
                language_tag: tag.into(),
                decimal_separator: ',',
                grouping_separator: '.',
                grouping: GroupingStyle::Thousands,
            },
            _ => Self {
                language_tag: tag.into(),
                ..Self::default()
            },
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            grouping: GroupingStyle::Thousands,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (sign, unsigned) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body.as_str()),
    };
    let (int_part, fraction) = match unsigned.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (unsigned, None),
    };
    let grouped = group_digits(int_part, locale.grouping_separator, locale.grouping);
    match fraction {
        Some(fraction) => format!("{sign}{grouped}{}{fraction}", locale.decimal_separator),
        None => format!("{sign}{grouped}"),
    }
}

fn group_digits(digits: &str, separator: char, style: GroupingStyle) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        let boundary = match style {
            GroupingStyle::Thousands => count != 0 && count % 3 == 0,
            GroupingStyle::Indian => count == 3 || (count > 3 && (count - 3) % 2 == 0),
        };
        if boundary {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let prefix = match options.currency_display {
        CurrencyDisplay::Symbol => symbol_for(code.as_str()),
        CurrencyDisplay::Code => format!("{} ", code.as_str()),
    };
    let rendered = format!("{prefix}{body}");
    if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        match options.negative_style {
            NegativeStyle::Sign => format!("-{rendered}"),
            NegativeStyle::Parentheses => format!("({rendered})"),
        }
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping_uses_lakhs() {
        let locale = LocaleConfig::for_tag("en-IN");
        assert_eq!(format_number(&locale, 100_000.0, 2), "1,00,000.00");
        assert_eq!(format_number(&locale, 1_234_567.5, 2), "12,34,567.50");
        assert_eq!(format_number(&locale, 999.0, 0), "999");
    }

    #[test]
    fn thousands_grouping() {
        let locale = LocaleConfig::default();
        assert_eq!(format_number(&locale, 1_234_567.0, 2), "1,234,567.00");
        assert_eq!(format_number(&locale, -1_000.0, 0), "-1,000");
    }

    #[test]
    fn rupee_amounts_render_with_symbol() {
        let code = CurrencyCode::default();
        let locale = LocaleConfig::for_tag("en-IN");
        let options = FormatOptions::default();
        assert_eq!(
            format_currency_value(-20_626.0, &code, &locale, &options),
            "-₹20,626.00"
        );
        let parens = FormatOptions {
            negative_style: NegativeStyle::Parentheses,
            ..options
        };
        assert_eq!(
            format_currency_value(-400.0, &code, &locale, &parens),
            "(₹400.00)"
        );
    }

    #[test]
    fn negative_zero_is_not_signed() {
        let code = CurrencyCode::new("usd");
        let rendered = format_currency_value(
            -0.001,
            &code,
            &LocaleConfig::default(),
            &FormatOptions::default(),
        );
        assert_eq!(rendered, "$0.00");
    }

    #[test]
    fn code_display_and_decimal_comma() {
        let code = CurrencyCode::new("eur");
        let options = FormatOptions {
            currency_display: CurrencyDisplay::Code,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_currency_value(1_500.25, &code, &LocaleConfig::for_tag("de-DE"), &options),
            "EUR 1.500,25"
        );
    }
}
