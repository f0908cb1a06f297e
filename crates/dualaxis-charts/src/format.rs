//! Axis and tooltip label formatting.
//!
//! Numbers use a compact d3-style specifier `[,][.precision][type]`
//! (types `s f d e g r %`); dates use strftime patterns. Anything that fails
//! to parse falls back to plain display.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use dualaxis_core::{AxisRole, ChartViewModel, DomainValue, DEFAULT_DATE_FORMAT};
use std::fmt::Write;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("malformed precision in number format `{0}`")]
    Precision(String),
    #[error("unsupported number format `{0}`")]
    Unsupported(String),
}

// ============================================================================
// NUMBER FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// SI prefix (k, M, m, µ ...)
    Si,
    Fixed,
    Integer,
    Exponent,
    /// Significant digits, exponent when large or small
    General,
    /// Significant digits, always fixed notation
    Rounded,
    Percent,
    Plain,
}

/// Parsed number specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    comma: bool,
    precision: Option<usize>,
    kind: NumberKind,
}

/// SI prefixes from 1e-24 to 1e24 in steps of 1e3
const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

impl NumberFormat {
    pub fn plain() -> Self {
        Self {
            comma: false,
            precision: None,
            kind: NumberKind::Plain,
        }
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let body = match self.kind {
            NumberKind::Plain => plain(value),
            NumberKind::Si => return self.format_si(value),
            NumberKind::Fixed => format!("{:.*}", self.precision.unwrap_or(6), value),
            NumberKind::Integer => format!("{}", value.round() as i64),
            NumberKind::Exponent => js_exponent(&format!("{:.*e}", self.precision.unwrap_or(6), value)),
            NumberKind::General => to_precision(value, self.precision.unwrap_or(6).max(1)),
            NumberKind::Rounded => {
                let p = self.precision.unwrap_or(6).max(1);
                let rounded = round_significant(value, p);
                let digits = p as i32 - magnitude(rounded);
                format!("{:.*}", digits.clamp(0, 20) as usize, rounded)
            }
            NumberKind::Percent => {
                format!("{:.*}%", self.precision.unwrap_or(0), value * 100.0)
            }
        };

        if self.comma { group_thousands(&body) } else { body }
    }

    fn format_si(&self, value: f64) -> String {
        let rounded = match self.precision {
            Some(p) => round_significant(value, p.max(1)),
            None => value,
        };

        let (scaled, symbol) = si_prefix(rounded);
        let body = match self.precision {
            Some(p) => to_precision(scaled, p.max(1)),
            None => plain(scaled),
        };
        let body = if self.comma { group_thousands(&body) } else { body };
        format!("{}{}", body, symbol)
    }
}

impl FromStr for NumberFormat {
    type Err = FormatError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let mut rest = pattern.trim();
        let comma = if let Some(stripped) = rest.strip_prefix(',') {
            rest = stripped;
            true
        } else {
            false
        };

        let mut precision = None;
        if let Some(stripped) = rest.strip_prefix('.') {
            let digits: String = stripped.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                return Err(FormatError::Precision(pattern.to_string()));
            }
            precision = Some(
                digits
                    .parse::<usize>()
                    .map_err(|_| FormatError::Precision(pattern.to_string()))?,
            );
            rest = &stripped[digits.len()..];
        }

        let kind = match rest {
            "" if precision.is_some() => NumberKind::General,
            "" => NumberKind::Plain,
            "s" => NumberKind::Si,
            "f" => NumberKind::Fixed,
            "d" => NumberKind::Integer,
            "e" => NumberKind::Exponent,
            "g" => NumberKind::General,
            "r" => NumberKind::Rounded,
            "%" => NumberKind::Percent,
            _ => return Err(FormatError::Unsupported(pattern.to_string())),
        };

        Ok(Self {
            comma,
            precision,
            kind,
        })
    }
}

/// `ceil(log10(|x|))`, 1 for zero
fn magnitude(x: f64) -> i32 {
    if x == 0.0 {
        1
    } else {
        x.abs().log10().ceil() as i32
    }
}

/// Round to `p` significant digits before the SI prefix is chosen, so that
/// 999.9 becomes 1000 and picks `k`
fn round_significant(x: f64, p: usize) -> f64 {
    let n = p as i32 - magnitude(x);
    let factor = 10.0_f64.powi(n.abs());
    if n >= 0 {
        (x * factor).round() / factor
    } else {
        (x / factor).round() * factor
    }
}

fn si_prefix(x: f64) -> (f64, &'static str) {
    if x == 0.0 {
        return (0.0, "");
    }
    let i = 1 + (1e-12 + x.abs().log10()).floor() as i32;
    let exponent = (((i - 1) as f64 / 3.0).floor() as i32 * 3).clamp(-24, 24);
    let symbol = SI_PREFIXES[((exponent + 24) / 3) as usize];
    (x / 10.0_f64.powi(exponent), symbol)
}

/// `p` significant digits, switching to exponent notation outside 1e-6..1e(p)
fn to_precision(x: f64, p: usize) -> String {
    if x == 0.0 {
        return format!("{:.*}", p - 1, 0.0);
    }
    let sci = format!("{:.*e}", p - 1, x);
    let exponent: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exponent < -6 || exponent >= p as i32 {
        js_exponent(&sci)
    } else {
        format!("{:.*}", (p as i32 - 1 - exponent).max(0) as usize, x)
    }
}

/// `1.50e3` -> `1.50e+3`
fn js_exponent(sci: &str) -> String {
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => sci.to_string(),
    }
}

fn plain(x: f64) -> String {
    if x == 0.0 {
        "0".to_string()
    } else {
        x.to_string()
    }
}

/// Insert `,` every three digits of the integer part
fn group_thousands(body: &str) -> String {
    let (sign, unsigned) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body),
    };
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (int_part, tail) = unsigned.split_at(split);

    let mut grouped = String::with_capacity(body.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}{}", sign, grouped, tail)
}

// ============================================================================
// DATE FORMAT
// ============================================================================

fn try_format_date(dt: &DateTime<Utc>, pattern: &str) -> Option<String> {
    if pattern.is_empty() {
        return None;
    }
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(items.iter())).ok()?;
    Some(out)
}

/// Format a date with a strftime pattern, falling back to the default pattern
pub fn format_date(dt: &DateTime<Utc>, pattern: &str) -> String {
    try_format_date(dt, pattern)
        .or_else(|| try_format_date(dt, DEFAULT_DATE_FORMAT))
        .unwrap_or_else(|| dt.to_rfc3339())
}

// ============================================================================
// TICK FORMAT
// ============================================================================

/// Formatter bound to one axis, resolved once per render
#[derive(Debug, Clone, PartialEq)]
pub enum TickFormat {
    Number(NumberFormat),
    Date(String),
}

impl TickFormat {
    pub fn number(pattern: &str) -> Self {
        match pattern.parse() {
            Ok(format) => Self::Number(format),
            Err(err) => {
                debug!(%err, "using plain number display");
                Self::Number(NumberFormat::plain())
            }
        }
    }

    pub fn date(pattern: &str) -> Self {
        Self::Date(pattern.to_string())
    }

    pub fn for_axis(pattern: &str, is_date: bool) -> Self {
        if is_date { Self::date(pattern) } else { Self::number(pattern) }
    }

    /// Format a scale key (milliseconds for date axes)
    pub fn format_key(&self, key: f64) -> String {
        match self {
            Self::Number(format) => format.format(key),
            Self::Date(pattern) => match DomainValue::from_key(key, true) {
                Some(DomainValue::Date(dt)) => format_date(&dt, pattern),
                _ => plain(key),
            },
        }
    }

    pub fn format_value(&self, value: &DomainValue) -> String {
        match (self, value) {
            (Self::Date(pattern), DomainValue::Date(dt)) => format_date(dt, pattern),
            (Self::Number(format), DomainValue::Number(n)) => format.format(*n),
            (_, other) => self.format_key(other.key()),
        }
    }
}

/// The three axis formatters of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFormats {
    pub x: TickFormat,
    pub y1: TickFormat,
    pub y2: TickFormat,
}

impl ChartFormats {
    pub fn from_view_model(view_model: &ChartViewModel) -> Self {
        Self {
            x: TickFormat::for_axis(&view_model.x_axis.label_format, view_model.is_date_range),
            y1: TickFormat::number(&view_model.y_axis.label_format),
            y2: TickFormat::number(&view_model.y2_axis.label_format),
        }
    }

    pub fn y(&self, axis: AxisRole) -> &TickFormat {
        match axis {
            AxisRole::Primary => &self.y1,
            AxisRole::Secondary => &self.y2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fmt(pattern: &str, value: f64) -> String {
        pattern.parse::<NumberFormat>().unwrap().format(value)
    }

    #[test]
    fn test_si_format() {
        assert_eq!(fmt(".3s", 1500.0), "1.50k");
        assert_eq!(fmt(".3s", 2_500_000.0), "2.50M");
        assert_eq!(fmt(".3s", 999.9), "1.00k");
        assert_eq!(fmt(".3s", 0.0015), "1.50m");
        assert_eq!(fmt(".3s", 42.0), "42.0");
        assert_eq!(fmt(".3s", 0.0), "0.00");
        assert_eq!(fmt(".3s", -1500.0), "-1.50k");
    }

    #[test]
    fn test_fixed_and_grouping() {
        assert_eq!(fmt(",.2f", 1_234_567.891), "1,234,567.89");
        assert_eq!(fmt(",.0f", -1234.0), "-1,234");
        assert_eq!(fmt(".1f", 0.26), "0.3");
        assert_eq!(fmt(",", 1234.5), "1,234.5");
    }

    #[test]
    fn test_other_types() {
        assert_eq!(fmt("d", 3.7), "4");
        assert_eq!(fmt(".1%", 0.256), "25.6%");
        assert_eq!(fmt(".2e", 1500.0), "1.50e+3");
        assert_eq!(fmt(".3g", 0.000123), "0.000123");
        assert_eq!(fmt(".2r", 1234.0), "1200");
        assert_eq!(fmt(".2r", 0.5), "0.50");
        assert_eq!(fmt(".3r", 3.14159), "3.14");
    }

    #[test]
    fn test_invalid_specs_fall_back_to_plain() {
        assert!(matches!(
            "abc".parse::<NumberFormat>(),
            Err(FormatError::Unsupported(_))
        ));
        assert!(matches!(
            ".x".parse::<NumberFormat>(),
            Err(FormatError::Precision(_))
        ));
        assert_eq!(TickFormat::number("abc").format_key(1500.0), "1500");
    }

    #[test]
    fn test_date_format() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(format_date(&dt, "%d-%b-%y"), "05-Mar-24");
        assert_eq!(format_date(&dt, "%Y"), "2024");
        assert_eq!(format_date(&dt, "%Q"), "05-Mar-24");
        assert_eq!(format_date(&dt, ""), "05-Mar-24");
    }

    #[test]
    fn test_tick_format_keys() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let dates = TickFormat::for_axis("%b %Y", true);
        assert_eq!(dates.format_key(dt.timestamp_millis() as f64), "Mar 2024");
        assert_eq!(dates.format_value(&DomainValue::Date(dt)), "Mar 2024");

        let numbers = TickFormat::for_axis(".3s", false);
        assert_eq!(numbers.format_value(&DomainValue::Number(1500.0)), "1.50k");
    }
}
