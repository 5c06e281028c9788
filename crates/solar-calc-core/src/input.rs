use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::projection::ParameterSet;

/// Longest horizon the collector passes to the engine. Larger entries are
/// clamped here so a stray keystroke cannot allocate millions of years.
pub const MAX_PROJECTION_YEARS: i32 = 1_000;

// ---------------------------------------------------------------------------
// Numeric normalization
// ---------------------------------------------------------------------------

/// Parse user-entered text as a number.
///
/// Grouping separators and surrounding whitespace are removed first. Like a
/// browser `parseFloat`, a numeric prefix is accepted ("12 kW" → 12,
/// "1e3kW" → 1000). Blank, unparseable, `NaN` and infinite entries all become
/// zero, as do exponents beyond Decimal range in either direction.
pub fn parse_number(text: &str) -> Decimal {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    if let Ok(value) = Decimal::from_str(&cleaned) {
        return value;
    }

    let prefix = numeric_prefix(&cleaned);
    if prefix.contains(['e', 'E']) {
        return Decimal::from_scientific(&prefix.replace('E', "e")).unwrap_or(Decimal::ZERO);
    }
    Decimal::from_str(prefix).unwrap_or(Decimal::ZERO)
}

/// Float to Decimal with the same zero substitution for non-finite values.
pub fn decimal_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Whole projection years from a possibly fractional entry. Fractions round
/// up (10.5 years projects 11) and the result is clamped to
/// ±[`MAX_PROJECTION_YEARS`].
pub fn whole_years(value: Decimal) -> i32 {
    let limit = Decimal::from(MAX_PROJECTION_YEARS);
    value
        .ceil()
        .clamp(-limit, limit)
        .to_i32()
        .unwrap_or(0)
}

/// Longest leading `[+-]digits[.digits][e[+-]digits]` run, or "" when it
/// holds no digit.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'+' | b'-' if end == 0 => {}
            b'.' if !seen_dot => seen_dot = true,
            b if b.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return "";
    }

    let mantissa = text[..end].trim_end_matches('.');
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            return &text[..exp_end];
        }
    }
    mantissa
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

/// A raw form entry: either a JSON number or the text a user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn to_decimal(&self) -> Decimal {
        match self {
            FieldValue::Number(n) => decimal_from_f64(*n),
            FieldValue::Text(s) => parse_number(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// The calculator form's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Capacity,
    Hours,
    Smp,
    Rec,
    Weight,
    OperationCost,
    Equity,
    Loan,
    Interest,
    Term,
    DeferPeriod,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Capacity,
        FormField::Hours,
        FormField::Smp,
        FormField::Rec,
        FormField::Weight,
        FormField::OperationCost,
        FormField::Equity,
        FormField::Loan,
        FormField::Interest,
        FormField::Term,
        FormField::DeferPeriod,
    ];

    /// Serialized field name.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Capacity => "capacity",
            FormField::Hours => "hours",
            FormField::Smp => "smp",
            FormField::Rec => "rec",
            FormField::Weight => "weight",
            FormField::OperationCost => "operation_cost",
            FormField::Equity => "equity",
            FormField::Loan => "loan",
            FormField::Interest => "interest",
            FormField::Term => "term",
            FormField::DeferPeriod => "defer_period",
        }
    }
}

/// Raw calculator form as entered, before normalization. Missing fields take
/// the form's starting values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub capacity: FieldValue,
    pub hours: FieldValue,
    pub smp: FieldValue,
    pub rec: FieldValue,
    pub weight: FieldValue,
    pub operation_cost: FieldValue,
    pub equity: FieldValue,
    pub loan: FieldValue,
    pub interest: FieldValue,
    pub term: FieldValue,
    pub defer_period: FieldValue,
}

impl Default for FormInput {
    fn default() -> Self {
        FormInput {
            capacity: "100".into(),
            hours: "3.5".into(),
            smp: "130".into(),
            rec: "70".into(),
            weight: "1.2".into(),
            operation_cost: "0".into(),
            equity: "80,000,000".into(),
            loan: "150,000,000".into(),
            interest: "5.8".into(),
            term: "10".into(),
            defer_period: "0".into(),
        }
    }
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &FieldValue {
        match field {
            FormField::Capacity => &self.capacity,
            FormField::Hours => &self.hours,
            FormField::Smp => &self.smp,
            FormField::Rec => &self.rec,
            FormField::Weight => &self.weight,
            FormField::OperationCost => &self.operation_cost,
            FormField::Equity => &self.equity,
            FormField::Loan => &self.loan,
            FormField::Interest => &self.interest,
            FormField::Term => &self.term,
            FormField::DeferPeriod => &self.defer_period,
        }
    }

    pub fn set(&mut self, field: FormField, value: FieldValue) {
        let slot = match field {
            FormField::Capacity => &mut self.capacity,
            FormField::Hours => &mut self.hours,
            FormField::Smp => &mut self.smp,
            FormField::Rec => &mut self.rec,
            FormField::Weight => &mut self.weight,
            FormField::OperationCost => &mut self.operation_cost,
            FormField::Equity => &mut self.equity,
            FormField::Loan => &mut self.loan,
            FormField::Interest => &mut self.interest,
            FormField::Term => &mut self.term,
            FormField::DeferPeriod => &mut self.defer_period,
        };
        *slot = value;
    }

    /// Overlay explicitly supplied fields on this form.
    pub fn merge<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (FormField, FieldValue)>,
    {
        for (field, value) in overrides {
            self.set(field, value);
        }
        self
    }

    pub fn normalize(&self) -> ParameterSet {
        ParameterSet {
            capacity_kw: self.capacity.to_decimal(),
            daily_hours: self.hours.to_decimal(),
            smp_price: self.smp.to_decimal(),
            rec_price: self.rec.to_decimal(),
            rec_weight: self.weight.to_decimal(),
            operating_cost: self.operation_cost.to_decimal(),
            equity: self.equity.to_decimal(),
            loan_principal: self.loan.to_decimal(),
            annual_interest_rate_pct: self.interest.to_decimal(),
            term_years: whole_years(self.term.to_decimal()),
            defer_years: whole_years(self.defer_period.to_decimal()),
        }
    }
}
