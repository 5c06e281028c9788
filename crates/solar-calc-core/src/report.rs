use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::error::SolarCalcError;
use crate::projection::{InvestmentBasis, ProjectionResult};

/// Placeholder for a metric that is undefined for the inputs.
pub const ABSENT: &str = "-";

const CURRENCY: &str = "KRW";

/// Language of report labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLanguage {
    #[default]
    Ko,
    En,
}

impl FromStr for ReportLanguage {
    type Err = SolarCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(ReportLanguage::Ko),
            "en" | "english" => Ok(ReportLanguage::En),
            other => Err(SolarCalcError::InvalidInput {
                field: "language".into(),
                reason: format!("unsupported report language '{other}' (use ko or en)"),
            }),
        }
    }
}

impl ReportLanguage {
    fn pick(self, ko: &'static str, en: &'static str) -> &'static str {
        match self {
            ReportLanguage::Ko => ko,
            ReportLanguage::En => en,
        }
    }
}

/// One label/value line of the summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Round to `dp` places and group the integer part in thousands:
/// `27338500` → `"27,338,500"`.
pub fn format_grouped(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Render a value, or [`ABSENT`] when it is undefined.
pub fn display_optional<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Summary sheet: one label/value pair per metric.
pub fn summary_rows(result: &ProjectionResult, lang: ReportLanguage) -> Vec<SummaryRow> {
    let s = &result.summary;
    let years = lang.pick("년", "years");

    let mut rows = vec![
        row(
            lang.pick("예상 발전량", "Expected Generation"),
            format!("{} kWh", format_grouped(s.annual_generation_kwh, 0)),
        ),
        row(
            lang.pick("총 수익", "Total Revenue"),
            money(s.annual_revenue),
        ),
        row(
            lang.pick("운영비용", "Operating Cost"),
            money(s.operating_cost),
        ),
        row(
            lang.pick("연간 원리금 상환", "Annual Loan Repayment"),
            money(s.annual_debt_service),
        ),
        row(lang.pick("순수익", "Net Profit"), money(s.final_net_profit)),
    ];

    match s.basis {
        InvestmentBasis::Equity => rows.push(row(
            lang.pick("자기자본 수익률", "ROI (Equity)"),
            display_optional(s.roi.map(|r| format!("{r}%"))),
        )),
        InvestmentBasis::Loan => rows.push(row(
            lang.pick("대출금 수익률", "ROI (Loan)"),
            format!("{}%", s.loan_roi),
        )),
        InvestmentBasis::Unfunded => {}
    }

    rows.push(row(
        lang.pick("회수기간", "Payback Period"),
        display_optional(s.payback_years.map(|p| format!("{p} {years}"))),
    ));
    rows.push(row(
        lang.pick("손익분기점", "Break-even Year"),
        display_optional(result.break_even_year.map(|y| match lang {
            ReportLanguage::Ko => format!("{y}년"),
            ReportLanguage::En => format!("Year {y}"),
        })),
    ));

    rows
}

/// Column headers for [`year_rows`].
pub fn year_headers(lang: ReportLanguage) -> [&'static str; 4] {
    [
        lang.pick("연도", "Year"),
        lang.pick("연간 순수익", "Net Profit"),
        lang.pick("누적 수익", "Cumulative Profit"),
        lang.pick("연간 원리금 상환", "Annual Debt Service"),
    ]
}

/// Year sheet: whole currency units without grouping so spreadsheets read
/// them as numbers.
pub fn year_rows(result: &ProjectionResult) -> Vec<[String; 4]> {
    result
        .years
        .iter()
        .map(|y| {
            [
                y.year.to_string(),
                whole_units(y.net_profit),
                whole_units(y.cumulative_profit),
                whole_units(y.annual_debt_service),
            ]
        })
        .collect()
}

fn row(label: &str, value: String) -> SummaryRow {
    SummaryRow {
        label: label.to_string(),
        value,
    }
}

fn money(value: Decimal) -> String {
    format!("{} {CURRENCY}", format_grouped(value, 0))
}

fn whole_units(value: Decimal) -> String {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
