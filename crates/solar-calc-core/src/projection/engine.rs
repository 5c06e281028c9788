use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::input::MAX_PROJECTION_YEARS;
use crate::projection::debt_service::DebtServiceSchedule;
use crate::projection::summary::{self, InvestmentBasis, ProjectionSummary, SummaryInputs};
use crate::types::{with_metadata, ComputationOutput, Kwh, Money};

const DAYS_PER_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Normalized project parameters. Every field is already numeric; text
/// parsing happens in [`crate::input`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Installed capacity (kW)
    pub capacity_kw: Decimal,
    /// Average daily generation hours
    pub daily_hours: Decimal,
    /// System marginal price per kWh
    pub smp_price: Money,
    /// Renewable energy certificate price per kWh
    pub rec_price: Money,
    /// REC weighting multiplier
    pub rec_weight: Decimal,
    /// Fixed annual operating cost
    pub operating_cost: Money,
    /// Cash equity invested
    pub equity: Money,
    /// Loan principal
    pub loan_principal: Money,
    /// Nominal annual interest rate in percent (5.8 = 5.8%)
    pub annual_interest_rate_pct: Decimal,
    /// Projection horizon and loan term
    pub term_years: i32,
    /// Interest-only years at the start of the term
    pub defer_years: i32,
}

impl ParameterSet {
    pub fn annual_generation_kwh(&self) -> Kwh {
        self.capacity_kw
            .saturating_mul(DAYS_PER_YEAR)
            .saturating_mul(self.daily_hours)
    }

    /// Price realised per kWh: SMP plus weighted REC.
    pub fn unit_price(&self) -> Money {
        self.smp_price
            .saturating_add(self.rec_price.saturating_mul(self.rec_weight))
    }

    pub fn annual_revenue(&self) -> Money {
        self.annual_generation_kwh().saturating_mul(self.unit_price())
    }

    /// True when term and defer both lie within ±[`MAX_PROJECTION_YEARS`].
    pub fn within_horizon(&self) -> bool {
        let range = -MAX_PROJECTION_YEARS..=MAX_PROJECTION_YEARS;
        range.contains(&self.term_years) && range.contains(&self.defer_years)
    }

    /// Copy with term and defer clamped to ±[`MAX_PROJECTION_YEARS`].
    pub fn clamped_horizon(&self) -> ParameterSet {
        ParameterSet {
            term_years: self
                .term_years
                .clamp(-MAX_PROJECTION_YEARS, MAX_PROJECTION_YEARS),
            defer_years: self
                .defer_years
                .clamp(-MAX_PROJECTION_YEARS, MAX_PROJECTION_YEARS),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One projection year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// 1-based year
    pub year: i32,
    pub net_profit: Money,
    /// Running sum of net profit through this year
    pub cumulative_profit: Money,
    /// Interest-only during the defer period, level annuity afterwards
    pub annual_debt_service: Money,
}

/// Complete projection for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub years: Vec<YearRecord>,
    /// First year cumulative profit reaches the invested capital
    pub break_even_year: Option<i32>,
    pub summary: ProjectionSummary,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Project year-by-year profit, break-even and summary metrics.
///
/// Pure and infallible: any parameter set, however inconsistent, produces a
/// well-defined result. A non-positive term yields an empty series, a fully
/// deferred term yields interest-only years, and arithmetic saturates at the
/// Decimal range rather than panicking. Term and defer beyond
/// [`MAX_PROJECTION_YEARS`] are clamped to it.
pub fn project(params: &ParameterSet) -> ProjectionResult {
    let params = &params.clamped_horizon();
    let annual_generation_kwh = params.annual_generation_kwh();
    let annual_revenue = params.annual_revenue();
    let schedule = DebtServiceSchedule::from_params(params);

    let term = params.term_years.max(0);
    let mut years: Vec<YearRecord> = Vec::with_capacity(term as usize);
    let mut cumulative_profit = Decimal::ZERO;

    for year in 1..=term {
        let annual_debt_service = schedule.for_year(year);
        let net_profit = annual_revenue
            .saturating_sub(params.operating_cost)
            .saturating_sub(annual_debt_service);
        cumulative_profit = cumulative_profit.saturating_add(net_profit);

        years.push(YearRecord {
            year,
            net_profit,
            cumulative_profit,
            annual_debt_service,
        });
    }

    let basis = InvestmentBasis::from_capital(params.equity, params.loan_principal);
    let break_even_year =
        summary::break_even_year(&years, basis.target(params.equity, params.loan_principal));

    let summary = summary::summarize(
        SummaryInputs {
            annual_generation_kwh,
            annual_revenue,
            operating_cost: params.operating_cost,
            annual_debt_service: schedule.steady_state_annual(),
            equity: params.equity,
            loan_principal: params.loan_principal,
        },
        &years,
    );

    ProjectionResult {
        years,
        break_even_year,
        summary,
    }
}

/// [`project`] wrapped in the standard computation envelope, with warnings
/// for inputs and outcomes a reader should double-check.
pub fn run_projection(params: &ParameterSet) -> ComputationOutput<ProjectionResult> {
    let start = Instant::now();

    let mut warnings = Vec::new();
    if !params.within_horizon() {
        warnings.push(format!(
            "term_years ({}) and defer_years ({}) are clamped to ±{MAX_PROJECTION_YEARS} years",
            params.term_years, params.defer_years
        ));
    }
    let params = &params.clamped_horizon();
    warnings.extend(input_warnings(params));
    let result = project(params);

    if params.term_years > 0 {
        if params.defer_years >= params.term_years {
            warnings.push(format!(
                "Defer period of {} years covers the whole {}-year term; no principal is ever repaid",
                params.defer_years, params.term_years
            ));
        }
        if result.break_even_year.is_none() && result.summary.basis != InvestmentBasis::Unfunded {
            warnings.push(format!(
                "Invested capital is not recovered within the {}-year term",
                params.term_years
            ));
        }
        if result.summary.final_net_profit <= Decimal::ZERO {
            warnings.push(format!(
                "Final-year net profit of {} is not positive; ROI and payback are undefined",
                result.summary.final_net_profit.round_dp(0)
            ));
        }
    } else {
        warnings.push("Term of zero years or less produces an empty projection".to_string());
    }

    debug!(
        term_years = params.term_years,
        defer_years = params.defer_years,
        break_even_year = ?result.break_even_year,
        warnings = warnings.len(),
        "projection computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Solar farm cash-flow projection (SMP + REC revenue, annuity loan with defer period)",
        &serde_json::json!({
            "capacity_kw": params.capacity_kw.to_string(),
            "daily_hours": params.daily_hours.to_string(),
            "unit_price": params.unit_price().to_string(),
            "operating_cost": params.operating_cost.to_string(),
            "equity": params.equity.to_string(),
            "loan_principal": params.loan_principal.to_string(),
            "annual_interest_rate_pct": params.annual_interest_rate_pct.to_string(),
            "term_years": params.term_years,
            "defer_years": params.defer_years,
            "revenue_escalation": "none",
        }),
        warnings,
        elapsed,
        result,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Negative values are computable but almost always a data-entry slip.
fn input_warnings(params: &ParameterSet) -> Vec<String> {
    let checks = [
        ("capacity_kw", params.capacity_kw),
        ("daily_hours", params.daily_hours),
        ("smp_price", params.smp_price),
        ("rec_price", params.rec_price),
        ("rec_weight", params.rec_weight),
        ("operating_cost", params.operating_cost),
        ("equity", params.equity),
        ("loan_principal", params.loan_principal),
        ("annual_interest_rate_pct", params.annual_interest_rate_pct),
    ];

    let mut warnings: Vec<String> = checks
        .iter()
        .filter(|(_, value)| value.is_sign_negative() && !value.is_zero())
        .map(|(field, value)| format!("{field} is negative ({value})"))
        .collect();

    if params.defer_years < 0 {
        warnings.push(format!("defer_years is negative ({})", params.defer_years));
    }
    if params.daily_hours > dec!(24) {
        warnings.push(format!(
            "daily_hours of {} exceeds 24 hours per day",
            params.daily_hours
        ));
    }

    warnings
}
