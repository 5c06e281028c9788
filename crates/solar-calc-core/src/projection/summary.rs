use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::saturating_div;
use crate::types::{Kwh, Money, Rate};

use super::engine::YearRecord;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which capital amount the project has to earn back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentBasis {
    /// Cash equity was invested; break-even and payback target the equity
    Equity,
    /// No equity, so the loan principal is the target
    Loan,
    /// Neither equity nor loan is positive; there is nothing to recover
    Unfunded,
}

impl InvestmentBasis {
    pub fn from_capital(equity: Money, loan_principal: Money) -> Self {
        if equity > Decimal::ZERO {
            InvestmentBasis::Equity
        } else if loan_principal > Decimal::ZERO {
            InvestmentBasis::Loan
        } else {
            InvestmentBasis::Unfunded
        }
    }

    /// Capital to recover, always positive when present.
    pub fn target(self, equity: Money, loan_principal: Money) -> Option<Money> {
        match self {
            InvestmentBasis::Equity => Some(equity),
            InvestmentBasis::Loan => Some(loan_principal),
            InvestmentBasis::Unfunded => None,
        }
    }
}

/// Scalar metrics derived from the final projection year.
///
/// `None` marks a metric that is undefined for the inputs (rendered as "-"),
/// which is distinct from a computed zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// capacity × 365 × daily hours
    pub annual_generation_kwh: Kwh,
    /// Generation × (SMP + REC × weight), flat across years
    pub annual_revenue: Money,
    pub operating_cost: Money,
    /// Steady-state annual payment after any defer period
    pub annual_debt_service: Money,
    /// Net profit of the last projection year
    pub final_net_profit: Money,
    /// Final-year net profit / equity, percent, one decimal
    pub roi: Option<Rate>,
    /// Final-year net profit / loan principal, percent, one decimal (0.0 when undefined)
    pub loan_roi: Rate,
    /// Whole years of final-year profit needed to recover the target capital
    pub payback_years: Option<Decimal>,
    pub equity: Money,
    pub loan_principal: Money,
    pub basis: InvestmentBasis,
}

impl ProjectionSummary {
    /// Return figure a reader sees first: ROI on equity when equity was
    /// invested, loan ROI when only a loan funds the project.
    pub fn headline_return(&self) -> Option<Rate> {
        match self.basis {
            InvestmentBasis::Equity => self.roi,
            InvestmentBasis::Loan => Some(self.loan_roi),
            InvestmentBasis::Unfunded => None,
        }
    }
}

/// Inputs to [`summarize`] that the engine has already computed.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs {
    pub annual_generation_kwh: Kwh,
    pub annual_revenue: Money,
    pub operating_cost: Money,
    pub annual_debt_service: Money,
    pub equity: Money,
    pub loan_principal: Money,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// First year whose cumulative profit reaches `target`. Later years never
/// overwrite an earlier hit; no target means no break-even.
pub fn break_even_year(years: &[YearRecord], target: Option<Money>) -> Option<i32> {
    let target = target?;
    years
        .iter()
        .find(|y| y.cumulative_profit >= target)
        .map(|y| y.year)
}

pub fn summarize(inputs: SummaryInputs, years: &[YearRecord]) -> ProjectionSummary {
    let final_net_profit = years.last().map(|y| y.net_profit).unwrap_or(Decimal::ZERO);
    let profitable = final_net_profit > Decimal::ZERO;
    let basis = InvestmentBasis::from_capital(inputs.equity, inputs.loan_principal);

    let roi = if inputs.equity > Decimal::ZERO && profitable {
        Some(percent_of(final_net_profit, inputs.equity))
    } else {
        None
    };

    let loan_roi = if inputs.loan_principal > Decimal::ZERO && profitable {
        percent_of(final_net_profit, inputs.loan_principal)
    } else {
        Decimal::new(0, 1)
    };

    let payback_years = if profitable {
        basis
            .target(inputs.equity, inputs.loan_principal)
            .map(|capital| saturating_div(capital, final_net_profit).ceil())
    } else {
        None
    };

    ProjectionSummary {
        annual_generation_kwh: inputs.annual_generation_kwh,
        annual_revenue: inputs.annual_revenue,
        operating_cost: inputs.operating_cost,
        annual_debt_service: inputs.annual_debt_service,
        final_net_profit,
        roi,
        loan_roi,
        payback_years,
        equity: inputs.equity,
        loan_principal: inputs.loan_principal,
        basis,
    }
}

/// `part / whole * 100` rounded half away from zero to one decimal.
fn percent_of(part: Money, whole: Money) -> Rate {
    saturating_div(part, whole)
        .saturating_mul(dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
