use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::projection::engine::ParameterSet;
use crate::time_value::{self, MONTHS_PER_YEAR};
use crate::types::{Money, Rate};

/// Annual loan payments over the projection: interest-only through the
/// defer period, then a level annuity over the remaining months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtServiceSchedule {
    /// Periodic rate applied to the amortizing phase
    pub monthly_rate: Rate,
    /// Months left to amortize after the defer period (may be <= 0)
    pub amortizing_months: i64,
    /// Level monthly payment once amortization starts
    pub monthly_payment: Money,
    /// Annual interest paid during each defer year
    pub interest_only_annual: Money,
    /// Years 1..=defer_years are interest-only
    pub defer_years: i32,
}

impl DebtServiceSchedule {
    pub fn from_params(params: &ParameterSet) -> Self {
        // No loan (or a nonsensical negative one) carries no debt service
        let principal = params.loan_principal.max(Decimal::ZERO);
        let monthly_rate = time_value::monthly_rate_from_pct(params.annual_interest_rate_pct);
        let amortizing_months =
            (i64::from(params.term_years) - i64::from(params.defer_years)) * MONTHS_PER_YEAR;
        let monthly_payment = time_value::level_payment(monthly_rate, amortizing_months, principal);
        let interest_only_annual =
            principal.saturating_mul(params.annual_interest_rate_pct) / dec!(100);

        DebtServiceSchedule {
            monthly_rate,
            amortizing_months,
            monthly_payment,
            interest_only_annual,
            defer_years: params.defer_years,
        }
    }

    /// Twelve level payments; zero when the term is fully deferred.
    pub fn steady_state_annual(&self) -> Money {
        self.monthly_payment
            .saturating_mul(Decimal::from(MONTHS_PER_YEAR))
    }

    /// Debt service for a 1-based projection year.
    pub fn for_year(&self, year: i32) -> Money {
        if year <= self.defer_years {
            self.interest_only_annual
        } else {
            self.steady_state_annual()
        }
    }

    pub fn is_fully_deferred(&self) -> bool {
        self.amortizing_months <= 0
    }
}
