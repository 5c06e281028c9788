use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solar_calc_core::input::FormInput;
use solar_calc_core::projection::{project, run_projection, InvestmentBasis, ParameterSet};

// ===========================================================================
// Reference scenario: the calculator's starting form
// ===========================================================================

fn reference_params() -> ParameterSet {
    ParameterSet {
        capacity_kw: dec!(100),
        daily_hours: dec!(3.5),
        smp_price: dec!(130),
        rec_price: dec!(70),
        rec_weight: dec!(1.2),
        operating_cost: Decimal::ZERO,
        equity: dec!(80_000_000),
        loan_principal: dec!(150_000_000),
        annual_interest_rate_pct: dec!(5.8),
        term_years: 10,
        defer_years: 0,
    }
}

#[test]
fn test_reference_generation_and_revenue() {
    let result = project(&reference_params());
    // 100 × 365 × 3.5 = 127,750 kWh; × (130 + 70 × 1.2) = 27,338,500
    assert_eq!(result.summary.annual_generation_kwh, dec!(127_750));
    assert_eq!(result.summary.annual_revenue, dec!(27_338_500));
}

#[test]
fn test_reference_ten_identical_years() {
    let result = project(&reference_params());
    assert_eq!(result.years.len(), 10);
    let first = &result.years[0];
    for (i, y) in result.years.iter().enumerate() {
        assert_eq!(y.year, i as i32 + 1);
        assert_eq!(y.net_profit, first.net_profit);
        assert_eq!(y.annual_debt_service, first.annual_debt_service);
    }
}

#[test]
fn test_reference_break_even_matches_cumulative() {
    let result = project(&reference_params());
    match result.break_even_year {
        Some(year) => {
            let idx = (year - 1) as usize;
            assert!(result.years[idx].cumulative_profit >= dec!(80_000_000));
        }
        None => assert!(result
            .years
            .iter()
            .all(|y| y.cumulative_profit < dec!(80_000_000))),
    }
}

#[test]
fn test_default_form_matches_reference_params() {
    assert_eq!(FormInput::default().normalize(), reference_params());
}

// ===========================================================================
// Edge cases
// ===========================================================================

#[test]
fn test_zero_interest_fallback() {
    let params = ParameterSet {
        loan_principal: dec!(120),
        annual_interest_rate_pct: Decimal::ZERO,
        term_years: 10,
        defer_years: 0,
        ..ParameterSet::default()
    };
    let result = project(&params);
    assert_eq!(result.years.len(), 10);
    for y in &result.years {
        assert_eq!(y.annual_debt_service, dec!(12));
    }
    assert_eq!(result.summary.annual_debt_service, dec!(12));
}

#[test]
fn test_full_defer_is_interest_only() {
    let params = ParameterSet {
        defer_years: 10,
        ..reference_params()
    };
    let result = project(&params);
    // 150,000,000 × 5.8% = 8,700,000 interest every year
    for y in &result.years {
        assert_eq!(y.annual_debt_service, dec!(8_700_000));
    }
    assert_eq!(result.summary.annual_debt_service, Decimal::ZERO);
}

#[test]
fn test_partial_defer_switches_to_annuity() {
    let params = ParameterSet {
        defer_years: 2,
        ..reference_params()
    };
    let result = project(&params);
    assert_eq!(result.years[0].annual_debt_service, dec!(8_700_000));
    assert_eq!(result.years[1].annual_debt_service, dec!(8_700_000));
    let amortizing = result.years[2].annual_debt_service;
    assert_eq!(amortizing, result.summary.annual_debt_service);
    assert!(result.years[2..]
        .iter()
        .all(|y| y.annual_debt_service == amortizing));
    // Eight years to repay the same loan costs more per year than ten
    let no_defer = project(&reference_params());
    assert!(amortizing > no_defer.summary.annual_debt_service);
}

#[test]
fn test_defer_beyond_term_does_not_fail() {
    let params = ParameterSet {
        term_years: 3,
        defer_years: 8,
        ..reference_params()
    };
    let result = project(&params);
    assert_eq!(result.years.len(), 3);
    assert!(result
        .years
        .iter()
        .all(|y| y.annual_debt_service == dec!(8_700_000)));
    assert_eq!(result.summary.annual_debt_service, Decimal::ZERO);
}

#[test]
fn test_no_loan_has_no_debt_service() {
    let params = ParameterSet {
        loan_principal: Decimal::ZERO,
        ..reference_params()
    };
    let result = project(&params);
    assert!(result
        .years
        .iter()
        .all(|y| y.annual_debt_service.is_zero()));
    assert_eq!(result.years[0].net_profit, dec!(27_338_500));
    // 80M / 27.34M = 2.93 → year 3
    assert_eq!(result.break_even_year, Some(3));
    assert_eq!(result.summary.payback_years, Some(dec!(3)));
    assert_eq!(result.summary.loan_roi, Decimal::ZERO);
}

#[test]
fn test_degenerate_unfunded_scenario() {
    let params = ParameterSet {
        equity: Decimal::ZERO,
        loan_principal: Decimal::ZERO,
        term_years: 5,
        ..reference_params()
    };
    let result = project(&params);
    assert_eq!(result.years.len(), 5);
    assert_eq!(result.summary.basis, InvestmentBasis::Unfunded);
    assert_eq!(result.summary.roi, None);
    assert_eq!(result.summary.loan_roi, Decimal::ZERO);
    assert_eq!(result.summary.payback_years, None);
    assert_eq!(result.break_even_year, None);
}

#[test]
fn test_loan_only_targets_principal() {
    let params = ParameterSet {
        equity: Decimal::ZERO,
        ..reference_params()
    };
    let result = project(&params);
    assert_eq!(result.summary.basis, InvestmentBasis::Loan);
    assert_eq!(result.summary.roi, None);
    // 7.535M / 150M ≈ 5.0%
    assert_eq!(result.summary.loan_roi, dec!(5.0));
    // 150M / 7.535M = 19.9 → 20 years
    assert_eq!(result.summary.payback_years, Some(dec!(20)));
    assert_eq!(result.break_even_year, None);
}

#[test]
fn test_roi_on_equity() {
    let result = project(&reference_params());
    // 7,535,114 / 80,000,000 = 9.42%
    assert_eq!(result.summary.roi, Some(dec!(9.4)));
    assert_eq!(result.summary.loan_roi, dec!(5.0));
}

#[test]
fn test_loss_making_project() {
    let params = ParameterSet {
        operating_cost: dec!(50_000_000),
        ..reference_params()
    };
    let result = project(&params);
    assert!(result.years.iter().all(|y| y.net_profit < Decimal::ZERO));
    assert!(result.years[9].cumulative_profit < result.years[0].cumulative_profit);
    assert_eq!(result.summary.roi, None);
    assert_eq!(result.summary.payback_years, None);
    assert_eq!(result.break_even_year, None);
}

#[test]
fn test_run_projection_envelope() {
    let output = run_projection(&reference_params());
    assert_eq!(output.result, project(&reference_params()));
    assert_eq!(output.assumptions["term_years"], 10);
    assert_eq!(output.assumptions["unit_price"], "214.0");
    assert!(output
        .warnings
        .iter()
        .any(|w| w.contains("not recovered within the 10-year term")));

    let json = serde_json::to_value(&output).unwrap();
    assert!(json["result"]["years"].is_array());
    assert!(json["result"]["break_even_year"].is_null());
}
