use proptest::prelude::*;
use rust_decimal::Decimal;
use solar_calc_core::input::parse_number;
use solar_calc_core::projection::{project, ParameterSet};
use solar_calc_core::share::{self, SharePayload};

/// Decimal with `scale` fractional digits drawn from an integer range.
fn decimal_in(range: std::ops::Range<i64>, scale: u32) -> impl Strategy<Value = Decimal> {
    range.prop_map(move |n| Decimal::new(n, scale))
}

// Realistic magnitudes with some negative and zero entries mixed in
prop_compose! {
    fn parameter_set_strategy()(
        capacity_kw in decimal_in(-100..50_000, 1),
        daily_hours in decimal_in(0..80, 1),
        smp_price in decimal_in(-100..3_000, 1),
        rec_price in decimal_in(0..2_000, 1),
        rec_weight in decimal_in(0..50, 1),
        operating_cost in decimal_in(0..50_000_000, 0),
        equity in decimal_in(-1_000..500_000_000, 0),
        loan_principal in decimal_in(-1_000..500_000_000, 0),
        annual_interest_rate_pct in decimal_in(0..200, 1),
        term_years in -2i32..40,
        defer_years in -2i32..45,
    ) -> ParameterSet {
        ParameterSet {
            capacity_kw,
            daily_hours,
            smp_price,
            rec_price,
            rec_weight,
            operating_cost,
            equity,
            loan_principal,
            annual_interest_rate_pct,
            term_years,
            defer_years,
        }
    }
}

proptest! {
    #[test]
    fn prop_projection_is_deterministic(params in parameter_set_strategy()) {
        prop_assert_eq!(project(&params), project(&params));
    }

    #[test]
    fn prop_length_matches_term(params in parameter_set_strategy()) {
        let result = project(&params);
        prop_assert_eq!(result.years.len(), params.term_years.max(0) as usize);
    }

    #[test]
    fn prop_cumulative_is_running_sum(params in parameter_set_strategy()) {
        let result = project(&params);
        let mut previous = Decimal::ZERO;
        for (i, y) in result.years.iter().enumerate() {
            prop_assert_eq!(y.year, i as i32 + 1);
            prop_assert_eq!(y.cumulative_profit, previous + y.net_profit);
            previous = y.cumulative_profit;
        }
    }

    #[test]
    fn prop_break_even_is_first_crossing(params in parameter_set_strategy()) {
        let result = project(&params);
        let target = if params.equity > Decimal::ZERO {
            params.equity
        } else {
            params.loan_principal
        };
        match result.break_even_year {
            Some(year) => {
                prop_assert!(target > Decimal::ZERO);
                let idx = (year - 1) as usize;
                prop_assert!(result.years[idx].cumulative_profit >= target);
                for earlier in &result.years[..idx] {
                    prop_assert!(earlier.cumulative_profit < target);
                }
            }
            None => {
                if target > Decimal::ZERO {
                    for y in &result.years {
                        prop_assert!(y.cumulative_profit < target);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_undefined_metrics_only_without_profit(params in parameter_set_strategy()) {
        let summary = project(&params).summary;
        if summary.final_net_profit <= Decimal::ZERO {
            prop_assert_eq!(summary.roi, None);
            prop_assert_eq!(summary.payback_years, None);
            prop_assert_eq!(summary.loan_roi, Decimal::ZERO);
        } else if params.equity > Decimal::ZERO {
            prop_assert!(summary.roi.is_some());
            prop_assert!(summary.payback_years.is_some());
        }
    }

    #[test]
    fn prop_share_round_trip(params in parameter_set_strategy(), name in "[a-zA-Z0-9 ]{0,24}") {
        let payload = SharePayload::new(params).with_project_name(name);
        let token = share::encode(&payload).unwrap();
        let decoded = share::decode(&token).unwrap();
        prop_assert!(decoded.is_consistent());
        prop_assert_eq!(decoded, payload);
    }

    #[test]
    fn prop_parse_number_ignores_grouping(n in 0i64..10_000_000_000) {
        let grouped = solar_calc_core::report::format_grouped(Decimal::from(n), 0);
        prop_assert_eq!(parse_number(&grouped), Decimal::from(n));
    }
}
