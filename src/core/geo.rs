use log::debug;
use serde::Serialize;

use super::engine::{compute_as_of, current_calendar_year};
use super::error::FireError;
use super::types::{CityComparison, CityProfile, FinancialProfile, StrategyVariant};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocationSummary {
    pub from: CityComparison,
    pub to: CityComparison,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// Positive when the destination needs a smaller corpus.
    pub corpus_reduction: f64,
}

/// Monthly expenses saved by moving; negative when the target costs more.
pub fn monthly_savings_from_relocation(base_expenses: f64, target_multiplier: f64) -> f64 {
    base_expenses * (1.0 - target_multiplier)
}

pub fn profile_for_city(profile: &FinancialProfile, city: &CityProfile) -> FinancialProfile {
    FinancialProfile {
        monthly_expenses: profile.monthly_expenses * city.cost_multiplier,
        ..profile.clone()
    }
}

pub fn compare_city(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    city: &CityProfile,
    current_year: i32,
) -> Result<CityComparison, FireError> {
    let adjusted = profile_for_city(profile, city);
    let result = compute_as_of(&adjusted, strategy, &[], &[], current_year)?;
    Ok(CityComparison {
        city: *city,
        result,
    })
}

pub fn compare_cities(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    cities: &[CityProfile],
) -> Result<Vec<CityComparison>, FireError> {
    compare_cities_as_of(profile, strategy, cities, current_calendar_year())
}

/// Ranks cities from the smallest required corpus to the largest. Ties keep
/// the input order.
pub fn compare_cities_as_of(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    cities: &[CityProfile],
    current_year: i32,
) -> Result<Vec<CityComparison>, FireError> {
    let mut ranked = cities
        .iter()
        .map(|city| compare_city(profile, strategy, city, current_year))
        .collect::<Result<Vec<_>, _>>()?;
    ranked.sort_by(|a, b| {
        a.result
            .required_corpus
            .total_cmp(&b.result.required_corpus)
    });

    if let Some(best) = ranked.first() {
        debug!(
            "{} cities ranked for {}; cheapest is {}",
            ranked.len(),
            strategy.id,
            best.city.id
        );
    }
    Ok(ranked)
}

pub fn relocation_summary(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    from: &CityProfile,
    to: &CityProfile,
    current_year: i32,
) -> Result<RelocationSummary, FireError> {
    let from_comparison = compare_city(profile, strategy, from, current_year)?;
    let to_comparison = compare_city(profile, strategy, to, current_year)?;
    let monthly_savings = monthly_savings_from_relocation(profile.monthly_expenses, to.cost_multiplier);
    let corpus_reduction =
        from_comparison.result.required_corpus - to_comparison.result.required_corpus;

    Ok(RelocationSummary {
        from: from_comparison,
        to: to_comparison,
        monthly_savings,
        annual_savings: monthly_savings * 12.0,
        corpus_reduction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{CITIES, city_by_id, strategy_by_id};
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx_rel(actual: f64, expected: f64) {
        let tol = expected.abs().max(1.0) * 1e-12;
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_profile() -> FinancialProfile {
        FinancialProfile {
            current_age: 25,
            retirement_age: 45,
            life_expectancy: 85,
            current_savings: 500_000.0,
            monthly_expenses: 40_000.0,
            monthly_income: 80_000.0,
            current_monthly_savings: 30_000.0,
            expected_return: 12.0,
            inflation_rate: 6.0,
        }
    }

    fn city(id: &'static str, cost_multiplier: f64) -> CityProfile {
        CityProfile {
            id,
            display_name: id,
            region: "Test",
            cost_multiplier,
            average_rent: 0.0,
            average_utilities: 0.0,
            average_food: 0.0,
            average_transport: 0.0,
        }
    }

    #[test]
    fn corpus_scales_linearly_with_cost_multiplier() {
        let profile = sample_profile();
        let strategy = strategy_by_id("geo").expect("geo");
        let ranked = compare_cities_as_of(
            &profile,
            strategy,
            &[city("base", 1.0), city("cheap", 0.6)],
            2025,
        )
        .expect("valid");

        assert_eq!(ranked[0].city.id, "cheap");
        assert_eq!(ranked[1].city.id, "base");
        assert_approx_rel(
            ranked[0].result.required_corpus,
            0.6 * ranked[1].result.required_corpus,
        );
    }

    #[test]
    fn full_table_is_sorted_ascending_by_required_corpus() {
        let strategy = strategy_by_id("lean").expect("lean");
        let ranked = compare_cities_as_of(&sample_profile(), strategy, CITIES, 2025).expect("valid");
        assert_eq!(ranked.len(), CITIES.len());
        assert_eq!(ranked[0].city.id, "bhubaneswar");
        assert_eq!(ranked[ranked.len() - 1].city.id, "mumbai");
        for pair in ranked.windows(2) {
            assert!(pair[0].result.required_corpus <= pair[1].result.required_corpus);
        }
    }

    #[test]
    fn relocation_savings_sign_follows_multiplier() {
        assert_approx_rel(monthly_savings_from_relocation(50_000.0, 0.6), 20_000.0);
        assert_approx_rel(monthly_savings_from_relocation(50_000.0, 1.0), 0.0);
        assert!(monthly_savings_from_relocation(50_000.0, 1.2) < 0.0);
    }

    #[test]
    fn relocation_summary_reports_corpus_reduction() {
        let strategy = strategy_by_id("geo").expect("geo");
        let mumbai = city_by_id("mumbai").expect("mumbai");
        let goa = city_by_id("goa").expect("goa");
        let summary =
            relocation_summary(&sample_profile(), strategy, mumbai, goa, 2025).expect("valid");

        assert_approx_rel(summary.monthly_savings, 16_000.0);
        assert_approx_rel(summary.annual_savings, 192_000.0);
        assert!(summary.corpus_reduction > 0.0);
        assert_approx_rel(
            summary.corpus_reduction,
            summary.from.result.required_corpus - summary.to.result.required_corpus,
        );
    }

    #[test]
    fn invalid_profile_propagates() {
        let mut profile = sample_profile();
        profile.retirement_age = 10;
        let strategy = strategy_by_id("lean").expect("lean");
        assert!(compare_cities_as_of(&profile, strategy, CITIES, 2025).is_err());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_ranking_is_non_decreasing(
            multipliers in proptest::collection::vec(1u32..200, 1..10),
            expenses in 1_000u32..200_000,
        ) {
            let mut profile = sample_profile();
            profile.monthly_expenses = f64::from(expenses);
            let cities: Vec<_> = multipliers
                .iter()
                .map(|m| city("c", f64::from(*m) / 100.0))
                .collect();
            let strategy = strategy_by_id("barista").expect("barista");
            let ranked = compare_cities_as_of(&profile, strategy, &cities, 2025).expect("valid");
            prop_assert!(ranked.len() == cities.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].result.required_corpus <= pair[1].result.required_corpus);
            }
        }
    }
}
