use super::engine::{current_calendar_year, future_annual_expenses, growth_factor, validate_profile};
use super::error::FireError;
use super::types::{FinancialProfile, FireResult, WithdrawalYear};

/// Percentage points shaved off the accumulation return once retired.
pub const RETIREMENT_RETURN_HAIRCUT: f64 = 2.0;
/// Lowest post-retirement return assumed, in percent.
pub const RETIREMENT_RETURN_FLOOR: f64 = 4.0;
/// Conventional safe withdrawal benchmark, in percent.
pub const SAFE_WITHDRAWAL_BENCHMARK: f64 = 4.0;

pub fn post_retirement_return(expected_return: f64) -> f64 {
    (expected_return - RETIREMENT_RETURN_HAIRCUT).max(RETIREMENT_RETURN_FLOOR)
}

pub fn project_withdrawals(
    profile: &FinancialProfile,
    result: &FireResult,
) -> Result<Vec<WithdrawalYear>, FireError> {
    project_withdrawals_from(profile, result, current_calendar_year())
}

/// Draws inflation-adjusted expenses from the retirement corpus until life
/// expectancy. Stops after the first year that empties the corpus.
pub fn project_withdrawals_from(
    profile: &FinancialProfile,
    result: &FireResult,
    current_year: i32,
) -> Result<Vec<WithdrawalYear>, FireError> {
    validate_profile(profile)?;

    let years_in_retirement = profile.years_in_retirement() as u32;
    let retirement_year = current_year + profile.years_to_retirement() as i32;
    let base_withdrawal = future_annual_expenses(profile);
    let return_rate = post_retirement_return(profile.expected_return) / 100.0;

    let mut years = Vec::with_capacity(years_in_retirement as usize);
    let mut corpus = result.projected_corpus_at_retirement;
    for offset in 0..years_in_retirement {
        let annual_withdrawal =
            base_withdrawal * growth_factor(profile.inflation_rate, offset as i32);
        let investment_growth = corpus * return_rate;
        let ending = corpus + investment_growth - annual_withdrawal;

        years.push(WithdrawalYear {
            year: retirement_year + offset as i32,
            age: profile.retirement_age + offset,
            starting_corpus: corpus,
            annual_withdrawal,
            investment_growth,
            ending_corpus: ending.max(0.0),
            corpus_depletion_risk: ending < 0.0,
        });

        corpus = ending.max(0.0);
        if corpus <= 0.0 {
            break;
        }
    }

    Ok(years)
}

/// First-year withdrawal as a percentage of the retirement corpus.
pub fn safe_withdrawal_rate(profile: &FinancialProfile, result: &FireResult) -> Option<f64> {
    if result.projected_corpus_at_retirement <= 0.0 {
        return None;
    }
    Some(future_annual_expenses(profile) / result.projected_corpus_at_retirement * 100.0)
}

pub fn within_safe_withdrawal_benchmark(rate: f64) -> bool {
    rate <= SAFE_WITHDRAWAL_BENCHMARK
}

pub fn first_depletion(years: &[WithdrawalYear]) -> Option<&WithdrawalYear> {
    years.iter().find(|y| y.corpus_depletion_risk)
}
