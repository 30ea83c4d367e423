use super::engine::{current_calendar_year, validate_profile};
use super::error::FireError;
use super::types::{FinancialProfile, FireResult, YearPoint};

pub fn project_accumulation(
    profile: &FinancialProfile,
    result: &FireResult,
) -> Result<Vec<YearPoint>, FireError> {
    project_accumulation_from(profile, result, current_calendar_year())
}

/// Year-end corpus from today until retirement, contributing
/// `monthly_required_savings` every month. Index 0 is today.
pub fn project_accumulation_from(
    profile: &FinancialProfile,
    result: &FireResult,
    start_year: i32,
) -> Result<Vec<YearPoint>, FireError> {
    validate_profile(profile)?;

    let years = profile.years_to_retirement() as u32;
    let monthly_rate = profile.expected_return / 100.0 / 12.0;
    let monthly_contribution = result.monthly_required_savings;
    let yearly_contribution = monthly_contribution * 12.0;

    let mut points = Vec::with_capacity(years as usize + 1);
    points.push(YearPoint {
        year: start_year,
        age: profile.current_age,
        total_corpus: profile.current_savings,
        yearly_contribution: 0.0,
        progress_percentage: progress_percentage(profile.current_savings, result.required_corpus),
        cumulative_contributions: 0.0,
        investment_growth: 0.0,
    });

    let mut corpus = profile.current_savings;
    for index in 1..=years {
        for _ in 0..12 {
            corpus = corpus * (1.0 + monthly_rate) + monthly_contribution;
        }
        let cumulative_contributions = yearly_contribution * f64::from(index);
        let investment_growth =
            (corpus - profile.current_savings - cumulative_contributions).max(0.0);

        points.push(YearPoint {
            year: start_year + index as i32,
            age: profile.current_age + index,
            total_corpus: corpus,
            yearly_contribution,
            progress_percentage: progress_percentage(corpus, result.required_corpus),
            cumulative_contributions,
            investment_growth,
        });
    }

    Ok(points)
}

/// Share of the target reached, capped at 100 for display.
pub fn progress_percentage(corpus: f64, required_corpus: f64) -> f64 {
    if required_corpus <= 0.0 {
        return 100.0;
    }
    (corpus / required_corpus * 100.0).min(100.0)
}

pub fn first_goal_year(points: &[YearPoint]) -> Option<&YearPoint> {
    points.iter().find(|p| p.progress_percentage >= 100.0)
}
