use serde::Serialize;

use super::engine::{future_annual_expenses, validate_profile};
use super::error::FireError;
use super::types::{FinancialProfile, FireResult, StrategyVariant};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SavingsRateTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl SavingsRateTier {
    pub fn from_rate(rate_pct: f64) -> Self {
        if rate_pct >= 50.0 {
            SavingsRateTier::Excellent
        } else if rate_pct >= 20.0 {
            SavingsRateTier::Good
        } else {
            SavingsRateTier::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressInsights {
    pub current_progress_pct: f64,
    /// `None` when there is no income to compare against.
    pub savings_rate_pct: Option<f64>,
    pub required_savings_rate_pct: Option<f64>,
    pub savings_rate_tier: Option<SavingsRateTier>,
    pub achievable: bool,
}

pub fn progress_insights(profile: &FinancialProfile, result: &FireResult) -> ProgressInsights {
    let current_progress_pct = if result.required_corpus > 0.0 {
        profile.current_savings / result.required_corpus * 100.0
    } else {
        100.0
    };

    let (savings_rate_pct, required_savings_rate_pct) = if profile.monthly_income > 0.0 {
        (
            Some(profile.current_monthly_savings / profile.monthly_income * 100.0),
            Some(result.monthly_required_savings / profile.monthly_income * 100.0),
        )
    } else {
        (None, None)
    };

    ProgressInsights {
        current_progress_pct,
        savings_rate_pct,
        required_savings_rate_pct,
        savings_rate_tier: savings_rate_pct.map(SavingsRateTier::from_rate),
        achievable: result.achievable,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusBreakdown {
    pub future_annual_expenses: f64,
    pub base_corpus: f64,
    /// Annual amount part-time work must still earn in retirement.
    pub part_time_income_needed: f64,
    pub years_in_retirement: u32,
    pub withdrawal_rate: f64,
}

pub fn corpus_breakdown(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
) -> Result<CorpusBreakdown, FireError> {
    validate_profile(profile)?;

    let future_annual = future_annual_expenses(profile);
    let ratio = strategy.income_coverage_ratio.unwrap_or(0.0);

    Ok(CorpusBreakdown {
        future_annual_expenses: future_annual,
        base_corpus: future_annual * (1.0 - ratio) * strategy.multiplier,
        part_time_income_needed: future_annual * ratio,
        years_in_retirement: profile.years_in_retirement() as u32,
        withdrawal_rate: 1.0 / strategy.multiplier,
    })
}
