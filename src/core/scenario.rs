use serde::{Deserialize, Serialize};

use super::engine::compute_as_of;
use super::error::FireError;
use super::types::{FinancialProfile, FireResult, OneTimeExpense, RecurringExpense, StrategyVariant};

pub const SAVINGS_BUMP: f64 = 10_000.0;
pub const EXPENSE_CUT: f64 = 5_000.0;
pub const RETIREMENT_DELAY_YEARS: u32 = 5;
pub const RETURN_BUMP: f64 = 2.0;

/// Replacement values for a what-if run. Unset fields keep the base profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileOverrides {
    pub current_age: Option<u32>,
    pub retirement_age: Option<u32>,
    pub life_expectancy: Option<u32>,
    pub current_savings: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub monthly_income: Option<f64>,
    pub current_monthly_savings: Option<f64>,
    pub expected_return: Option<f64>,
    pub inflation_rate: Option<f64>,
}

impl ProfileOverrides {
    pub fn is_empty(&self) -> bool {
        *self == ProfileOverrides::default()
    }

    pub fn apply(&self, base: &FinancialProfile) -> FinancialProfile {
        FinancialProfile {
            current_age: self.current_age.unwrap_or(base.current_age),
            retirement_age: self.retirement_age.unwrap_or(base.retirement_age),
            life_expectancy: self.life_expectancy.unwrap_or(base.life_expectancy),
            current_savings: self.current_savings.unwrap_or(base.current_savings),
            monthly_expenses: self.monthly_expenses.unwrap_or(base.monthly_expenses),
            monthly_income: self.monthly_income.unwrap_or(base.monthly_income),
            current_monthly_savings: self
                .current_monthly_savings
                .unwrap_or(base.current_monthly_savings),
            expected_return: self.expected_return.unwrap_or(base.expected_return),
            inflation_rate: self.inflation_rate.unwrap_or(base.inflation_rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub overrides: ProfileOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub overrides: ProfileOverrides,
    pub result: Option<FireResult>,
    pub error: Option<String>,
}

/// The baseline plus the four standard levers: save more, spend less,
/// retire later, earn more.
pub fn standard_scenarios(profile: &FinancialProfile) -> Vec<Scenario> {
    let delayed_retirement = profile.retirement_age.saturating_add(RETIREMENT_DELAY_YEARS);
    vec![
        Scenario {
            name: "Current Plan".to_string(),
            overrides: ProfileOverrides::default(),
        },
        Scenario {
            name: "Increase Savings +₹10K".to_string(),
            overrides: ProfileOverrides {
                current_monthly_savings: Some(profile.current_monthly_savings + SAVINGS_BUMP),
                ..ProfileOverrides::default()
            },
        },
        Scenario {
            name: "Reduce Expenses -₹5K".to_string(),
            overrides: ProfileOverrides {
                monthly_expenses: Some((profile.monthly_expenses - EXPENSE_CUT).max(0.0)),
                ..ProfileOverrides::default()
            },
        },
        Scenario {
            name: "Retire 5 Years Later".to_string(),
            overrides: ProfileOverrides {
                retirement_age: Some(delayed_retirement),
                life_expectancy: (profile.life_expectancy < delayed_retirement)
                    .then_some(delayed_retirement),
                ..ProfileOverrides::default()
            },
        },
        Scenario {
            name: "Higher Returns +2%".to_string(),
            overrides: ProfileOverrides {
                expected_return: Some(profile.expected_return + RETURN_BUMP),
                ..ProfileOverrides::default()
            },
        },
    ]
}

pub fn evaluate_scenario(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    one_time: &[OneTimeExpense],
    recurring: &[RecurringExpense],
    overrides: &ProfileOverrides,
    current_year: i32,
) -> Result<FireResult, FireError> {
    let adjusted = overrides.apply(profile);
    compute_as_of(&adjusted, strategy, one_time, recurring, current_year)
}

/// Runs every scenario independently; one bad override does not hide the
/// others.
pub fn evaluate_scenarios(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    one_time: &[OneTimeExpense],
    recurring: &[RecurringExpense],
    scenarios: &[Scenario],
    current_year: i32,
) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|scenario| {
            match evaluate_scenario(
                profile,
                strategy,
                one_time,
                recurring,
                &scenario.overrides,
                current_year,
            ) {
                Ok(result) => ScenarioOutcome {
                    name: scenario.name.clone(),
                    overrides: scenario.overrides.clone(),
                    result: Some(result),
                    error: None,
                },
                Err(err) => ScenarioOutcome {
                    name: scenario.name.clone(),
                    overrides: scenario.overrides.clone(),
                    result: None,
                    error: Some(err.to_string()),
                },
            }
        })
        .collect()
}
