use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_savings: f64,
    pub monthly_expenses: f64,
    pub monthly_income: f64,
    pub current_monthly_savings: f64,
    /// Annual nominal return in percent, e.g. 12.0.
    pub expected_return: f64,
    /// Annual inflation in percent, e.g. 6.0.
    pub inflation_rate: f64,
}

impl FinancialProfile {
    pub fn years_to_retirement(&self) -> i64 {
        i64::from(self.retirement_age) - i64::from(self.current_age)
    }

    pub fn years_in_retirement(&self) -> i64 {
        i64::from(self.life_expectancy) - i64::from(self.retirement_age)
    }
}

/// A named FIRE flavour. `income_coverage_ratio` is the share of retirement
/// expenses paid by part-time work; `None` means the corpus covers everything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyVariant {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub multiplier: f64,
    pub income_coverage_ratio: Option<f64>,
}

impl StrategyVariant {
    pub fn has_income_component(&self) -> bool {
        matches!(self.income_coverage_ratio, Some(ratio) if ratio > 0.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneTimeCategory {
    Marriage,
    House,
    Car,
    Education,
    Other,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringCategory {
    Travel,
    Luxury,
    Health,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeExpense {
    pub id: String,
    pub name: String,
    /// Cost in today's money.
    pub amount: f64,
    pub target_year: i32,
    pub category: OneTimeCategory,
    /// Overrides the profile inflation rate for this expense only.
    #[serde(default)]
    pub inflation_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: String,
    pub name: String,
    pub monthly_amount: f64,
    pub start_year: i32,
    #[serde(default)]
    pub end_year: Option<i32>,
    pub category: RecurringCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub region: &'static str,
    pub cost_multiplier: f64,
    pub average_rent: f64,
    pub average_utilities: f64,
    pub average_food: f64,
    pub average_transport: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireResult {
    pub required_corpus: f64,
    pub monthly_required_savings: f64,
    pub years_to_goal: u32,
    pub total_months_to_goal: u32,
    /// Goal-meeting trajectory: never below `required_corpus`.
    pub projected_corpus_at_retirement: f64,
    pub shortfall: f64,
    pub achievable: bool,
    pub monthly_passive_income: f64,
    pub monthly_required_income: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: i32,
    pub age: u32,
    pub total_corpus: f64,
    pub yearly_contribution: f64,
    pub progress_percentage: f64,
    pub cumulative_contributions: f64,
    pub investment_growth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalYear {
    pub year: i32,
    pub age: u32,
    pub starting_corpus: f64,
    pub annual_withdrawal: f64,
    pub investment_growth: f64,
    pub ending_corpus: f64,
    pub corpus_depletion_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityComparison {
    pub city: CityProfile,
    pub result: FireResult,
}
