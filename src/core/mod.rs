mod accumulation;
mod catalog;
mod engine;
mod error;
mod format;
mod geo;
mod insights;
mod scenario;
mod types;
mod withdrawal;

pub use accumulation::{
    first_goal_year, progress_percentage, project_accumulation, project_accumulation_from,
};
pub use catalog::{CITIES, STRATEGIES, city_by_id, strategy_by_id};
pub use engine::{
    MAX_AGE, MAX_SAVINGS_RATE, MIN_RATE_PCT, SAFE_WITHDRAWAL_RATE_CAP, annuity_future_value,
    compute, compute_as_of, current_calendar_year, future_annual_expenses, growth_factor,
    level_payment_for_future_value, validate_one_time_expense, validate_profile,
    validate_recurring_expense,
};
pub use error::FireError;
pub use format::format_inr;
pub use geo::{
    RelocationSummary, compare_cities, compare_cities_as_of, monthly_savings_from_relocation,
    profile_for_city, relocation_summary,
};
pub use insights::{
    CorpusBreakdown, ProgressInsights, SavingsRateTier, corpus_breakdown, progress_insights,
};
pub use scenario::{
    ProfileOverrides, Scenario, ScenarioOutcome, evaluate_scenario, evaluate_scenarios,
    standard_scenarios,
};
pub use types::{
    CityComparison, CityProfile, FinancialProfile, FireResult, OneTimeCategory, OneTimeExpense,
    RecurringCategory, RecurringExpense, StrategyVariant, WithdrawalYear, YearPoint,
};
pub use withdrawal::{
    SAFE_WITHDRAWAL_BENCHMARK, first_depletion, post_retirement_return, project_withdrawals,
    project_withdrawals_from, safe_withdrawal_rate, within_safe_withdrawal_benchmark,
};
