use chrono::Datelike;
use log::debug;

use super::error::FireError;
use super::types::{FinancialProfile, FireResult, OneTimeExpense, RecurringExpense, StrategyVariant};

/// Highest share of monthly income a plan may ask the saver to put away.
pub const MAX_SAVINGS_RATE: f64 = 0.8;
/// Cap on the annual withdrawal rate used for passive-income estimates.
pub const SAFE_WITHDRAWAL_RATE_CAP: f64 = 0.04;
/// Oldest age any profile field may hold; keeps projections to a few hundred
/// rows.
pub const MAX_AGE: u32 = 150;
/// Annual rates must stay above this, in percent, so growth bases stay positive.
pub const MIN_RATE_PCT: f64 = -100.0;

pub fn current_calendar_year() -> i32 {
    chrono::Local::now().year()
}

pub fn validate_profile(profile: &FinancialProfile) -> Result<(), FireError> {
    if profile.retirement_age <= profile.current_age {
        return Err(FireError::InvalidProfile(format!(
            "retirement age {} must be greater than current age {}",
            profile.retirement_age, profile.current_age
        )));
    }

    if profile.life_expectancy > MAX_AGE {
        return Err(FireError::InvalidProfile(format!(
            "life expectancy {} must be at most {MAX_AGE}",
            profile.life_expectancy
        )));
    }

    if profile.life_expectancy < profile.retirement_age {
        return Err(FireError::InvalidProfile(format!(
            "life expectancy {} must be at least retirement age {}",
            profile.life_expectancy, profile.retirement_age
        )));
    }

    for (name, value) in [
        ("current savings", profile.current_savings),
        ("monthly expenses", profile.monthly_expenses),
        ("monthly income", profile.monthly_income),
        ("current monthly savings", profile.current_monthly_savings),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(FireError::InvalidProfile(format!("{name} must be >= 0")));
        }
    }

    for (name, rate) in [
        ("expected return", profile.expected_return),
        ("inflation rate", profile.inflation_rate),
    ] {
        if !rate.is_finite() || rate <= MIN_RATE_PCT {
            return Err(FireError::InvalidProfile(format!(
                "{name} must be finite and > {MIN_RATE_PCT}"
            )));
        }
    }

    Ok(())
}

pub fn validate_one_time_expense(
    expense: &OneTimeExpense,
    current_year: i32,
) -> Result<(), FireError> {
    if !expense.amount.is_finite() || expense.amount < 0.0 {
        return Err(invalid_expense(&expense.id, "amount must be >= 0"));
    }
    if expense.target_year < current_year {
        return Err(invalid_expense(
            &expense.id,
            &format!(
                "target year {} is before {current_year}",
                expense.target_year
            ),
        ));
    }
    if let Some(rate) = expense.inflation_rate {
        if !rate.is_finite() {
            return Err(invalid_expense(&expense.id, "inflation rate must be finite"));
        }
    }
    Ok(())
}

pub fn validate_recurring_expense(expense: &RecurringExpense) -> Result<(), FireError> {
    if !expense.monthly_amount.is_finite() || expense.monthly_amount < 0.0 {
        return Err(invalid_expense(&expense.id, "monthly amount must be >= 0"));
    }
    if let Some(end_year) = expense.end_year {
        if end_year < expense.start_year {
            return Err(invalid_expense(
                &expense.id,
                &format!(
                    "end year {end_year} is before start year {}",
                    expense.start_year
                ),
            ));
        }
    }
    Ok(())
}

fn invalid_expense(id: &str, reason: &str) -> FireError {
    FireError::InvalidExpense {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

/// `(1 + rate_pct / 100)^years`; negative `years` discounts.
pub fn growth_factor(rate_pct: f64, years: i32) -> f64 {
    (1.0 + rate_pct / 100.0).powi(years)
}

/// Annual expenses at the retirement date, in retirement-year money.
pub fn future_annual_expenses(profile: &FinancialProfile) -> f64 {
    let years = profile.years_to_retirement().max(0) as i32;
    profile.monthly_expenses * growth_factor(profile.inflation_rate, years) * 12.0
}

/// Future value of a level payment made at the end of each month.
pub fn annuity_future_value(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return payment * f64::from(months);
    }
    payment * ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate
}

/// Level monthly payment whose future value after `months` equals `target`.
pub fn level_payment_for_future_value(target: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        // No months left to spread it over: the whole amount is due now.
        return target;
    }
    if monthly_rate == 0.0 {
        return target / f64::from(months);
    }
    let accumulation = (1.0 + monthly_rate).powi(months as i32) - 1.0;
    if accumulation == 0.0 {
        return target / f64::from(months);
    }
    target * monthly_rate / accumulation
}

pub fn one_time_expense_total(
    profile: &FinancialProfile,
    expenses: &[OneTimeExpense],
    current_year: i32,
) -> f64 {
    expenses
        .iter()
        .map(|expense| {
            let rate = expense.inflation_rate.unwrap_or(profile.inflation_rate);
            expense.amount * growth_factor(rate, expense.target_year - current_year)
        })
        .sum()
}

pub fn recurring_expense_total(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    expenses: &[RecurringExpense],
) -> f64 {
    let years = profile.years_to_retirement().max(0) as i32;
    let inflation = growth_factor(profile.inflation_rate, years);
    expenses
        .iter()
        .map(|expense| expense.monthly_amount * 12.0 * inflation * strategy.multiplier)
        .sum()
}

pub fn compute(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    one_time: &[OneTimeExpense],
    recurring: &[RecurringExpense],
) -> Result<FireResult, FireError> {
    compute_as_of(profile, strategy, one_time, recurring, current_calendar_year())
}

pub fn compute_as_of(
    profile: &FinancialProfile,
    strategy: &StrategyVariant,
    one_time: &[OneTimeExpense],
    recurring: &[RecurringExpense],
    current_year: i32,
) -> Result<FireResult, FireError> {
    validate_profile(profile)?;

    let years = profile.years_to_retirement() as u32;
    let months = years.saturating_mul(12);
    let future_annual = future_annual_expenses(profile);

    let (base_corpus, monthly_required_income) = match strategy.income_coverage_ratio {
        Some(ratio) if ratio > 0.0 => (
            future_annual * (1.0 - ratio) * strategy.multiplier,
            Some(future_annual * ratio / 12.0),
        ),
        _ => (future_annual * strategy.multiplier, None),
    };

    let one_time_total = one_time_expense_total(profile, one_time, current_year);
    let recurring_total = recurring_expense_total(profile, strategy, recurring);
    let required_corpus = base_corpus + one_time_total + recurring_total;

    let monthly_rate = profile.expected_return / 100.0 / 12.0;
    let savings_growth =
        profile.current_savings * growth_factor(profile.expected_return, years as i32);
    let contributions_fv =
        annuity_future_value(profile.current_monthly_savings, monthly_rate, months);
    let projected_corpus = savings_growth + contributions_fv;

    let shortfall = (required_corpus - projected_corpus).max(0.0);
    let extra_monthly = if shortfall > 0.0 {
        level_payment_for_future_value(shortfall, monthly_rate, months)
    } else {
        0.0
    };
    let monthly_required_savings = profile.current_monthly_savings + extra_monthly;
    let achievable = monthly_required_savings <= MAX_SAVINGS_RATE * profile.monthly_income;

    let withdrawal_rate = (profile.expected_return / 100.0).min(SAFE_WITHDRAWAL_RATE_CAP);
    let monthly_passive_income = projected_corpus * withdrawal_rate / 12.0;

    debug!(
        "{}: required {:.0}, projected {:.0}, shortfall {:.0}, monthly savings {:.0}",
        strategy.id, required_corpus, projected_corpus, shortfall, monthly_required_savings
    );

    Ok(FireResult {
        required_corpus,
        monthly_required_savings,
        years_to_goal: years,
        total_months_to_goal: months,
        projected_corpus_at_retirement: projected_corpus.max(required_corpus),
        shortfall,
        achievable,
        monthly_passive_income,
        monthly_required_income,
    })
}
