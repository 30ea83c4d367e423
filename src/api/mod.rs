use axum::{
    Router,
    extract::Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    CITIES, CityComparison, CityProfile, CorpusBreakdown, FinancialProfile, FireError, FireResult,
    MAX_AGE, OneTimeExpense, ProfileOverrides, ProgressInsights, RecurringExpense,
    RelocationSummary, STRATEGIES, Scenario, ScenarioOutcome, StrategyVariant, WithdrawalYear,
    YearPoint, city_by_id, compare_cities_as_of, compute_as_of, corpus_breakdown,
    current_calendar_year, evaluate_scenarios, first_depletion, first_goal_year, format_inr,
    post_retirement_return, progress_insights, project_accumulation_from,
    project_withdrawals_from, relocation_summary, safe_withdrawal_rate, standard_scenarios,
    strategy_by_id, validate_one_time_expense, validate_recurring_expense,
    within_safe_withdrawal_benchmark,
};

const DEFAULT_STRATEGY: &str = "lean";

#[derive(Parser, Debug)]
#[command(
    name = "fire-planner",
    about = "FIRE corpus planner: required corpus, savings trajectory, withdrawals and geo-FIRE"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print a plan summary for one strategy
    Calculate {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, default_value = DEFAULT_STRATEGY, help = "Strategy id, e.g. lean, barista, fat")]
        strategy: String,
    },
    /// Rank the city table by required corpus
    Geo {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, default_value = "geo")]
        strategy: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value_t = 25)]
    pub current_age: u32,
    #[arg(long, default_value_t = 45)]
    pub retirement_age: u32,
    #[arg(long, default_value_t = 85)]
    pub life_expectancy: u32,
    #[arg(long, default_value_t = 500_000.0)]
    pub current_savings: f64,
    #[arg(long, default_value_t = 40_000.0)]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 80_000.0)]
    pub monthly_income: f64,
    #[arg(long, default_value_t = 30_000.0)]
    pub current_monthly_savings: f64,
    #[arg(
        long,
        default_value_t = 12.0,
        allow_hyphen_values = true,
        help = "Expected annual return in percent, e.g. 12"
    )]
    pub expected_return: f64,
    #[arg(
        long,
        default_value_t = 6.0,
        allow_hyphen_values = true,
        help = "Expected annual inflation in percent, e.g. 6"
    )]
    pub inflation_rate: f64,
}

impl Default for ProfileArgs {
    fn default() -> Self {
        Self {
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
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProfilePayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    life_expectancy: Option<u32>,
    current_savings: Option<f64>,
    monthly_expenses: Option<f64>,
    monthly_income: Option<f64>,
    current_monthly_savings: Option<f64>,
    expected_return: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatePayload {
    #[serde(flatten)]
    profile: ProfilePayload,
    strategy_id: Option<String>,
    one_time_expenses: Vec<OneTimeExpense>,
    recurring_expenses: Vec<RecurringExpense>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GeoPayload {
    #[serde(flatten)]
    profile: ProfilePayload,
    strategy_id: Option<String>,
    city_ids: Option<Vec<String>>,
    from_city_id: Option<String>,
    to_city_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioPayload {
    #[serde(flatten)]
    profile: ProfilePayload,
    strategy_id: Option<String>,
    one_time_expenses: Vec<OneTimeExpense>,
    recurring_expenses: Vec<RecurringExpense>,
    custom: Option<ProfileOverrides>,
}

#[derive(Debug)]
struct CalculateRequest {
    profile: FinancialProfile,
    strategy: &'static StrategyVariant,
    one_time_expenses: Vec<OneTimeExpense>,
    recurring_expenses: Vec<RecurringExpense>,
}

#[derive(Debug)]
struct GeoRequest {
    profile: FinancialProfile,
    strategy: &'static StrategyVariant,
    cities: Vec<CityProfile>,
    relocation: Option<(&'static CityProfile, &'static CityProfile)>,
}

#[derive(Debug)]
struct ScenarioRequest {
    profile: FinancialProfile,
    strategy: &'static StrategyVariant,
    one_time_expenses: Vec<OneTimeExpense>,
    recurring_expenses: Vec<RecurringExpense>,
    custom: Option<ProfileOverrides>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayFigures {
    required_corpus: String,
    monthly_required_savings: String,
    projected_corpus_at_retirement: String,
    shortfall: String,
    monthly_passive_income: String,
}

impl DisplayFigures {
    fn from_result(result: &FireResult) -> Self {
        Self {
            required_corpus: format_inr(result.required_corpus),
            monthly_required_savings: format_inr(result.monthly_required_savings),
            projected_corpus_at_retirement: format_inr(result.projected_corpus_at_retirement),
            shortfall: format_inr(result.shortfall),
            monthly_passive_income: format_inr(result.monthly_passive_income),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    strategy: StrategyVariant,
    result: FireResult,
    accumulation: Vec<YearPoint>,
    withdrawals: Vec<WithdrawalYear>,
    goal_reached_year: Option<i32>,
    depletion_age: Option<u32>,
    post_retirement_return: f64,
    safe_withdrawal_rate: Option<f64>,
    within_safe_withdrawal_benchmark: Option<bool>,
    insights: ProgressInsights,
    breakdown: CorpusBreakdown,
    expense_warnings: Vec<String>,
    display: DisplayFigures,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeoResponse {
    strategy: StrategyVariant,
    ranked: Vec<CityComparison>,
    relocation: Option<RelocationSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioResponse {
    strategy: StrategyVariant,
    scenarios: Vec<ScenarioOutcome>,
}

#[derive(Debug, PartialEq)]
enum RequestError {
    Invalid(String),
    UnknownId(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_profile(args: ProfileArgs) -> Result<FinancialProfile, String> {
    if args.retirement_age <= args.current_age {
        return Err("--retirement-age must be > --current-age".to_string());
    }

    if args.life_expectancy > MAX_AGE {
        return Err(format!("--life-expectancy must be <= {MAX_AGE}"));
    }

    if args.life_expectancy < args.retirement_age {
        return Err("--life-expectancy must be >= --retirement-age".to_string());
    }

    for (name, value) in [
        ("--current-savings", args.current_savings),
        ("--monthly-expenses", args.monthly_expenses),
        ("--monthly-income", args.monthly_income),
        ("--current-monthly-savings", args.current_monthly_savings),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }

    if !args.expected_return.is_finite() || args.expected_return <= -100.0 {
        return Err("--expected-return must be > -100".to_string());
    }

    if !args.inflation_rate.is_finite() || args.inflation_rate <= -100.0 {
        return Err("--inflation-rate must be > -100".to_string());
    }

    Ok(FinancialProfile {
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        life_expectancy: args.life_expectancy,
        current_savings: args.current_savings,
        monthly_expenses: args.monthly_expenses,
        monthly_income: args.monthly_income,
        current_monthly_savings: args.current_monthly_savings,
        expected_return: args.expected_return,
        inflation_rate: args.inflation_rate,
    })
}

pub fn resolve_strategy(id: Option<&str>) -> Result<&'static StrategyVariant, String> {
    let id = id.unwrap_or(DEFAULT_STRATEGY);
    strategy_by_id(id).ok_or_else(|| format!("unknown strategy '{id}'"))
}

fn resolve_city(id: &str) -> Result<&'static CityProfile, String> {
    city_by_id(id).ok_or_else(|| format!("unknown city '{id}'"))
}

fn request_strategy(id: Option<&str>) -> Result<&'static StrategyVariant, RequestError> {
    resolve_strategy(id).map_err(RequestError::UnknownId)
}

fn request_city(id: &str) -> Result<&'static CityProfile, RequestError> {
    resolve_city(id).map_err(RequestError::UnknownId)
}

fn profile_from_payload(payload: ProfilePayload) -> Result<FinancialProfile, RequestError> {
    let mut args = ProfileArgs::default();

    if let Some(v) = payload.current_age {
        args.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        args.retirement_age = v;
    }
    if let Some(v) = payload.life_expectancy {
        args.life_expectancy = v;
    }
    if let Some(v) = payload.current_savings {
        args.current_savings = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.monthly_income {
        args.monthly_income = v;
    }
    if let Some(v) = payload.current_monthly_savings {
        args.current_monthly_savings = v;
    }
    if let Some(v) = payload.expected_return {
        args.expected_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }

    build_profile(args).map_err(RequestError::Invalid)
}

fn calculate_request_from_payload(
    payload: CalculatePayload,
) -> Result<CalculateRequest, RequestError> {
    Ok(CalculateRequest {
        strategy: request_strategy(payload.strategy_id.as_deref())?,
        profile: profile_from_payload(payload.profile)?,
        one_time_expenses: payload.one_time_expenses,
        recurring_expenses: payload.recurring_expenses,
    })
}

fn geo_request_from_payload(payload: GeoPayload) -> Result<GeoRequest, RequestError> {
    let cities = match payload.city_ids {
        Some(ids) => ids
            .iter()
            .map(|id| request_city(id).copied())
            .collect::<Result<Vec<_>, _>>()?,
        None => CITIES.to_vec(),
    };

    let relocation = match (payload.from_city_id, payload.to_city_id) {
        (Some(from), Some(to)) => Some((request_city(&from)?, request_city(&to)?)),
        (None, None) => None,
        _ => {
            return Err(RequestError::Invalid(
                "fromCityId and toCityId must be given together".to_string(),
            ));
        }
    };

    Ok(GeoRequest {
        strategy: request_strategy(Some(payload.strategy_id.as_deref().unwrap_or("geo")))?,
        profile: profile_from_payload(payload.profile)?,
        cities,
        relocation,
    })
}

fn scenario_request_from_payload(
    payload: ScenarioPayload,
) -> Result<ScenarioRequest, RequestError> {
    Ok(ScenarioRequest {
        strategy: request_strategy(payload.strategy_id.as_deref())?,
        profile: profile_from_payload(payload.profile)?,
        one_time_expenses: payload.one_time_expenses,
        recurring_expenses: payload.recurring_expenses,
        custom: payload.custom.filter(|overrides| !overrides.is_empty()),
    })
}

fn expense_warnings(
    one_time: &[OneTimeExpense],
    recurring: &[RecurringExpense],
    current_year: i32,
) -> Vec<String> {
    let one_time_errors = one_time
        .iter()
        .filter_map(|e| validate_one_time_expense(e, current_year).err());
    let recurring_errors = recurring
        .iter()
        .filter_map(|e| validate_recurring_expense(e).err());
    one_time_errors
        .chain(recurring_errors)
        .map(|err| err.to_string())
        .collect()
}

fn build_calculate_response(
    request: &CalculateRequest,
    current_year: i32,
) -> Result<CalculateResponse, FireError> {
    let profile = &request.profile;
    let result = compute_as_of(
        profile,
        request.strategy,
        &request.one_time_expenses,
        &request.recurring_expenses,
        current_year,
    )?;
    let accumulation = project_accumulation_from(profile, &result, current_year)?;
    let withdrawals = project_withdrawals_from(profile, &result, current_year)?;
    let safe_rate = safe_withdrawal_rate(profile, &result);

    Ok(CalculateResponse {
        strategy: *request.strategy,
        goal_reached_year: first_goal_year(&accumulation).map(|p| p.year),
        depletion_age: first_depletion(&withdrawals).map(|y| y.age),
        post_retirement_return: post_retirement_return(profile.expected_return),
        safe_withdrawal_rate: safe_rate,
        within_safe_withdrawal_benchmark: safe_rate.map(within_safe_withdrawal_benchmark),
        insights: progress_insights(profile, &result),
        breakdown: corpus_breakdown(profile, request.strategy)?,
        expense_warnings: expense_warnings(
            &request.one_time_expenses,
            &request.recurring_expenses,
            current_year,
        ),
        display: DisplayFigures::from_result(&result),
        accumulation,
        withdrawals,
        result,
    })
}

fn build_geo_response(request: &GeoRequest, current_year: i32) -> Result<GeoResponse, FireError> {
    let ranked = compare_cities_as_of(&request.profile, request.strategy, &request.cities, current_year)?;
    let relocation = match request.relocation {
        Some((from, to)) => Some(relocation_summary(
            &request.profile,
            request.strategy,
            from,
            to,
            current_year,
        )?),
        None => None,
    };

    Ok(GeoResponse {
        strategy: *request.strategy,
        ranked,
        relocation,
    })
}

fn build_scenario_response(request: &ScenarioRequest, current_year: i32) -> ScenarioResponse {
    let mut scenarios = standard_scenarios(&request.profile);
    if let Some(custom) = &request.custom {
        scenarios.push(Scenario {
            name: "Custom Scenario".to_string(),
            overrides: custom.clone(),
        });
    }

    ScenarioResponse {
        strategy: *request.strategy,
        scenarios: evaluate_scenarios(
            &request.profile,
            request.strategy,
            &request.one_time_expenses,
            &request.recurring_expenses,
            &scenarios,
            current_year,
        ),
    }
}

pub fn calculate_summary(
    profile: &FinancialProfile,
    strategy: &'static StrategyVariant,
    current_year: i32,
) -> Result<String, FireError> {
    let request = CalculateRequest {
        profile: profile.clone(),
        strategy,
        one_time_expenses: Vec::new(),
        recurring_expenses: Vec::new(),
    };
    let response = build_calculate_response(&request, current_year)?;
    Ok(render_summary(&response))
}

fn render_summary(response: &CalculateResponse) -> String {
    let result = &response.result;
    let mut lines = vec![
        format!("{} ({}x expenses)", response.strategy.display_name, response.strategy.multiplier),
        format!("  Required corpus:        {}", response.display.required_corpus),
        format!("  Years to goal:          {}", result.years_to_goal),
        format!("  Monthly savings needed: {}", response.display.monthly_required_savings),
        format!("  Shortfall:              {}", response.display.shortfall),
        format!("  Passive income/month:   {}", response.display.monthly_passive_income),
        format!(
            "  Achievable:             {}",
            if result.achievable { "yes" } else { "no (over 80% of income)" }
        ),
    ];
    if let Some(income) = result.monthly_required_income {
        lines.push(format!("  Part-time income/month: {}", format_inr(income)));
    }
    if let Some(rate) = response.safe_withdrawal_rate {
        lines.push(format!("  First-year withdrawal:  {rate:.2}% of corpus"));
    }
    match response.depletion_age {
        Some(age) => lines.push(format!("  Corpus runs out at age {age}")),
        None => lines.push("  Corpus lasts through life expectancy".to_string()),
    }
    lines.join("\n")
}

pub fn geo_summary(
    profile: &FinancialProfile,
    strategy: &'static StrategyVariant,
    current_year: i32,
) -> Result<String, FireError> {
    let ranked = compare_cities_as_of(profile, strategy, CITIES, current_year)?;
    let lines = ranked
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            format!(
                "{:>2}. {:<12} x{:.2}  corpus {}  monthly {}",
                idx + 1,
                entry.city.display_name,
                entry.city.cost_multiplier,
                format_inr(entry.result.required_corpus),
                format_inr(entry.result.monthly_required_savings)
            )
        })
        .collect::<Vec<_>>();
    Ok(lines.join("\n"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/strategies", get(strategies_handler))
        .route("/api/cities", get(cities_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/geo", post(geo_handler))
        .route("/api/scenarios", post(scenarios_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("FIRE planner API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn strategies_handler() -> Response {
    json_response(StatusCode::OK, STRATEGIES)
}

async fn cities_handler() -> Response {
    json_response(StatusCode::OK, CITIES)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_handler(Json(payload): Json<CalculatePayload>) -> Response {
    let request = match calculate_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => return reject(err),
    };
    match build_calculate_response(&request, current_calendar_year()) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => bad_request(&err.to_string()),
    }
}

async fn geo_handler(Json(payload): Json<GeoPayload>) -> Response {
    let request = match geo_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => return reject(err),
    };
    match build_geo_response(&request, current_calendar_year()) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => bad_request(&err.to_string()),
    }
}

async fn scenarios_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    match scenario_request_from_payload(payload) {
        Ok(request) => json_response(
            StatusCode::OK,
            build_scenario_response(&request, current_calendar_year()),
        ),
        Err(err) => reject(err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn reject(err: RequestError) -> Response {
    match err {
        RequestError::Invalid(msg) => bad_request(&msg),
        RequestError::UnknownId(msg) => {
            warn!("rejected request: {msg}");
            error_response(StatusCode::NOT_FOUND, &msg)
        }
    }
}

fn bad_request(msg: &str) -> Response {
    warn!("rejected request: {msg}");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn calculate_request_from_json(json: &str) -> Result<CalculateRequest, RequestError> {
    let payload = serde_json::from_str::<CalculatePayload>(json)
        .map_err(|e| RequestError::Invalid(format!("Invalid API JSON payload: {e}")))?;
    calculate_request_from_payload(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;
    const YEAR: i32 = 2025;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn build_profile_rejects_retirement_before_current_age() {
        let args = ProfileArgs {
            retirement_age: 25,
            ..ProfileArgs::default()
        };
        let err = build_profile(args).expect_err("must reject");
        assert!(err.contains("--retirement-age"));
    }

    #[test]
    fn build_profile_rejects_short_life_expectancy() {
        let args = ProfileArgs {
            life_expectancy: 40,
            ..ProfileArgs::default()
        };
        let err = build_profile(args).expect_err("must reject");
        assert!(err.contains("--life-expectancy"));
    }

    #[test]
    fn build_profile_rejects_ages_beyond_max_age() {
        let args = ProfileArgs {
            retirement_age: 400_000_000,
            life_expectancy: 400_000_000,
            ..ProfileArgs::default()
        };
        let err = build_profile(args).expect_err("must reject");
        assert!(err.contains("--life-expectancy must be <= 150"));
    }

    #[test]
    fn calculate_request_rejects_huge_ages() {
        let err = calculate_request_from_json(
            r#"{"retirementAge": 400000000, "lifeExpectancy": 400000000}"#,
        )
        .expect_err("must reject");
        assert!(matches!(err, RequestError::Invalid(msg) if msg.contains("--life-expectancy")));
    }

    #[test]
    fn scenario_with_impossible_custom_return_reports_error() {
        let payload: ScenarioPayload =
            serde_json::from_str(r#"{"custom": {"expectedReturn": -300}}"#).expect("valid json");
        let request = scenario_request_from_payload(payload).expect("valid base profile");
        let response = build_scenario_response(&request, YEAR);
        let custom = response.scenarios.last().expect("custom scenario");
        assert!(custom.result.is_none());
        assert!(custom.error.as_deref().is_some_and(|e| e.contains("expected return")));
    }

    #[test]
    fn build_profile_rejects_negative_currency() {
        let args = ProfileArgs {
            current_savings: -1.0,
            ..ProfileArgs::default()
        };
        let err = build_profile(args).expect_err("must reject");
        assert!(err.contains("--current-savings"));
    }

    #[test]
    fn build_profile_accepts_deflation_and_losses() {
        let args = ProfileArgs {
            expected_return: -3.0,
            inflation_rate: -1.0,
            ..ProfileArgs::default()
        };
        let profile = build_profile(args).expect("valid");
        assert_approx(profile.expected_return, -3.0);
        assert_approx(profile.inflation_rate, -1.0);
    }

    #[test]
    fn calculate_request_from_json_parses_web_keys() {
        let json = r#"{
          "currentAge": 30,
          "retirementAge": 50,
          "lifeExpectancy": 90,
          "currentSavings": 1000000,
          "monthlyExpenses": 50000,
          "monthlyIncome": 150000,
          "currentMonthlySavings": 60000,
          "expectedReturn": 11,
          "inflationRate": 5.5,
          "strategyId": "barista",
          "oneTimeExpenses": [
            {"id": "a", "name": "House", "amount": 5000000, "targetYear": 2030, "category": "house", "inflationRate": 8}
          ],
          "recurringExpenses": [
            {"id": "b", "name": "Trips", "monthlyAmount": 10000, "startYear": 2025, "category": "travel"}
          ]
        }"#;
        let request = calculate_request_from_json(json).expect("json should parse");

        assert_eq!(request.profile.current_age, 30);
        assert_eq!(request.profile.retirement_age, 50);
        assert_eq!(request.profile.life_expectancy, 90);
        assert_approx(request.profile.current_savings, 1_000_000.0);
        assert_approx(request.profile.inflation_rate, 5.5);
        assert_eq!(request.strategy.id, "barista");
        assert_eq!(request.one_time_expenses.len(), 1);
        assert_eq!(request.one_time_expenses[0].inflation_rate, Some(8.0));
        assert_eq!(request.recurring_expenses.len(), 1);
        assert_eq!(request.recurring_expenses[0].end_year, None);
    }

    #[test]
    fn calculate_request_uses_defaults_for_missing_fields() {
        let request = calculate_request_from_json("{}").expect("json should parse");
        let defaults = build_profile(ProfileArgs::default()).expect("valid defaults");
        assert_eq!(request.profile, defaults);
        assert_eq!(request.strategy.id, DEFAULT_STRATEGY);
    }

    #[test]
    fn calculate_request_rejects_unknown_strategy() {
        let err = calculate_request_from_json(r#"{"strategyId": "moon"}"#)
            .expect_err("unknown strategy");
        assert_eq!(err, RequestError::UnknownId("unknown strategy 'moon'".to_string()));
    }

    #[test]
    fn calculate_request_reports_invalid_profile_by_flag() {
        let err = calculate_request_from_json(r#"{"currentAge": 50, "retirementAge": 40}"#)
            .expect_err("retirement before current age");
        assert!(matches!(err, RequestError::Invalid(msg) if msg.contains("--retirement-age")));
    }

    #[test]
    fn calculate_response_serialization_contains_expected_fields() {
        let request = calculate_request_from_json(r#"{"strategyId": "hobby"}"#).expect("valid");
        let response = build_calculate_response(&request, YEAR).expect("valid");

        assert_eq!(response.accumulation.len(), 21);
        assert!(response.withdrawals.len() <= 40);
        assert!(response.result.monthly_required_income.is_some());

        let json = serde_json::to_string(&response).expect("response should serialize");
        for key in [
            "\"requiredCorpus\"",
            "\"monthlyRequiredSavings\"",
            "\"projectedCorpusAtRetirement\"",
            "\"monthlyRequiredIncome\"",
            "\"accumulation\"",
            "\"withdrawals\"",
            "\"corpusDepletionRisk\"",
            "\"safeWithdrawalRate\"",
            "\"breakdown\"",
            "\"insights\"",
            "\"display\"",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    #[test]
    fn calculate_response_warns_about_past_expenses_but_still_computes() {
        let json = r#"{
          "oneTimeExpenses": [
            {"id": "old", "name": "Car", "amount": 800000, "targetYear": 2020, "category": "car"}
          ]
        }"#;
        let request = calculate_request_from_json(json).expect("valid");
        let response = build_calculate_response(&request, YEAR).expect("valid");
        assert_eq!(response.expense_warnings.len(), 1);
        assert!(response.expense_warnings[0].contains("old"));
    }

    #[test]
    fn geo_request_defaults_to_full_city_table() {
        let payload: GeoPayload = serde_json::from_str("{}").expect("valid json");
        let request = geo_request_from_payload(payload).expect("valid");
        assert_eq!(request.cities.len(), CITIES.len());
        assert_eq!(request.strategy.id, "geo");
        assert!(request.relocation.is_none());

        let response = build_geo_response(&request, YEAR).expect("valid");
        assert_eq!(response.ranked[0].city.id, "bhubaneswar");
    }

    #[test]
    fn geo_request_requires_both_relocation_ends() {
        let payload: GeoPayload =
            serde_json::from_str(r#"{"fromCityId": "mumbai"}"#).expect("valid json");
        let err = geo_request_from_payload(payload).expect_err("half a relocation");
        assert!(matches!(err, RequestError::Invalid(msg) if msg.contains("toCityId")));
    }

    #[test]
    fn geo_request_rejects_unknown_city_as_missing() {
        let payload: GeoPayload =
            serde_json::from_str(r#"{"cityIds": ["atlantis"]}"#).expect("valid json");
        let err = geo_request_from_payload(payload).expect_err("unknown city");
        assert!(matches!(err, RequestError::UnknownId(_)));
    }

    #[test]
    fn geo_response_includes_relocation_summary() {
        let payload: GeoPayload = serde_json::from_str(
            r#"{"cityIds": ["mumbai", "goa"], "fromCityId": "mumbai", "toCityId": "goa"}"#,
        )
        .expect("valid json");
        let request = geo_request_from_payload(payload).expect("valid");
        let response = build_geo_response(&request, YEAR).expect("valid");

        assert_eq!(response.ranked.len(), 2);
        let relocation = response.relocation.expect("relocation requested");
        assert_approx(relocation.monthly_savings, 16_000.0);

        let json = serde_json::to_string(&relocation).expect("serialize");
        assert!(json.contains("\"corpusReduction\""));
    }

    #[test]
    fn scenario_response_appends_custom_overrides() {
        let payload: ScenarioPayload =
            serde_json::from_str(r#"{"custom": {"monthlyExpenses": 20000}}"#).expect("valid json");
        let request = scenario_request_from_payload(payload).expect("valid");
        let response = build_scenario_response(&request, YEAR);

        assert_eq!(response.scenarios.len(), 6);
        let custom = response.scenarios.last().expect("custom scenario");
        assert_eq!(custom.name, "Custom Scenario");
        assert!(custom.result.is_some());
    }

    #[test]
    fn empty_custom_overrides_are_ignored() {
        let payload: ScenarioPayload =
            serde_json::from_str(r#"{"custom": {}}"#).expect("valid json");
        let request = scenario_request_from_payload(payload).expect("valid");
        assert!(request.custom.is_none());
        assert_eq!(build_scenario_response(&request, YEAR).scenarios.len(), 5);
    }

    #[test]
    fn summary_mentions_strategy_and_corpus() {
        let profile = build_profile(ProfileArgs::default()).expect("valid");
        let strategy = resolve_strategy(Some("lean")).expect("lean");
        let summary = calculate_summary(&profile, strategy, YEAR).expect("valid");
        assert!(summary.starts_with("Lean FIRE"));
        assert!(summary.contains("Required corpus:"));
        assert!(summary.contains("Cr"));

        let geo = geo_summary(&profile, strategy, YEAR).expect("valid");
        assert_eq!(geo.lines().count(), CITIES.len());
        assert!(geo.lines().next().is_some_and(|l| l.contains("Bhubaneswar")));
    }
}
