use clap::Parser;
use fire_planner::api::{self, Cli, Command};
use fire_planner::core::{
    FinancialProfile, FireError, StrategyVariant, current_calendar_year,
};

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Calculate { profile, strategy } => {
            let summary = plan(profile, &strategy, api::calculate_summary);
            println!("{summary}");
        }
        Command::Geo { profile, strategy } => {
            let summary = plan(profile, &strategy, api::geo_summary);
            println!("{summary}");
        }
    }
}

type Summary = fn(&FinancialProfile, &'static StrategyVariant, i32) -> Result<String, FireError>;

fn plan(profile: api::ProfileArgs, strategy: &str, summary: Summary) -> String {
    let result = api::build_profile(profile).and_then(|profile| {
        let strategy = api::resolve_strategy(Some(strategy))?;
        summary(&profile, strategy, current_calendar_year()).map_err(|e| e.to_string())
    });
    match result {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    }
}
