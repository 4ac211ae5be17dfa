use anyhow::Result;
use clap::Parser;
use client_core::{dispatcher, SessionClient, SessionEvent};
use shared::domain::Scenario;
use shared::format::{format_money, format_scenario_type};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Headless terminal client for the scenario-rating backend. Useful for
/// smoke-testing a backend without a display.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
}

fn print_scenario(scenario: &Scenario) {
    println!(
        "\n=== New Scenario: {} ===",
        format_scenario_type(&scenario.scenario_type)
    );
    println!("{}", scenario.description);
    println!("  Savings:          {}", format_money(scenario.savings_amount));
    println!("  Monthly Income:   {}", format_money(scenario.monthly_income));
    println!("  Monthly Expenses: {}", format_money(scenario.monthly_expenses));
    println!(
        "  Entertainment:    {}",
        format_money(scenario.monthly_entertainment)
    );
    println!("  Sales Skills:     {}/10", scenario.sales_skills);
    println!("  Risk Level:       {}/10", scenario.risk_level);
    println!("  Age:              {} years", scenario.age);
    println!("  Dependents:       {} people", scenario.dependents);
    println!("  Assets:           {}", format_money(scenario.assets));
    println!("  Confidence:       {}/10", scenario.confidence);
    println!("  Idea Difficulty:  {}/10", scenario.difficulty);
    println!("Rate the entrepreneurial readiness with `rate <0-10>`.");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let client = SessionClient::new(args.server_url);

    // All rendering happens off the event stream, so the automatic scenario
    // that follows a successful submission shows up like any other.
    let mut events = client.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::ScenarioReady(scenario) => print_scenario(&scenario),
                SessionEvent::ScenarioLogged(entry) => println!(
                    "[log] {} - Score: {}/10 at {}",
                    format_scenario_type(&entry.scenario.scenario_type),
                    entry.score,
                    entry.timestamp
                ),
                SessionEvent::RatingAccepted { score } => {
                    println!("Rating submitted! Score: {score}/10");
                }
                SessionEvent::StatsUpdated(stats) => println!(
                    "[stats] Completed: {} | Types seen: {}",
                    stats.completed_scenarios, stats.distinct_scenario_types
                ),
                SessionEvent::ExportFinished(message) => println!("{message}"),
                SessionEvent::Error(message) => println!("[error] {message}"),
            }
        }
    });

    println!("Commands: new | rate <0-10> | draft <0-10> | export | stats | quit");
    println!("Anything else is sent to the side chat.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.split_once(' ') {
            _ if input == "quit" || input == "exit" => break,
            _ if input == "new" || input == "skip" => {
                if let Err(err) = client.generate_scenario().await {
                    println!("Failed to generate scenario. Please try again. ({err})");
                }
            }
            _ if input == "export" => {
                if let Err(err) = client.export_data().await {
                    println!("Failed to export data. Please try again. ({err})");
                }
            }
            _ if input == "stats" => {
                let stats = client.stats().await;
                println!(
                    "Completed: {} | Types seen: {}",
                    stats.completed_scenarios, stats.distinct_scenario_types
                );
            }
            Some(("rate", value)) => match value.trim().parse::<u8>() {
                Ok(score) if score <= 10 => {
                    if let Err(err) = client.submit_rating(score).await {
                        println!("Failed to submit rating. ({err})");
                    }
                }
                _ => println!("Score must be an integer from 0 to 10."),
            },
            Some(("draft", value)) => match value.trim().parse::<u8>() {
                Ok(score) if score <= 10 => client.set_draft_score(score).await,
                _ => println!("Score must be an integer from 0 to 10."),
            },
            _ if dispatcher::is_scenario_request(input) => {
                if let Err(err) = client.generate_scenario().await {
                    println!("Failed to generate scenario. Please try again. ({err})");
                }
            }
            _ => {
                let (_, reply) = dispatcher::respond(input, &mut rand::thread_rng());
                println!("{reply}");
            }
        }
    }

    Ok(())
}
