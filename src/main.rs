use clap::Parser;
use tracing::info;

use party_planner::budget::parse_budget;
use party_planner::config::{init_logging, Cli, Command};
use party_planner::display::{print_report, write_report_to_file};
use party_planner::export::export_plan_to_csv;
use party_planner::parser::load_catalog;
use party_planner::web::{self, PlanResponse};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let paths = cli.data.paths();
    info!(
        drinks = %paths.drinks.display(),
        food = %paths.food.display(),
        people = %paths.people.display(),
        "loading catalog"
    );
    let catalog = load_catalog(&paths)?;
    info!(
        guests = catalog.preferences.len(),
        items = catalog.prices.len(),
        "catalog loaded"
    );

    match cli.command {
        Command::Web { port } => {
            info!(port, "starting web server");
            info!("access the planner at http://localhost:{}", port);
            web::start_server(port, catalog, paths).await?;
        }
        Command::Plan { budget, json, output, export } => {
            let budget = parse_budget(&budget)?;
            let allocation = catalog.plan(budget);

            if json {
                let response = PlanResponse::new(budget, allocation.clone());
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_report(budget, &allocation);
            }

            if let Some(path) = output {
                write_report_to_file(budget, &allocation, &path)?;
                info!(path = %path.display(), "report saved");
            }
            if let Some(path) = export {
                export_plan_to_csv(&allocation, &catalog.prices, &path)?;
                info!(path = %path.display(), "shopping list exported");
            }
        }
    }

    Ok(())
}
