use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use civic_admin::{AppError, Dependencies};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    // Logs go to stderr so stdout stays valid JSON.
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run() -> Result<(), AppError> {
    let deps = Dependencies::new().await?;
    let config = &deps.config;

    let page = deps.listing().await?;

    info!(
        entity = %config.entity,
        city = %config.city_key,
        total = page.total_items,
        page = page.current_page,
        pages = page.total_pages,
        "Listing ready"
    );
    if page.is_empty() && config.request.is_refined() {
        info!("No records match the search and filters");
    }

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Listing failed");
            ExitCode::FAILURE
        }
    }
}
