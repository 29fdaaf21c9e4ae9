use clap::Parser;
use room_harvest::Harvest;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    ::log::info!("starting harvest for catalog: {}", config.catalog_url);
    println!("Note: catalog traversal requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let start_time = std::time::Instant::now();
    match Harvest::new(config).run().await {
        Ok(summary) => {
            ::log::info!(
                "harvest complete - {} catalog pages, {} listing urls, {} records written ({} failures) in {:.2} seconds",
                summary.pages_visited,
                summary.urls_collected,
                summary.records_written,
                summary.failures,
                start_time.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            ::log::error!("harvest failed: {}", e);
            std::process::exit(1);
        }
    }
}
