use std::time::Duration;

use clap::Parser;

use dupefinder::DupeFinder;
use dupefinder::config::{self, CliArgs, Mode};
use dupefinder::enrich::EnrichOptions;
use dupefinder::providers::Tavily;
use dupefinder::resolver::ImageResolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = CliArgs::parse();
    let query = args.query.trim().to_string();
    if query.len() < 2 || query.len() > 256 {
        anyhow::bail!("query must be between 2 and 256 characters");
    }
    let max_results = args.max_results.clamp(1, 20);

    let config = config::init_config(&args);
    log::info!("Running {} for {:?}", args.mode, query);

    let finder = DupeFinder::new(Box::new(Tavily::new(config.tavily_api_key.clone())))
        .with_resolver(Box::new(ImageResolver::new(Duration::from_secs(
            config.resolver_timeout,
        ))))
        .with_enrich_options(EnrichOptions {
            task_timeout: Duration::from_secs(config.enrich_timeout),
            max_concurrent: config.enrich_concurrency,
        });

    match args.mode {
        Mode::Dupes => {
            let items = finder.find_dupes(&query, max_results).await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Mode::Search => {
            let results = finder.search_normalized(&query, max_results).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
