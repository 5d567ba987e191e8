use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use statcard::cli::Args;
use statcard::types::StatsConfig;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // RUST_LOG wins over -v.
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging unavailable: {e}");
    }

    let config = StatsConfig {
        token: std::env::var("GITHUB_TOKEN").ok(),
        output_dir: args.output_dir,
        api_url: args.api_url,
        web_url: args.web_url,
        timeout: Duration::from_secs(args.timeout),
        top_languages: args.top_languages,
        monthly: args.monthly,
        svg_only: args.svg_only,
        scale: args.scale,
        ..StatsConfig::new(args.user)
    };

    match statcard::run(&config).await {
        Ok(artifacts) => {
            if let Some(png) = &artifacts.png {
                println!("{}", png.display());
            }
            println!("{}", artifacts.svg.display());
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
