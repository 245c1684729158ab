use anyhow::Context;
use clap::Parser;
use spamlens_cli::{submissions, Cli, Commands, Report};
use spamlens_engine::{describe_metrics, SpamAnalyzer};
use std::path::Path;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    describe_metrics();

    let config = cli
        .engine
        .resolve()
        .context("failed to load engine configuration")?;
    debug!(?config, "engine configuration resolved");

    let analyzer = SpamAnalyzer::new(&config).context("failed to build spam analyzer")?;

    let (text, images) = match cli.command {
        Commands::Text { input } => (Some(read_text(&input)?), Vec::new()),
        Commands::Images { files } => (None, files),
        Commands::Scan { text, images } => {
            let text = text.as_deref().map(read_text).transpose()?;
            (text, images)
        }
    };

    info!(
        has_text = text.is_some(),
        images = images.len(),
        "analyzing content"
    );

    let analysis = analyzer
        .analyze_both(text.as_deref(), submissions(&images))
        .await;

    if analysis.is_empty() {
        info!("nothing to analyze");
    }

    let report = Report::from(analysis);
    println!("{}", report.to_json()?);

    Ok(())
}

/// Read a text body from a file, or stdin for "-"
fn read_text(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spamlens=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spamlens=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
