use clap::Parser;
use optchain::OptChain;
use optchain::cli::{Args, get_connector};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the report.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let app = OptChain::builder().with_connector(get_connector()?).build()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.run(&args.request(), &mut out).await?;
    Ok(())
}
