use clap::Parser;
use dotenv::dotenv;
use gdocdown::run_with_config_path;

/// gdocdown - exports one Google Doc to markdown plus its embedded images
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the settings file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from `.env` file into std::env (optional)
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load config, init logging and run
    run_with_config_path(&args.config).await
}
