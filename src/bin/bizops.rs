use anyhow::Result;
use bizops_rs::currency::{
    format_minor_units, Currency, CurrencyInputBuffer, CurrencyInputOptions,
};
use bizops_rs::{ApiClient, Config};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bizops")]
#[command(about = "Retrying REST fetches and currency input masking", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a path (relative to [http] base_url) with retries and print the body
    Fetch { path: String },
    /// Format a minor-unit digit string as a display amount
    Format {
        digits: String,
        #[arg(long, default_value = "BRL")]
        currency: Currency,
    },
    /// Replay successive field contents through the input buffer
    Type {
        /// Field text after each keystroke
        #[arg(required = true)]
        keystrokes: Vec<String>,
        #[command(flatten)]
        field: FieldArgs,
    },
    /// Assign a value programmatically, as a form binding would
    Set {
        value: String,
        #[command(flatten)]
        field: FieldArgs,
    },
}

#[derive(Args)]
struct FieldArgs {
    /// Overrides [currency] currency from the config file
    #[arg(long)]
    currency: Option<Currency>,
    /// Overrides [currency] max_value from the config file
    #[arg(long)]
    max_value: Option<Decimal>,
}

impl FieldArgs {
    fn into_options(self, defaults: CurrencyInputOptions) -> CurrencyInputOptions {
        CurrencyInputOptions {
            currency: self.currency.unwrap_or(defaults.currency),
            max_value: self.max_value.or(defaults.max_value),
            ..defaults
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_path(path)
    } else {
        info!("No config file at {}, using defaults", path.display());
        Ok(Config::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { path } => {
            let config = Config::from_path(&cli.config)?;
            let client = ApiClient::new(config)?;
            let body = client.get_text(&path).await?;
            println!("{}", body);
        }
        Commands::Format { digits, currency } => {
            println!("{}", format_minor_units(&digits, currency));
        }
        Commands::Type { keystrokes, field } => {
            let config = load_config(&cli.config)?;
            let mut buffer = CurrencyInputBuffer::new(field.into_options(config.currency));
            for keystroke in keystrokes {
                let value = buffer.on_digits_typed(&keystroke);
                println!("{:<20} -> {:<24} {}", keystroke, buffer.display(), value);
            }
        }
        Commands::Set { value, field } => {
            let config = load_config(&cli.config)?;
            let mut buffer = CurrencyInputBuffer::new(field.into_options(config.currency));
            buffer.set_value(value.as_str());
            println!("{} {}", buffer.display(), buffer.numeric_value());
        }
    }

    Ok(())
}
