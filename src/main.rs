//! pricewise - CLI entry point.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricewise::pricing::{PriceReport, Reasoning, infer_brand, suggest_price};
use pricewise::{Category, CompletionRouter, Condition, Config, ProductQuery, Tier};

/// Suggest a fair resale price range for a second-hand item.
#[derive(Parser, Debug)]
#[command(name = "pricewise")]
#[command(about = "Suggest a fair resale price range for a second-hand item using Gemini with Groq fallback")]
#[command(version)]
struct Cli {
    /// Product title (e.g. "iPhone 13 Pro Max")
    #[arg(short, long)]
    title: String,

    /// Product category: Mobile, Laptop, Tablet, TV, Electronics, Furniture, Other
    #[arg(short, long, default_value = "Mobile")]
    category: Category,

    /// Brand (inferred from the title for well-known product lines when omitted)
    #[arg(short, long)]
    brand: Option<String>,

    /// Condition: "Like New", Good, Average, "Below Average"
    #[arg(long, default_value = "Good")]
    condition: Condition,

    /// Age in months
    #[arg(short, long, default_value_t = 12)]
    age_months: u32,

    /// Asking price in INR
    #[arg(short = 'p', long, default_value_t = 1000.0)]
    asking_price: f64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Step 1: Load credentials
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {}", path.display());
    }
    let config = Config::from_env().context("Configuration error")?;

    // Step 2: Validate the product
    let brand = cli
        .brand
        .clone()
        .or_else(|| infer_brand(&cli.title).map(str::to_string))
        .unwrap_or_default();
    let query = ProductQuery::new(
        &cli.title,
        cli.category,
        &brand,
        cli.condition,
        cli.age_months,
        cli.asking_price,
    )
    .context("Invalid product details")?;

    // Step 3: Ask the providers
    let router = CompletionRouter::from_config(&config);
    if !cli.json {
        eprintln!("Contacting AI and calculating suggestion...");
    }

    let report = match suggest_price(&router, &query).await {
        Ok(report) => report,
        Err(e) => {
            if cli.verbose > 0 {
                bail!("No response received from AI. {}", e.detailed());
            }
            bail!("No response received from AI. {}", e.summary());
        }
    };

    if let Some(primary_err) = &report.completion.primary_error {
        eprintln!();
        eprintln!(
            "\x1b[33m⚠ {} failed, using {} fallback\x1b[0m",
            primary_err.provider, report.completion.provider
        );
        if cli.verbose > 0 {
            eprintln!("  Details: {}", primary_err.detail());
        } else {
            eprintln!("  Reason: {}", primary_err.summary());
        }
        eprintln!();
    }

    // Step 4: Show the result
    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&report.to_json()).context("Failed to render JSON")?;
        println!("{}", rendered);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Print the formatted result card.
fn print_report(report: &PriceReport) {
    let Some(suggestion) = &report.suggestion else {
        eprintln!(
            "\x1b[33m⚠ Couldn't reliably extract JSON from model output. Showing raw output below.\x1b[0m"
        );
        println!("{}", report.completion.text);
        println!();
        if let Some(candidate) = &report.json_text {
            println!("Closest JSON candidate (could not be parsed):");
            println!("{}", candidate);
            println!();
        }
        println!("Suggested Price Range: Not available");
        println!("No structured reasoning available.");
        return;
    };

    println!("💰 Suggested Price Range: {}", suggestion.price_range);
    if report.completion.tier == Tier::Secondary {
        println!("   (answered by {})", report.completion.provider);
    }
    println!();

    match &suggestion.reasoning {
        Reasoning::Breakdown(entries) => {
            println!("🔍 Detailed reasoning");
            for (key, text) in entries {
                println!("- {}: {}", key.title(), text);
            }
        }
        Reasoning::Freeform(text) => {
            println!("🔍 Detailed reasoning");
            println!("{}", text);
        }
        Reasoning::Missing => println!("No structured reasoning available."),
    }
    println!();

    if report.interval.is_available() {
        println!("{}", report.verdict.message());
    }
}
