use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quote_engine::pricing::{compute_suggested_price, markup_percent, parse_margin};
use quote_engine::utils::money::{round_money, round_percent, to_decimal};
use quote_engine::{
    ApiResponse, AppError, Config, InMemoryRouteCatalog, PricingResult, QuoteAssembler,
    RouteCatalog, TariffAssembler, TariffBook, setup_environment,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{RouteKey, TariffRecord, TransportMode};
use shared::request::{QuoteFromTariffRequest, QuoteRequest, TariffRequest};

#[derive(Parser)]
#[command(name = "quote-engine", version, about = "Freight quote and tariff pricing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a quote from a JSON request (`-` reads stdin)
    Quote { input: PathBuf },
    /// Assemble a route tariff from a JSON request (`-` reads stdin)
    Tariff { input: PathBuf },
    /// Quote a client from stored tariffs plus extras (`-` reads stdin)
    FromTariff {
        /// JSON array of tariff records
        #[arg(long)]
        tariffs: PathBuf,
        input: PathBuf,
    },
    /// Suggested sale price for a cost at a margin
    Suggest {
        #[arg(long)]
        cost: f64,
        #[arg(long)]
        margin: Option<f64>,
    },
    /// Seed a cost ledger from the route catalog
    Seed {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long, value_parser = parse_mode)]
        mode: TransportMode,
        #[arg(long)]
        size: String,
    },
}

#[derive(Serialize)]
struct Suggestion {
    #[serde(with = "rust_decimal::serde::float")]
    total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    margin_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    markup_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    suggested_price: Decimal,
}

fn parse_mode(value: &str) -> Result<TransportMode, String> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|_| format!("unknown transport mode '{}'", value))
}

fn suggest(cost: f64, margin: Option<f64>, config: &Config) -> PricingResult<Suggestion> {
    let total_cost = round_money(to_decimal(cost, "cost")?);
    let margin_percent = match margin {
        Some(m) => parse_margin(m)?,
        None => config.default_margin_percent,
    };
    Ok(Suggestion {
        total_cost,
        margin_percent,
        markup_percent: round_percent(markup_percent(margin_percent)?),
        suggested_price: round_money(compute_suggested_price(total_cost, margin_percent)?),
    })
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Parse a JSON document; syntax and shape errors are request errors
fn parse_json<T: DeserializeOwned>(
    input: &Path,
    what: &str,
) -> anyhow::Result<Result<T, AppError>> {
    let json = read_input(input)?;
    Ok(serde_json::from_str(&json).map_err(|e| {
        AppError::invalid_request(format!("invalid {}: {}", what, e))
            .with_detail("line", e.line())
            .with_detail("column", e.column())
    }))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands, config: &Config) -> anyhow::Result<Result<(), AppError>> {
    let quotes = QuoteAssembler::from_config(config);

    match command {
        Commands::Quote { input } => {
            let request: QuoteRequest = match parse_json(&input, "quote request")? {
                Ok(request) => request,
                Err(e) => return Ok(Err(e)),
            };
            match quotes.assemble_request(&request) {
                Ok(quote) => print_json(&ApiResponse::success(quote))?,
                Err(e) => return Ok(Err(e.into())),
            }
        }
        Commands::Tariff { input } => {
            let request: TariffRequest = match parse_json(&input, "tariff request")? {
                Ok(request) => request,
                Err(e) => return Ok(Err(e)),
            };
            match TariffAssembler::new(quotes).assemble_request(&request) {
                Ok(tariff) => print_json(&ApiResponse::success(tariff))?,
                Err(e) => return Ok(Err(e.into())),
            }
        }
        Commands::FromTariff { tariffs, input } => {
            let records: Vec<TariffRecord> = match parse_json(&tariffs, "tariff records")? {
                Ok(records) => records,
                Err(e) => return Ok(Err(e)),
            };
            let request: QuoteFromTariffRequest = match parse_json(&input, "quote request")? {
                Ok(request) => request,
                Err(e) => return Ok(Err(e)),
            };
            let book = TariffBook::with_records(TariffAssembler::new(quotes), records);
            match book.quote(&request) {
                Ok(quote) => print_json(&ApiResponse::success(quote))?,
                Err(e) => return Ok(Err(e.into())),
            }
        }
        Commands::Suggest { cost, margin } => match suggest(cost, margin, config) {
            Ok(suggestion) => print_json(&ApiResponse::success(suggestion))?,
            Err(e) => return Ok(Err(e.into())),
        },
        Commands::Seed {
            origin,
            destination,
            mode,
            size,
        } => {
            let catalog = match &config.route_catalog_path {
                Some(path) => match InMemoryRouteCatalog::load(path) {
                    Ok(catalog) => catalog,
                    Err(e) => return Ok(Err(e.into())),
                },
                None => {
                    tracing::warn!("ROUTE_CATALOG_PATH not set, seeding from an empty catalog");
                    InMemoryRouteCatalog::default()
                }
            };
            let route = RouteKey::new(origin, destination, mode, size);
            let ledger = catalog.seed_ledger(&route);
            print_json(&ApiResponse::success(ledger.into_components()))?;
        }
    }

    Ok(Ok(()))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match setup_environment() {
        Ok(config) => config,
        Err(e) => {
            print_json(&ApiResponse::error(&e))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!(environment = %config.environment, "Quote engine started");

    match run(cli.command, &config)? {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::info!(code = %e.code, "Request rejected: {}", e.message);
            print_json(&ApiResponse::error(&e))?;
            Ok(ExitCode::FAILURE)
        }
    }
}
