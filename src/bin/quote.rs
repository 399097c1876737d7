use clap::Parser;
use dopc::config::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_VENUE_SERVICE_URL};
use dopc::domain::model::QuoteQuery;
use dopc::utils::logger;
use dopc::utils::validation::validate_url;
use dopc::{DeliveryOrderPrice, DopcError, ErrorKind, HttpVenueDirectory, PriceBreakdown, QuoteRequest, QuoteService};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "quote")]
#[command(about = "Compute a delivery order price quote for one venue")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Venue slug, e.g. home-assignment-venue-helsinki
    venue_slug: String,

    /// Cart value in minor currency units
    cart_value: String,

    user_lat: String,

    user_lon: String,

    #[arg(long, env = "VENUE_SERVICE_URL", default_value = DEFAULT_VENUE_SERVICE_URL)]
    venue_service_url: String,

    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Print the response body of the HTTP endpoint instead of a table
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(&args).await {
        tracing::debug!("Quote failed: {} (kind: {:?})", e, e.kind());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }
}

async fn run(args: &Args) -> dopc::Result<()> {
    validate_url("venue_service_url", &args.venue_service_url)?;

    let request = QuoteRequest::try_from(QuoteQuery {
        venue_slug: Some(args.venue_slug.clone()),
        cart_value: Some(args.cart_value.clone()),
        user_lat: Some(args.user_lat.clone()),
        user_lon: Some(args.user_lon.clone()),
    })?;

    let directory =
        HttpVenueDirectory::new(&args.venue_service_url, Duration::from_secs(args.timeout_secs))?;
    let breakdown = QuoteService::new(directory).quote(&request).await?;

    if args.json {
        let body = DeliveryOrderPrice::from(breakdown);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_breakdown(&breakdown);
    }
    Ok(())
}

fn print_breakdown(breakdown: &PriceBreakdown) {
    println!("Cart value:            {}", format_minor_units(breakdown.cart_value));
    println!("Delivery fee:          {}", format_minor_units(breakdown.delivery_fee));
    println!("Delivery distance:     {} m", breakdown.delivery_distance);
    println!("Small order surcharge: {}", format_minor_units(breakdown.small_order_surcharge));
    println!("Total price:           {}", format_minor_units(breakdown.total_price));
}

fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Bad arguments, including a bad `--venue-service-url`, exit with 1.
fn exit_code(err: &DopcError) -> i32 {
    if let DopcError::ConfigError { .. } = err {
        return 1;
    }
    match err.kind() {
        ErrorKind::Validation => 1,
        ErrorKind::VenueLookup => 2,
        ErrorKind::DeliveryImpossible => 3,
        ErrorKind::Unexpected => 4,
    }
}
