use std::process::ExitCode;

use chrono::Local;
use metro_network::cashier::{Cashier, SubscriptionRegistry, TariffConfig};
use metro_network::layout::{LayoutError, MetroLayout, perm_layout};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Journeys priced when running the demo.
const DEMO_JOURNEYS: &[(&str, &str)] = &[
    ("Sportivnaya", "Perm2"),
    ("Sportivnaya", "Soborna"),
    ("DvoretsKultury", "Pacanskaya"),
];

fn main() -> ExitCode {
    setup_logging();

    // Optional path to a JSON layout; defaults to the built-in Perm network.
    let layout = match std::env::args().nth(1) {
        Some(path) => match load_layout(&path) {
            Ok(layout) => layout,
            Err(e) => {
                error!(%path, error = %e, "failed to load layout");
                return ExitCode::FAILURE;
            }
        },
        None => perm_layout(),
    };

    let metro = match layout.build() {
        Ok(metro) => metro,
        Err(e) => {
            error!(error = %e, "failed to build metro");
            return ExitCode::FAILURE;
        }
    };

    print!("{metro}");
    println!();

    let today = Local::now().date_naive();
    let mut registry = SubscriptionRegistry::new();

    // One cashier at the first station of the first line takes every sale.
    let Some(first) = metro.lines().first().and_then(|line| line.first()) else {
        return ExitCode::SUCCESS;
    };
    let mut cashier = Cashier::new(metro.station(first).name(), TariffConfig::default());

    for (start, finish) in DEMO_JOURNEYS {
        match cashier.sell_ticket(&metro, start, finish, today) {
            Ok(price) => println!("{start} -> {finish}: ticket {price}"),
            Err(e) => println!("{start} -> {finish}: {e}"),
        }
    }

    match cashier.sell_subscription(&mut registry, today) {
        Ok(subscription) => println!(
            "subscription {} valid until {}",
            subscription.number(),
            subscription.expires_on()
        ),
        Err(e) => println!("subscription: {e}"),
    }

    println!("{} takings on {today}: {}", cashier.station(), cashier.revenue_on(today));

    ExitCode::SUCCESS
}

fn load_layout(path: &str) -> Result<MetroLayout, LayoutError> {
    let json = std::fs::read_to_string(path)?;
    MetroLayout::from_json(&json)
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}
