//! Terminal walkthrough of an event page.
//!
//! Fetches a real event product from the configured storefront, seeds the
//! page store and prints the listing card, the ticket rows and the cart.
//!
//! ```sh
//! cargo run --bin demo -- <product-handle>
//! ```

use std::time::Duration;

use anyhow::{Context, bail};
use playgrid_core::{Clock, SystemClock};
use playgrid_events::page::{EventPageReducer, PageAction, PageEnvironment, PagePhase, PageState};
use playgrid_events::{EventSummary, EventsConfig};
use playgrid_runtime::Store;
use playgrid_storefront::HttpStorefront;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playgrid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let handle = std::env::args()
        .nth(1)
        .context("usage: demo <product-handle>")?;

    let config = EventsConfig::from_env();
    info!(domain = %config.storefront.store_domain, %handle, "loading event page");

    let environment = PageEnvironment {
        storefront: Arc::new(HttpStorefront::new(&config.storefront)),
        timings: config.timings,
    };
    let store = Store::new(PageState::default(), EventPageReducer, environment);
    store.send(PageAction::Load { handle }).await?;

    // the fetch runs as a spawned effect; poll until it settles
    let mut waited = Duration::ZERO;
    loop {
        let phase = store.state(|s| s.phase).await;
        if phase != PagePhase::Loading {
            break;
        }
        if waited > Duration::from_secs(10) {
            bail!("timed out waiting for the product fetch");
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        waited += Duration::from_millis(50);
    }

    store
        .state(|state| {
            if state.phase == PagePhase::NotFound {
                println!("No event found for that handle.");
                return;
            }
            if let Some(product) = &state.product {
                print_page(state, product);
            }
        })
        .await;

    store.shutdown();
    Ok(())
}

fn print_page(state: &PageState, product: &playgrid_storefront::Product) {
    let summary = EventSummary::from_product(product, SystemClock.now());
    println!("{}", summary.title);
    println!("  {} · {}", summary.game_type, summary.format);
    if let (Some(date), Some(time)) = (&summary.date_label, &summary.time_label) {
        println!("  {date} at {time} ({})", summary.duration_label);
    }
    println!("  {}", summary.seats_label);

    println!("\nTickets:");
    let capacity = state.tickets.capacity();
    for option in state.tickets.options() {
        let marker = if state.tickets.is_active(&option.variant_id) {
            "*"
        } else {
            " "
        };
        println!(
            "  [{marker}] {} — {} ({})",
            option.label,
            playgrid_events::format::money_label(option.price, &option.currency),
            option.seats_label(capacity),
        );
    }

    if !state.upsells.cards().is_empty() {
        println!("\nAdd-ons:");
        for card in state.upsells.cards() {
            let option = card.selected_option();
            println!(
                "  {} — {}",
                card.line_title(),
                playgrid_events::format::money_label(option.price, &option.currency),
            );
        }
    }

    let cart = state.cart_view();
    println!("\nCart:");
    for line in &cart.lines {
        println!("  {} ({}) {}", line.title_label, line.variant_label, line.price_label);
    }
    println!("  Subtotal: {}", cart.subtotal_label);
}
