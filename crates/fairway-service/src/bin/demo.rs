//! # Demo Terminal Run
//!
//! Scripted end-to-end run against the in-memory remote: sign in, look up a
//! member, build a cart, submit the order, and print a report.
//!
//! ## Usage
//! ```bash
//! cargo run -p fairway-service --bin demo
//!
//! # With debug logging
//! RUST_LOG=debug cargo run -p fairway-service --bin demo
//! ```

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fairway_core::catalog::Catalog;
use fairway_core::timeframe::{ReportFilter, Timeframe};
use fairway_core::types::{Member, StaffProfile, StaffRole};
use fairway_store::SnapshotStore;
use fairway_service::{
    lookup_member, AuthSession, CartSession, MemoryAuth, MemoryRemote, OrderSubmitter,
    ReportService, SettingsService,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fairway=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn seed_members(remote: &MemoryRemote) {
    let members = [
        ("1234", "Pat", "Doyle", true),
        ("2345", "Sam", "Okafor", true),
        ("9999", "Lee", "Vance", false),
    ];
    for (id, first, last, active) in members {
        remote.insert_member(Member {
            member_id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@members.club.test", first.to_lowercase()),
            phone: None,
            membership_type: Some("Full".to_string()),
            active,
        });
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Wiring: in-memory store + remote + auth, same shape as a real terminal
    let store = SnapshotStore::open_in_memory()?;
    let remote = Arc::new(MemoryRemote::new());
    seed_members(&remote);

    let provider = Arc::new(MemoryAuth::new());
    provider.seed(
        "alex@club.test",
        "pour-one",
        StaffProfile {
            uid: "u-alex".to_string(),
            name: "Alex".to_string(),
            email: "alex@club.test".to_string(),
            role: StaffRole::Bartender,
            active: true,
        },
    );

    let auth = AuthSession::new(provider);
    let settings = SettingsService::load(store.clone());
    let cart = CartSession::load(store);
    let submitter = OrderSubmitter::new(remote.clone());
    let reports = ReportService::new(remote.clone());
    let catalog = Catalog::standard();

    // Shift start
    let bartender = auth.sign_in("alex@club.test", "pour-one").await?;
    info!(name = %bartender.name, "behind the bar");

    // Member walks up
    let member = lookup_member(remote.as_ref(), "1234").await?;
    info!(member = %member.full_name(), "member found");
    cart.set_member(Some(member));
    cart.set_event_name("Friday Trivia");

    // Round of drinks
    for id in ["c1", "c1", "b9", "w10"] {
        let item = catalog.find(id).expect("menu item");
        cart.add_item(item)?;
        info!(drink = %item.name, "added");
    }
    cart.add_custom_item("House Lemonade", 450)?;
    cart.update_quantity("w10", 2)?;

    let rate = settings.tax_rate();
    let totals = cart.totals(rate);
    info!(
        subtotal = %fairway_core::Money::from_cents(totals.subtotal_cents),
        tax = %fairway_core::Money::from_cents(totals.tax_cents),
        total = %fairway_core::Money::from_cents(totals.total_cents),
        "tab ready"
    );

    // Submit, then clear the cart (the submitter never clears it)
    let snapshot = cart.snapshot();
    let submitted = submitter.submit(&snapshot, &bartender, rate, "").await?;
    info!(order_id = %submitted.order_id, "order on the books");
    cart.clear();

    // Nightly numbers
    let stats = reports
        .load_now(&ReportFilter::preset(Timeframe::Today))
        .await?
        .expect("no concurrent report loads in the demo");
    info!(
        orders = stats.order_count,
        sales = %fairway_core::Money::from_cents(stats.total_sales_cents),
        "today so far"
    );
    for item in &stats.top_items {
        info!(drink = %item.name, poured = item.quantity, "top seller");
    }

    auth.sign_out().await?;
    Ok(())
}
