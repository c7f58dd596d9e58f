//! Dashboard demo
//!
//! Loads the screen configuration next to this file, seeds an in-memory
//! store and prints each screen as a manager, an owner and a tenant see it.
//!
//! ```sh
//! RUST_LOG=estate=debug cargo run --example dashboard
//! ```

use estate::logging::init_tracing;
use estate::prelude::*;

fn seed() -> anyhow::Result<InMemoryStore> {
    let store = InMemoryStore::new()
        .with_records(
            catalog::ANNOUNCEMENTS,
            vec![
                record! {
                    "title" => "Pool Party",
                    "content" => "Saturday at the community pool",
                    "status" => "Published",
                    "targetAudience" => "All",
                    "targetProperties" => Vec::<String>::new(),
                    "createdAt" => "2024-06-01",
                },
                record! {
                    "title" => "Owner meeting",
                    "content" => "Quarterly budget review",
                    "status" => "Published",
                    "targetAudience" => "Owners",
                    "targetProperties" => vec!["Greenleaf A"],
                    "createdAt" => "2024-06-03",
                },
                record! {
                    "title" => "Water shutoff",
                    "content" => "Maintenance on the main line",
                    "status" => "Draft",
                    "targetAudience" => "Tenants",
                    "targetProperties" => vec!["Oak Street"],
                    "createdAt" => "2024-06-05",
                },
            ],
        )?
        .with_records(
            catalog::CAPITAL_PROJECTS,
            vec![
                record! { "name" => "Roof replacement", "property" => "Greenleaf A", "status" => "Active", "budget" => 48_000.0 },
                record! { "name" => "Parking resurfacing", "property" => "Greenleaf B", "status" => "Planned", "budget" => 22_500.0 },
                record! { "name" => "Lobby refresh", "property" => "Oak Street", "status" => "Active", "budget" => 9_800.0 },
            ],
        )?
        .with_records(
            catalog::VENDORS,
            vec![
                record! { "name" => "Crane Roofing", "specialty" => "Roofing" },
                record! { "name" => "Acme", "specialty" => "Plumbing" },
                record! { "name" => "Bolt Electric", "specialty" => "Electrical" },
            ],
        )?
        .with_records(
            catalog::PAYMENTS,
            vec![
                record! { "payee" => "Acme", "amount" => 250.0 },
                record! { "payee" => "Crane Roofing", "amount" => 4_100.0 },
                record! { "payee" => "Acme", "amount" => 350.0 },
                record! { "payee" => "Bolt Electric", "amount" => 180.0 },
            ],
        )?;
    Ok(store)
}

fn label(record: &Record) -> String {
    ["title", "name"]
        .iter()
        .find_map(|field| record.get(field))
        .map(|value| value.display_text().into_owned())
        .unwrap_or_else(|| "<untitled>".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/dashboard/views.yaml");
    let config = ViewsConfig::from_yaml_file(path)?;
    let mut screens = config.build_screens()?;
    let store = seed()?;

    let viewers = [
        ("manager", ViewerContext::manager()),
        ("owner of Greenleaf A", ViewerContext::owner(["Greenleaf A"])),
        ("tenant at Oak Street", ViewerContext::tenant("Oak Street", Some("4B".to_string()))),
    ];

    for screen in &screens {
        println!("== {} ==", screen.name());
        for (who, viewer) in &viewers {
            let rows = screen.load(&store, Some(viewer)).await?;
            tracing::info!(screen = screen.name(), viewer = %who, rows = rows.len(), "rendered screen");
            let labels: Vec<_> = rows.iter().map(label).collect();
            println!("  {:<22} {}", who, labels.join(", "));
        }
    }

    // Interacting with a screen: search, then leave and come back
    if let Some(vendors) = screens.iter_mut().find(|s| s.name() == "vendors") {
        vendors.state_mut().set_search_term("plumb");
        let rows = vendors.load(&store, None).await?;
        println!("== vendors matching 'plumb' ==");
        for row in &rows {
            println!("  {}", label(row));
        }
        vendors.leave();
    }

    println!("== tax forms ==");
    let payments = store.list(catalog::PAYMENTS).await?;
    let summaries = summarize_payments(&payments, "payee", "amount");
    println!("{}", serde_json::to_string_pretty(&summaries)?);

    Ok(())
}
