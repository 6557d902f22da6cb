use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use mockshop_server::{MockshopServer, ServerConfig};
use mockshop_store::{Catalog, EntityModel};
use mockshop_types::EnumeratedStatus;

use crate::cli::*;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "mockshop.toml";

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Command::Init(_) => cmd_init(&config).await,
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::Stats(_) => cmd_stats(&config, &cli.format).await,
        Command::Config(_) => cmd_config(&config),
    }
}

/// File (explicit or `./mockshop.toml`), then global flag overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load_config(Path::new(DEFAULT_CONFIG_FILE))?,
        None => ServerConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = dir.clone();
    }
    Ok(config)
}

fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
    tracing::debug!(path = %path.display(), "loading configuration");
    ServerConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
}

async fn cmd_init(config: &ServerConfig) -> anyhow::Result<()> {
    let catalog = Catalog::open(&config.store);
    catalog
        .ensure_initialized()
        .await
        .context("failed to initialize collections")?;
    println!(
        "{} Initialized collections in {}",
        "✓".green().bold(),
        config.store.data_dir.display().to_string().bold()
    );
    let locations = [
        catalog.users.store().location(),
        catalog.orders.store().location(),
        catalog.carts.store().location(),
        catalog.products.store().location(),
    ];
    for location in &locations {
        println!("  {}", location.dimmed());
    }
    Ok(())
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.no_cors {
        config.cors = false;
    }
    println!(
        "Mockshop server on {} (data: {})",
        config.bind_addr.to_string().bold(),
        config.store.data_dir.display()
    );
    MockshopServer::new(config).serve().await.context("server stopped with an error")
}

async fn cmd_stats(config: &ServerConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let catalog = Catalog::open(&config.store);
    let counts = catalog.counts().await.context("failed to read collections")?;
    let by_status = catalog
        .orders
        .count_orders_by_status()
        .await
        .context("failed to count orders")?;

    match format {
        OutputFormat::Json => {
            let report = json!({
                "users": counts.users,
                "orders": counts.orders,
                "carts": counts.carts,
                "products": counts.products,
                "ordersByStatus": by_status,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{}", "Collections".bold());
            println!("  users:    {}", counts.users.to_string().yellow());
            println!("  orders:   {}", counts.orders.to_string().yellow());
            println!("  carts:    {}", counts.carts.to_string().yellow());
            println!("  products: {}", counts.products.to_string().yellow());
            println!("{}", "Orders by status".bold());
            for (status, n) in &by_status {
                println!("  {:<11} {}", format!("{}:", status.as_str()), n.to_string().cyan());
            }
        }
    }
    Ok(())
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
