//! Bargain Wala CLI binary

use anyhow::Result;
use bargain_wala::cli::{describe_event, BargainApp, Cli, Commands};
use bargain_wala::AddOutcome;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging on stderr, stdout is reserved for program output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let app = BargainApp::new(config);

    if let Commands::Catalog = cli.command {
        if cli.json {
            println!("{}", app.render_catalog_json()?);
        } else {
            for product in app.catalog().products() {
                println!("{:<14} {:>8}", product.name, product.retail_price);
            }
        }
        return Ok(());
    }

    // Stream store events while the session runs
    let printer = if cli.streams_events() {
        let (subscription, mut events) = app.store().subscribe_channel().await;
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                println!("{}", describe_event(&event));
            }
        });
        Some((subscription, handle))
    } else {
        None
    };

    let outcomes = match cli.command {
        Commands::Bargain {
            product,
            quote,
            retail,
        } => {
            let outcome = app.bargain(&product, &quote, retail.as_deref()).await?;
            app.settle_all().await;
            vec![outcome]
        }
        Commands::Demo => app.demo().await?,
        Commands::Catalog => Vec::new(),
    };

    // Dropping the observer closes the channel and ends the printer
    if let Some((subscription, handle)) = printer {
        app.store().unsubscribe(subscription).await;
        handle.await?;
    }

    if cli.json {
        println!("{}", app.render_json().await?);
        return Ok(());
    }

    for outcome in &outcomes {
        if let AddOutcome::RejectedDuplicate { name } = outcome {
            println!("! {} is already in your cart", name);
        }
    }
    println!("{}", app.cart_summary().await);

    Ok(())
}
