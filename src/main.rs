// Entrypoint for the interactive CLI.
// - Keeps `main` small: set up logging, build the client, hand it to the UI.
// - `TONIEBOX_PROXY` routes all traffic through a proxy when set.

use toniebox::{ui::main_menu, Client, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toniebox=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = Client::with_config(ClientConfig::from_env())?;

    // Blocks until the user exits.
    main_menu(api)?;
    Ok(())
}
