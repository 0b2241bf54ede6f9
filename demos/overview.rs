// Walks through the account: profile, households, and every Creative-Tonie
// with its chapters. Reads TONIEBOX_USERNAME / TONIEBOX_PASSWORD from the
// environment or a `.env` file. Read-only: nothing is committed.

use anyhow::{bail, Context};
use toniebox::{Client, ClientConfig};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toniebox=info".into()),
        )
        .init();

    let (Ok(username), Ok(password)) = (
        std::env::var("TONIEBOX_USERNAME"),
        std::env::var("TONIEBOX_PASSWORD"),
    ) else {
        bail!("Please set TONIEBOX_USERNAME and TONIEBOX_PASSWORD");
    };

    let mut client = Client::with_config(ClientConfig::from_env())?;
    client.login(&username, &password).context("Login failed")?;

    let me = client.get_me()?;
    println!("Hello, {} {} ({})", me.first_name, me.last_name, me.email);

    let households = client.get_households()?;
    println!("Found {} household(s)", households.len());

    for household in &households {
        println!("\n{} ({})", household.name, household.id);
        let mut tonies = client.get_creative_tonies(household)?;

        for tonie in &mut tonies {
            client.refresh(tonie)?;
            println!(
                "  {}: {} chapters present, {} remaining, {:.2}s left",
                tonie.name(),
                tonie.chapters_present(),
                tonie.chapters_remaining(),
                tonie.seconds_remaining()
            );
            for (i, chapter) in tonie.chapters().iter().enumerate() {
                println!("    {}. {} ({:.2}s)", i + 1, chapter.title, chapter.seconds);
            }
            if let Some(first) = tonie.chapters().first() {
                let found = tonie.find_chapter_by_title(&first.title);
                println!("    lookup of {:?} -> {:?}", first.title, found.map(|c| &c.id));
            }
        }
    }

    if let Err(e) = client.disconnect() {
        eprintln!("Warning: disconnect failed: {}", e);
    }
    Ok(())
}
