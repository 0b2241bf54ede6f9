// Logs in once, then hands the token to a second client that never sees the
// password. This is how a stored token is reused across runs.

use anyhow::bail;
use toniebox::Client;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let (Ok(username), Ok(password)) = (
        std::env::var("TONIEBOX_USERNAME"),
        std::env::var("TONIEBOX_PASSWORD"),
    ) else {
        bail!("Please set TONIEBOX_USERNAME and TONIEBOX_PASSWORD");
    };

    println!("1. Logging in to get a token...");
    let mut first = Client::new()?;
    let token = first.login(&username, &password)?;
    println!(
        "   got a {} token (refresh token: {})",
        if token.token_type.is_empty() { "bearer" } else { token.token_type.as_str() },
        if token.refresh_token.is_some() { "yes" } else { "no" }
    );

    println!("2. Creating a second client with that token...");
    let mut second = Client::new()?;
    second.set_token(token);

    let me = second.get_me()?;
    println!("   hello, {} {}", me.first_name, me.last_name);
    let households = second.get_households()?;
    println!("   {} household(s)", households.len());

    second.disconnect()?;
    Ok(())
}
