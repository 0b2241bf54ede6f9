// UI layer: a simple interactive menu using `dialoguer`.
// Every action runs to completion before the menu comes back; changes to a
// Creative-Tonie are committed right after they are made.

use crate::{Client, CreativeTonie, JwtToken};
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

const TOKEN_FILE: &str = ".toniebox_token";

/// Main interactive menu. Runs until the user chooses "Exit".
pub fn main_menu(mut api: Client) -> Result<()> {
    if let Ok(token) = load_token() {
        api.set_token(token);
        println!("Using saved session. Choose \"Login\" if requests are rejected.");
    }

    loop {
        let items = [
            "Login",
            "Show profile",
            "List Creative-Tonies",
            "Upload audio file",
            "Rename Creative-Tonie",
            "Delete chapter",
            "Logout",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        let outcome = match selection {
            0 => handle_login(&mut api),
            1 => handle_profile(&api),
            2 => handle_list(&api),
            3 => handle_upload(&api),
            4 => handle_rename(&api),
            5 => handle_delete_chapter(&api),
            6 => handle_logout(&mut api),
            _ => break,
        };
        // Errors from one action are reported and the menu continues.
        if let Err(e) = outcome {
            println!("Failed: {:#}", e);
        }
    }
    Ok(())
}

fn handle_login(api: &mut Client) -> Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password: String = Password::new().with_prompt("Password").interact()?;

    let pb = spinner("Logging in...")?;
    let result = api.login(&email, &password);
    pb.finish_and_clear();

    let token = result?;
    persist_token(&token)?;
    println!("Logged in.");
    Ok(())
}

fn handle_profile(api: &Client) -> Result<()> {
    let me = api.get_me()?;
    println!("{} {} <{}>", me.first_name, me.last_name, me.email);
    if me.requires_verification_to_upload && !me.verified {
        println!("Account must be verified before uploading.");
    }
    Ok(())
}

fn handle_list(api: &Client) -> Result<()> {
    let households = api.get_households()?;
    if households.is_empty() {
        println!("No households found.");
    }
    for household in &households {
        println!("{} ({})", household.name, household.id);
        for tonie in api.get_creative_tonies(household)? {
            print_tonie(&tonie);
        }
    }
    Ok(())
}

fn handle_upload(api: &Client) -> Result<()> {
    let Some(mut tonie) = pick_tonie(api)? else {
        return Ok(());
    };
    let path: String = Input::new().with_prompt("Audio file path").interact_text()?;
    let path = PathBuf::from(path);
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let title: String = Input::new()
        .with_prompt("Chapter title")
        .default(default_title)
        .interact_text()?;

    let pb = spinner("Uploading...")?;
    let result = api
        .upload_file(&mut tonie, &path, &title)
        .and_then(|_| api.commit(&mut tonie));
    pb.finish_and_clear();
    result?;

    println!("Uploaded \"{}\" to {}.", title, tonie.name());
    Ok(())
}

fn handle_rename(api: &Client) -> Result<()> {
    let Some(mut tonie) = pick_tonie(api)? else {
        return Ok(());
    };
    let name: String = Input::new()
        .with_prompt("New name")
        .default(tonie.name().to_string())
        .interact_text()?;
    tonie.set_name(name);
    api.commit(&mut tonie)?;
    println!("Renamed to {}.", tonie.name());
    Ok(())
}

fn handle_delete_chapter(api: &Client) -> Result<()> {
    let Some(mut tonie) = pick_tonie(api)? else {
        return Ok(());
    };
    if tonie.chapters().is_empty() {
        println!("{} has no chapters.", tonie.name());
        return Ok(());
    }
    let titles: Vec<&str> = tonie.chapters().iter().map(|c| c.title.as_str()).collect();
    let index = Select::new()
        .with_prompt("Chapter to delete")
        .items(&titles)
        .interact()?;
    let chapter = tonie.chapters()[index].clone();

    let confirmed = Confirm::new()
        .with_prompt(format!("Delete \"{}\"?", chapter.title))
        .interact()?;
    if !confirmed {
        return Ok(());
    }
    tonie.delete_chapter(&chapter);
    api.commit(&mut tonie)?;
    println!("Deleted \"{}\".", chapter.title);
    Ok(())
}

fn handle_logout(api: &mut Client) -> Result<()> {
    api.disconnect()?;
    forget_token()?;
    println!("Logged out.");
    Ok(())
}

/// Let the user choose a household and then one of its Creative-Tonies.
fn pick_tonie(api: &Client) -> Result<Option<CreativeTonie>> {
    let households = api.get_households()?;
    if households.is_empty() {
        println!("No households found.");
        return Ok(None);
    }
    let names: Vec<&str> = households.iter().map(|h| h.name.as_str()).collect();
    let household = &households[Select::new()
        .with_prompt("Household")
        .items(&names)
        .default(0)
        .interact()?];

    let mut tonies = api.get_creative_tonies(household)?;
    if tonies.is_empty() {
        println!("No Creative-Tonies in {}.", household.name);
        return Ok(None);
    }
    let names: Vec<&str> = tonies.iter().map(|t| t.name()).collect();
    let index = Select::new()
        .with_prompt("Creative-Tonie")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Some(tonies.swap_remove(index)))
}

fn print_tonie(tonie: &CreativeTonie) {
    println!(
        "  {} ({}): {} chapters, {:.0}s used, {:.0}s left{}",
        tonie.name(),
        tonie.id(),
        tonie.chapters().len(),
        tonie.seconds_present(),
        tonie.seconds_remaining(),
        if tonie.transcoding() { ", transcoding" } else { "" }
    );
    for (i, chapter) in tonie.chapters().iter().enumerate() {
        println!("    {}. {} ({:.1}s)", i + 1, chapter.title, chapter.seconds);
    }
    for error in tonie.transcoding_errors() {
        println!("    transcoding error: {}", error);
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn token_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(TOKEN_FILE)
}

/// Save the session token in the user's home directory.
fn persist_token(token: &JwtToken) -> Result<()> {
    let data = serde_json::to_string(token)?;
    std::fs::write(token_path(), data).context("Failed to save session token")?;
    Ok(())
}

fn load_token() -> Result<JwtToken> {
    let data = std::fs::read_to_string(token_path())?;
    let token = serde_json::from_str(&data).context("Saved session token is unreadable")?;
    Ok(token)
}

fn forget_token() -> Result<()> {
    match std::fs::remove_file(token_path()) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}
