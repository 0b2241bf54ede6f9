// The `Client` façade: login, listing, and Creative-Tonie operations.

use crate::config::{ClientConfig, Endpoints};
use crate::error::{Result, TonieError};
use crate::models::{CreativeTonie, Household, Me};
use crate::request::RequestHandler;
use crate::token::JwtToken;
use crate::transport::build_http_client;
use crate::upload::upload_chapter;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// Blocking client for the Toniebox cloud.
///
/// Each call issues at most one request at a time and waits for it. The
/// client holds the session token; methods that change it take `&mut self`,
/// so sharing one client between threads needs an external lock such as a
/// `Mutex`.
///
/// ```no_run
/// use toniebox::Client;
///
/// # fn main() -> toniebox::Result<()> {
/// let mut client = Client::new()?;
/// client.login("user@example.com", "password")?;
/// for household in client.get_households()? {
///     for tonie in client.get_creative_tonies(&household)? {
///         println!("{}: {} chapters", tonie.name(), tonie.chapters().len());
///     }
/// }
/// client.disconnect()?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    id: u64,
    endpoints: Endpoints,
    handler: RequestHandler,
}

impl Client {
    /// Client with production endpoints and no proxy.
    pub fn new() -> Result<Self> {
        Client::with_config(ClientConfig::default())
    }

    /// Client routed through `proxy_url`, e.g. `http://proxy.example.com:8080`.
    /// Fails without touching the network if the address is malformed.
    pub fn with_proxy(proxy_url: &str) -> Result<Self> {
        Client::with_config(ClientConfig::default().with_proxy(proxy_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(config.timeout, config.proxy.as_deref())?;
        Ok(Client {
            id: NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed),
            endpoints: config.endpoints,
            handler: RequestHandler::new(http),
        })
    }

    /// Log in with account email and password. The token is stored for all
    /// later calls and also returned so it can be saved and reused with
    /// `set_token`.
    pub fn login(&mut self, email: &str, password: &str) -> Result<JwtToken> {
        self.handler.login(&self.endpoints.token_url, email, password)
    }

    /// Use a token obtained earlier instead of logging in.
    pub fn set_token(&mut self, token: JwtToken) {
        self.handler.tokens_mut().set(token);
    }

    pub fn token(&self) -> Option<&JwtToken> {
        self.handler.tokens().get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.handler.tokens().is_present()
    }

    pub fn get_me(&self) -> Result<Me> {
        self.handler.get_json(&self.endpoints.me())
    }

    pub fn get_households(&self) -> Result<Vec<Household>> {
        self.handler.get_json(&self.endpoints.households())
    }

    /// All Creative-Tonies of `household`, each attached to this client.
    pub fn get_creative_tonies(&self, household: &Household) -> Result<Vec<CreativeTonie>> {
        let url = self.endpoints.creative_tonies(&household.id);
        let mut tonies: Vec<CreativeTonie> = self.handler.get_json(&url)?;
        for tonie in &mut tonies {
            tonie.attach(household.clone(), self.id);
        }
        debug!(household = %household.id, count = tonies.len(), "listed creative tonies");
        Ok(tonies)
    }

    /// A single Creative-Tonie, attached to this client.
    pub fn get_creative_tonie(&self, household: &Household, tonie_id: &str) -> Result<CreativeTonie> {
        let url = self.endpoints.creative_tonie(&household.id, tonie_id);
        let mut tonie: CreativeTonie = self.handler.get_json(&url)?;
        tonie.attach(household.clone(), self.id);
        Ok(tonie)
    }

    /// Reload `tonie` from the server in place. Uncommitted local changes
    /// are dropped.
    pub fn refresh(&self, tonie: &mut CreativeTonie) -> Result<()> {
        let household = self.owning_household(tonie)?;
        let url = self.endpoints.creative_tonie(&household.id, tonie.id());
        let fresh: CreativeTonie = self.handler.get_json(&url)?;
        tonie.overwrite_from(fresh);
        Ok(())
    }

    /// Send local changes to the server. A tonie without changes is not sent.
    /// On failure the local changes stay in place and the tonie stays dirty;
    /// call `refresh` to go back to the server's state.
    pub fn commit(&self, tonie: &mut CreativeTonie) -> Result<()> {
        let household = self.owning_household(tonie)?;
        if !tonie.is_dirty() {
            debug!(tonie = %tonie.id(), "nothing to commit");
            return Ok(());
        }
        let url = self.endpoints.creative_tonie(&household.id, tonie.id());
        self.handler.patch_json(&url, &*tonie)?;
        tonie.mark_clean();
        info!(tonie = %tonie.id(), "committed creative tonie");
        Ok(())
    }

    /// Upload `path` and append it to `tonie` as a chapter titled `title`.
    /// The new chapter is local until `commit`.
    pub fn upload_file(
        &self,
        tonie: &mut CreativeTonie,
        path: impl AsRef<Path>,
        title: &str,
    ) -> Result<()> {
        self.owning_household(tonie)?;
        let chapter = upload_chapter(&self.handler, &self.endpoints, path.as_ref(), title)?;
        tonie.push_chapter(chapter);
        Ok(())
    }

    /// End the session on the server and forget the token.
    pub fn disconnect(&mut self) -> Result<()> {
        self.handler.delete(&self.endpoints.session())?;
        self.handler.tokens_mut().clear();
        info!("disconnected");
        Ok(())
    }

    fn owning_household(&self, tonie: &CreativeTonie) -> Result<Household> {
        match tonie.context() {
            Some(context) if context.client_id == self.id => Ok(context.household.clone()),
            _ => Err(TonieError::NotInitialized),
        }
    }
}
