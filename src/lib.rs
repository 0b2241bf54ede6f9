// Library root
// ------------
// Blocking client for the Toniebox cloud API. The binary (`main.rs`) uses
// it to drive an interactive CLI.
//
// Module responsibilities:
// - `config`: endpoint table, OAuth constants, timeout and proxy settings.
// - `client`: the `Client` façade (login, listing, refresh, commit, upload).
// - `models`: wire records (`Me`, `Household`, `CreativeTonie`, `Chapter`).
// - `upload`: presigned object-storage upload of chapter files.
// - `token`: the session token and its holder.
// - `request` / `transport`: the HTTP plumbing behind the façade.
// - `ui`: terminal menus used by the binary.
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod token;
pub mod ui;
pub mod upload;

mod request;
mod transport;

pub use client::Client;
pub use config::{ClientConfig, Endpoints};
pub use error::{Result, TonieError};
pub use models::{Chapter, CreativeTonie, Household, Me};
pub use token::{JwtToken, TokenHolder};
pub use upload::{StorageFields, UploadTicket};
