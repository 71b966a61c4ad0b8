//! # CLI Module
//!
//! Command-line entry points of sporlrec. The main command is [`serve`], which
//! runs the HTTP facade. The lookup commands run the same orchestrators the
//! server uses, directly from the terminal, and print the result as a table.
//!
//! ## Commands
//!
//! - [`serve`] - Starts the HTTP facade on the configured address
//! - [`search`] - Searches tracks
//! - [`recommend`] - Lists tracks related to a seed track
//! - [`track`] - Shows the details of a single track
//!
//! ## Usage Patterns
//!
//! ```bash
//! sporlrec serve --port 3001
//! sporlrec search "Beatles" --limit 5
//! sporlrec recommend 3n3Ppam7vgaVa1iaRUc9Lp
//! sporlrec track 3n3Ppam7vgaVa1iaRUc9Lp
//! ```
//!
//! Failures are reported with the same message and status the HTTP API would
//! return, then the process exits with code 1.

mod recommend;
mod search;
mod serve;
mod track;

pub use recommend::recommend;
pub use search::search;
pub use serve::serve;
pub use track::track;

use crate::{catalog::Catalog, config::Config, error, error::ApiError};

fn build_catalog(config: &Config) -> Catalog {
    match Catalog::from_config(config) {
        Ok(catalog) => catalog,
        Err(e) => error!("Failed to build Spotify client. Err: {}", e),
    }
}

fn exit_with(err: ApiError) -> ! {
    let (status, message) = err.parts();
    error!("{} (HTTP {})", message, status.as_u16())
}
