mod download;
mod latest_versions;
mod pep;
mod whats_new;

use crate::cli::Mode;
use crate::client::Client;
use crate::config::Config;
use crate::error::Result;
use crate::records::ResultSet;

/// Dispatch table for the scraping modes, fixed at startup. `download`
/// is a pure side effect and never produces a result set; the other
/// modes return `None` only when their index page could not be fetched.
pub async fn run_mode(mode: Mode, client: &Client, config: &Config) -> Result<Option<ResultSet>> {
    match mode {
        Mode::WhatsNew => whats_new::run(client, config).await,
        Mode::LatestVersions => latest_versions::run(client, config).await,
        Mode::Download => download::run(client, config).await,
        Mode::Pep => pep::run(client, config).await,
    }
}
