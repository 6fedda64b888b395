use crate::client::Client;
use crate::config::Config;
use crate::dom::{find_css, find_tag, required_attr, Document};
use crate::error::{Result, ScrapeError};
use crate::log_info;
use crate::records::ResultSet;
use crate::utils::{ensure_directory, save_archive};
use url::Url;

const ARCHIVE_SUFFIX: &str = "pdf-a4.zip";

/// Locates the A4 PDF archive on the downloads page and writes it under
/// the downloads directory. Side effect only; produces no result set.
pub async fn run(client: &Client, config: &Config) -> Result<Option<ResultSet>> {
    let downloads_url = Url::parse(&config.docs_url)?.join("download.html")?;

    let Some(response) = client.fetch(downloads_url.as_str()).await else {
        return Ok(None);
    };
    let doc = Document::parse(&response.text);

    let table = find_tag(doc.root(), "table", &[("class", "docutils")])?;
    let anchor = find_css(table, &format!("a[href$=\"{}\"]", ARCHIVE_SUFFIX))?;
    let href = required_attr(anchor, "href")?;

    let archive_url = downloads_url.join(href)?;
    let filename = archive_filename(&archive_url)?;

    let downloads_dir = config.downloads_dir();
    ensure_directory(&downloads_dir)?;
    let archive_path = downloads_dir.join(filename);

    // Uncached request: the archive body goes to disk verbatim, and a
    // failure here aborts the run.
    let content = client.get_bytes(archive_url.as_str()).await?;
    save_archive(&archive_path, &content)?;

    log_info!("[download] Archive saved to {:?}", archive_path);
    Ok(None)
}

/// Final path segment of the archive URL.
fn archive_filename(url: &Url) -> std::result::Result<String, ScrapeError> {
    let name = url.as_str().rsplit('/').next().unwrap_or("");
    if name.is_empty() {
        return Err(ScrapeError::Structure(format!(
            "archive URL has no filename segment: {}",
            url
        )));
    }
    Ok(name.to_string())
}
