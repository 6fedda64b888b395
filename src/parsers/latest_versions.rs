use crate::client::Client;
use crate::config::Config;
use crate::dom::{find_tag, required_attr, select_all, text_of, Document};
use crate::error::{Result, ScrapeError};
use crate::records::{ResultSet, VersionRecord};
use regex::Regex;
use scraper::ElementRef;

/// `Python 3.11 (stable)` → version `3.11`, status `stable`.
const VERSION_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

/// Marker distinguishing the version list from the other sidebar lists.
const VERSION_LIST_MARKER: &str = "All versions";

/// Reads the sidebar version list off the main documentation page. A
/// sidebar without the marker list means the page layout changed, which
/// is fatal; a link with unparseable text is kept as a fallback row.
pub async fn run(client: &Client, config: &Config) -> Result<Option<ResultSet>> {
    let Some(response) = client.fetch(&config.docs_url).await else {
        return Ok(None);
    };
    let doc = Document::parse(&response.text);

    let sidebar = find_tag(doc.root(), "div", &[("class", "sphinxsidebarwrapper")])?;
    let anchors = version_list_anchors(sidebar)?;

    let pattern = Regex::new(VERSION_PATTERN).map_err(ScrapeError::Pattern)?;
    let mut results = ResultSet::with_header(&VersionRecord::HEADER);
    for anchor in anchors {
        let link = required_attr(anchor, "href")?.to_string();
        results.push(parse_link_text(&pattern, link, &text_of(anchor)));
    }

    Ok(Some(results))
}

/// Anchors of the sidebar list whose text carries the marker phrase.
fn version_list_anchors(
    sidebar: ElementRef<'_>,
) -> std::result::Result<Vec<ElementRef<'_>>, ScrapeError> {
    for list in select_all(sidebar, "ul")? {
        if text_of(list).contains(VERSION_LIST_MARKER) {
            return select_all(list, "a");
        }
    }
    Err(ScrapeError::Structure(format!(
        "no sidebar list containing {:?}",
        VERSION_LIST_MARKER
    )))
}

fn parse_link_text(pattern: &Regex, link: String, text: &str) -> VersionRecord {
    match pattern.captures(text) {
        Some(caps) => VersionRecord {
            link,
            version: caps["version"].to_string(),
            status: caps["status"].to_string(),
        },
        // Keep the row so no link is dropped, with the raw text standing
        // in for the version.
        None => VersionRecord {
            link,
            version: text.to_string(),
            status: String::new(),
        },
    }
}
