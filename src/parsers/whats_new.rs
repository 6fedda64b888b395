use crate::client::Client;
use crate::config::Config;
use crate::dom::{find_tag, required_attr, select_all, text_of, Document};
use crate::error::{Result, ScrapeError};
use crate::records::{ResultSet, WhatsNewRecord};
use indicatif::ProgressBar;
use url::Url;

/// Walks the "What's New" table of contents and pulls the title and the
/// editor/author block from every per-version article. Articles whose
/// fetch fails are skipped; the rest keep their index order.
pub async fn run(client: &Client, config: &Config) -> Result<Option<ResultSet>> {
    let whats_new_url = Url::parse(&config.docs_url)?.join("whatsnew/")?;

    let Some(response) = client.fetch(whats_new_url.as_str()).await else {
        return Ok(None);
    };
    let doc = Document::parse(&response.text);
    let links = article_links(&doc, &whats_new_url)?;

    let mut results = ResultSet::with_header(&WhatsNewRecord::HEADER);
    let progress = ProgressBar::new(links.len() as u64);
    for link in links {
        let Some(page) = client.fetch(link.as_str()).await else {
            progress.inc(1);
            continue;
        };
        let page_doc = Document::parse(&page.text);
        let (title, summary) = article_fields(&page_doc)?;
        results.push(WhatsNewRecord {
            link: link.into(),
            title,
            summary,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(Some(results))
}

/// Per-version article URLs from the index page's toctree, resolved
/// against the index URL.
fn article_links(doc: &Document, base: &Url) -> Result<Vec<Url>> {
    let main_section = find_tag(doc.root(), "section", &[("id", "what-s-new-in-python")])?;
    let toctree = find_tag(main_section, "div", &[("class", "toctree-wrapper")])?;

    let mut links = Vec::new();
    for entry in select_all(toctree, "li.toctree-l1")? {
        let anchor = find_tag(entry, "a", &[])?;
        let href = required_attr(anchor, "href")?;
        links.push(base.join(href)?);
    }
    Ok(links)
}

/// `h1` title plus the first definition list flattened to a single line.
fn article_fields(doc: &Document) -> std::result::Result<(String, String), ScrapeError> {
    let title = text_of(find_tag(doc.root(), "h1", &[])?);
    let summary = text_of(find_tag(doc.root(), "dl", &[])?).replace('\n', " ");
    Ok((title, summary))
}
