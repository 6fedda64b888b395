use crate::client::Client;
use crate::config::Config;
use crate::dom::{
    find_tag, next_sibling_element, required_attr, select_all, text_of, Document,
};
use crate::error::{Result, ScrapeError};
use crate::log_warn;
use crate::records::{MismatchRecord, ResultSet, StatusCountRecord, StatusTally};
use indicatif::ProgressBar;
use url::Url;

const STATUS_LABEL: &str = "Status:";

/// Tally key for rows whose page status could not be read.
const FALLBACK_STATUS: &str = "None";

/// Page statuses allowed for an index status code. The index shows a
/// one-letter code; codeless rows map to the empty string.
fn expected_statuses(code: &str) -> Option<&'static [&'static str]> {
    match code {
        "A" => Some(&["Active", "Accepted"]),
        "D" => Some(&["Deferred"]),
        "F" => Some(&["Final"]),
        "P" => Some(&["Provisional"]),
        "R" => Some(&["Rejected"]),
        "S" => Some(&["Superseded"]),
        "W" => Some(&["Withdrawn"]),
        "" => Some(&["Draft", "Active"]),
        _ => None,
    }
}

/// Walks the numerical index, tallies every PEP's own page status and
/// reports rows where it disagrees with the index code.
pub async fn run(client: &Client, config: &Config) -> Result<Option<ResultSet>> {
    let peps_base = Url::parse(&config.peps_url)?;
    let index_url = peps_base.join("pep-0000/")?;

    let Some(response) = client.fetch(index_url.as_str()).await else {
        return Ok(None);
    };
    let doc = Document::parse(&response.text);

    let section = find_tag(doc.root(), "section", &[("id", "numerical-index")])?;
    let table = find_tag(section, "table", &[])?;
    let tbody = find_tag(table, "tbody", &[])?;
    let rows = select_all(tbody, "tr")?;

    let mut tally = StatusTally::new();
    let mut mismatches: Vec<MismatchRecord> = Vec::new();
    let mut total = 0usize;

    let progress = ProgressBar::new(rows.len() as u64);
    for row in rows {
        let abbr = find_tag(row, "abbr", &[])?;
        // First character is the type prefix; the rest is the status code.
        let code: String = text_of(abbr).chars().skip(1).collect();

        let anchor = find_tag(row, "a", &[])?;
        let href = required_attr(anchor, "href")?;
        let pep_url = peps_base.join(href)?;

        total += 1;
        let page_status = fetch_page_status(client, pep_url.as_str()).await?;
        reconcile(&code, page_status, pep_url.as_str(), &mut tally, &mut mismatches)?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    if !mismatches.is_empty() {
        log_warn!("{}", mismatch_report(&mismatches));
    }

    let mut results = ResultSet::with_header(&StatusCountRecord::HEADER);
    for (status, count) in tally.into_sorted() {
        results.push(StatusCountRecord { status, count });
    }
    results.push(StatusCountRecord {
        status: "Total".to_string(),
        count: total,
    });

    Ok(Some(results))
}

/// Counts the row's status and records a mismatch when it falls outside
/// the expected set for the index code. Rows without a readable page
/// status count under the fallback key and skip the check.
fn reconcile(
    code: &str,
    page_status: Option<String>,
    pep_url: &str,
    tally: &mut StatusTally,
    mismatches: &mut Vec<MismatchRecord>,
) -> std::result::Result<(), ScrapeError> {
    let Some(status) = page_status else {
        tally.increment(FALLBACK_STATUS);
        return Ok(());
    };

    let expected = expected_statuses(code).ok_or_else(|| {
        ScrapeError::Structure(format!("unknown status code {:?} in the numerical index", code))
    })?;

    tally.increment(&status);
    if !expected.iter().any(|s| *s == status) {
        mismatches.push(MismatchRecord {
            pep_url: pep_url.to_string(),
            index_code: code.to_string(),
            page_status: status,
        });
    }
    Ok(())
}

/// Authoritative status from the PEP's own page: the element following
/// the "Status:" label in its header list. `None` when the page could
/// not be fetched or carries no such label.
async fn fetch_page_status(client: &Client, url: &str) -> Result<Option<String>> {
    let Some(response) = client.fetch(url).await else {
        return Ok(None);
    };
    let doc = Document::parse(&response.text);
    Ok(page_status(&doc)?)
}

fn page_status(doc: &Document) -> std::result::Result<Option<String>, ScrapeError> {
    let dl = find_tag(doc.root(), "dl", &[])?;
    for dt in select_all(dl, "dt")? {
        if text_of(dt).trim() == STATUS_LABEL {
            let status = next_sibling_element(dt).map(|dd| text_of(dd).trim().to_string());
            return Ok(status.filter(|s| !s.is_empty()));
        }
    }
    Ok(None)
}

fn mismatch_report(mismatches: &[MismatchRecord]) -> String {
    let mut report = String::from("Mismatched statuses:\n");
    for mismatch in mismatches {
        let expected = expected_statuses(&mismatch.index_code)
            .unwrap_or(&[])
            .join(", ");
        report.push_str(&format!(
            "{}\nStatus in card: {}\nExpected statuses: [{}]\n",
            mismatch.pep_url, mismatch.page_status, expected
        ));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEP_PAGE: &str = r#"
        <html><body>
          <section id="pep-content">
            <dl class="rfc2822 field-list">
              <dt>Author:</dt><dd>Some Author</dd>
              <dt>Status:</dt><dd><abbr title="Accepted and implementation complete">Final</abbr></dd>
              <dt>Type:</dt><dd>Standards Track</dd>
            </dl>
          </section>
        </body></html>
    "#;

    #[test]
    fn expected_statuses_cover_index_codes() {
        assert_eq!(expected_statuses("A").unwrap(), &["Active", "Accepted"]);
        assert_eq!(expected_statuses("").unwrap(), &["Draft", "Active"]);
        assert!(expected_statuses("X").is_none());
    }

    #[test]
    fn page_status_reads_text_after_label() {
        let doc = Document::parse(PEP_PAGE);
        assert_eq!(page_status(&doc).unwrap().as_deref(), Some("Final"));
    }

    #[test]
    fn page_without_status_label_yields_none() {
        let doc = Document::parse("<dl><dt>Author:</dt><dd>Someone</dd></dl>");
        assert_eq!(page_status(&doc).unwrap(), None);
    }

    #[test]
    fn page_without_definition_list_is_structural() {
        let doc = Document::parse("<html><body><p>no list here</p></body></html>");
        assert!(page_status(&doc).is_err());
    }

    #[test]
    fn mismatching_status_is_collected_as_triple() {
        let mut tally = StatusTally::new();
        let mut mismatches = Vec::new();

        reconcile(
            "A",
            Some("Withdrawn".to_string()),
            "https://peps.python.org/pep-0401/",
            &mut tally,
            &mut mismatches,
        )
        .unwrap();

        assert_eq!(
            mismatches,
            vec![MismatchRecord {
                pep_url: "https://peps.python.org/pep-0401/".to_string(),
                index_code: "A".to_string(),
                page_status: "Withdrawn".to_string(),
            }]
        );
    }

    #[test]
    fn matching_status_is_not_a_mismatch() {
        let mut tally = StatusTally::new();
        let mut mismatches = Vec::new();

        reconcile(
            "F",
            Some("Final".to_string()),
            "https://peps.python.org/pep-0008/",
            &mut tally,
            &mut mismatches,
        )
        .unwrap();

        assert!(mismatches.is_empty());
        assert_eq!(tally.into_sorted(), vec![("Final".to_string(), 1)]);
    }

    #[test]
    fn unreadable_page_status_counts_under_fallback() {
        let mut tally = StatusTally::new();
        let mut mismatches = Vec::new();

        reconcile(
            "F",
            None,
            "https://peps.python.org/pep-9999/",
            &mut tally,
            &mut mismatches,
        )
        .unwrap();

        assert!(mismatches.is_empty());
        assert_eq!(tally.into_sorted(), vec![("None".to_string(), 1)]);
    }

    #[test]
    fn unknown_index_code_is_structural() {
        let mut tally = StatusTally::new();
        let mut mismatches = Vec::new();

        let result = reconcile(
            "Z",
            Some("Final".to_string()),
            "https://peps.python.org/pep-0001/",
            &mut tally,
            &mut mismatches,
        );
        assert!(result.is_err());
    }

    #[test]
    fn report_lists_url_card_status_and_expected_set() {
        let report = mismatch_report(&[MismatchRecord {
            pep_url: "https://peps.python.org/pep-0401/".to_string(),
            index_code: "A".to_string(),
            page_status: "Withdrawn".to_string(),
        }]);

        assert!(report.contains("https://peps.python.org/pep-0401/"));
        assert!(report.contains("Status in card: Withdrawn"));
        assert!(report.contains("Expected statuses: [Active, Accepted]"));
    }
}
