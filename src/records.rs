pub type Row = Vec<String>;

/// Ordered output of one routine run. The header is always row zero;
/// every row of one set has the same arity by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    pub fn with_header(header: &[&str]) -> Self {
        Self {
            rows: vec![header.iter().map(|s| s.to_string()).collect()],
        }
    }

    pub fn push(&mut self, record: impl Into<Row>) {
        self.rows.push(record.into());
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows, header excluded.
    pub fn record_count(&self) -> usize {
        self.rows.len() - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsNewRecord {
    pub link: String,
    pub title: String,
    pub summary: String,
}

impl WhatsNewRecord {
    pub const HEADER: [&'static str; 3] = ["Link", "Title", "Editor, Author"];
}

impl From<WhatsNewRecord> for Row {
    fn from(record: WhatsNewRecord) -> Row {
        vec![record.link, record.title, record.summary]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub link: String,
    pub version: String,
    pub status: String,
}

impl VersionRecord {
    pub const HEADER: [&'static str; 3] = ["Link", "Version", "Status"];
}

impl From<VersionRecord> for Row {
    fn from(record: VersionRecord) -> Row {
        vec![record.link, record.version, record.status]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCountRecord {
    pub status: String,
    pub count: usize,
}

impl StatusCountRecord {
    pub const HEADER: [&'static str; 2] = ["Status", "Count"];
}

impl From<StatusCountRecord> for Row {
    fn from(record: StatusCountRecord) -> Row {
        vec![record.status, record.count.to_string()]
    }
}

/// A PEP whose page status fell outside the set expected for its index
/// status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchRecord {
    pub pep_url: String,
    pub index_code: String,
    pub page_status: String,
}

/// Status occurrence counter, insertion-ordered.
#[derive(Debug, Default)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(name, _)| name == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn into_sorted(self) -> Vec<(String, usize)> {
        // stable sort, so equal counts keep first-seen order
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_set_keeps_header_first() {
        let mut results = ResultSet::with_header(&VersionRecord::HEADER);
        results.push(VersionRecord {
            link: "https://docs.python.org/3.11/".to_string(),
            version: "3.11".to_string(),
            status: "stable".to_string(),
        });

        assert_eq!(results.rows()[0], vec!["Link", "Version", "Status"]);
        assert_eq!(results.record_count(), 1);
        assert_eq!(results.rows()[1][1], "3.11");
    }

    #[test]
    fn tally_orders_by_descending_count() {
        let mut tally = StatusTally::new();
        for status in ["Final", "Final", "Draft"] {
            tally.increment(status);
        }

        let sorted = tally.into_sorted();
        assert_eq!(
            sorted,
            vec![("Final".to_string(), 2), ("Draft".to_string(), 1)]
        );
    }

    #[test]
    fn tally_breaks_ties_by_first_seen() {
        let mut tally = StatusTally::new();
        for status in ["Withdrawn", "Active", "Active", "Withdrawn", "Rejected"] {
            tally.increment(status);
        }

        let sorted = tally.into_sorted();
        assert_eq!(sorted[0], ("Withdrawn".to_string(), 2));
        assert_eq!(sorted[1], ("Active".to_string(), 2));
        assert_eq!(sorted[2], ("Rejected".to_string(), 1));
    }

    #[test]
    fn status_count_record_renders_count_as_string() {
        let row: Row = StatusCountRecord {
            status: "Final".to_string(),
            count: 42,
        }
        .into();
        assert_eq!(row, vec!["Final", "42"]);
    }
}
