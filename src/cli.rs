use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pydocs-scraper",
    about = "Scraper for the Python documentation and PEP index sites",
    version
)]
pub struct Cli {
    /// Scraping mode to run.
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the response cache before running.
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Output form for tabular modes; rows print plainly when omitted.
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII box table on the console.
    Pretty,
    /// CSV file under the results directory.
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_from_kebab_case() {
        let cli = Cli::try_parse_from(["pydocs-scraper", "latest-versions"]).unwrap();
        assert_eq!(cli.mode, Mode::LatestVersions);
        assert!(!cli.clear_cache);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn flags_parse() {
        let cli =
            Cli::try_parse_from(["pydocs-scraper", "pep", "--clear-cache", "-o", "file"]).unwrap();
        assert_eq!(cli.mode, Mode::Pep);
        assert!(cli.clear_cache);
        assert_eq!(cli.output, Some(OutputFormat::File));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["pydocs-scraper", "everything"]).is_err());
    }

    #[test]
    fn mode_names_match_cli_spelling() {
        assert_eq!(Mode::WhatsNew.as_str(), "whats-new");
        assert_eq!(Mode::Download.as_str(), "download");
    }
}
