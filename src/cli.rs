use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "pydocs-scraper",
    version,
    about = "Extracts release notes, version tables and PDF archives from docs.python.org"
)]
pub struct Args {
    /// What to extract from the documentation site
    #[arg(value_enum)]
    pub mode: Mode,

    /// Wipe the HTTP response cache before fetching anything
    #[arg(short = 'c', long)]
    pub clear_cache: bool,

    /// How to render the result table (plain console output if omitted)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
}

impl Mode {
    /// Kebab-case name as typed on the command line; also used for
    /// naming result files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned ASCII table on stdout
    Pretty,
    /// CSV file under the results directory
    File,
}
