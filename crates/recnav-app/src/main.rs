//! Terminal record browser over the baby-names data set
//!
//! Usage: `record-nav <names.txt> [--memory] [--page-size N] [--settings FILE]`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use arrow::util::pretty::pretty_format_batches;
use tracing::{info, warn};

use recnav_core::{NavAction, NavigatorConfig, NavigatorSettings};
use recnav_data::{
    ensure_database, FrameSource, NameFilter, Page, RecordBrowser, RecordSource, SqliteSource,
};

mod commands;

use commands::{Command, HELP};

const USAGE: &str = "Usage: record-nav <names.txt> [--memory] [--page-size N] [--settings FILE]";

/// Command line options
#[derive(Debug)]
struct Options {
    names_file: PathBuf,
    in_memory: bool,
    page_size: Option<usize>,
    settings: Option<PathBuf>,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut names_file = None;
        let mut in_memory = false;
        let mut page_size = None;
        let mut settings = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--memory" => in_memory = true,
                "--page-size" => {
                    let value = args.next().context("--page-size needs a value")?;
                    let size = value
                        .parse()
                        .with_context(|| format!("Invalid page size '{}'", value))?;
                    page_size = Some(size);
                }
                "--settings" => {
                    settings = Some(PathBuf::from(args.next().context("--settings needs a file")?));
                }
                flag if flag.starts_with("--") => bail!("Unknown option {}", flag),
                path => names_file = Some(PathBuf::from(path)),
            }
        }

        Ok(Self {
            names_file: names_file.context(USAGE)?,
            in_memory,
            page_size,
            settings,
        })
    }

    fn navigator_config(&self) -> Result<NavigatorConfig> {
        let mut settings = match &self.settings {
            Some(path) => NavigatorSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => NavigatorSettings {
                name: "names".to_string(),
                ..Default::default()
            },
        };
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        Ok(settings.into_config()?)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let options = Options::parse(std::env::args().skip(1))?;
    let config = options.navigator_config()?;
    info!(?options, page_size = config.page_size(), "Starting record navigator");

    if options.in_memory {
        let source = FrameSource::load(&options.names_file)
            .with_context(|| format!("Failed to load {}", options.names_file.display()))?;
        run(RecordBrowser::new(config, source)?)
    } else {
        let db_path = options.names_file.with_extension("db");
        if ensure_database(&options.names_file, &db_path)? {
            info!(db = %db_path.display(), "Created names database");
        }
        let source = SqliteSource::open(&db_path)
            .with_context(|| format!("Failed to open {}", db_path.display()))?;
        run(RecordBrowser::new(config, source)?)
    }
}

/// Interactive loop: one command in, one page out
fn run<S: RecordSource>(mut browser: RecordBrowser<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut filter = NameFilter::all();

    let labels: Vec<String> = browser
        .triggers()
        .iter()
        .map(|t| format!("[{}] {}", t.action.as_str().chars().next().unwrap_or('?'), t.label))
        .collect();

    writeln!(stdout, "Browsing {}", browser.source().source_name())?;
    show(&mut stdout, &mut browser, Some(NavAction::First), &filter, &labels)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let action = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(stdout, "{}", HELP)?;
                continue;
            }
            Ok(Command::Navigate(action)) => Some(action),
            Ok(Command::Search(search)) => {
                filter.search = search;
                None
            }
            Ok(Command::Genders(genders)) => {
                filter.genders = genders;
                None
            }
            Ok(Command::Refresh) => None,
            Err(e) => {
                warn!("{}", e);
                writeln!(stdout, "{} (type ? for help)", e)?;
                continue;
            }
        };

        show(&mut stdout, &mut browser, action, &filter, &labels)?;
    }

    Ok(())
}

fn show<S: RecordSource>(
    out: &mut impl Write,
    browser: &mut RecordBrowser<S>,
    action: Option<NavAction>,
    filter: &NameFilter,
    labels: &[String],
) -> Result<()> {
    let page = browser.page(action, filter)?;

    if page.is_empty() {
        writeln!(out, "No name available.")?;
    } else {
        writeln!(out, "{}", pretty_format_batches(&[page.batch.clone()])?)?;
    }
    writeln!(out, "{}   {}", page_summary(&page), labels.join("  "))?;
    out.flush()?;
    Ok(())
}

/// `records 11-20 of 25`, or `records -` for an empty page
fn page_summary(page: &Page) -> String {
    if page.is_empty() {
        return "records -".to_string();
    }

    let total = page.total.map(|t| format!(" of {}", t)).unwrap_or_default();
    format!(
        "records {}-{}{}",
        page.window.offset + 1,
        page.window.offset + page.len(),
        total
    )
}
