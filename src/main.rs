use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;

use dashpick::core::config::{self, CliOverrides};
use dashpick::core::selection::{Dropdown, Selection};
use dashpick::core::state::App;
use dashpick::sync::ChangeHandler;

#[derive(Parser)]
#[command(name = "dashpick", about = "Category selector for the sensor dashboard")]
struct Args {
    /// Dashboard server, e.g. http://localhost:50000
    #[arg(long)]
    base_url: Option<String>,

    /// Path categories are POSTed to
    #[arg(long)]
    endpoint: Option<String>,

    /// Send this category (text or value) once, print the outcome and exit
    #[arg(short, long)]
    category: Option<String>,

    /// Print the configured categories and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to dashpick.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("dashpick.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        eprintln!("warning: {e}, using defaults");
        config::DashpickConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            endpoint: args.endpoint.as_deref(),
            category: args.category.as_deref(),
        },
    );
    log::info!("dashpick starting against {}{}", resolved.base_url, resolved.endpoint);

    if args.list {
        for option in &resolved.categories {
            match &option.description {
                Some(desc) => println!("{}\t{}\t{}", option.value, option.text, desc),
                None => println!("{}\t{}", option.value, option.text),
            }
        }
        return Ok(());
    }

    let handler = ChangeHandler::from_config(&resolved)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    if let Some(query) = args.category.as_deref() {
        return send_once(&handler, resolved.categories, query).await;
    }

    let mut app = App::new(
        resolved.categories,
        resolved.default_category.as_deref(),
        handler.location(),
        handler.endpoint().to_string(),
    );
    app.latest_only = handler.options().latest_only;
    dashpick::tui::run(app, handler)
}

/// One-shot mode: behaves like a single dropdown change. Failures are
/// reported but do not change the exit status, matching the TUI.
async fn send_once(
    handler: &ChangeHandler,
    categories: Vec<dashpick::core::selection::CategoryOption>,
    query: &str,
) -> io::Result<()> {
    let dropdown = Dropdown::new(categories, None);
    let found = dropdown.find(query).map(|i| Selection::from(&dropdown.options()[i]));
    let selection = match found {
        Some(selection) => selection,
        // Not configured: treat the query as both value and text
        None => Selection {
            value: query.to_string(),
            text: query.to_string(),
        },
    };

    let seq = handler.next_seq();
    let outcome = handler.handle(seq, selection).await;
    println!("{}", outcome.summary());
    println!("location: {}", handler.location());
    Ok(())
}
