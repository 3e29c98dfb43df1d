use arqual::network::HttpTransport;
use arqual::scraper::Scraper;
use arqual::ui::cli::parse_args;
use arqual::{ArqualError, Result};
use chrono::Local;
use std::{env, io, process};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<usize> {
    let (args, request) = parse_args(env::args_os())?;
    init_logging();

    let config = args.client_config();
    let transport = HttpTransport::new(&config);
    let scraper = Scraper::new(config, transport);

    let stdout = io::stdout();
    scraper.run(&request, Local::now().date_naive(), stdout.lock())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(ArqualError::Usage(e)) => e.exit(),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
