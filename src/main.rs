use pydocs_scraper_lib::{logger, modes, output};
use pydocs_scraper_lib::{Args, Session};

use std::path::Path;
use std::process;

use clap::Parser;
use log::{error, info};
use pydocs_scraper_lib::constants::CACHE_DIR;
use pydocs_scraper_lib::error::Result;

fn main() {
    logger::init();
    info!("Scraper started");

    let args = Args::parse();
    info!("Command line arguments: {:?}", args);

    if let Err(e) = run(&args) {
        // Fail fast: log the diagnostic, then terminate non-zero.
        error!("{}", e);
        process::exit(1);
    }

    info!("Scraper finished");
}

fn run(args: &Args) -> Result<()> {
    let session = Session::new(Path::new(CACHE_DIR))?;
    if args.clear_cache {
        session.clear_cache()?;
    }

    if let Some(results) = modes::run_mode(args.mode, &session)? {
        output::control_output(&results, args)?;
    }
    Ok(())
}
