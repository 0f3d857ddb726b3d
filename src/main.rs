use rayon::ThreadPoolBuilder;
use anyhow::Result;
use log::error;
use crate::initialization::init;
use crate::worker::run;

mod config;
mod initialization;
mod logging;
mod macros;
mod manager_tmy;
mod worker;

fn main() -> Result<()> {
    // Load config and set up managers. If initialization fails we can't even log.
    let (config, mgr) = init()?;

    ThreadPoolBuilder::new().num_threads(config.general.threads).build_global()?;

    if let Err(e) = run(&mgr, &config.simulation, &config.files) {
        error!("Run failed: {}", e);
        return Err(e)?;
    }

    Ok(())
}
