//! Diagnostics go to a file because the terminal is the game screen.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Appends `Info` and above to `path`. Fails only if the file cannot be
/// opened; a logger that was already installed is left in place.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}
