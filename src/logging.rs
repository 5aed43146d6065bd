//! Logger setup.

use std::path::Path;

/// Installs the global logger: timestamped lines on stdout, and optionally in `log_file`.
///
/// Can only succeed once per process.
pub fn init(level: log::LevelFilter, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    log::debug!("logging initialized at {level}");
    Ok(())
}
