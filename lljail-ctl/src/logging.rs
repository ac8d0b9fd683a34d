use console::style;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Initialize logger based on verbose flag.
///
/// The level is set here rather than read from `RUST_LOG`: lljail does not
/// consume the environment it forwards to the jailed command.
pub fn init_logger(verbose: bool) {
    Builder::new()
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => format!("{}", style("ERROR").red().bold()),
                Level::Warn => format!("{}", style("WARN ").yellow().bold()),
                Level::Info => format!("{}", style("INFO ").green()),
                Level::Debug => format!("{}", style("DEBUG").cyan()),
                Level::Trace => format!("{}", style("TRACE").dim()),
            };
            writeln!(buf, "{}{} {}", style("lljail: ").dim(), level, record.args())
        })
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();
}
