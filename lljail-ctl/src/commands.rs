use lljail_core::SystemCapabilities;
use log::info;

use crate::cli::USAGE;

pub fn print_usage() {
    print!("{}", USAGE);
}

pub fn print_version() {
    println!("lljail {}", env!("CARGO_PKG_VERSION"));
}

/// Print the Landlock support report; returns whether a jail can be built.
pub fn check_requirements() -> bool {
    info!("Checking Landlock support");
    println!("Checking lljail requirements...\n");

    let caps = SystemCapabilities::detect();
    println!("{}", caps.summary());

    caps.landlock.is_usable()
}
