//! Startup banner.

use colored::Colorize;

const LOGO: &str = r"
                    _
 _ __   ___  _ __ | |_ _ __ ___   __ _ _ __
| '_ \ / _ \| '__|| __| '_ ` _ \ / _` | '_ \
| |_) | (_) | |   | |_| | | | | | (_| | |_) |
| .__/ \___/|_|    \__|_| |_| |_|\__,_| .__/
|_|                                   |_|
";

/// Prints the logo and version to stderr so stdout carries only records.
pub fn print_banner() {
    eprintln!("{}", LOGO.cyan().bold());
    eprintln!(
        "{} {}\n",
        "Current portmap version".dimmed(),
        env!("CARGO_PKG_VERSION").green()
    );
}
