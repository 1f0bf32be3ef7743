//! Homepage greeting.

use std::process::ExitCode;

use chrono::{DateTime, TimeZone};
use elegance_storefront::greeting::{footer_year, greeting_line};

/// Print the greeting line and the footer copyright year.
#[allow(clippy::print_stdout)]
pub fn greet<Tz: TimeZone>(now: &DateTime<Tz>) -> ExitCode
where
    Tz::Offset: std::fmt::Display,
{
    println!("{}", greeting_line(now));
    println!("\u{a9} {}", footer_year(now));
    ExitCode::SUCCESS
}
