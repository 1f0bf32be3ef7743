//! Theme commands.

use std::process::ExitCode;

use elegance_storefront::page::{PageController, PageEvent};
use elegance_storefront::storage::FileStore;

/// Print the saved theme.
#[allow(clippy::print_stdout)]
pub fn show(page: &PageController<FileStore>) -> ExitCode {
    println!("{}", page.theme());
    ExitCode::SUCCESS
}

/// Switch the theme and print the new one.
#[allow(clippy::print_stdout)]
pub fn toggle(page: &mut PageController<FileStore>) -> ExitCode {
    let outcome = page.handle(PageEvent::ToggleTheme);
    println!("{}", outcome.theme.unwrap_or_else(|| page.theme()));
    ExitCode::SUCCESS
}
