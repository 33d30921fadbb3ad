//! Terminal shell. Renders what the core returns; never classifies.

pub mod banner;
pub mod export;
pub mod tui;

/// Prints the welcome banner. Call once at startup (after tracing init).
pub fn init_ui() {
    banner::print_welcome();
}
