//! Terminal front end: banner, spinners, text rendering and the inquire dashboard.

pub mod banner;
pub mod progress;
pub mod render;
pub mod tui;

/// Banner plus prompt theme. Call once at startup, after tracing init.
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
