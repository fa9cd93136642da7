//! UI-Komponenten: Toolbar, Seitenpanel, Viewport, Status-Bar, Dialoge.

pub mod dialogs;
mod keyboard;
pub mod options_dialog;
pub mod side_panel;
pub mod status;
pub mod toolbar;
pub mod viewport;

pub use options_dialog::show_options_dialog;
pub use side_panel::render_side_panel;
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
pub use viewport::{render_viewport, ViewportInput};
