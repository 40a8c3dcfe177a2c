/// Content panels composed by the main window.
pub mod groups_panel;
pub mod header_panel;
