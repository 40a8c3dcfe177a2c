/// Reusable UI widgets.
pub mod options_menu;
pub mod spec_card;
pub mod status_bar;
pub mod toolbar;
