pub mod detail_panel;
pub mod gem_table;
pub mod toast;
