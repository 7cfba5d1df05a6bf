//! Terminal output: status lines and summary tables

pub mod console;
pub mod table;

pub use console::{Console, Marker};
pub use table::import_summary_table;
