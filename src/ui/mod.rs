// src/ui/mod.rs
pub mod table;

pub use table::{render_frequency_table, render_rounded, render_simulation};
