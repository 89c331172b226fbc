// src/input/mod.rs
pub mod cli;
pub mod command;
