//! Side-by-side comparison of a keyword rule bot and a large language model.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod core;
pub mod display;
pub mod input;
pub mod providers;
pub mod responder;
pub mod utils;
