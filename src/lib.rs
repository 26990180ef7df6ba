pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod engine;
pub mod governance;
pub mod instructions;
pub mod shared;
