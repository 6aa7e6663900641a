mod app;
mod cli;
mod commands;
mod config;
mod demo;
mod effects;
mod logging;
mod persistence;
mod render;

pub use app::run_app;
