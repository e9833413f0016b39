mod args;
mod commands;
mod render;

pub use args::Cli;
