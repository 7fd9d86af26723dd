pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
