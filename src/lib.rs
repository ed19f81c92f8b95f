pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod runtime;
pub mod scheduler;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
