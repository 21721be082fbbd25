// Library surface for the binary, headless runs and integration tests.
pub mod app;
pub mod app_dirs;
pub mod battle;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod key;
pub mod levels;
pub mod logging;
pub mod practice;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod words;

pub use error::{Error, Result};
