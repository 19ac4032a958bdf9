pub mod api;
pub mod cache;
pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod models;
pub mod prefs;
pub mod print;
pub mod table;
pub mod toast;
pub mod ui;

pub use error::{AppError, Result};
