//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod data_table;
pub mod forms;
pub mod panels;
pub mod setup_wizard;
pub mod shell;
pub mod store;

pub use app::App;
pub use setup_wizard::{SetupApp, SetupWizard};
