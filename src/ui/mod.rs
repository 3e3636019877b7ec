//! Ratatui front-end: a numbered menu per table plus popup forms. It only
//! dispatches to the stores and shows what they return.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
