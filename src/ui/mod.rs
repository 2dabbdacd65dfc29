//! Terminal prediction form

pub mod app;
pub mod draw;
pub mod form;
pub mod run;
pub mod theme;

pub use app::{Action, App, Focus, Outcome};
pub use run::run;
