//! Terminal front-end: a four-action menu over the guest list plus the
//! popups each action walks through.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
