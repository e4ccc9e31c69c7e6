//! Custom Yew hooks for the console.
//!
//! These hooks wrap the state machines from `shared` so components only render.

mod use_form_controller;
mod use_session;

pub use use_form_controller::use_form_controller;
pub use use_session::{use_session, SessionHandle, SessionProvider};
