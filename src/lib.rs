//! formsync - Form submission mediator
//!
//! Intercepts a form submission, sends it as a single JSON request and
//! reconciles the response into a caller-owned state container, optionally
//! navigating to a page the server names.
//!
//! The mediator talks to the outside world only through injected
//! capabilities:
//! - [`transport::Transport`] performs the request/response exchange
//! - [`navigation::History`] exposes the current location
//! - [`navigation::Navigator`] and [`navigation::PageResolver`] handle
//!   client-side navigation
//! - [`state::SharedState`] is the observable state the response lands in

pub mod config;
pub mod error;
pub mod form;
pub mod mediator;
pub mod navigation;
pub mod state;
pub mod transport;
pub mod types;
