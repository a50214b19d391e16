//! Map tile HTTP server library.
//!
//! A request target flows through decode → validate → query parse →
//! render → reply; see [`dispatch::handle_request`].

pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod metrics;
pub mod reply;
pub mod server;
pub mod state;
