//! Cart state, owned by the application shell for the whole session.

mod service;

pub use service::*;
