//! Chat session domain.
//!
//! - [`entities::Message`]: a single `{role, content}` message sent to a model

pub mod entities;
