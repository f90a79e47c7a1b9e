//! External service integrations.

pub mod api_client {
    pub use crate::api_client::*;
}
