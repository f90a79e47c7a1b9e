// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod api_handlers {
    pub use crate::api_handlers::*;
}

pub mod routes {
    pub use crate::routes::*;
}
