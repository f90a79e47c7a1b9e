// Domain-layer modules and shared errors/models
pub mod pages {
    pub use crate::pages::*;
}

pub mod simulator {
    pub use crate::simulator::*;
}

pub mod portfolio {
    pub use crate::portfolio::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
