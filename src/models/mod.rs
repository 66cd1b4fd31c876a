// Module exports for models

pub mod creator;
pub mod membership;
pub mod offer;
pub mod settings;
