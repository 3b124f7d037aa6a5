pub mod breeds;
pub mod extract;

pub use breeds::{create_breed, risk_analysis};
