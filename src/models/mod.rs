pub mod consultation;
pub mod enums;
pub mod indicator;
pub mod medication;
pub mod prescription;
pub mod provider;

pub use consultation::*;
pub use enums::*;
pub use indicator::*;
pub use medication::*;
pub use prescription::*;
pub use provider::*;
