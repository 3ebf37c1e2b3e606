pub mod lead;
pub mod product;
pub mod reason;
pub mod stage;
pub mod status;

pub use lead::Lead;
pub use product::LeadProduct;
pub use reason::Reason;
