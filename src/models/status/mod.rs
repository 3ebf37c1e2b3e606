mod methods;
mod types;


pub use methods::ALL_STATUSES;
pub use types::LeadStatus;
