mod methods;
mod transitions;
mod types;


pub use methods::ALL_STAGES;
pub use types::{EnquiryStage, NumberKind, StageGate};
