use serde::{Deserialize, Serialize};

/// A selectable not-fulfilled reason.
///
/// The web application renders these into the page; the board snapshot
/// carries them for the reason prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reason {
    pub id: u64,
    pub name: String,
}
