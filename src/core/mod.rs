// Chain execution, collaborator contracts, and the shared error model.
pub mod chain;
pub mod decode;
pub mod error;
