//! Purpose: Declarative validation of incoming HTTP requests.
//! Exports: `api` (stable surface); `core` (chain, contracts, errors).
//! Role: Thin layer sequencing caller-supplied decoders/validators against one request.
//! Invariants: Path variables are checked before the body; the first failure wins.
//! Invariants: No routing, no response writing; callers translate errors themselves.
pub mod api;
pub mod core;
mod extract;
mod json;
mod path_vars;
mod validators;
