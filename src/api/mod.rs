//! Purpose: Define the public Rust API boundary for request expectations.
//! Exports: The chain, collaborator contracts, stock collaborators, and the error model.
//! Role: Public, additive-only surface; internal module paths may move.
//! Invariants: Everything a caller needs to build and run a chain is reachable from here.

pub use crate::core::chain::{ExpectChain, expect};
pub use crate::core::decode::{
    BodyDecoder, BodyDecoderFunc, PathVarMap, PathVarValidator, PathVarValidatorFunc,
    PathVarsDecoder, PathVarsDecoderFunc,
};
pub use crate::core::error::{Error, ErrorKind, to_status_code};
pub use crate::extract::{buffer_request, capture_path_vars};
pub use crate::json::{JsonBody, ParseFailureCategory};
pub use crate::path_vars::{PathTemplate, PathVars, path_vars, set_path_vars};
pub use crate::validators::{PathVarRules, no_separators, not_empty, parse_u64};
