//! The conversion pipeline, format agnostic pieces.
//!
//! `extractor` finds multi-line constructs, `assembler` reconciles them with what the
//! line-oriented `scanner` produced, `resolver` calls the collaborators once the tree
//! is complete. `lines` and `nested` are shared by the element rules.

pub mod assembler;
pub mod extractor;
pub mod lines;
pub mod nested;
pub mod resolver;
pub mod scanner;
