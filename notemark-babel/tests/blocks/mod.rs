//! Block-tree JSON tests

mod json;
