//! Content-length splitter tests

mod split;
mod submit;
