//! Markdown conversion tests
//!
//! Markdown → blocks scenarios, Markdown → blocks → Markdown round trips and the
//! properties every conversion has to keep.

mod properties;
mod round_trip;
mod scenarios;
