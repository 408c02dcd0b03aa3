//! The block tree: typed nodes, rich text runs and their JSON shape.

pub mod nodes;
pub mod rich_text;
pub mod wire;

pub use nodes::*;
pub use rich_text::{plain_text, Annotations, Color, Mention, TextRun};
pub use wire::{blocks_from_json, blocks_to_json};
