//! Block assembler
//!
//! Reconciles the multi-line claims with the blocks the line scanner produced and
//! applies the spacing pass.
//!
//! Overlaps are resolved greedily, earliest start first. A claim nested inside an
//! earlier one (a table inside a toggle body, a fence inside a column) is expected
//! and dropped quietly, since the container already converted its body. A claim
//! that only partially overlaps an earlier one points at conflicting rules and is
//! dropped with a warning.

use crate::blocks::Block;
use crate::element::Match;

/// Keeps the earliest-starting claims and drops any claim overlapping one kept before.
///
/// `matches` must be sorted by start offset.
pub fn resolve_overlaps(matches: Vec<Match>) -> Vec<Match> {
    let mut kept: Vec<Match> = Vec::with_capacity(matches.len());

    for candidate in matches {
        match kept.last() {
            Some(previous) if previous.overlaps(&candidate) => {
                if previous.contains(&candidate) {
                    log::debug!(
                        "dropping {} at {}..{}, nested in {} at {}..{}",
                        candidate.block.type_name(),
                        candidate.start,
                        candidate.end,
                        previous.block.type_name(),
                        previous.start,
                        previous.end
                    );
                } else {
                    log::warn!(
                        "dropping {} at {}..{}, it overlaps {} at {}..{}",
                        candidate.block.type_name(),
                        candidate.start,
                        candidate.end,
                        previous.block.type_name(),
                        previous.start,
                        previous.end
                    );
                }
            }
            _ => kept.push(candidate),
        }
    }

    kept
}

/// Merges resolved claims and scanned blocks into document order.
pub fn assemble(multiline: Vec<Match>, scanned: Vec<Match>, spacing: bool) -> Vec<Block> {
    let mut all: Vec<Match> = multiline.into_iter().chain(scanned).collect();
    all.sort_by_key(|m| m.start);
    let blocks = all.into_iter().map(|m| m.block).collect();

    if spacing {
        insert_spacing(blocks)
    } else {
        blocks
    }
}

/// Puts an empty paragraph after every inherently multi-line block, unless one is
/// already there.
pub fn insert_spacing(blocks: Vec<Block>) -> Vec<Block> {
    let mut spaced = Vec::with_capacity(blocks.len());
    let mut blocks = blocks.into_iter().peekable();

    while let Some(block) = blocks.next() {
        let needs_separator = block.is_multiline_kind()
            && !blocks.peek().is_some_and(|next| next.is_empty_paragraph());
        spaced.push(block);
        if needs_separator {
            spaced.push(Block::empty_paragraph());
        }
    }

    spaced
}
