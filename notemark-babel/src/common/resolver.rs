//! Collaborator resolution
//!
//! Some constructs need the remote side before they are complete: a child database
//! or page has to be created to get an id, and a local file has to be uploaded. The
//! rules only record what they saw; this pass walks the assembled tree in document
//! order (parents before children) and calls the collaborators from the context.
//!
//! A failing collaborator never aborts the conversion. The construct is logged and
//! replaced by a paragraph holding its literal Markdown. Without a resource factory
//! child databases and pages are kept without an id; without an uploader local
//! media have nowhere to go and also become paragraphs.

use crate::blocks::{Block, FileSource, Media, TextRun};
use crate::context::ParserContext;
use crate::registry::RuleRegistry;
use std::path::Path;

/// Resolves every pending construct in `blocks`, recursively.
pub fn resolve(blocks: Vec<Block>, registry: &RuleRegistry, ctx: &ParserContext<'_>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| resolve_block(block, registry, ctx))
        .collect()
}

fn resolve_block(block: Block, registry: &RuleRegistry, ctx: &ParserContext<'_>) -> Block {
    let mut block = match block {
        Block::ChildDatabase(mut database) if database.id.is_none() => match ctx.resources() {
            Some(factory) => match factory.create_database(ctx.parent_id(), &database.title) {
                Ok(id) => {
                    log::debug!("created database '{}' as {id}", database.title);
                    database.id = Some(id);
                    Block::ChildDatabase(database)
                }
                Err(err) => {
                    log::warn!("could not create database '{}': {err}", database.title);
                    literal(registry, &Block::ChildDatabase(database))
                }
            },
            None => Block::ChildDatabase(database),
        },
        Block::ChildPage(mut page) if page.id.is_none() => match ctx.resources() {
            Some(factory) => match factory.create_page(ctx.parent_id(), &page.title) {
                Ok(id) => {
                    log::debug!("created page '{}' as {id}", page.title);
                    page.id = Some(id);
                    Block::ChildPage(page)
                }
                Err(err) => {
                    log::warn!("could not create page '{}': {err}", page.title);
                    literal(registry, &Block::ChildPage(page))
                }
            },
            None => Block::ChildPage(page),
        },
        mut other => {
            if let Some(path) = local_path(&other) {
                match upload(&path, ctx) {
                    Some(id) => {
                        if let Some(media) = media_mut(&mut other) {
                            media.source = FileSource::FileUpload { id };
                        }
                    }
                    None => other = literal(registry, &other),
                }
            }
            other
        }
    };

    if let Some(children) = block.children_mut() {
        let resolved = resolve(std::mem::take(children), registry, ctx);
        *children = resolved;
    }
    block
}

fn upload(path: &str, ctx: &ParserContext<'_>) -> Option<String> {
    let Some(uploader) = ctx.uploader() else {
        log::warn!("no file uploader available for '{path}', keeping it as text");
        return None;
    };
    match uploader.upload(Path::new(path)) {
        Ok(id) => {
            log::debug!("uploaded '{path}' as {id}");
            Some(id)
        }
        Err(err) => {
            log::warn!("could not upload '{path}': {err}");
            None
        }
    }
}

fn media_mut(block: &mut Block) -> Option<&mut Media> {
    match block {
        Block::Image(media)
        | Block::Video(media)
        | Block::Audio(media)
        | Block::File(media)
        | Block::Pdf(media) => Some(media),
        _ => None,
    }
}

fn local_path(block: &Block) -> Option<String> {
    match block {
        Block::Image(media)
        | Block::Video(media)
        | Block::Audio(media)
        | Block::File(media)
        | Block::Pdf(media) => match &media.source {
            FileSource::Local { path } => Some(path.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// The block as a paragraph of its own Markdown.
fn literal(registry: &RuleRegistry, block: &Block) -> Block {
    let text = registry
        .find_block_handler(block)
        .and_then(|rule| rule.block_to_markdown(block))
        .unwrap_or_else(|| block.plain_text());
    Block::paragraph(vec![TextRun::plain(text)])
}
