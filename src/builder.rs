//! The document builder — the only legitimate mutator of a [`Document`].
//!
//! One builder owns one document for the duration of an editing session.
//! The API is deliberately infallible: "target not found" comes back as
//! `false`/`None` so callers can chain edits without error plumbing, and a
//! genuine `panic!` would indicate a bug, not bad input.
//!
//! Public methods hand out owned clones (or plain ids), never references
//! into builder state, so external code cannot mutate the canonical
//! document behind the builder's back. Re-ingestion happens through the
//! patch-style update methods.
//!
//! Invariants maintained here:
//! - `pages[i].page_number == i + 1` after every operation, including
//!   [`DocumentBuilder::load_document`], which discards any numbering the
//!   payload carried.
//! - Block ids are unique within their page; duplication issues fresh ids
//!   for the page and every block it contains.
//! - `version` increases and `updated_at` refreshes on every mutation.

use crate::document::{
    Block, BlockKind, BlockPosition, BlockStyle, Document, Margins, Orientation, Page, PageFormat,
    PositionUnit, oriented_dimensions_mm,
};
use chrono::Utc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Optional fields for a new page. Unset fields fall back to the document's
/// current format/orientation and default margins.
#[derive(Debug, Clone, Default)]
pub struct PageDraft {
    pub format: Option<PageFormat>,
    pub orientation: Option<Orientation>,
    pub margins: Option<Margins>,
}

/// A block waiting for an id. The builder assigns the id on insert.
#[derive(Debug, Clone)]
pub struct BlockDraft {
    pub kind: BlockKind,
    pub content: String,
    pub style: BlockStyle,
    pub position: BlockPosition,
}

/// Field-wise patch for [`DocumentBuilder::update_block`]. `None` leaves the
/// existing value in place.
#[derive(Debug, Clone, Default)]
pub struct BlockPatch {
    pub kind: Option<BlockKind>,
    pub content: Option<String>,
    pub style: Option<BlockStyle>,
    pub position: Option<BlockPosition>,
}

/// Generates session-unique string ids.
///
/// The session nonce keeps ids from colliding with ids already present in a
/// loaded document (which came from some other session's counter).
#[derive(Debug)]
struct IdGen {
    session: u64,
    counter: u64,
}

impl IdGen {
    fn new() -> Self {
        let session = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self {
            session,
            counter: 0,
        }
    }

    fn next(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{:x}-{:x}", self.session, self.counter)
    }
}

/// CRUD builder over one [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: Document,
    ids: IdGen,
}

impl DocumentBuilder {
    /// Create a builder owning a fresh, empty document.
    pub fn new(title: &str, format: PageFormat, orientation: Orientation) -> Self {
        let mut ids = IdGen::new();
        let now = Utc::now();
        let doc = Document {
            id: ids.next("doc"),
            title: title.to_string(),
            pages: Vec::new(),
            theme_name: "classic".to_string(),
            format,
            orientation,
            created_at: now,
            updated_at: now,
            version: 1,
        };
        Self { doc, ids }
    }

    /// Read access to the canonical document. Clone to persist.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn touch(&mut self) {
        self.doc.version += 1;
        self.doc.updated_at = Utc::now();
    }

    fn renumber_pages(&mut self) {
        for (i, page) in self.doc.pages.iter_mut().enumerate() {
            page.page_number = i + 1;
        }
    }

    // =========================================================================
    // Page operations
    // =========================================================================

    /// Append a page and return a clone of it. The page number equals the
    /// new page count.
    pub fn add_page(&mut self, draft: PageDraft) -> Page {
        let page = Page {
            id: self.ids.next("page"),
            page_number: self.doc.pages.len() + 1,
            format: draft.format.unwrap_or(self.doc.format),
            orientation: draft.orientation.unwrap_or(self.doc.orientation),
            blocks: Vec::new(),
            margins: draft.margins.unwrap_or_default(),
        };
        self.doc.pages.push(page.clone());
        self.touch();
        page
    }

    /// Remove a page by id, renumbering the survivors. `false` if absent.
    pub fn remove_page(&mut self, page_id: &str) -> bool {
        let Some(idx) = self.doc.pages.iter().position(|p| p.id == page_id) else {
            return false;
        };
        self.doc.pages.remove(idx);
        self.renumber_pages();
        self.touch();
        true
    }

    /// Deep-clone a page, issuing fresh ids for the clone and every block it
    /// contains, and append it. `None` if the source is absent.
    pub fn duplicate_page(&mut self, page_id: &str) -> Option<Page> {
        let source = self.doc.pages.iter().find(|p| p.id == page_id)?.clone();
        let mut clone = source;
        clone.id = self.ids.next("page");
        for block in &mut clone.blocks {
            block.id = self.ids.next("block");
        }
        clone.page_number = self.doc.pages.len() + 1;
        self.doc.pages.push(clone.clone());
        self.renumber_pages();
        self.touch();
        Some(clone)
    }

    // =========================================================================
    // Block operations
    // =========================================================================

    /// Append a block to a page, assigning its id. `None` if the page is
    /// absent.
    pub fn add_block(&mut self, page_id: &str, draft: BlockDraft) -> Option<Block> {
        let id = self.ids.next("block");
        let page = self.doc.pages.iter_mut().find(|p| p.id == page_id)?;
        let block = Block {
            id,
            kind: draft.kind,
            content: draft.content,
            style: draft.style,
            position: draft.position,
        };
        page.blocks.push(block.clone());
        self.touch();
        Some(block)
    }

    /// Merge patch fields into a block in place. `false` if page or block is
    /// absent.
    pub fn update_block(&mut self, page_id: &str, block_id: &str, patch: BlockPatch) -> bool {
        let Some(block) = self.find_block_mut(page_id, block_id) else {
            return false;
        };
        if let Some(kind) = patch.kind {
            block.kind = kind;
        }
        if let Some(content) = patch.content {
            block.content = content;
        }
        if let Some(style) = patch.style {
            block.style = style;
        }
        if let Some(position) = patch.position {
            block.position = position;
        }
        self.touch();
        true
    }

    /// Remove a block from a page. `false` if page or block is absent.
    pub fn remove_block(&mut self, page_id: &str, block_id: &str) -> bool {
        let Some(page) = self.doc.pages.iter_mut().find(|p| p.id == page_id) else {
            return false;
        };
        let Some(idx) = page.blocks.iter().position(|b| b.id == block_id) else {
            return false;
        };
        page.blocks.remove(idx);
        self.touch();
        true
    }

    /// Move a block to `new_index` within its page's block list, clamping
    /// the index to valid bounds. `false` if page or block is absent.
    pub fn move_block(&mut self, page_id: &str, block_id: &str, new_index: usize) -> bool {
        let Some(page) = self.doc.pages.iter_mut().find(|p| p.id == page_id) else {
            return false;
        };
        let Some(idx) = page.blocks.iter().position(|b| b.id == block_id) else {
            return false;
        };
        let block = page.blocks.remove(idx);
        let target = new_index.min(page.blocks.len());
        page.blocks.insert(target, block);
        self.touch();
        true
    }

    fn find_block_mut(&mut self, page_id: &str, block_id: &str) -> Option<&mut Block> {
        self.doc
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)?
            .blocks
            .iter_mut()
            .find(|b| b.id == block_id)
    }

    // =========================================================================
    // Document operations
    // =========================================================================

    /// Change the document's (and every page's) format and orientation.
    ///
    /// When `scale` is set, mm-unit block geometry is multiplied by the
    /// linear ratio between each page's old oriented dimensions and the new
    /// ones (x/width by the width ratio, y/height by the height ratio), so a
    /// page carrying its own format rescales against that format, not the
    /// document's. Percent-unit blocks are already page-relative and stay
    /// untouched. `scale = false` changes no geometry at all.
    pub fn update_document_format(
        &mut self,
        format: PageFormat,
        orientation: Orientation,
        scale: bool,
    ) {
        let (new_w, new_h) = oriented_dimensions_mm(format, orientation);

        self.doc.format = format;
        self.doc.orientation = orientation;
        for page in &mut self.doc.pages {
            let (old_w, old_h) = oriented_dimensions_mm(page.format, page.orientation);
            page.format = format;
            page.orientation = orientation;
            if !scale {
                continue;
            }
            let ratio_w = new_w / old_w;
            let ratio_h = new_h / old_h;
            for block in &mut page.blocks {
                if block.position.unit == PositionUnit::Mm {
                    block.position.x *= ratio_w;
                    block.position.width *= ratio_w;
                    block.position.y *= ratio_h;
                    block.position.height *= ratio_h;
                }
            }
        }
        self.touch();
    }

    /// Replace the whole document. Page numbering in the payload is not
    /// trusted: pages are unconditionally renumbered 1..N from array order.
    pub fn load_document(&mut self, doc: Document) {
        self.doc = doc;
        self.renumber_pages();
        self.touch();
    }
}
