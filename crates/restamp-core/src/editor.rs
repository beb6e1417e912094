// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF editor: owns an open document, exposes page token sequences, drives
// pattern scans and rewrites across pages, and reads/writes the document
// information dictionary. Built on the `lopdf` crate.

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, instrument};

use crate::error::{RestampError, Result};
use crate::pattern::{self, TokenMatcher, TokenMutator};
use crate::policy::ResultPolicy;
use crate::token::TokenSequence;

/// An open PDF document with scan/rewrite drivers.
///
/// One editor owns one document for its whole lifetime; dropping the editor
/// releases the document. Pages are numbered from 1 in document order.
pub struct PdfEditor {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfEditor {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            RestampError::Parse(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create an editor from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            RestampError::Parse(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    /// Wrap an already-built lopdf document.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            source_path: None,
        }
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Page numbers in document order.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.document.get_pages().keys().copied().collect()
    }

    /// Return the source path if the editor was created via [`PdfEditor::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Token sequences --------------------------------------------------------

    /// Decode and flatten one page's content stream.
    #[instrument(skip(self), fields(page_number))]
    pub fn token_sequence(&self, page_number: u32) -> Result<TokenSequence> {
        let page_id = self.page_id(page_number)?;
        let raw = self.document.get_page_content(page_id).map_err(|err| {
            RestampError::Parse(format!("page {}: cannot read content: {}", page_number, err))
        })?;
        let content = Content::decode(&raw).map_err(|err| {
            RestampError::Parse(format!(
                "page {}: cannot decode content stream: {}",
                page_number, err
            ))
        })?;

        let sequence = TokenSequence::from_content(content);
        debug!(tokens = sequence.len(), "content flattened");
        Ok(sequence)
    }

    /// Re-encode a token sequence as the page's new content stream.
    ///
    /// Callers invoke this only for pages a rewrite actually changed; an
    /// unmatched page keeps its stored bytes byte-for-byte.
    #[instrument(skip(self, sequence), fields(page_number, tokens = sequence.len()))]
    pub fn set_token_sequence(&mut self, page_number: u32, sequence: &TokenSequence) -> Result<()> {
        let page_id = self.page_id(page_number)?;
        let encoded = sequence.to_content().encode().map_err(|err| {
            RestampError::Serialization(format!(
                "page {}: cannot encode content stream: {}",
                page_number, err
            ))
        })?;
        self.document
            .change_page_content(page_id, encoded)
            .map_err(|err| {
                RestampError::Serialization(format!(
                    "page {}: cannot replace content stream: {}",
                    page_number, err
                ))
            })?;

        debug!("page content replaced");
        Ok(())
    }

    // -- Scan and rewrite drivers -----------------------------------------------

    /// Scan one page, returning whether the matcher accepted any window.
    pub fn scan_page<M>(&self, page_number: u32, matcher: &M) -> Result<bool>
    where
        M: TokenMatcher + ?Sized,
    {
        let sequence = self.token_sequence(page_number)?;
        pattern::run_matcher(&sequence, matcher)
    }

    /// Rewrite one page in place, returning whether anything changed.
    ///
    /// Honors the mutator's own stop-after-first-match setting. The page is
    /// re-serialized only when a window was rewritten.
    #[instrument(skip(self, mutator), fields(page_number))]
    pub fn rewrite_page<M>(&mut self, page_number: u32, mutator: &M) -> Result<bool>
    where
        M: TokenMutator + ?Sized,
    {
        let mut sequence = self.token_sequence(page_number)?;
        let changed =
            pattern::run_mutator(&mut sequence, mutator, mutator.stop_after_first_match())?;
        if changed {
            self.set_token_sequence(page_number, &sequence)?;
            info!(page_number, "page rewritten");
        }
        Ok(changed)
    }

    /// Scan every page, folding per-page outcomes with `policy`.
    ///
    /// Pages are visited in document order; the fold checks whether to
    /// continue before each page, so `And`/`Or` stop as soon as the result
    /// is decided.
    #[instrument(skip(self, matcher), fields(policy = ?policy))]
    pub fn scan_document<M>(&self, matcher: &M, policy: ResultPolicy) -> Result<bool>
    where
        M: TokenMatcher + ?Sized,
    {
        let mut result = policy.initial();
        for page_number in self.page_numbers() {
            if !policy.keep_going(result) {
                break;
            }
            let update = self.scan_page(page_number, matcher)?;
            result = policy.combine(result, update);
        }

        debug!(result, "document scan complete");
        Ok(result)
    }

    /// Rewrite every page, folding per-page outcomes with `policy`.
    #[instrument(skip(self, mutator), fields(policy = ?policy))]
    pub fn rewrite_document<M>(&mut self, mutator: &M, policy: ResultPolicy) -> Result<bool>
    where
        M: TokenMutator + ?Sized,
    {
        let mut result = policy.initial();
        for page_number in self.page_numbers() {
            if !policy.keep_going(result) {
                break;
            }
            let update = self.rewrite_page(page_number, mutator)?;
            result = policy.combine(result, update);
        }

        debug!(result, "document rewrite complete");
        Ok(result)
    }

    /// Run several mutators over the whole document, folding the
    /// per-mutator outcomes with `policy`.
    ///
    /// Each member runs across all pages under `ExhaustiveOr`, so its
    /// rewrites reach every page even once the member's outcome is decided.
    #[instrument(skip_all, fields(mutators = mutators.len(), policy = ?policy))]
    pub fn rewrite_document_all(
        &mut self,
        mutators: &[&dyn TokenMutator],
        policy: ResultPolicy,
    ) -> Result<bool> {
        let mut result = policy.initial();
        for mutator in mutators {
            if !policy.keep_going(result) {
                break;
            }
            let update = self.rewrite_document(*mutator, ResultPolicy::ExhaustiveOr)?;
            result = policy.combine(result, update);
        }
        Ok(result)
    }

    // -- Document information dictionary ----------------------------------------

    /// Read a named entry from the information dictionary.
    pub fn info_entry(&self, key: &str) -> Option<String> {
        match self.info_dict()?.get(key.as_bytes()).ok()? {
            Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Write a named entry in the information dictionary, creating the
    /// dictionary when the document has none.
    pub fn set_info_entry(&mut self, key: &str, value: &str) -> Result<()> {
        let dict = self.info_dict_mut()?;
        dict.set(key, Object::string_literal(value));
        Ok(())
    }

    /// Delete a named entry from the information dictionary. Returns whether
    /// the entry existed.
    pub fn remove_info_entry(&mut self, key: &str) -> bool {
        if let Some(id) = self.info_id() {
            return match self.document.get_object_mut(id).and_then(Object::as_dict_mut) {
                Ok(dict) => dict.remove(key.as_bytes()).is_some(),
                Err(_) => false,
            };
        }
        match self.document.trailer.get_mut(b"Info") {
            Ok(Object::Dictionary(dict)) => dict.remove(key.as_bytes()).is_some(),
            _ => false,
        }
    }

    pub fn title(&self) -> Option<String> {
        self.info_entry("Title")
    }

    pub fn author(&self) -> Option<String> {
        self.info_entry("Author")
    }

    pub fn subject(&self) -> Option<String> {
        self.info_entry("Subject")
    }

    pub fn keywords(&self) -> Option<String> {
        self.info_entry("Keywords")
    }

    pub fn creator(&self) -> Option<String> {
        self.info_entry("Creator")
    }

    pub fn producer(&self) -> Option<String> {
        self.info_entry("Producer")
    }

    /// Creation date as the raw PDF date string (`D:YYYYMMDD...`).
    pub fn creation_date(&self) -> Option<String> {
        self.info_entry("CreationDate")
    }

    /// Modification date as the raw PDF date string.
    pub fn modification_date(&self) -> Option<String> {
        self.info_entry("ModDate")
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.set_info_entry("Title", title)
    }

    pub fn set_author(&mut self, author: &str) -> Result<()> {
        self.set_info_entry("Author", author)
    }

    pub fn set_subject(&mut self, subject: &str) -> Result<()> {
        self.set_info_entry("Subject", subject)
    }

    pub fn set_keywords(&mut self, keywords: &str) -> Result<()> {
        self.set_info_entry("Keywords", keywords)
    }

    pub fn set_creator(&mut self, creator: &str) -> Result<()> {
        self.set_info_entry("Creator", creator)
    }

    pub fn set_producer(&mut self, producer: &str) -> Result<()> {
        self.set_info_entry("Producer", producer)
    }

    /// Drop the creation date. Returns whether one was present.
    pub fn remove_creation_date(&mut self) -> bool {
        self.remove_info_entry("CreationDate")
    }

    /// Drop the modification date. Returns whether one was present.
    ///
    /// Documents regenerated on demand often differ only here; dropping the
    /// entry makes otherwise identical copies compare equal.
    pub fn remove_modification_date(&mut self) -> bool {
        self.remove_info_entry("ModDate")
    }

    // -- Saving -----------------------------------------------------------------

    /// Serialize the document to bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.document.save_to(&mut output).map_err(|err| {
            RestampError::Serialization(format!("failed to serialise PDF: {}", err))
        })?;
        Ok(output)
    }

    /// Save the document to a file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path_ref = path.as_ref();
        self.document.save(path_ref).map_err(|err| {
            RestampError::Serialization(format!(
                "failed to save {}: {}",
                path_ref.display(),
                err
            ))
        })?;
        info!("PDF saved: {}", path_ref.display());
        Ok(())
    }

    // -- Helpers ----------------------------------------------------------------

    /// Object id of the page, by 1-indexed page number.
    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages
            .get(&page_number)
            .copied()
            .ok_or(RestampError::PageNotFound {
                number: page_number,
                count: pages.len(),
            })
    }

    fn info_id(&self) -> Option<ObjectId> {
        match self.document.trailer.get(b"Info").ok()? {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }

    fn info_dict(&self) -> Option<&Dictionary> {
        match self.document.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.document.get_object(*id).ok()?.as_dict().ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    fn info_dict_mut(&mut self) -> Result<&mut Dictionary> {
        let id = self.ensure_info_id();
        self.document
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| {
                RestampError::Parse(format!("information dictionary unavailable: {}", err))
            })
    }

    /// Object id of the trailer's /Info dictionary, creating an empty one
    /// when the document has none. An inline dictionary is moved into an
    /// indirect object, the form the trailer requires.
    fn ensure_info_id(&mut self) -> ObjectId {
        enum Slot {
            Existing(ObjectId),
            Inline(Dictionary),
            Missing,
        }

        let slot = match self.document.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => Slot::Existing(*id),
            Ok(Object::Dictionary(dict)) => Slot::Inline(dict.clone()),
            _ => Slot::Missing,
        };

        match slot {
            Slot::Existing(id) => id,
            Slot::Inline(dict) => {
                let id = self.document.add_object(Object::Dictionary(dict));
                self.document.trailer.set("Info", Object::Reference(id));
                id
            }
            Slot::Missing => {
                let id = self.document.add_object(Object::Dictionary(Dictionary::new()));
                self.document.trailer.set("Info", Object::Reference(id));
                id
            }
        }
    }
}
