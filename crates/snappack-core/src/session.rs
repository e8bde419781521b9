//! Caller-side preview state: the chosen package, the typed name and the
//! last decoded photo.
//!
//! Photo decoding happens outside the engine and may finish out of order. Each
//! decode is started with [`PreviewSession::begin_photo`], which hands out a
//! [`RequestTicket`]; only the most recent ticket's result is accepted.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::package::PackageId;
use crate::pipeline::{Composer, Sheet, SourceImage};

/// Package and name currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub package: PackageId,
    /// Empty unless the package is a passport package.
    pub name: String,
}

/// Handle for one in-flight photo decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    id: u64,
}

pub struct PreviewSession {
    composer: Composer,
    selection: Selection,
    photo: Option<Arc<SourceImage>>,
    generation: u64,
    next_request: u64,
    pending: Option<u64>,
}

impl PreviewSession {
    pub fn new(composer: Composer) -> Self {
        Self {
            composer,
            selection: Selection {
                package: PackageId::A,
                name: String::new(),
            },
            photo: None,
            generation: 0,
            next_request: 0,
            pending: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Increases on every change of package, name or photo.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Chooses a package. Leaving the passport packages clears the name.
    pub fn select_package(&mut self, package: PackageId) {
        self.selection.package = package;
        if !package.is_passport() {
            self.selection.name.clear();
        }
        self.generation += 1;
        debug!(%package, generation = self.generation, "package selected");
    }

    /// Sets the name printed under passport photos.
    ///
    /// Returns `false` and leaves the name untouched when the current package
    /// has no name strip.
    pub fn set_name(&mut self, name: &str) -> bool {
        if !self.selection.package.is_passport() {
            return false;
        }
        let capped: String = name.chars().take(self.composer.config().max_label_chars).collect();
        if capped != self.selection.name {
            self.selection.name = capped;
            self.generation += 1;
        }
        true
    }

    /// Starts a photo decode. Any earlier ticket becomes stale.
    pub fn begin_photo(&mut self) -> RequestTicket {
        self.next_request += 1;
        self.pending = Some(self.next_request);
        self.generation += 1;
        RequestTicket {
            id: self.next_request,
        }
    }

    /// Delivers the outcome of the decode started with `ticket`.
    ///
    /// A stale ticket is discarded and yields `Ok(None)` without touching the
    /// session. Otherwise a decode error is returned as is, and a decoded photo
    /// becomes the current photo and is rendered with the current selection.
    #[instrument(skip_all)]
    pub fn finish_photo(
        &mut self,
        ticket: RequestTicket,
        decoded: Result<SourceImage>,
    ) -> Result<Option<Sheet>> {
        if self.pending != Some(ticket.id) {
            debug!(ticket = ticket.id, "stale photo discarded");
            return Ok(None);
        }
        self.pending = None;
        let photo = decoded?;
        self.photo = Some(Arc::new(photo));
        self.generation += 1;
        Ok(self.render())
    }

    /// Renders the current selection, or `None` when no photo is loaded.
    pub fn render(&self) -> Option<Sheet> {
        let photo = self.photo.as_ref()?;
        let name = if self.selection.name.is_empty() {
            None
        } else {
            Some(self.selection.name.as_str())
        };
        Some(self.composer.compose(self.selection.package, photo, name))
    }
}
