use picfolio_core::photo::position_of;
use picfolio_core::PhotoRef;

/// Lightbox viewing state.
///
/// Invariant: while `is_open` is true and `photos` is non-empty,
/// `index < photos.len()`. While closed the index is irrelevant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightboxState {
    pub photos: Vec<PhotoRef>,
    pub index: usize,
    pub is_open: bool,
}

/// Bounded single-index navigation over an ordered photo list.
///
/// Agnostic of how the list was assembled (a whole album, one date group,
/// and the full feed are all valid inputs) and of the input device; the UI
/// maps Escape/ArrowRight/ArrowLeft onto `close`/`next`/`previous`.
#[derive(Debug, Default)]
pub struct LightboxNavigator {
    state: LightboxState,
}

impl LightboxNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// The photo under the cursor, while open.
    pub fn current(&self) -> Option<&PhotoRef> {
        if !self.state.is_open {
            return None;
        }
        self.state.photos.get(self.state.index)
    }

    /// Open over `photos`, positioned at `photo_id`. An id missing from the
    /// list does not occur with correct callers, but must not crash: the
    /// index clamps to zero.
    pub fn open(&mut self, photos: Vec<PhotoRef>, photo_id: &str) {
        self.state.index = position_of(&photos, photo_id).unwrap_or(0);
        self.state.photos = photos;
        self.state.is_open = true;
    }

    pub fn close(&mut self) {
        self.state.is_open = false;
    }

    /// Advance one photo; a no-op at the end of the list.
    pub fn next(&mut self) {
        if !self.state.is_open || self.state.photos.is_empty() {
            return;
        }
        self.state.index = (self.state.index + 1).min(self.state.photos.len() - 1);
    }

    /// Step back one photo; a no-op at index zero.
    pub fn previous(&mut self) {
        if !self.state.is_open || self.state.photos.is_empty() {
            return;
        }
        self.state.index = self.state.index.saturating_sub(1);
    }
}
