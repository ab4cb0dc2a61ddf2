use serde::{Deserialize, Serialize};

/// Pagination progress marker for the photo feed.
///
/// Advances monotonically; reset to page zero on principal change or an
/// explicit reload. Once `exhausted` is set, further load-more requests are
/// no-ops until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedCursor {
    pub next_page_index: u32,
    pub exhausted: bool,
}

impl FeedCursor {
    pub fn advance(&mut self) {
        self.next_page_index += 1;
    }

    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
