//! Loading/error/collection state of a single view
//!
//! `ViewState` is the synchronous half of the remote-collection lifecycle:
//! it knows how a fetch starts and settles and which rendering mode wins, but
//! performs no I/O. [`crate::collection::RemoteCollection`] drives it.

/// Which of the mutually exclusive renderings a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode<'a, T> {
    /// A fetch is in flight
    Loading,
    /// The last fetch failed; the view offers a retry
    Failed {
        /// User-facing message
        message: &'a str,
    },
    /// The last fetch succeeded with no items
    Empty,
    /// Items to render
    Ready(&'a [T]),
}

/// State of one remote collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<T> {
    items: Option<Vec<T>>,
    is_loading: bool,
    error: Option<String>,
}

impl<T> Default for ViewState<T> {
    /// A freshly mounted view is loading
    fn default() -> Self {
        Self {
            items: None,
            is_loading: true,
            error: None,
        }
    }
}

impl<T> ViewState<T> {
    /// Create the state of a freshly mounted view
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetch started; any previous items and error are kept until it settles
    pub const fn begin_load(&mut self) {
        self.is_loading = true;
    }

    /// A fetch succeeded; the collection is replaced wholesale
    pub fn apply_success(&mut self, items: Vec<T>) {
        self.items = Some(items);
        self.error = None;
        self.is_loading = false;
    }

    /// A fetch failed; the previous collection stays as it was
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.is_loading = false;
    }

    /// Whether a fetch is in flight
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the last failed fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether any fetch has ever succeeded
    pub const fn has_loaded(&self) -> bool {
        self.items.is_some()
    }

    /// Items of the last successful fetch (empty before the first one)
    pub fn items(&self) -> &[T] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Rendering mode: loading beats error, error beats the collection
    pub fn mode(&self) -> RenderMode<'_, T> {
        if self.is_loading {
            RenderMode::Loading
        } else if let Some(message) = self.error.as_deref() {
            RenderMode::Failed { message }
        } else {
            match self.items.as_deref() {
                Some(items) if !items.is_empty() => RenderMode::Ready(items),
                _ => RenderMode::Empty,
            }
        }
    }

    /// Drop every item matching `pred`, returning how many went
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let Some(items) = self.items.as_mut() else {
            return 0;
        };
        let before = items.len();
        items.retain(|item| !pred(item));
        before - items.len()
    }

    /// Apply `update` to every item matching `pred`, returning how many changed
    pub fn replace_where(
        &mut self,
        mut pred: impl FnMut(&T) -> bool,
        mut update: impl FnMut(&mut T),
    ) -> usize {
        let Some(items) = self.items.as_mut() else {
            return 0;
        };
        let mut changed = 0;
        for item in items.iter_mut().filter(|item| pred(item)) {
            update(item);
            changed += 1;
        }
        changed
    }
}
