// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A rendered graph together with the specification it was rendered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphImage<I> {
    /// Graph specification text.
    pub spec: String,
    /// Rendered image.
    pub image: I,
}

/// The last committed render for one graph view.
///
/// Rendering is skipped when a new compile produces the same specification.
#[derive(Clone, Debug)]
pub struct GraphCache<I> {
    current: Option<GraphImage<I>>,
}

impl<I> Default for GraphCache<I> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<I> GraphCache<I> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed entry, if any.
    #[must_use]
    pub fn get(&self) -> Option<&GraphImage<I>> {
        self.current.as_ref()
    }

    /// The committed image if it was rendered from exactly `spec`.
    #[must_use]
    pub fn lookup(&self, spec: &str) -> Option<&I> {
        self.current
            .as_ref()
            .filter(|entry| entry.spec == spec)
            .map(|entry| &entry.image)
    }

    /// Replaces the committed entry.
    pub fn commit(&mut self, spec: String, image: I) {
        self.current = Some(GraphImage { spec, image });
    }

    /// Drops the committed entry.
    pub fn clear(&mut self) -> Option<GraphImage<I>> {
        self.current.take()
    }
}
