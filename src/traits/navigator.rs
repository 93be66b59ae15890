//! Navigation collaborator trait
//!
//! Abstracts the host's client-side router. The coordinator never performs a
//! full page load itself; the one replay path that requires it (buy-now, to
//! guarantee a clean checkout page state) asks for it explicitly.

/// Client-side navigation as seen by the coordinator.
pub trait Navigator: Send + Sync {
    /// Route to `path` through the client-side router.
    fn navigate(&self, path: &str);

    /// Route to `path` with a full page load.
    ///
    /// Hosts without a meaningful distinction can rely on the default, which
    /// falls back to [`navigate`](Self::navigate).
    fn navigate_hard(&self, path: &str) {
        self.navigate(path);
    }
}
