//! Actor configuration.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Source of unique actor ids.
pub type IdSource = Arc<dyn Fn() -> String + Send + Sync>;

/// Default number of transitions kept in an actor's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Options applied when an actor is created.
///
/// # Example
///
/// ```rust
/// use statecraft::actor::ActorOptions;
///
/// let options = ActorOptions::new()
///     .id_source(|| "fixed-id".to_string())
///     .dev_diagnostics(false)
///     .history_limit(10);
/// assert_eq!(options.next_id(), "fixed-id");
/// ```
#[derive(Clone)]
pub struct ActorOptions {
    id_source: IdSource,
    dev_diagnostics: bool,
    history_limit: usize,
}

impl ActorOptions {
    pub fn new() -> Self {
        Self {
            id_source: Arc::new(random_id),
            dev_diagnostics: cfg!(debug_assertions),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Replace the id generator (random UUID v4 by default).
    pub fn id_source<F>(mut self, source: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.id_source = Arc::new(source);
        self
    }

    /// Warn when events reach a non-active actor. Defaults to on in debug
    /// builds only.
    pub fn dev_diagnostics(mut self, enabled: bool) -> Self {
        self.dev_diagnostics = enabled;
        self
    }

    /// Maximum number of transitions kept in history; `0` disables it.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn next_id(&self) -> String {
        (self.id_source)()
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.dev_diagnostics
    }

    pub fn max_history(&self) -> usize {
        self.history_limit
    }
}

impl Default for ActorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorOptions")
            .field("dev_diagnostics", &self.dev_diagnostics)
            .field("history_limit", &self.history_limit)
            .finish_non_exhaustive()
    }
}

fn random_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_ids_are_unique() {
        let options = ActorOptions::default();
        assert_ne!(options.next_id(), options.next_id());
    }

    #[test]
    fn id_source_is_injectable() {
        let counter = Arc::new(AtomicUsize::new(0));
        let source = Arc::clone(&counter);
        let options = ActorOptions::new()
            .id_source(move || format!("actor-{}", source.fetch_add(1, Ordering::SeqCst)));

        assert_eq!(options.next_id(), "actor-0");
        assert_eq!(options.next_id(), "actor-1");
    }

    #[test]
    fn defaults_follow_build_profile() {
        let options = ActorOptions::default();
        assert_eq!(options.diagnostics_enabled(), cfg!(debug_assertions));
        assert_eq!(options.max_history(), DEFAULT_HISTORY_LIMIT);
    }
}
