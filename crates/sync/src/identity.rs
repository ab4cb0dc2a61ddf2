use std::sync::Mutex;

use tokio::sync::watch;
use tracing::debug;

use picfolio_core::GalleryError;

/// Snapshot of the scope generation at the moment an async operation starts.
///
/// Completions compare their token against the scope before applying a
/// response; a response minted under an older generation is discarded. The
/// generation counter (rather than the principal name) is what guards an
/// A→B→A flapping sequence: the name would match again, the epoch will not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeToken {
    epoch: u64,
}

struct ScopeState {
    principal: Option<String>,
    epoch: u64,
}

/// The active principal plus a change signal.
///
/// The sync core is inert until a principal is bound. Binding a different
/// principal (or clearing) bumps the epoch so stale in-flight responses are
/// dropped, and notifies subscribers through a watch channel.
pub struct IdentityScope {
    state: Mutex<ScopeState>,
    notify: watch::Sender<Option<String>>,
}

impl IdentityScope {
    pub fn new() -> Self {
        let (notify, _) = watch::channel(None);
        Self {
            state: Mutex::new(ScopeState {
                principal: None,
                epoch: 0,
            }),
            notify,
        }
    }

    /// Bind the active principal. Re-binding the same principal is a no-op;
    /// binding a different one bumps the epoch and notifies subscribers.
    pub fn bind(&self, principal: impl Into<String>) {
        let principal = principal.into();
        {
            let mut state = self.state.lock().expect("scope mutex poisoned");
            if state.principal.as_deref() == Some(principal.as_str()) {
                return;
            }
            state.principal = Some(principal.clone());
            state.epoch += 1;
            debug!("principal bound: {principal} (epoch {})", state.epoch);
        }
        let _ = self.notify.send(Some(principal));
    }

    /// Clear the principal (logout). Bumps the epoch.
    pub fn clear(&self) {
        {
            let mut state = self.state.lock().expect("scope mutex poisoned");
            if state.principal.is_none() {
                return;
            }
            state.principal = None;
            state.epoch += 1;
            debug!("principal cleared (epoch {})", state.epoch);
        }
        let _ = self.notify.send(None);
    }

    pub fn current(&self) -> Option<String> {
        self.state
            .lock()
            .expect("scope mutex poisoned")
            .principal
            .clone()
    }

    /// Capture the current generation for a later staleness check.
    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            epoch: self.state.lock().expect("scope mutex poisoned").epoch,
        }
    }

    /// Whether a response minted under `token` may still be applied.
    pub fn is_current(&self, token: ScopeToken) -> bool {
        self.state.lock().expect("scope mutex poisoned").epoch == token.epoch
    }

    /// The bound principal plus a staleness token, or a validation failure
    /// when the core is inert. Every remote operation starts here.
    pub fn bound(&self) -> Result<(String, ScopeToken), GalleryError> {
        let state = self.state.lock().expect("scope mutex poisoned");
        match &state.principal {
            Some(principal) => Ok((
                principal.clone(),
                ScopeToken { epoch: state.epoch },
            )),
            None => Err(GalleryError::validation("no principal bound")),
        }
    }

    /// Observe principal changes. The receiver yields the current value
    /// immediately on first poll after a change.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.notify.subscribe()
    }
}

impl Default for IdentityScope {
    fn default() -> Self {
        Self::new()
    }
}
