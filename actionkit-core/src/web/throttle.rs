use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, MutexGuard},
    time::{sleep_until, Instant},
};

use super::{WebAuthenticationRequest, WebAuthenticationSession};
use crate::error::CapabilityError;

/// Presents browser sessions one at a time, leaving at least `minimum_interval` between the
/// end of a presentation and the start of the next one.
///
/// The host platform refuses to present a second authentication session while one is on
/// screen, and presenting right after a dismissal fails on some OS versions.
pub struct ThrottledWebAuthenticationSession {
    session: Arc<dyn WebAuthenticationSession>,
    minimum_interval: Duration,
    last_presentation_end: Mutex<Option<Instant>>,
}

impl ThrottledWebAuthenticationSession {
    /// Wraps `session`.
    #[must_use]
    pub fn new(session: Arc<dyn WebAuthenticationSession>, minimum_interval: Duration) -> Self {
        Self {
            session,
            minimum_interval,
            last_presentation_end: Mutex::new(None),
        }
    }

    /// Waits until no session is on screen and the minimum interval since the last one has
    /// elapsed. The slot is held until the returned value is dropped.
    pub async fn acquire(&self) -> PresentationSlot<'_> {
        let slot = self.last_presentation_end.lock().await;
        if let Some(ready_at) = slot.map(|end| end + self.minimum_interval) {
            if ready_at > Instant::now() {
                log::debug!("Delaying web authentication, previous session ended recently.");
                sleep_until(ready_at).await;
            }
        }
        PresentationSlot {
            session: self.session.as_ref(),
            slot,
            started: false,
            completed: false,
        }
    }

    /// Waits for the presentation slot, then presents the session.
    ///
    /// Dropping the returned future while the session is on screen dismisses it.
    ///
    /// # Errors
    /// Propagates the failure reported by the wrapped session.
    pub async fn authenticate(
        &self,
        request: WebAuthenticationRequest,
    ) -> Result<String, CapabilityError> {
        self.acquire().await.present(request).await
    }
}

/// Exclusive right to present a browser session.
pub struct PresentationSlot<'a> {
    session: &'a dyn WebAuthenticationSession,
    slot: MutexGuard<'a, Option<Instant>>,
    started: bool,
    completed: bool,
}

impl PresentationSlot<'_> {
    /// Presents the session.
    ///
    /// Dropping the returned future while the session is on screen dismisses it.
    ///
    /// # Errors
    /// Propagates the failure reported by the wrapped session.
    pub async fn present(
        mut self,
        request: WebAuthenticationRequest,
    ) -> Result<String, CapabilityError> {
        self.started = true;
        let result = self.session.authenticate(request).await;
        self.completed = true;
        result
    }
}

impl Drop for PresentationSlot<'_> {
    fn drop(&mut self) {
        if !self.started {
            return;
        }
        if !self.completed {
            log::debug!("Dismissing abandoned web authentication session.");
            self.session.dismiss();
        }
        *self.slot = Some(Instant::now());
    }
}
