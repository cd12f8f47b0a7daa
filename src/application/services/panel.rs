//! Result panel, submit control and the session tying them together
//!
//! One request at a time: the submit control is disabled while a request is
//! in flight and re-enabled when its guard drops. The panel is replaced as a
//! whole on success and left untouched on failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::services::DivinationService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Tree;
use crate::infrastructure::traits::Notifier;

/// The rendered result area.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    tree: Option<Tree>,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a whole new tree and reveal the panel.
    pub fn replace(&mut self, tree: Tree) -> &Tree {
        self.tree.insert(tree)
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Hidden until the first result arrives.
    pub fn is_shown(&self) -> bool {
        self.tree.is_some()
    }
}

/// The submit control.
///
/// A [`Session`] holds `&mut self` for the whole submit, so it never sees
/// `Busy` on its own control. The control is shared through
/// [`Session::trigger`] for hosts that submit from another thread or show the
/// control's state; for them a second `engage` while a request is in flight
/// fails with `Busy`.
#[derive(Debug)]
pub struct TriggerControl {
    enabled: AtomicBool,
}

impl Default for TriggerControl {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }
}

impl TriggerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Disable the control for the lifetime of the returned guard.
    pub fn engage(&self) -> ApplicationResult<TriggerGuard<'_>> {
        self.enabled
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ApplicationError::Busy)?;
        Ok(TriggerGuard { control: self })
    }
}

/// Re-enables the control on drop, whatever the request outcome.
#[derive(Debug)]
pub struct TriggerGuard<'a> {
    control: &'a TriggerControl,
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.control.enabled.store(true, Ordering::Release);
    }
}

/// One page: input handling, the panel and the control.
pub struct Session {
    service: DivinationService,
    notifier: Arc<dyn Notifier>,
    trigger: Arc<TriggerControl>,
    panel: ResultPanel,
}

impl Session {
    pub fn new(service: DivinationService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            trigger: Arc::new(TriggerControl::new()),
            panel: ResultPanel::new(),
        }
    }

    /// Shared handle on the submit control, for hosts that display it.
    pub fn trigger(&self) -> Arc<TriggerControl> {
        Arc::clone(&self.trigger)
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    /// Handle one submit.
    ///
    /// Every failure is reported through the notifier and leaves the panel
    /// as it was.
    pub fn submit(&mut self, raw: &str) -> ApplicationResult<&Tree> {
        match self.run(raw) {
            Ok(tree) => {
                info!("submit {:?}: panel replaced", raw);
                Ok(self.panel.replace(tree))
            }
            Err(e) => {
                debug!("submit {:?}: {}", raw, e);
                self.notifier.notify(e.user_notice());
                Err(e)
            }
        }
    }

    fn run(&self, raw: &str) -> ApplicationResult<Tree> {
        let cast = self.service.validate(raw)?;
        let _guard = self.trigger.engage()?;
        let result = self.service.request(&cast)?;
        Ok(self.service.render(&result))
    }
}
