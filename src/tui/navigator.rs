//! Routing layer owning the tab selection.
//!
//! Selection requests take effect after a propagation delay, so the bar runs
//! ahead of the selection it is fed. Override requests open a modal panel
//! and leave the selection alone.

use std::{
    collections::{HashSet, VecDeque},
    time::Duration,
};

use tracing::{debug, info};

use crate::{
    config::{Config, TabConfig},
    selector::{BarEvent, SelectorBar},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingChange {
    due: Duration,
    identifier: String,
}

/// Outcome of routing one bar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// Selection change queued.
    Queued,
    /// Selection change refused; the bar was told to resync.
    Prevented,
    /// Override opened a modal.
    ModalOpened,
}

#[derive(Debug, Default)]
pub struct Navigator {
    active: Option<String>,
    pending: VecDeque<PendingChange>,
    /// Time elapsed on the frame clock.
    clock: Duration,
    delay: Duration,
    locked: HashSet<String>,
    modal: Option<String>,
}

impl Navigator {
    #[must_use]
    pub fn new(initial: Option<&str>, delay: Duration) -> Self {
        Self {
            active: initial.map(ToOwned::to_owned),
            delay,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            locked: config
                .tabs
                .iter()
                .filter(|t| t.locked)
                .map(|t| t.id.clone())
                .collect(),
            ..Self::new(config.initial_tab(), config.propagation_delay())
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn modal(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    /// No selection change is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn close_modal(&mut self) -> bool {
        self.modal.take().is_some()
    }

    /// Queue a selection change. Returns `false` if the tab is locked.
    pub fn request(&mut self, identifier: &str) -> bool {
        if self.locked.contains(identifier) {
            debug!(identifier, "selection change prevented");
            return false;
        }
        self.pending.push_back(PendingChange {
            due: self.clock + self.delay,
            identifier: identifier.to_owned(),
        });
        true
    }

    /// Route one event emitted by the bar.
    pub fn dispatch(&mut self, event: BarEvent) -> Routed {
        match event {
            BarEvent::SelectionChangeRequested { identifier } => {
                if self.request(&identifier) {
                    Routed::Queued
                } else {
                    Routed::Prevented
                }
            }
            BarEvent::OverrideRequested { identifier } => {
                info!(%identifier, "opening modal");
                self.modal = Some(identifier);
                Routed::ModalOpened
            }
        }
    }

    /// Drain the bar's events and feed the current selection back.
    pub fn route(&mut self, bar: &mut SelectorBar) {
        for event in bar.take_events() {
            if self.dispatch(event) == Routed::Prevented {
                bar.resync();
            }
        }
        bar.set_active(self.active());
    }

    /// Advance the frame clock, applying changes that came due.
    ///
    /// Returns whether the active selection changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.clock += dt;
        let mut changed = false;
        while let Some(change) = self.pending.front() {
            if change.due > self.clock {
                break;
            }
            let Some(change) = self.pending.pop_front() else {
                break;
            };
            if self.active.as_deref() != Some(change.identifier.as_str()) {
                debug!(identifier = %change.identifier, "selection propagated");
                self.active = Some(change.identifier);
                changed = true;
            }
        }
        changed
    }

    /// Follow a change of the tab set.
    ///
    /// Requests for removed tabs are dropped. If the active tab is gone the
    /// selection is cleared and the first selectable tab is designated after
    /// the propagation delay.
    pub fn retain_tabs(&mut self, tabs: &[TabConfig]) {
        let present: HashSet<&str> = tabs.iter().map(|t| t.id.as_str()).collect();
        self.pending
            .retain(|c| present.contains(c.identifier.as_str()));

        if self
            .active
            .as_deref()
            .is_none_or(|id| present.contains(id))
        {
            return;
        }

        info!(removed = ?self.active, "active tab removed");
        self.active = None;
        if let Some(tab) = tabs
            .iter()
            .find(|t| !t.overrides_selection && !self.locked.contains(&t.id))
        {
            self.pending.push_back(PendingChange {
                due: self.clock + self.delay,
                identifier: tab.id.clone(),
            });
        }
    }
}
