//! The selector bar: selection state machine driving the indicator.

use std::{collections::HashSet, mem, time::Duration};

use serde::Serialize;
use tracing::{debug, info};

use super::{
    BarEvent, Geometry, GeometryCache, MotionController, OptionRow, SelectorOption, SpringConfig,
};

/// Alignment of the indicator with the tracked option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    /// No geometry known for the tracked option (or nothing tracked).
    Uninitialized,
    /// Resting on the tracked option.
    Settled,
    /// Moving towards the tracked option.
    Transitioning,
}

/// Composes the option rows, the geometry cache and the indicator motion.
///
/// The selection itself is owned by the host: [`set_active`](Self::set_active)
/// feeds the current value in, [`take_events`](Self::take_events) drains the
/// requests the bar made. Between a request and its propagation the
/// indicator tracks the requested option optimistically.
#[derive(Debug, Default)]
pub struct SelectorBar {
    rows: Vec<OptionRow>,
    cache: GeometryCache,
    motion: MotionController,
    /// Selection as last supplied by the host.
    active: Option<String>,
    /// Option the indicator aims at. Leads `active` while a request propagates.
    tracked: Option<String>,
    outgoing_events: Vec<BarEvent>,
}

impl SelectorBar {
    #[must_use]
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            motion: MotionController::new(spring),
            ..Self::default()
        }
    }

    /// Supply the options for the current render.
    ///
    /// Positions are reassigned from list order. When the identifier set
    /// changes the cache is pruned. Losing the tracked option falls back to
    /// the host's selection; only losing that as well drops the indicator
    /// back to [`IndicatorState::Uninitialized`].
    pub fn set_options<I>(&mut self, options: I)
    where
        I: IntoIterator<Item = SelectorOption>,
    {
        let mut previous: Vec<OptionRow> = mem::take(&mut self.rows);
        let mut added = 0;
        for (index, mut option) in options.into_iter().enumerate() {
            option.index = index;
            let row = match previous
                .iter()
                .position(|r| r.identifier() == option.identifier)
            {
                Some(pos) => {
                    let mut row = previous.swap_remove(pos);
                    row.refresh(option);
                    row
                }
                None => {
                    added += 1;
                    OptionRow::new(option)
                }
            };
            self.rows.push(row);
        }

        if previous.is_empty() && added == 0 {
            return;
        }

        let valid: HashSet<&str> = self.rows.iter().map(OptionRow::identifier).collect();
        self.cache.prune(valid.iter().copied());
        info!(
            options = self.rows.len(),
            added,
            removed = previous.len(),
            "option set changed"
        );

        let tracked_removed = self
            .tracked
            .as_deref()
            .is_some_and(|id| !valid.contains(id));
        if self.active.as_deref().is_some_and(|id| !valid.contains(id)) {
            self.active = None;
        }
        if tracked_removed {
            debug!(tracked = ?self.tracked, active = ?self.active, "tracked option removed");
            self.tracked = None;
            self.motion.reset();
            if let Some(active) = self.active.clone() {
                self.track(&active);
            }
        }
    }

    /// Feed the host's current selection.
    pub fn set_active(&mut self, identifier: Option<&str>) {
        if self.active.as_deref() == identifier {
            return;
        }
        debug!(from = ?self.active, to = ?identifier, "active selection changed");
        self.active = identifier.map(ToOwned::to_owned);

        match identifier {
            Some(id) => self.track(id),
            None => {
                self.tracked = None;
                self.motion.reset();
            }
        }
    }

    /// Drop optimistic tracking and aim at the host's selection again.
    ///
    /// For hosts that decline a requested change: their selection never
    /// moves, so [`set_active`](Self::set_active) alone would not realign.
    pub fn resync(&mut self) {
        match self.active.clone() {
            Some(id) => self.track(&id),
            None => {
                self.tracked = None;
                self.motion.reset();
            }
        }
    }

    /// Handle activation of the option at `index`.
    ///
    /// Returns whether the activation produced an event.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(option) = self.rows.get(index).map(OptionRow::option) else {
            return false;
        };
        let identifier = option.identifier.clone();
        let overrides = option.overrides_selection;

        if overrides {
            debug!(%identifier, "override requested");
            self.outgoing_events
                .push(BarEvent::OverrideRequested { identifier });
            return true;
        }

        // Compared against the host's selection, not `tracked`: re-pressing
        // the still-active option while a change is in flight is a no-op.
        if self.active.as_deref() == Some(identifier.as_str()) {
            return false;
        }

        debug!(%identifier, "selection change requested");
        self.outgoing_events.push(BarEvent::SelectionChangeRequested {
            identifier: identifier.clone(),
        });
        self.track(&identifier);
        true
    }

    /// Handle activation of the option named `identifier`.
    pub fn activate_identifier(&mut self, identifier: &str) -> bool {
        self.index_of(identifier)
            .is_some_and(|index| self.activate(index))
    }

    fn track(&mut self, identifier: &str) {
        if self.tracked.as_deref() == Some(identifier) {
            return;
        }
        self.tracked = Some(identifier.to_owned());
        self.cache.take_dirty(identifier);
        match self.cache.lookup(identifier) {
            Some(geometry) => self.motion.retarget(geometry),
            None => debug!(identifier, "geometry unknown, deferring indicator"),
        }
    }

    /// Layout report from the row at `index`.
    ///
    /// Does not move the indicator; call [`sync_indicator`](Self::sync_indicator)
    /// once the layout pass is complete.
    pub fn report_layout(&mut self, index: usize, geometry: Geometry) -> bool {
        self.rows
            .get_mut(index)
            .is_some_and(|row| row.report_layout(geometry, &mut self.cache))
    }

    /// Retarget the indicator if the tracked option was re-measured.
    pub fn sync_indicator(&mut self) {
        let Some(id) = self.tracked.as_deref() else {
            return;
        };
        if !self.cache.take_dirty(id) {
            return;
        }
        if let Some(geometry) = self.cache.lookup(id) {
            self.motion.retarget(geometry);
        }
    }

    /// Complete layout pass: one geometry per row, in row order.
    pub fn layout(&mut self, geometries: &[Geometry]) {
        for (index, geometry) in geometries.iter().enumerate() {
            self.report_layout(index, *geometry);
        }
        self.sync_indicator();
    }

    /// Advance the indicator by one frame.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.motion.tick(dt)
    }

    /// Forget all measurements and motion, as on unmount.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.motion.reset();
        self.tracked = self.active.clone();
        for row in &mut self.rows {
            *row = OptionRow::new(row.option().clone());
        }
    }

    /// Drain the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<BarEvent> {
        mem::take(&mut self.outgoing_events)
    }

    #[must_use]
    pub fn state(&self) -> IndicatorState {
        let Some(id) = self.tracked.as_deref() else {
            return IndicatorState::Uninitialized;
        };
        if !self.cache.contains(id) || !self.motion.is_visible() {
            IndicatorState::Uninitialized
        } else if self.motion.is_animating() {
            IndicatorState::Transitioning
        } else {
            IndicatorState::Settled
        }
    }

    /// Indicator footprint to paint this frame.
    #[must_use]
    pub fn indicator(&self) -> Option<Geometry> {
        self.motion.current()
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn tracked(&self) -> Option<&str> {
        self.tracked.as_deref()
    }

    #[must_use]
    pub fn rows(&self) -> &[OptionRow] {
        &self.rows
    }

    pub fn options(&self) -> impl Iterator<Item = &SelectorOption> {
        self.rows.iter().map(OptionRow::option)
    }

    #[must_use]
    pub fn index_of(&self, identifier: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.identifier() == identifier)
    }

    /// Whether the row at `index` is drawn in its active style.
    #[must_use]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .is_some_and(|r| r.is_active(self.tracked.as_deref()))
    }

    #[must_use]
    pub const fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    #[must_use]
    pub const fn motion(&self) -> &MotionController {
        &self.motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn options(ids: &[&str]) -> Vec<SelectorOption> {
        ids.iter().map(|id| SelectorOption::new(*id)).collect()
    }

    fn columns(count: usize, width: f64) -> Vec<Geometry> {
        (0..count)
            .map(|i| Geometry::new(i as f64 * width, width))
            .collect()
    }

    fn bar_with(ids: &[&str], active: &str) -> SelectorBar {
        let mut bar = SelectorBar::default();
        bar.set_options(options(ids));
        bar.set_active(Some(active));
        bar.layout(&columns(ids.len(), 10.0));
        bar
    }

    #[test]
    fn test_uninitialized_until_first_layout() {
        let mut bar = SelectorBar::default();
        bar.set_options(options(&["a", "b"]));
        bar.set_active(Some("a"));

        assert_eq!(bar.state(), IndicatorState::Uninitialized);
        assert!(bar.indicator().is_none());

        bar.layout(&columns(2, 10.0));
        assert_eq!(bar.state(), IndicatorState::Settled);
        assert_eq!(bar.indicator(), Some(Geometry::new(0.0, 10.0)));
    }

    #[test]
    fn test_press_regular_option_requests_and_moves() {
        let mut bar = bar_with(&["a", "b"], "a");

        assert!(bar.activate(1));
        assert_eq!(
            bar.take_events(),
            vec![BarEvent::SelectionChangeRequested {
                identifier: "b".into()
            }]
        );
        assert_eq!(bar.state(), IndicatorState::Transitioning);
        assert_eq!(bar.active(), Some("a"), "host owns the selection");
        assert_eq!(bar.tracked(), Some("b"));
    }

    #[test]
    fn test_repress_active_option_is_noop() {
        let mut bar = bar_with(&["a", "b"], "a");

        assert!(!bar.activate(0));
        assert!(bar.take_events().is_empty());
        assert_eq!(bar.state(), IndicatorState::Settled);
    }

    #[test]
    fn test_out_of_range_activation_is_ignored() {
        let mut bar = bar_with(&["a"], "a");
        assert!(!bar.activate(7));
        assert!(!bar.activate_identifier("missing"));
        assert!(bar.take_events().is_empty());
    }

    #[test]
    fn test_layout_change_of_tracked_option_retargets() {
        let mut bar = bar_with(&["a", "b"], "a");
        bar.layout(&columns(2, 14.0));

        assert_eq!(bar.state(), IndicatorState::Transitioning);
        while bar.tick(FRAME) {}
        assert_eq!(bar.indicator(), Some(Geometry::new(0.0, 14.0)));
    }

    #[test]
    fn test_unmeasured_target_defers_until_reported() {
        let mut bar = SelectorBar::default();
        bar.set_options(options(&["a", "b"]));
        bar.set_active(Some("a"));
        bar.report_layout(0, Geometry::new(0.0, 10.0));
        bar.sync_indicator();

        bar.set_active(Some("b"));
        assert_eq!(bar.state(), IndicatorState::Uninitialized);
        assert_eq!(bar.indicator(), Some(Geometry::new(0.0, 10.0)));

        bar.report_layout(1, Geometry::new(10.0, 10.0));
        bar.sync_indicator();
        assert_eq!(bar.state(), IndicatorState::Transitioning);
    }

    #[test]
    fn test_reorder_keeps_cache_and_remeasures() {
        let mut bar = bar_with(&["a", "b", "c"], "c");
        bar.set_options(options(&["c", "a", "b"]));

        assert_eq!(bar.cache().len(), 3);
        assert_eq!(bar.index_of("c"), Some(0));

        bar.layout(&columns(3, 10.0));
        assert_eq!(bar.motion().target(), Some(Geometry::new(0.0, 10.0)));
    }

    #[test]
    fn test_resync_returns_to_host_selection() {
        let mut bar = bar_with(&["a", "b"], "a");
        bar.activate(1);
        bar.resync();

        assert_eq!(bar.tracked(), Some("a"));
        while bar.tick(FRAME) {}
        assert_eq!(bar.indicator(), Some(Geometry::new(0.0, 10.0)));
    }

    #[test]
    fn test_clearing_active_hides_indicator() {
        let mut bar = bar_with(&["a", "b"], "a");
        bar.set_active(None);

        assert_eq!(bar.state(), IndicatorState::Uninitialized);
        assert!(bar.indicator().is_none());
    }

    #[test]
    fn test_reset_forgets_measurements() {
        let mut bar = bar_with(&["a", "b"], "b");
        bar.reset();

        assert!(bar.cache().is_empty());
        assert!(bar.indicator().is_none());
        assert_eq!(bar.tracked(), Some("b"));

        bar.layout(&columns(2, 10.0));
        assert_eq!(bar.indicator(), Some(Geometry::new(10.0, 10.0)));
        assert_eq!(bar.state(), IndicatorState::Settled);
    }
}
