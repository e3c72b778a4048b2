//! Headless run of the bar, one JSON line per frame.
//!
//! Lays the configured tabs out across a fixed width and replays a list of
//! presses on the frame clock, recording what would be painted each frame.

use std::{io::Write, time::Duration};

use serde::Serialize;

use crate::{
    config::Config,
    error::Result,
    selector::{BarEvent, Geometry, IndicatorState, SelectorBar},
    tui::{
        navigator::{Navigator, Routed},
        widgets::column_geometries,
    },
};

/// Frames run after the last press before giving up on settling.
const SETTLE_LIMIT: usize = 600;

#[derive(Debug, Clone)]
pub struct TraceOptions {
    pub width: u16,
    pub presses: Vec<String>,
    /// Frames between consecutive presses.
    pub frames_between: usize,
    pub frame: Duration,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            width: 60,
            presses: Vec::new(),
            frames_between: 6,
            frame: Duration::from_millis(16),
        }
    }
}

/// What one frame painted, and the events raised while handling it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceFrame {
    pub frame: usize,
    pub state: IndicatorState,
    pub active: Option<String>,
    pub tracked: Option<String>,
    pub indicator: Option<Geometry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<BarEvent>,
}

/// Run the trace to completion.
#[must_use]
pub fn run(config: &Config, options: &TraceOptions) -> Vec<TraceFrame> {
    let mut bar = SelectorBar::new(config.spring);
    bar.set_options(config.options());
    let mut navigator = Navigator::from_config(config);
    navigator.route(&mut bar);

    let geometries = column_geometries(options.width, bar.rows().len());
    let spacing = options.frames_between.max(1);
    let last_press = options.presses.len() * spacing;
    let mut frames = Vec::new();

    for frame in 0.. {
        let mut record = TraceFrame {
            frame,
            state: bar.state(),
            active: bar.active().map(ToOwned::to_owned),
            tracked: bar.tracked().map(ToOwned::to_owned),
            indicator: bar.indicator(),
            events: Vec::new(),
        };
        let settled = navigator.is_idle() && record.state != IndicatorState::Transitioning;
        if frame > last_press && (settled || frame > last_press + SETTLE_LIMIT) {
            frames.push(record);
            break;
        }

        bar.layout(&geometries);

        if frame > 0 && frame % spacing == 0 {
            if let Some(id) = options.presses.get(frame / spacing - 1) {
                bar.activate_identifier(id);
            }
        }
        record.events = bar.take_events();
        for event in record.events.iter().cloned() {
            if navigator.dispatch(event) == Routed::Prevented {
                bar.resync();
            }
        }

        navigator.advance(options.frame);
        bar.set_active(navigator.active());
        bar.tick(options.frame);
        frames.push(record);
    }
    frames
}

/// Write frames as JSON lines.
pub fn write<W: Write>(frames: &[TraceFrame], mut out: W) -> Result<()> {
    for frame in frames {
        serde_json::to_writer(&mut out, frame)?;
        writeln!(out)?;
    }
    Ok(())
}
