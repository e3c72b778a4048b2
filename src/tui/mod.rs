//! Terminal host for the selector bar.

pub mod app;
pub mod navigator;
mod ui;
pub mod widgets;

use std::io::{stdout, Write};

use app::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::info;

use crate::{config::Config, error::Result};

/// Restores the terminal when dropped, including on early error returns.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        guard
            .out
            .execute(EnterAlternateScreen)?
            .execute(EnableMouseCapture)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self
            .out
            .execute(DisableMouseCapture)
            .and_then(|out| out.execute(LeaveAlternateScreen));
    }
}

pub async fn run(config: Config) -> Result<()> {
    let _guard = TerminalGuard::enter(stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);
    let mut event_stream = EventStream::new();
    let mut frames = interval(app.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();
    info!(tabs = app.tabs().len(), "tab bar started");

    while !app.should_exit {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            Some(Ok(event)) = event_stream.next() => {
                app.handle_event(&event);
            }
            now = frames.tick() => {
                app.tick(now.duration_since(last_frame));
                last_frame = now;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    const LEAVE_ALTERNATE_SCREEN: &[u8] = b"\x1b[?1049l";

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn fail_while_guarded(out: &mut Vec<u8>) -> Result<()> {
        let _guard = TerminalGuard { out };
        Err::<(), _>(io::Error::other("draw failed"))?;
        Ok(())
    }

    #[test]
    fn test_guard_restores_screen_on_error() {
        let mut out = Vec::new();
        assert!(fail_while_guarded(&mut out).is_err());
        assert!(contains(&out, LEAVE_ALTERNATE_SCREEN));
    }

    #[test]
    fn test_guard_restores_screen_on_drop() {
        let mut out = Vec::new();
        drop(TerminalGuard { out: &mut out });
        assert!(contains(&out, LEAVE_ALTERNATE_SCREEN));
    }
}
