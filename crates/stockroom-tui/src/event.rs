//! Terminal input plus fixed-rate tick and render beats, merged into one
//! channel by a background task.

use std::io;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Spinner beat.
    Tick,
    /// Frame beat.
    Render,
}

/// Only key presses and resizes matter to the item screens; releases,
/// repeats, mouse, focus and paste are dropped.
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Read from the real terminal.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        Self::with_source(EventStream::new(), tick_rate, render_rate)
    }

    /// Read from any crossterm-shaped stream. A source that ends or
    /// errors stops contributing input; the beats keep going.
    fn with_source<S>(source: S, tick_rate: Duration, render_rate: Duration) -> Self
    where
        S: Stream<Item = io::Result<CrosstermEvent>> + Send + Unpin + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            let mut source = source.fuse();
            let mut tick = tokio::time::interval(tick_rate);
            let mut render = tokio::time::interval(render_rate);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            render.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = task_cancel.cancelled() => break,
                    _ = tick.tick() => Event::Tick,
                    _ = render.tick() => Event::Render,
                    Some(Ok(raw)) = source.next() => match translate(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_presses_and_resizes_pass() {
        assert_eq!(
            translate(key(KeyCode::Char('a'), KeyEventKind::Press)),
            Some(Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)))
        );
        assert_eq!(translate(key(KeyCode::Char('a'), KeyEventKind::Release)), None);
        assert_eq!(translate(CrosstermEvent::Resize(100, 30)), Some(Event::Resize(100, 30)));
        assert_eq!(translate(CrosstermEvent::FocusLost), None);
    }

    #[tokio::test(start_paused = true)]
    async fn merges_input_with_beats() {
        let input = futures::stream::iter(vec![
            Ok(key(KeyCode::Char('q'), KeyEventKind::Release)),
            Ok(key(KeyCode::Char('j'), KeyEventKind::Press)),
        ]);
        let mut reader =
            EventReader::with_source(input, Duration::from_secs(3600), Duration::from_secs(3600));

        // Both intervals fire immediately once; the release is dropped.
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(reader.next().await.unwrap());
        }
        assert!(seen.contains(&Event::Tick));
        assert!(seen.contains(&Event::Render));
        assert!(seen.contains(&Event::Key(KeyEvent::new(
            KeyCode::Char('j'),
            KeyModifiers::NONE
        ))));

        reader.stop();
        assert_eq!(reader.next().await, None);
    }
}
