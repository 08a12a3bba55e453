//! Event types and the input reader thread

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{Event, KeyEvent};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long the reader waits for input before checking for shutdown
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// User input
    Input(KeyEvent),
    /// Terminal resized to (cols, rows)
    Resize(u16, u16),
}

/// Reads terminal events on a background thread.
///
/// Dropping the reader stops the thread before the terminal is handed back.
pub struct EventReader {
    event_rx: Receiver<AppEvent>,
    stop: Arc<AtomicBool>,
    reader_thread: Option<thread::JoinHandle<()>>,
}

impl EventReader {
    /// Spawn the reader thread
    pub fn spawn() -> Self {
        Self::spawn_with(next_terminal_event)
    }

    fn spawn_with<F>(next_event: F) -> Self
    where
        F: FnMut() -> io::Result<Option<Event>> + Send + 'static,
    {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let stop = Arc::new(AtomicBool::new(false));

        let thread_stop = Arc::clone(&stop);
        let reader_thread = thread::spawn(move || {
            reader_loop(event_tx, &thread_stop, next_event);
        });

        Self {
            event_rx,
            stop,
            reader_thread: Some(reader_thread),
        }
    }

    /// Underlying receiver, for use in `select!`
    pub fn receiver(&self) -> &Receiver<AppEvent> {
        &self.event_rx
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.reader_thread.take() {
            if handle.join().is_err() {
                log::error!("input reader panicked");
            }
        }
    }
}

/// Wait up to one poll interval for a terminal event
fn next_terminal_event() -> io::Result<Option<Event>> {
    if crossterm::event::poll(POLL_INTERVAL)? {
        crossterm::event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Reader thread main loop
fn reader_loop<F>(event_tx: Sender<AppEvent>, stop: &AtomicBool, mut next_event: F)
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !stop.load(Ordering::Relaxed) {
        let event = match next_event() {
            Ok(Some(Event::Key(key))) => AppEvent::Input(key),
            Ok(Some(Event::Resize(cols, rows))) => AppEvent::Resize(cols, rows),
            Ok(_) => continue,
            Err(e) => {
                log::error!("failed to read terminal event: {e}");
                break;
            }
        };

        if event_tx.send(event).is_err() {
            // Receiver gone, the app is shutting down
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_events_are_forwarded() {
        let mut pending = vec![
            Event::Resize(80, 24),
            Event::FocusGained,
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
        ];
        let reader = EventReader::spawn_with(move || {
            thread::sleep(Duration::from_millis(1));
            Ok(pending.pop())
        });

        let first = reader.receiver().recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, AppEvent::Input(key) if key.code == KeyCode::Char('q')));
        let second = reader.receiver().recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(second, AppEvent::Resize(80, 24)));
    }

    #[test]
    fn test_drop_stops_idle_reader() {
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        thread::spawn(move || {
            // Never any input: only the stop flag can end the loop
            let reader = EventReader::spawn_with(|| {
                thread::sleep(Duration::from_millis(5));
                Ok(None)
            });
            drop(reader);
            let _ = done_tx.send(());
        });

        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
