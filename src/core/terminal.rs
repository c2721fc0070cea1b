//! Terminal rendering and event loop for filesum.
//!
//! Handles setup/teardown of raw mode and the alternate screen, and runs the loop that
//! drains the notification channel and redraws.
//!
//! Terminal events are read on a separate forwarding thread and arrive as
//! [Notification::Input] / [Notification::Resize], so the loop blocks on a single receiver
//! that also carries fetch results and redraw requests.

use crate::app::{AppState, EventResult};
use crate::core::worker::Notification;
use crate::ui;

use crossbeam_channel::{Receiver, Sender};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. The terminal is restored before any loop error is returned.
///
/// Returns an std::io::Error if terminal setup, input or teardown fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let stop = Arc::new(AtomicBool::new(false));
    let result = match spawn_input_forwarder(app.sender(), Arc::clone(&stop)) {
        Ok(input) => {
            let result = event_loop(&mut terminal, app);
            stop.store(true, Ordering::Release);
            if input.join().is_err() {
                tracing::error!("input thread panicked");
            }
            result
        }
        Err(e) => Err(e),
    };

    let restored = disable_raw_mode()
        .and_then(|()| execute!(terminal.backend_mut(), LeaveAlternateScreen, Show));
    tracing::info!(
        fetches = app.fetcher().spawned(),
        still_running = app.fetcher().active(),
        ok = result.is_ok(),
        "quit"
    );
    result.and(restored)
}

/// Main event loop of filesum: pumps the channel and draws whenever a pump asks for it.
/// Returns on quit or when terminal input is lost.
pub fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let events = app.events().clone();
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        match pump(app, &events)? {
            EventResult::Quit => return Ok(()),
            EventResult::Redraw => {
                terminal.draw(|f| ui::render(f, app))?;
            }
            EventResult::Idle => {}
        }
    }
}

/// Blocks for one notification, then handles everything already queued behind it.
///
/// Returns `Redraw` if any of them asked for a redraw, `Quit` as soon as one asks to quit.
pub fn pump(app: &mut AppState, events: &Receiver<Notification>) -> io::Result<EventResult> {
    let first = events
        .recv()
        .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "notification channel closed"))?;

    let mut dirty = false;
    for notification in std::iter::once(first).chain(events.try_iter()) {
        match app.handle_notification(notification)? {
            EventResult::Quit => return Ok(EventResult::Quit),
            EventResult::Redraw => dirty = true,
            EventResult::Idle => {}
        }
    }
    Ok(if dirty {
        EventResult::Redraw
    } else {
        EventResult::Idle
    })
}

/// Forwards crossterm events onto the notification channel until `stop` is set or the
/// receiver is dropped. A poll or read failure is forwarded as [Notification::InputFailed].
fn spawn_input_forwarder(
    tx: Sender<Notification>,
    stop: Arc<AtomicBool>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("filesum-input".into())
        .spawn(move || {
            while !stop.load(Ordering::Acquire) {
                match event::poll(INPUT_POLL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "terminal poll failed");
                        let _ = tx.send(Notification::InputFailed(e));
                        return;
                    }
                }

                let notification = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Notification::Input(key)
                    }
                    Ok(Event::Resize(width, height)) => Notification::Resize { width, height },
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::error!(error = %e, "terminal read failed");
                        let _ = tx.send(Notification::InputFailed(e));
                        return;
                    }
                };

                if tx.send(notification).is_err() {
                    return;
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::path::PathBuf;

    fn key(code: KeyCode) -> Notification {
        Notification::Input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn pump_batches_queued_notifications() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let mut app = AppState::new(&config, PathBuf::from("."), vec![PathBuf::from("a")]);
        let events = app.events().clone();
        let tx = app.sender();

        tx.send(key(KeyCode::Down))?;
        tx.send(Notification::EntriesChanged)?;
        assert_eq!(pump(&mut app, &events)?, EventResult::Redraw);
        assert!(events.is_empty());

        tx.send(key(KeyCode::Char('q')))?;
        tx.send(key(KeyCode::Down))?;
        assert_eq!(pump(&mut app, &events)?, EventResult::Quit);
        Ok(())
    }

    #[test]
    fn lost_input_ends_the_loop_with_its_error() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let mut app = AppState::new(&config, PathBuf::from("."), Vec::new());
        let events = app.events().clone();
        let tx = app.sender();

        tx.send(key(KeyCode::Down))?;
        tx.send(Notification::InputFailed(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "tty closed",
        )))?;
        let err = pump(&mut app, &events).err().ok_or("input failure was swallowed")?;
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        Ok(())
    }

    #[test]
    fn closed_channel_is_an_error() {
        let config = Config::default();
        let mut app = AppState::new(&config, PathBuf::from("."), Vec::new());
        let (tx, rx) = crossbeam_channel::unbounded::<Notification>();
        drop(tx);
        let err = pump(&mut app, &rx).err();
        assert_eq!(err.map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
    }
}
