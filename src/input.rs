use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, error};

use crate::snake::Direction::{self, *};

/// Latest heading requested by the player. Written by the input thread, read
/// once per tick by the game loop; only the newest value matters.
#[derive(Clone, Debug)]
pub struct PendingHeading(Arc<AtomicU8>);

impl PendingHeading {
    pub fn new(heading: Direction) -> Self {
        PendingHeading(Arc::new(AtomicU8::new(heading.tag())))
    }

    pub fn store(&self, heading: Direction) {
        self.0.store(heading.tag(), Ordering::Relaxed);
    }

    pub fn load(&self) -> Direction {
        let tag = self.0.load(Ordering::Relaxed);
        match Direction::from_tag(tag) {
            Some(heading) => heading,
            None => unreachable!("pending heading holds unknown tag {}", tag),
        }
    }
}

/// Everything other than steering that the game loop reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Quit,
    TogglePause,
    Resize { cols: u16, rows: u16 },
    /// Any key that is not a quit key.
    Pressed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    TogglePause,
    Quit,
    Other,
}

pub fn classify(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeyAction::Steer(North),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Steer(West),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeyAction::Steer(South),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Steer(East),
        KeyCode::Esc => KeyAction::TogglePause,
        _ => KeyAction::Other,
    }
}

/// Routes one terminal event. Returns `false` once the game loop has hung up.
pub fn forward(ev: Event, pending: &PendingHeading, controls: &Sender<Control>) -> bool {
    let control = match ev {
        Event::Key(key) if key.kind == KeyEventKind::Release => return true,
        Event::Key(key) => match classify(&key) {
            KeyAction::Quit => Control::Quit,
            KeyAction::TogglePause => Control::TogglePause,
            KeyAction::Steer(heading) => {
                pending.store(heading);
                Control::Pressed
            }
            KeyAction::Other => Control::Pressed,
        },
        Event::Resize(cols, rows) => Control::Resize { cols, rows },
        _ => return true,
    };

    controls.send(control).is_ok()
}

/// Reads terminal events on a dedicated thread for the rest of the process.
pub fn spawn_input_thread(pending: PendingHeading, controls: Sender<Control>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new().name("input".into()).spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if !forward(ev, &pending, &controls) {
                    debug!("game loop gone, input thread exiting");
                    break;
                }
            }
            Err(err) => {
                error!(%err, "reading terminal events failed");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_and_arrows_steer() {
        assert_eq!(classify(&key(KeyCode::Char('w'))), KeyAction::Steer(North));
        assert_eq!(classify(&key(KeyCode::Char('A'))), KeyAction::Steer(West));
        assert_eq!(classify(&key(KeyCode::Down)), KeyAction::Steer(South));
        assert_eq!(classify(&key(KeyCode::Right)), KeyAction::Steer(East));
    }

    #[test]
    fn quit_pause_and_others() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify(&ctrl_c), KeyAction::Quit);
        assert_eq!(classify(&key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(classify(&key(KeyCode::Char('c'))), KeyAction::Other);
        assert_eq!(classify(&key(KeyCode::Esc)), KeyAction::TogglePause);
        assert_eq!(classify(&key(KeyCode::Enter)), KeyAction::Other);
    }

    #[test]
    fn pending_heading_keeps_the_last_write() {
        let pending = PendingHeading::new(South);
        let writer = pending.clone();
        writer.store(East);
        writer.store(North);
        assert_eq!(pending.load(), North);
    }

    #[test]
    #[should_panic(expected = "unknown tag")]
    fn corrupted_heading_aborts() {
        let pending = PendingHeading::new(South);
        pending.0.store(9, Ordering::Relaxed);
        pending.load();
    }

    #[test]
    fn forward_splits_steering_from_controls() {
        let pending = PendingHeading::new(South);
        let (tx, rx) = mpsc::channel();

        assert!(forward(Event::Key(key(KeyCode::Left)), &pending, &tx));
        assert!(forward(Event::Resize(80, 24), &pending, &tx));
        assert!(forward(Event::Key(key(KeyCode::Esc)), &pending, &tx));
        assert!(forward(Event::FocusLost, &pending, &tx));

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert!(forward(Event::Key(release), &pending, &tx));

        assert_eq!(pending.load(), West);
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![Control::Pressed, Control::Resize { cols: 80, rows: 24 }, Control::TogglePause]
        );
    }

    #[test]
    fn forward_reports_a_closed_loop() {
        let pending = PendingHeading::new(South);
        let (tx, rx) = mpsc::channel();
        drop(rx);

        assert!(!forward(Event::Key(key(KeyCode::Char('x'))), &pending, &tx));
    }
}
