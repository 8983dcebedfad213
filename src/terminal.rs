use std::io::{self, Stdout, Write};

use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use log::warn;

/// Raw mode plus the alternate screen, restored when dropped.
///
/// Whatever setup step succeeded is undone, also when a later step fails.
pub struct TerminalGuard<W: Write> {
    out: W,
    raw: bool,
}

impl TerminalGuard<Stdout> {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Self::open(io::stdout(), true)
    }
}

impl<W: Write> TerminalGuard<W> {
    /// `raw` says whether raw mode is already on and must be switched off again.
    fn open(out: W, raw: bool) -> io::Result<Self> {
        let mut guard = Self { out, raw };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        execute!(self.out, LeaveAlternateScreen, cursor::Show)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("could not restore the terminal: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records what was written and fails the first `failures` writes.
    struct Tape {
        written: Rc<RefCell<Vec<u8>>>,
        failures: usize,
    }

    impl Write for Tape {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::other("terminal went away"));
            }
            self.written.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn tape(failures: usize) -> (Tape, Rc<RefCell<Vec<u8>>>) {
        let written = Rc::new(RefCell::new(Vec::new()));
        let tape = Tape { written: Rc::clone(&written), failures };
        (tape, written)
    }

    fn text(written: &Rc<RefCell<Vec<u8>>>) -> String {
        String::from_utf8_lossy(&written.borrow()).into_owned()
    }

    #[test]
    fn failed_alternate_screen_still_restores() {
        let (out, written) = tape(1);
        assert!(TerminalGuard::open(out, false).is_err());
        let text = text(&written);
        assert!(text.contains("\x1b[?1049l"), "got {text:?}");
        assert!(text.contains("\x1b[?25h"), "got {text:?}");
    }

    #[test]
    fn drop_leaves_the_alternate_screen() {
        let (out, written) = tape(0);
        let guard = TerminalGuard::open(out, false).unwrap();
        assert_eq!(text(&written), "\x1b[?1049h");
        drop(guard);
        assert_eq!(text(&written), "\x1b[?1049h\x1b[?1049l\x1b[?25h");
    }
}
