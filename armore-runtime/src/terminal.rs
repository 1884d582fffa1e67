//! Terminal status readout
//!
//! A run writes through the `Ticket` it got when it opened the terminal.
//! Closing the terminal invalidates every outstanding ticket, so output from a
//! run the user dismissed never shows up, not even after the terminal is
//! opened again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

/// What the user currently sees
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminalView {
    pub open: bool,
    pub text: String,
}

/// Write permission for one terminal session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Shared {
    session: u64,
    view: TerminalView,
    history: Vec<String>,
}

/// Shared handle to the status readout
#[derive(Debug, Clone)]
pub struct Terminal {
    shared: Arc<Mutex<Shared>>,
    watch: Arc<watch::Sender<TerminalView>>,
}

impl Terminal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(TerminalView::default());
        Terminal {
            shared: Arc::new(Mutex::new(Shared::default())),
            watch: Arc::new(tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the terminal with a blank screen and start a new session.
    ///
    /// The history restarts with the session.
    pub fn open(&self) -> Ticket {
        let mut shared = self.lock();
        shared.session += 1;
        shared.history.clear();
        shared.view = TerminalView {
            open: true,
            text: String::new(),
        };
        self.watch.send_replace(shared.view.clone());
        Ticket(shared.session)
    }

    /// Hide the terminal; writes through older tickets are dropped from now on
    pub fn close(&self) {
        let mut shared = self.lock();
        shared.session += 1;
        shared.view.open = false;
        self.watch.send_replace(shared.view.clone());
    }

    /// Replace the displayed text.
    ///
    /// Returns `false` (and changes nothing) if the ticket's session is over.
    pub fn print(&self, ticket: Ticket, text: impl Into<String>) -> bool {
        let mut shared = self.lock();
        if ticket.0 != shared.session || !shared.view.open {
            return false;
        }

        let text = text.into();
        shared.history.push(text.clone());
        shared.view.text = text;
        self.watch.send_replace(shared.view.clone());
        true
    }

    pub fn is_open(&self) -> bool {
        self.lock().view.open
    }

    /// Text currently on screen (kept while closed)
    pub fn text(&self) -> String {
        self.lock().view.text.clone()
    }

    pub fn view(&self) -> TerminalView {
        self.lock().view.clone()
    }

    /// Every text shown since the last `open`, oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Live view updates
    pub fn subscribe(&self) -> watch::Receiver<TerminalView> {
        self.watch.subscribe()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_terminal_is_closed() {
        let terminal = Terminal::new();
        assert!(!terminal.is_open());
        assert_eq!(terminal.text(), "");
        assert!(terminal.history().is_empty());
    }

    #[test]
    fn test_print_records_history() {
        let terminal = Terminal::new();
        let ticket = terminal.open();

        assert!(terminal.print(ticket, "Assembling..."));
        assert!(terminal.print(ticket, "Assembling ✔️"));

        assert_eq!(terminal.text(), "Assembling ✔️");
        assert_eq!(terminal.history(), vec!["Assembling...", "Assembling ✔️"]);
    }

    #[test]
    fn test_close_drops_late_writes() {
        let terminal = Terminal::new();
        let ticket = terminal.open();
        terminal.print(ticket, "Linking ...");
        terminal.close();

        assert!(!terminal.print(ticket, "hello"));
        assert!(!terminal.is_open());
        assert_eq!(terminal.text(), "Linking ...");
        assert_eq!(terminal.history(), vec!["Linking ..."]);
    }

    #[test]
    fn test_reopen_invalidates_old_ticket() {
        let terminal = Terminal::new();
        let old = terminal.open();
        terminal.close();
        let new = terminal.open();

        assert!(!terminal.print(old, "stale"));
        assert!(terminal.print(new, "fresh"));
        assert_eq!(terminal.text(), "fresh");
    }

    #[test]
    fn test_open_blanks_screen() {
        let terminal = Terminal::new();
        let ticket = terminal.open();
        terminal.print(ticket, "old output");

        terminal.open();
        assert_eq!(terminal.text(), "");
        assert!(terminal.is_open());
        assert!(terminal.history().is_empty());
    }

    #[test]
    fn test_history_bounded_by_session() {
        let terminal = Terminal::new();
        for run in 0..100 {
            let ticket = terminal.open();
            terminal.print(ticket, "Running ...");
            terminal.print(ticket, format!("output {}", run));
        }
        assert_eq!(terminal.history(), vec!["Running ...", "output 99"]);
    }

    #[test]
    fn test_subscribe_sees_updates() {
        let terminal = Terminal::new();
        let rx = terminal.subscribe();
        let ticket = terminal.open();
        terminal.print(ticket, "Running ...");

        assert_eq!(
            *rx.borrow(),
            TerminalView {
                open: true,
                text: "Running ...".to_string()
            }
        );

        terminal.close();
        assert!(!rx.borrow().open);
    }

    #[test]
    fn test_clones_share_state() {
        let terminal = Terminal::new();
        let other = terminal.clone();
        let ticket = terminal.open();
        other.print(ticket, "shared");
        assert_eq!(terminal.text(), "shared");
    }
}
