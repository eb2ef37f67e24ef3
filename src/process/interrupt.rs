//! Ctrl-C routing.
//!
//! One process-wide handler is installed at startup. While a child process
//! is running the signal is delivered to the runner, which aborts just that
//! child; otherwise the session ends with a short message.

use crate::error::{AppError, Result};
use colored::*;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tracing::{info, warn};

/// Shared handle between the signal handler and the command runner.
#[derive(Clone, Default)]
pub struct Interrupts {
    // `Some` only while a child is running; each run gets a fresh `Notify`.
    active: Arc<Mutex<Option<Arc<Notify>>>>,
}

impl Interrupts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the Ctrl-C handler. Must be called at most once per process.
    pub fn install(&self) -> Result<()> {
        let interrupts = self.clone();
        ctrlc::set_handler(move || {
            if !interrupts.trigger() {
                exit_session();
            }
        })
        .map_err(|e| AppError::Cli(format!("failed to set Ctrl-C handler: {}", e)))?;
        info!("Ctrl-C handler installed");
        Ok(())
    }

    /// Delivers an interruption to the running child, if any.
    ///
    /// Returns `false` when no child is running.
    pub fn trigger(&self) -> bool {
        let active = match self.active.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        match active {
            Some(notify) => {
                warn!("Interrupt received while a child process is running");
                notify.notify_one();
                true
            },
            None => false,
        }
    }

    /// Marks a child as running until the returned guard is dropped.
    pub fn child_guard(&self) -> ChildGuard {
        let notify = Arc::new(Notify::new());
        self.set_active(Some(Arc::clone(&notify)));
        ChildGuard {
            interrupts: self.clone(),
            notify,
        }
    }

    #[cfg(test)]
    pub fn child_running(&self) -> bool {
        match self.active.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    fn set_active(&self, value: Option<Arc<Notify>>) {
        match self.active.lock() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

/// Keeps the interrupt routed to one child process for its lifetime.
pub struct ChildGuard {
    interrupts: Interrupts,
    notify: Arc<Notify>,
}

impl ChildGuard {
    /// Completes once Ctrl-C is pressed while this guard is alive.
    pub async fn interrupted(&self) {
        self.notify.notified().await;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.interrupts.set_active(None);
    }
}

/// Prints the end-of-session message, restoring the cursor first.
pub fn print_exit_message() {
    // Prompts may have hidden the cursor.
    print!("\x1b[?25h");
    println!("\n{}", "Exit".red());
    let _ = std::io::stdout().flush();
}

/// Ends the session from outside any child run.
fn exit_session() -> ! {
    info!("Interrupt received at prompt, exiting");
    print_exit_message();
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_trigger_without_child_is_not_delivered() {
        let interrupts = Interrupts::new();
        assert!(!interrupts.child_running());
        assert!(!interrupts.trigger());
    }

    #[tokio::test]
    async fn test_trigger_reaches_running_child() {
        let interrupts = Interrupts::new();
        let guard = interrupts.child_guard();
        assert!(interrupts.child_running());
        assert!(interrupts.trigger());

        // The permit is stored, so a later await completes immediately.
        tokio::time::timeout(Duration::from_secs(1), guard.interrupted())
            .await
            .expect("interrupt should have been delivered");
    }

    #[tokio::test]
    async fn test_stale_interrupt_does_not_leak_into_next_child() {
        let interrupts = Interrupts::new();
        {
            let _first = interrupts.child_guard();
            assert!(interrupts.trigger());
        }
        assert!(!interrupts.child_running());

        let second = interrupts.child_guard();
        let waited = tokio::time::timeout(Duration::from_millis(100), second.interrupted()).await;
        assert!(waited.is_err());
    }
}
