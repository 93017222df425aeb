//! Completion alert playback

use futures::future::BoxFuture;
use tokio::process::Command;
use tracing::{debug, info};

/// Result of asking for the completion alert to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    Played,
    /// Playback was refused; carries the reason
    Blocked(String),
}

/// Plays the audible alert when a countdown completes
pub trait AlertNotifier: Send + Sync {
    fn notify(&self) -> BoxFuture<'_, AlertOutcome>;
}

/// Warning shown to the user when the alert could not play
pub fn blocked_warning(reason: &str) -> String {
    format!(
        "Timer end sound could not play automatically ({}). \
         Interact with the widget to enable sound, then retry the timer.",
        reason
    )
}

/// Plays the alert by running an external player command once
#[derive(Debug, Clone)]
pub struct CommandAlert {
    program: String,
    args: Vec<String>,
}

impl CommandAlert {
    /// Split a command line using shell quoting rules.
    ///
    /// Returns `None` for an empty or badly quoted command line.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut words = shlex::split(command_line)?.into_iter();
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl AlertNotifier for CommandAlert {
    fn notify(&self) -> BoxFuture<'_, AlertOutcome> {
        Box::pin(async move {
            debug!("Playing alert with {} {:?}", self.program, self.args);

            let output = match Command::new(&self.program).args(&self.args).output().await {
                Ok(output) => output,
                Err(e) => return AlertOutcome::Blocked(format!("failed to run {}: {}", self.program, e)),
            };

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return AlertOutcome::Blocked(format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ));
            }

            info!("Timer end sound played");
            AlertOutcome::Played
        })
    }
}

/// Alert that only logs; used when no player command is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlert;

impl AlertNotifier for LogAlert {
    fn notify(&self) -> BoxFuture<'_, AlertOutcome> {
        Box::pin(async {
            info!("Timer finished (no alert command configured)");
            AlertOutcome::Played
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Notifier that records how often it was invoked
    #[derive(Debug)]
    pub struct CountingAlert {
        calls: AtomicUsize,
        outcome: AlertOutcome,
    }

    impl CountingAlert {
        pub fn playing() -> Self {
            Self { calls: AtomicUsize::new(0), outcome: AlertOutcome::Played }
        }

        pub fn blocked(reason: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: AlertOutcome::Blocked(reason.to_string()),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AlertNotifier for CountingAlert {
        fn notify(&self) -> BoxFuture<'_, AlertOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_quoted_command_lines() {
        let alert = CommandAlert::parse("paplay '/usr/share/sounds/alarm clock.oga'").unwrap();
        assert_eq!(alert.program(), "paplay");
        assert_eq!(alert.args, vec!["/usr/share/sounds/alarm clock.oga".to_string()]);
    }

    #[test]
    fn rejects_empty_and_unbalanced_command_lines() {
        assert!(CommandAlert::parse("   ").is_none());
        assert!(CommandAlert::parse("paplay 'unterminated").is_none());
    }

    #[tokio::test]
    async fn missing_player_is_blocked() {
        let alert = CommandAlert::parse("study-clock-no-such-player --beep").unwrap();
        assert!(matches!(alert.notify().await, AlertOutcome::Blocked(_)));
    }

    #[tokio::test]
    async fn log_alert_always_plays() {
        assert_eq!(LogAlert.notify().await, AlertOutcome::Played);
    }

    #[test]
    fn warning_mentions_the_reason() {
        assert!(blocked_warning("no audio device").contains("no audio device"));
    }
}
