//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Stopped,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Lifecycle of a single recording session.
///
/// State machine:
///   IDLE -> RECORDING (begin)
///   RECORDING -> STOPPED (finish)
///
/// STOPPED is terminal: a process records at most once.
#[derive(Debug, Default)]
pub struct RecordingLifecycle {
    state: SessionState,
}

impl RecordingLifecycle {
    /// Create a new lifecycle in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Check if the session has been stopped
    pub fn is_stopped(&self) -> bool {
        self.state == SessionState::Stopped
    }

    /// Transition from IDLE to RECORDING
    pub fn begin(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "start recording".to_string(),
            });
        }
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to STOPPED
    pub fn finish(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "stop recording".to_string(),
            });
        }
        self.state = SessionState::Stopped;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lifecycle_is_idle() {
        let lifecycle = RecordingLifecycle::new();
        assert_eq!(lifecycle.state(), SessionState::Idle);
        assert!(!lifecycle.is_recording());
        assert!(!lifecycle.is_stopped());
    }

    #[test]
    fn begin_from_idle() {
        let mut lifecycle = RecordingLifecycle::new();
        assert!(lifecycle.begin().is_ok());
        assert!(lifecycle.is_recording());
    }

    #[test]
    fn begin_twice_fails() {
        let mut lifecycle = RecordingLifecycle::new();
        lifecycle.begin().unwrap();

        let err = lifecycle.begin().unwrap_err();
        assert_eq!(err.current_state, SessionState::Recording);
        assert!(err.action.contains("start recording"));
    }

    #[test]
    fn finish_from_recording() {
        let mut lifecycle = RecordingLifecycle::new();
        lifecycle.begin().unwrap();

        assert!(lifecycle.finish().is_ok());
        assert!(lifecycle.is_stopped());
    }

    #[test]
    fn finish_from_idle_fails() {
        let mut lifecycle = RecordingLifecycle::new();

        let err = lifecycle.finish().unwrap_err();
        assert_eq!(err.current_state, SessionState::Idle);
    }

    #[test]
    fn finish_twice_fails() {
        let mut lifecycle = RecordingLifecycle::new();
        lifecycle.begin().unwrap();
        lifecycle.finish().unwrap();

        let err = lifecycle.finish().unwrap_err();
        assert_eq!(err.current_state, SessionState::Stopped);
    }

    #[test]
    fn stopped_is_terminal() {
        let mut lifecycle = RecordingLifecycle::new();
        lifecycle.begin().unwrap();
        lifecycle.finish().unwrap();

        let err = lifecycle.begin().unwrap_err();
        assert_eq!(err.current_state, SessionState::Stopped);
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Recording.to_string(), "recording");
        assert_eq!(SessionState::Stopped.to_string(), "stopped");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: SessionState::Stopped,
            action: "start recording".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("start recording"));
        assert!(msg.contains("stopped"));
    }
}
