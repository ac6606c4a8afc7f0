//! Run lifecycle triggers and their card colours.

use std::str::FromStr;

use thiserror::Error;

/// Lifecycle event that caused Terraform Cloud to send a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunTrigger {
    Created,
    Planning,
    NeedsAttention,
    Applying,
    Completed,
    Errored,
}

/// Returned when a trigger string is not one of the known lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported trigger: {0}")]
pub struct UnknownTrigger(pub String);

impl RunTrigger {
    pub const ALL: [RunTrigger; 6] = [
        RunTrigger::Created,
        RunTrigger::Planning,
        RunTrigger::NeedsAttention,
        RunTrigger::Applying,
        RunTrigger::Completed,
        RunTrigger::Errored,
    ];

    /// Wire name used in the notification payload
    pub fn as_str(&self) -> &'static str {
        match self {
            RunTrigger::Created => "run:created",
            RunTrigger::Planning => "run:planning",
            RunTrigger::NeedsAttention => "run:needs_attention",
            RunTrigger::Applying => "run:applying",
            RunTrigger::Completed => "run:completed",
            RunTrigger::Errored => "run:errored",
        }
    }

    /// Hex colour used as the card's `themeColor`
    pub fn theme_color(&self) -> &'static str {
        match self {
            RunTrigger::Created => "#595959",
            RunTrigger::Planning => "#13c2c2",
            RunTrigger::NeedsAttention => "#fadb14",
            RunTrigger::Applying => "#1890ff",
            RunTrigger::Completed => "#a0d911",
            RunTrigger::Errored => "#f5222d",
        }
    }
}

impl FromStr for RunTrigger {
    type Err = UnknownTrigger;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunTrigger::ALL
            .into_iter()
            .find(|trigger| trigger.as_str() == s)
            .ok_or_else(|| UnknownTrigger(s.to_string()))
    }
}

impl std::fmt::Display for RunTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_round_trips_through_wire_name() {
        for trigger in RunTrigger::ALL {
            assert_eq!(trigger.as_str().parse::<RunTrigger>().unwrap(), trigger);
        }
    }

    #[test]
    fn test_trigger_colours() {
        assert_eq!(RunTrigger::Created.theme_color(), "#595959");
        assert_eq!(RunTrigger::Planning.theme_color(), "#13c2c2");
        assert_eq!(RunTrigger::NeedsAttention.theme_color(), "#fadb14");
        assert_eq!(RunTrigger::Applying.theme_color(), "#1890ff");
        assert_eq!(RunTrigger::Completed.theme_color(), "#a0d911");
        assert_eq!(RunTrigger::Errored.theme_color(), "#f5222d");
    }

    #[test]
    fn test_unknown_trigger() {
        let err = "unknown:x".parse::<RunTrigger>().unwrap_err();
        assert_eq!(err, UnknownTrigger("unknown:x".to_string()));
        assert_eq!(err.to_string(), "unsupported trigger: unknown:x");
    }

    #[test]
    fn test_trigger_is_case_sensitive() {
        assert!("RUN:COMPLETED".parse::<RunTrigger>().is_err());
        assert!("".parse::<RunTrigger>().is_err());
    }
}
