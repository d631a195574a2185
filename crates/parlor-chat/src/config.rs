use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Instructions sent with every run
pub const DEFAULT_INSTRUCTIONS: &str =
    "Please provide helpful and accurate responses based on the trained data.";

/// How a run is waited on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two status reads
    pub interval: Duration,
    /// Upper bound on status reads; `None` waits until the run settles
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: Some(120),
        }
    }
}

impl PollPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll forever, the behaviour of the first versions of this service
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Cap the number of status reads; `0` removes the cap
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = (max > 0).then_some(max);
        self
    }

    /// Time spent sleeping between reads before the cap is hit
    pub fn budget(&self) -> Option<Duration> {
        self.max_attempts
            .map(|max| self.interval.saturating_mul(max.saturating_sub(1)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Remote assistant configuration used for every run
    pub assistant_id: String,
    pub instructions: String,
    pub poll: PollPolicy,
    /// Screen user content with the moderation endpoint before posting it
    pub moderation_enabled: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_id: String::new(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            poll: PollPolicy::default(),
            moderation_enabled: false,
        }
    }
}

impl ChatConfig {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            ..Self::default()
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_moderation(mut self, enabled: bool) -> Self {
        self.moderation_enabled = enabled;
        self
    }
}
