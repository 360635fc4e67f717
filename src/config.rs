//! Configuration for the decoder
//!
//! Passed explicitly into `Decoder::new`; there is no process-wide state.

use crate::error::{DecodeError, Result};

/// Main configuration for a Decoder instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    // -------------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------------
    /// How module segments of one frame are parsed
    pub fan_out: FanOut,

    // -------------------------------------------------------------------------
    // Grammar
    // -------------------------------------------------------------------------
    /// What to do with a sleep field that has no `$`
    pub sleep_policy: SleepPolicy,

    /// Accept segments that omit the echoed stack id (`LU,142.86,0$`)
    pub compact_segments: bool,
}

/// Module fan-out strategy
///
/// Both strategies give the same result for the same frame. A panic inside
/// an injected collaborator is caught and reported as `WorkerPanicked` for
/// the segment that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOut {
    /// Parse segments one after another on the calling thread
    Sequential,

    /// Parse segments on scoped worker threads
    Parallel {
        /// Upper bound on worker threads per frame
        max_threads: usize,

        /// Frames with fewer segments than this are parsed sequentially
        min_segments: usize,
    },
}

/// Handling of a sleep field without the `$` separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepPolicy {
    /// Whole field is the value, condition is empty
    Lenient,

    /// Reject the module with `BadPayload`
    Strict,

    /// Empty value, whole field as condition; what older agents emitted
    Legacy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            fan_out: FanOut::Sequential,
            sleep_policy: SleepPolicy::Lenient,
            compact_segments: true,
        }
    }
}

impl DecoderConfig {
    /// Create a new config builder
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }

    /// Check the config for values the decoder cannot work with
    pub fn validate(&self) -> Result<()> {
        if let FanOut::Parallel { max_threads: 0, .. } = self.fan_out {
            return Err(DecodeError::Config(
                "parallel fan-out needs at least one thread".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for DecoderConfig
#[derive(Default)]
pub struct DecoderConfigBuilder {
    config: DecoderConfig,
}

impl DecoderConfigBuilder {
    /// Parse segments sequentially
    pub fn sequential(mut self) -> Self {
        self.config.fan_out = FanOut::Sequential;
        self
    }

    /// Parse segments on up to `max_threads` scoped threads
    pub fn parallel(mut self, max_threads: usize) -> Self {
        self.config.fan_out = FanOut::Parallel {
            max_threads,
            min_segments: 2,
        };
        self
    }

    /// Set the fan-out strategy directly
    pub fn fan_out(mut self, fan_out: FanOut) -> Self {
        self.config.fan_out = fan_out;
        self
    }

    /// Set the sleep policy
    pub fn sleep_policy(mut self, policy: SleepPolicy) -> Self {
        self.config.sleep_policy = policy;
        self
    }

    /// Enable or disable the compact segment form
    pub fn compact_segments(mut self, enabled: bool) -> Self {
        self.config.compact_segments = enabled;
        self
    }

    pub fn build(self) -> DecoderConfig {
        self.config
    }
}
