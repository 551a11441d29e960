use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::easing::EasingFunction;
use super::timeline::{AnimationDirection, Iterations, Phase, Timeline};
use crate::error::Result;

/// Timing configuration of an animation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatConfig {
    /// Duration of one pass in milliseconds
    #[serde(default = "default_duration")]
    pub duration: u64,

    /// Delay before the first frame in milliseconds
    #[serde(default)]
    pub delay: u64,

    /// CSS timing function name (`ease-in`, `cubic-bezier(..)`, `steps(..)`)
    #[serde(default = "default_easing")]
    pub easing: String,

    /// Number of passes; 0 plays once
    #[serde(default, rename = "loop")]
    pub loops: u32,

    /// Play every pass forward then back
    #[serde(default)]
    pub reverse: bool,

    /// Skip writes that would not change the element's style
    #[serde(default)]
    pub optimize: bool,
}

fn default_duration() -> u64 {
    300
}
fn default_easing() -> String {
    "linear".to_string()
}

impl Default for StatConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            delay: 0,
            easing: default_easing(),
            loops: 0,
            reverse: false,
            optimize: false,
        }
    }
}

impl StatConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay)
    }
}

/// Snapshot handed to animation callbacks on every tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub animation_id: String,
    /// Ticks since the animation started, delayed ticks included
    pub index: u64,
    pub elapsed: Duration,
    pub iteration: u32,
    /// Directed, un-eased progress of the current pass
    pub progress: f32,
    /// Progress after the easing curve, what gets written to the element
    pub eased: f32,
    pub phase: Phase,
}

/// Resolved timing state: timeline plus easing
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    config: StatConfig,
    timeline: Timeline,
    easing: EasingFunction,
}

impl Stat {
    /// Fails when the easing name is not recognised
    pub fn new(config: StatConfig) -> Result<Self> {
        let easing = EasingFunction::from_name(&config.easing)?;

        let mut timeline = Timeline::new(config.duration());
        timeline.set_delay(config.delay());

        let passes = config.loops.max(1);
        if config.reverse {
            timeline.set_direction(AnimationDirection::Alternate);
            timeline.set_iterations(Iterations::Count(passes.saturating_mul(2)));
        } else {
            timeline.set_iterations(Iterations::Count(passes));
        }

        Ok(Self {
            config,
            timeline,
            easing,
        })
    }

    pub fn config(&self) -> &StatConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    pub fn optimize(&self) -> bool {
        self.config.optimize
    }

    pub fn total_duration(&self) -> Option<Duration> {
        self.timeline.total_duration()
    }

    pub fn frame(&self, animation_id: &str, index: u64, elapsed: Duration) -> Frame {
        let sample = self.timeline.sample(elapsed);
        Frame {
            animation_id: animation_id.to_string(),
            index,
            elapsed,
            iteration: sample.iteration,
            progress: sample.progress,
            eased: self.easing.apply(sample.progress),
            phase: sample.phase,
        }
    }
}
