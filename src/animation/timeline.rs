use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback direction of successive iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationDirection {
    #[default]
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Iterations {
    Count(u32),
    Infinite,
}

/// Where the timeline is at a given moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Still waiting out the start delay
    Delayed,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub phase: Phase,
    pub iteration: u32,
    /// Directed progress of the current iteration, 0.0 to 1.0
    pub progress: f32,
}

/// Maps elapsed wall time onto iteration progress, honoring delay, repeat
/// count and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    duration: Duration,
    delay: Duration,
    iterations: Iterations,
    direction: AnimationDirection,
}

impl Timeline {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            iterations: Iterations::Count(1),
            direction: AnimationDirection::Normal,
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// A count of zero is treated as one
    pub fn set_iterations(&mut self, iterations: Iterations) {
        self.iterations = match iterations {
            Iterations::Count(0) => Iterations::Count(1),
            other => other,
        };
    }

    pub fn set_direction(&mut self, direction: AnimationDirection) {
        self.direction = direction;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn iterations(&self) -> Iterations {
        self.iterations
    }

    pub fn direction(&self) -> AnimationDirection {
        self.direction
    }

    /// Delay plus every iteration; `None` when looping forever or when the
    /// total does not fit in a `Duration`
    pub fn total_duration(&self) -> Option<Duration> {
        match self.iterations {
            Iterations::Count(n) => self
                .duration
                .checked_mul(n)
                .and_then(|active| active.checked_add(self.delay)),
            Iterations::Infinite => None,
        }
    }

    fn directed(&self, progress: f32, iteration: u32) -> f32 {
        let forward = match self.direction {
            AnimationDirection::Normal => true,
            AnimationDirection::Reverse => false,
            AnimationDirection::Alternate => iteration % 2 == 0,
            AnimationDirection::AlternateReverse => iteration % 2 == 1,
        };
        if forward {
            progress
        } else {
            1.0 - progress
        }
    }

    pub fn sample(&self, elapsed: Duration) -> Sample {
        if elapsed < self.delay {
            return Sample {
                phase: Phase::Delayed,
                iteration: 0,
                progress: self.directed(0.0, 0),
            };
        }

        let active = elapsed - self.delay;
        let finished = |iterations: u32| {
            let last = iterations.saturating_sub(1);
            Sample {
                phase: Phase::Finished,
                iteration: last,
                progress: self.directed(1.0, last),
            }
        };

        if self.duration.is_zero() {
            return match self.iterations {
                Iterations::Count(n) => finished(n),
                Iterations::Infinite => finished(1),
            };
        }

        let total = active.as_secs_f64() / self.duration.as_secs_f64();
        if let Iterations::Count(n) = self.iterations {
            if total >= n as f64 {
                return finished(n);
            }
        }

        let iteration = total.floor() as u32;
        Sample {
            phase: Phase::Active,
            iteration,
            progress: self.directed(total.fract() as f32, iteration).clamp(0.0, 1.0),
        }
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        self.sample(elapsed).phase == Phase::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_basic_timeline() {
        let timeline = Timeline::new(ms(1000));

        assert_eq!(timeline.sample(ms(0)).progress, 0.0);
        assert_eq!(timeline.sample(ms(500)).progress, 0.5);
        let end = timeline.sample(ms(1000));
        assert_eq!(end.progress, 1.0);
        assert_eq!(end.phase, Phase::Finished);
    }

    #[test]
    fn test_delay() {
        let mut timeline = Timeline::new(ms(1000));
        timeline.set_delay(ms(200));

        assert_eq!(timeline.sample(ms(100)).phase, Phase::Delayed);
        let sample = timeline.sample(ms(700));
        assert_eq!(sample.phase, Phase::Active);
        assert_eq!(sample.progress, 0.5);
        assert_eq!(timeline.total_duration(), Some(ms(1200)));
    }

    #[test]
    fn test_loop_animation() {
        let mut timeline = Timeline::new(ms(1000));
        timeline.set_iterations(Iterations::Count(2));

        assert_eq!(timeline.sample(ms(500)).progress, 0.5);
        let second = timeline.sample(ms(1000));
        assert_eq!((second.iteration, second.progress), (1, 0.0));
        assert_eq!(timeline.sample(ms(1500)).progress, 0.5);
        assert!(timeline.is_complete(ms(2000)));
        assert!(!timeline.is_complete(ms(1999)));
    }

    #[test]
    fn test_alternate_direction_returns_home() {
        let mut timeline = Timeline::new(ms(1000));
        timeline.set_iterations(Iterations::Count(2));
        timeline.set_direction(AnimationDirection::Alternate);

        assert_eq!(timeline.sample(ms(250)).progress, 0.25);
        assert_eq!(timeline.sample(ms(1250)).progress, 0.75);
        assert_eq!(timeline.sample(ms(5000)).progress, 0.0);
    }

    #[test]
    fn test_reverse_direction() {
        let mut timeline = Timeline::new(ms(1000));
        timeline.set_direction(AnimationDirection::Reverse);

        assert_eq!(timeline.sample(ms(0)).progress, 1.0);
        assert_eq!(timeline.sample(ms(250)).progress, 0.75);
        assert_eq!(timeline.sample(ms(1000)).progress, 0.0);
    }

    #[test]
    fn test_infinite_never_finishes() {
        let mut timeline = Timeline::new(ms(100));
        timeline.set_iterations(Iterations::Infinite);

        let sample = timeline.sample(ms(100_050));
        assert_eq!(sample.phase, Phase::Active);
        assert_eq!(sample.iteration, 1000);
        assert_eq!(timeline.total_duration(), None);
    }

    #[test]
    fn test_total_duration_overflow() {
        let mut timeline = Timeline::new(Duration::from_secs(u64::MAX / 2));
        timeline.set_iterations(Iterations::Count(3));
        assert_eq!(timeline.total_duration(), None);

        let mut timeline = Timeline::new(Duration::MAX);
        timeline.set_delay(ms(1));
        assert_eq!(timeline.total_duration(), None);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let timeline = Timeline::new(Duration::ZERO);
        assert_eq!(timeline.sample(ms(0)).phase, Phase::Finished);
    }

    #[test]
    fn test_zero_iterations_means_once() {
        let mut timeline = Timeline::new(ms(10));
        timeline.set_iterations(Iterations::Count(0));
        assert_eq!(timeline.iterations(), Iterations::Count(1));
    }
}
