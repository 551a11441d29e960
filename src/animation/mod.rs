//! Timed property animation: easing curves, timelines, animatable values and
//! the frame loop that writes them into element styles.

pub mod animator;
pub mod easing;
pub mod properties;
pub mod sequence;
pub mod stat;
pub mod timeline;

// Re-export commonly used types
pub use animator::{
    query_sequence, Animation, AnimationReport, Animator, FixedStepClock, FrameClock, IntervalClock,
    DEFAULT_FRAME_INTERVAL,
};
pub use easing::{EasingFunction, StepPosition};
pub use properties::PropertyValue;
pub use sequence::{
    ColorTween, Height, Opacity, Rotate, Scale, Sequence, SequenceBox, StyleTween, Translate, Tween, Width,
};
pub use stat::{Frame, Stat, StatConfig};
pub use timeline::{AnimationDirection, Iterations, Phase, Sample, Timeline};
