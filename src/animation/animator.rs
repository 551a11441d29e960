use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::sequence::{SequenceBox, Tween};
use super::stat::{Frame, Stat};
use super::timeline::Phase;
use crate::css::computed::split_list;
use crate::css::{get_computed_style_map, ComputedStyle, ComputedStyleMap};
use crate::dom::{Document, Element, StyleHost};
use crate::error::{Result, StyleError};

/// Roughly 60 frames per second
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Source of animation frames, the role `requestAnimationFrame` plays in a
/// browser
#[async_trait]
pub trait FrameClock: Send {
    /// Wait for the next frame, returning the time since the first one
    async fn next_frame(&mut self) -> Duration;
}

/// Wall-clock frames driven by a tokio interval
pub struct IntervalClock {
    interval: Interval,
    started: Option<Instant>,
}

impl IntervalClock {
    pub fn new(frame: Duration) -> Self {
        let mut interval = tokio::time::interval(frame.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            started: None,
        }
    }
}

#[async_trait]
impl FrameClock for IntervalClock {
    async fn next_frame(&mut self) -> Duration {
        let tick = self.interval.tick().await;
        let started = *self.started.get_or_insert(tick);
        tick - started
    }
}

/// Virtual clock advancing by a fixed step per frame without sleeping
pub struct FixedStepClock {
    step: Duration,
    now: Option<Duration>,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self { step, now: None }
    }
}

#[async_trait]
impl FrameClock for FixedStepClock {
    async fn next_frame(&mut self) -> Duration {
        tokio::task::yield_now().await;
        let now = match self.now {
            Some(previous) => previous + self.step,
            None => Duration::ZERO,
        };
        self.now = Some(now);
        now
    }
}

pub type FrameCallback = Box<dyn FnMut(&Frame) + Send>;

/// A set of sequences applied to a set of elements under one timing
pub struct Animation {
    id: String,
    elements: Vec<Element>,
    stat: Stat,
    sequences: Vec<SequenceBox>,
    on_begin: Vec<FrameCallback>,
    on_progress: Vec<FrameCallback>,
    on_end: Vec<FrameCallback>,
}

impl Animation {
    pub fn new(elements: Vec<Element>, stat: Stat, sequences: Vec<SequenceBox>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            elements,
            stat,
            sequences,
            on_begin: Vec::new(),
            on_progress: Vec::new(),
            on_end: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn stat(&self) -> &Stat {
        &self.stat
    }

    pub fn sequence_names(&self) -> Vec<&str> {
        self.sequences.iter().map(|s| s.name()).collect()
    }

    /// Fired on the first frame past the delay
    pub fn on_begin<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&Frame) + Send + 'static,
    {
        self.on_begin.push(Box::new(callback));
        self
    }

    /// Fired on every frame that writes styles
    pub fn on_progress<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&Frame) + Send + 'static,
    {
        self.on_progress.push(Box::new(callback));
        self
    }

    pub fn on_end<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&Frame) + Send + 'static,
    {
        self.on_end.push(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("id", &self.id)
            .field("elements", &self.elements)
            .field("sequences", &self.sequence_names())
            .field("stat", &self.stat)
            .finish()
    }
}

/// Build an animation for every element matching `selector`
pub fn query_sequence(
    doc: &Document,
    selector: &str,
    stat: Stat,
    sequences: Vec<SequenceBox>,
) -> Result<Animation> {
    let elements = doc.query_selector_all(selector)?;
    if elements.is_empty() {
        return Err(StyleError::NotFound(selector.to_string()));
    }
    Ok(Animation::new(elements, stat, sequences))
}

/// Outcome of a finished animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationReport {
    pub id: String,
    pub frames: u64,
    pub writes: u64,
    pub elapsed: Duration,
}

/// Per-element working state: the element's style map is the model every
/// frame is merged into before being written back.
struct ElementTarget {
    element: Element,
    styles: ComputedStyleMap,
    tweens: Vec<Tween>,
    written: HashMap<String, String>,
}

impl ElementTarget {
    /// Reload a multi-valued property from the element, so functions written
    /// by other animations running on it are merged instead of overwritten
    fn refresh(&mut self, property: &str) {
        let Some(current) = self
            .element
            .style()
            .get_property_value(property)
            .map(str::to_string)
        else {
            return;
        };

        let values = if current.trim() == "none" {
            Vec::new()
        } else {
            split_list(&current)
        };

        match self.styles.get_mut(property) {
            Ok(style) => style.values = values,
            Err(_) => {
                let mut style = ComputedStyle::new(property, &current, false);
                style.values = values;
                self.styles.insert(style);
            }
        }
    }

    fn apply(&mut self, progress: f32, optimize: bool) -> Result<u64> {
        let mut merged: Vec<String> = Vec::new();
        for tween in self.tweens.iter().filter(|t| t.merge) {
            if !merged.contains(&tween.property) {
                merged.push(tween.property.clone());
            }
        }
        for property in &merged {
            self.refresh(property);
        }

        let mut touched: Vec<String> = Vec::new();

        for tween in &self.tweens {
            let css = tween.value_at(progress).to_css();
            if tween.merge {
                self.styles.add_more(&tween.property, &css, tween.priority);
            } else {
                self.styles.add(&tween.property, &css, tween.priority);
            }
            if !touched.contains(&tween.property) {
                touched.push(tween.property.clone());
            }
        }

        let mut writes = 0;
        for property in touched {
            let style = self.styles.get(&property)?;
            let css = style.css_value();
            if optimize && self.written.get(&property) == Some(&css) {
                continue;
            }

            let priority = if style.priority { "important" } else { "" };
            self.element.set_style_property(&property, &css, priority)?;
            self.written.insert(property, css);
            writes += 1;
        }

        Ok(writes)
    }
}

type ClockFactory = Arc<dyn Fn() -> Box<dyn FrameClock> + Send + Sync>;

/// Drives animations frame by frame against a style host
#[derive(Clone)]
pub struct Animator {
    host: Arc<dyn StyleHost>,
    clock: ClockFactory,
}

impl Animator {
    pub fn new(host: Arc<dyn StyleHost>) -> Self {
        Self::with_clock(host, || -> Box<dyn FrameClock> {
            Box::new(IntervalClock::new(DEFAULT_FRAME_INTERVAL))
        })
    }

    /// Use a custom frame source; the factory is called once per animation
    pub fn with_clock<F>(host: Arc<dyn StyleHost>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn FrameClock> + Send + Sync + 'static,
    {
        Self {
            host,
            clock: Arc::new(factory),
        }
    }

    fn prepare(&self, animation: &Animation) -> Result<Vec<ElementTarget>> {
        let mut targets = Vec::with_capacity(animation.elements.len());

        for element in &animation.elements {
            let mut styles = get_computed_style_map(self.host.as_ref(), element, "")?;
            let mut tweens = Vec::new();
            for sequence in &animation.sequences {
                tweens.extend(sequence.prepare(element, &styles)?);
            }

            for tween in tweens.iter().filter(|t| t.merge) {
                if let Ok(style) = styles.get_mut(&tween.property) {
                    style.expand_values();
                }
            }

            targets.push(ElementTarget {
                element: element.clone(),
                styles,
                tweens,
                written: HashMap::new(),
            });
        }

        Ok(targets)
    }

    /// Run `animation` to completion
    pub async fn animate(&self, animation: &mut Animation) -> Result<AnimationReport> {
        info!(
            "🎬 Starting animation '{}' on {} element(s) with [{}]",
            animation.id,
            animation.elements.len(),
            animation.sequence_names().join(", ")
        );

        if animation.elements.is_empty() {
            warn!("Animation '{}' has no elements to animate", animation.id);
        }

        let mut targets = self.prepare(animation)?;
        let mut clock = (self.clock)();
        let optimize = animation.stat.optimize();

        let mut index = 0u64;
        let mut writes = 0u64;
        let mut begun = false;

        loop {
            let elapsed = clock.next_frame().await;
            let frame = animation.stat.frame(&animation.id, index, elapsed);
            index += 1;

            if frame.phase == Phase::Delayed {
                continue;
            }

            if !begun {
                begun = true;
                debug!("Animation '{}' began at {:?}", animation.id, elapsed);
                for callback in animation.on_begin.iter_mut() {
                    callback(&frame);
                }
            }

            for target in targets.iter_mut() {
                writes += target.apply(frame.eased, optimize)?;
            }

            for callback in animation.on_progress.iter_mut() {
                callback(&frame);
            }

            if frame.phase == Phase::Finished {
                for callback in animation.on_end.iter_mut() {
                    callback(&frame);
                }
                info!(
                    "✅ Animation '{}' completed after {} frame(s), {} write(s)",
                    animation.id, index, writes
                );
                return Ok(AnimationReport {
                    id: animation.id.clone(),
                    frames: index,
                    writes,
                    elapsed,
                });
            }
        }
    }

    /// Run several animations concurrently
    pub async fn animate_all(&self, animations: &mut [Animation]) -> Vec<Result<AnimationReport>> {
        join_all(animations.iter_mut().map(|animation| self.animate(animation))).await
    }

    /// Run `animation` on its own task and hand it back once finished
    pub fn spawn(&self, mut animation: Animation) -> JoinHandle<(Animation, Result<AnimationReport>)> {
        let animator = self.clone();
        tokio::spawn(async move {
            let result = animator.animate(&mut animation).await;
            (animation, result)
        })
    }
}
