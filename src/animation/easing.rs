use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::error::{Result, StyleError};

/// Where the jump happens in a `steps()` timing function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepPosition {
    Start,
    End,
}

/// CSS timing functions plus the two curves that can't be expressed as a
/// bezier (bounce and elastic).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EasingFunction {
    Linear,
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
    Steps { count: u32, position: StepPosition },
    Bounce,
    Elastic,
}

/// Named curves, keyed by their dash-less lowercase spelling so that both
/// `ease-in-out` and `easeInOut` resolve.
const NAMED_CURVES: &[(&str, [f32; 4])] = &[
    ("ease", [0.25, 0.1, 0.25, 1.0]),
    ("easein", [0.42, 0.0, 1.0, 1.0]),
    ("easeout", [0.0, 0.0, 0.58, 1.0]),
    ("easeinout", [0.42, 0.0, 0.58, 1.0]),
    ("easeinsine", [0.12, 0.0, 0.39, 0.0]),
    ("easeoutsine", [0.61, 1.0, 0.88, 1.0]),
    ("easeinoutsine", [0.37, 0.0, 0.63, 1.0]),
    ("easeinquad", [0.11, 0.0, 0.5, 0.0]),
    ("easeoutquad", [0.5, 1.0, 0.89, 1.0]),
    ("easeinoutquad", [0.45, 0.0, 0.55, 1.0]),
    ("easeincubic", [0.32, 0.0, 0.67, 0.0]),
    ("easeoutcubic", [0.33, 1.0, 0.68, 1.0]),
    ("easeinoutcubic", [0.65, 0.0, 0.35, 1.0]),
    ("easeinback", [0.36, 0.0, 0.66, -0.56]),
    ("easeoutback", [0.34, 1.56, 0.64, 1.0]),
    ("easeinoutback", [0.68, -0.6, 0.32, 1.6]),
];

impl Default for EasingFunction {
    fn default() -> Self {
        EasingFunction::Linear
    }
}

impl EasingFunction {
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        EasingFunction::CubicBezier {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Resolve an easing from its CSS name or functional notation
    pub fn from_name(name: &str) -> Result<Self> {
        let unknown = || StyleError::UnknownEasing(name.to_string());
        let lower = name.trim().to_ascii_lowercase();

        if let Some(args) = Self::function_args(&lower, "cubic-bezier") {
            let points: Vec<f32> = args
                .iter()
                .map(|a| a.parse::<f32>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| unknown())?;
            return match points.as_slice() {
                [x1, y1, x2, y2] => Ok(Self::cubic_bezier(*x1, *y1, *x2, *y2)),
                _ => Err(unknown()),
            };
        }

        if let Some(args) = Self::function_args(&lower, "steps") {
            let count = args
                .first()
                .and_then(|c| c.parse::<u32>().ok())
                .filter(|c| *c > 0)
                .ok_or_else(unknown)?;
            let position = match args.get(1).copied() {
                None | Some("end") | Some("jump-end") => StepPosition::End,
                Some("start") | Some("jump-start") => StepPosition::Start,
                Some(_) => return Err(unknown()),
            };
            return Ok(EasingFunction::Steps { count, position });
        }

        let key: String = lower.chars().filter(|c| *c != '-').collect();
        match key.as_str() {
            "linear" => return Ok(EasingFunction::Linear),
            "stepstart" => {
                return Ok(EasingFunction::Steps {
                    count: 1,
                    position: StepPosition::Start,
                })
            }
            "stepend" => {
                return Ok(EasingFunction::Steps {
                    count: 1,
                    position: StepPosition::End,
                })
            }
            "bounce" | "easeoutbounce" => return Ok(EasingFunction::Bounce),
            "elastic" | "easeoutelastic" => return Ok(EasingFunction::Elastic),
            _ => {}
        }

        NAMED_CURVES
            .iter()
            .find(|(curve, _)| *curve == key)
            .map(|(_, [x1, y1, x2, y2])| Self::cubic_bezier(*x1, *y1, *x2, *y2))
            .ok_or_else(unknown)
    }

    fn function_args<'a>(input: &'a str, function: &str) -> Option<Vec<&'a str>> {
        let inner = input
            .strip_prefix(function)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')?;
        Some(inner.split(',').map(str::trim).collect())
    }

    /// Map linear progress (0.0 to 1.0) onto the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::CubicBezier { .. } if t == 0.0 || t == 1.0 => t,
            EasingFunction::CubicBezier { x1, y1, x2, y2 } => {
                solve_bezier(t as f64, *x1 as f64, *y1 as f64, *x2 as f64, *y2 as f64) as f32
            }
            EasingFunction::Steps { count, position } => {
                let n = *count as f32;
                let stepped = match position {
                    StepPosition::Start => (t * n).ceil(),
                    StepPosition::End => (t * n).floor(),
                };
                (stepped / n).min(1.0)
            }
            EasingFunction::Bounce => bounce_out(t),
            EasingFunction::Elastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * 2.0 * PI / 3.0).sin() + 1.0
                }
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        n1 * (t - 1.5 / d1) * (t - 1.5 / d1) + 0.75
    } else if t < 2.5 / d1 {
        n1 * (t - 2.25 / d1) * (t - 2.25 / d1) + 0.9375
    } else {
        n1 * (t - 2.625 / d1) * (t - 2.625 / d1) + 0.984375
    }
}

/// Evaluate the bezier through (0,0), (x1,y1), (x2,y2), (1,1) at the point
/// whose x coordinate is `x`.
fn solve_bezier(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |t: f64| ((ax * t + bx) * t + cx) * t;
    let sample_y = |t: f64| ((ay * t + by) * t + cy) * t;
    let slope_x = |t: f64| (3.0 * ax * t + 2.0 * bx) * t + cx;

    const EPSILON: f64 = 1e-6;

    // Newton-Raphson first, it converges in a few rounds for sane curves
    let mut t = x;
    for _ in 0..8 {
        let err = sample_x(t) - x;
        if err.abs() < EPSILON {
            return sample_y(t);
        }
        let d = slope_x(t);
        if d.abs() < EPSILON {
            break;
        }
        t -= err / d;
    }

    // Bisection fallback
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    while lo < hi {
        let current = sample_x(t);
        if (current - x).abs() < EPSILON {
            break;
        }
        if x > current {
            lo = t;
        } else {
            hi = t;
        }
        t = (hi - lo) * 0.5 + lo;
        if hi - lo < EPSILON {
            break;
        }
    }

    sample_y(t)
}
