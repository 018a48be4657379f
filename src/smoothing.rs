//! Smoothing strategies for pace streams
//!
//! Raw speed readings from a live sensor are noisy and bursty. The pipeline
//! passes each reading through one of the strategies here before it reaches
//! the displayed current-pace metric. Both strategies are order-dependent
//! recurrences: one instance is bound to exactly one stream, and samples
//! must be applied in strict arrival order.

use crate::error::MetricError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default sliding-window capacity for [`SimpleMovingAverage`]
pub const DEFAULT_WINDOW: usize = 5;

/// Default smoothing factor for [`ExponentialMovingAverage`]
pub const DEFAULT_ALPHA: f64 = 0.2;

/// A stateful smoothing strategy for one metric stream
///
/// Implementations retain internal state across calls. A single instance
/// must not be shared across streams: the recurrence mixes every sample it
/// sees into the next output.
pub trait SmoothingAlgorithm: fmt::Debug {
    /// Consume one raw reading and return the smoothed value
    fn smooth_pace(&mut self, new_sample: f64) -> f64;

    /// Discard all retained state, as if freshly constructed
    fn reset(&mut self);
}

/// Simple Moving Average: arithmetic mean over a fixed-size trailing window
///
/// A larger window smooths harder but lags behind recent changes; a smaller
/// window tracks changes quickly but stays volatile.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    buffer: VecDeque<f64>,
    capacity: usize,
}

impl Default for SimpleMovingAverage {
    fn default() -> Self {
        Self {
            buffer: VecDeque::with_capacity(DEFAULT_WINDOW),
            capacity: DEFAULT_WINDOW,
        }
    }
}

impl SimpleMovingAverage {
    /// Create an average over the `capacity` most recent samples
    ///
    /// Fails with [`MetricError::InvalidWindowSize`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, MetricError> {
        if capacity == 0 {
            return Err(MetricError::InvalidWindowSize(capacity));
        }
        Ok(Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples currently held in the window
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl SmoothingAlgorithm for SimpleMovingAverage {
    fn smooth_pace(&mut self, new_sample: f64) -> f64 {
        self.buffer.push_back(new_sample);
        if self.buffer.len() > self.capacity {
            self.buffer.pop_front();
        }

        // Unreachable through this method (a sample was just appended), but
        // the contract for an empty window is defined anyway.
        if self.buffer.is_empty() {
            return 0.0;
        }

        let sum: f64 = self.buffer.iter().sum();
        sum / self.buffer.len() as f64
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

/// Exponential Moving Average: recursive weighted average favoring recent
/// samples
///
/// The first sample seeds the state and is returned unchanged. Every later
/// call applies `state = alpha * sample + (1 - alpha) * state`. Seeding is
/// tracked with an explicit `Option` rather than a zero sentinel so that a
/// genuine leading `0.0` reading seeds the average like any other value.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    previous: Option<f64>,
    alpha: f64,
}

impl Default for ExponentialMovingAverage {
    fn default() -> Self {
        Self {
            previous: None,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl ExponentialMovingAverage {
    /// Create an average with the given smoothing factor
    ///
    /// A higher `alpha` discounts older observations faster. Fails with
    /// [`MetricError::InvalidAlpha`] unless `0 < alpha <= 1`.
    pub fn new(alpha: f64) -> Result<Self, MetricError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(MetricError::InvalidAlpha(alpha));
        }
        Ok(Self {
            previous: None,
            alpha,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl SmoothingAlgorithm for ExponentialMovingAverage {
    fn smooth_pace(&mut self, new_sample: f64) -> f64 {
        let next = match self.previous {
            None => new_sample,
            Some(previous) => self.alpha * new_sample + (1.0 - self.alpha) * previous,
        };
        self.previous = Some(next);
        next
    }

    fn reset(&mut self) {
        self.previous = None;
    }
}

/// Strategy selection for the pace stream
///
/// This is the single configuration point callers use to choose smoothing
/// behavior at session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SmoothingConfig {
    SimpleMovingAverage { window: usize },
    ExponentialMovingAverage { alpha: f64 },
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        SmoothingConfig::SimpleMovingAverage {
            window: DEFAULT_WINDOW,
        }
    }
}

impl SmoothingConfig {
    /// Build the configured strategy, validating its parameters
    pub fn build(&self) -> Result<Box<dyn SmoothingAlgorithm>, MetricError> {
        match *self {
            SmoothingConfig::SimpleMovingAverage { window } => {
                Ok(Box::new(SimpleMovingAverage::new(window)?))
            }
            SmoothingConfig::ExponentialMovingAverage { alpha } => {
                Ok(Box::new(ExponentialMovingAverage::new(alpha)?))
            }
        }
    }
}
