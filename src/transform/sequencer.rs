//! Drives queued transformations against the current function
//!
//! The sequencer keeps three things: the base function (as entered, or the
//! latest derivative), the current function (base with every completed step
//! applied) and the queue of pending steps. Every step replaces the current
//! function with a new value; nothing handed out is mutated afterwards.

use super::{TransformQueue, TransformRequest, Transformation, animate_step};
use crate::Function;
use crate::error::{DiffError, TransformError};

/// Whether an animated step is in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepState {
    Idle,
    Animating(Transformation),
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    base: Function,
    current: Function,
    queue: TransformQueue,
    in_flight: Option<Transformation>,
}

impl Sequencer {
    /// Start from `base` with a default queue
    pub fn new(base: Function) -> Self {
        Self::with_queue(base, TransformQueue::new())
    }

    /// Start from `base` with a configured (possibly non-empty) queue
    pub fn with_queue(base: Function, queue: TransformQueue) -> Self {
        Sequencer {
            current: base.clone(),
            base,
            queue,
            in_flight: None,
        }
    }

    pub fn base(&self) -> &Function {
        &self.base
    }

    pub fn current(&self) -> &Function {
        &self.current
    }

    pub fn queue(&self) -> &TransformQueue {
        &self.queue
    }

    pub fn state(&self) -> StepState {
        match self.in_flight {
            Some(t) => StepState::Animating(t),
            None => StepState::Idle,
        }
    }

    /// # Errors
    /// `QueueFull` per the queue's overflow policy.
    pub fn enqueue(&mut self, transformation: Transformation) -> Result<(), TransformError> {
        self.queue.push(transformation)
    }

    /// Enqueue every transformation of `request`; see
    /// [`TransformRequest::enqueue_into`]
    ///
    /// # Errors
    /// Validation errors or `QueueFull`; the queue is untouched on error
    /// under the default policy.
    pub fn enqueue_request(&mut self, request: &TransformRequest) -> Result<usize, TransformError> {
        request.enqueue_into(&mut self.queue)
    }

    /// Apply the next queued transformation without animation
    ///
    /// A step already in flight is completed instead of popping a new one.
    /// Returns the new current function, or `None` if nothing was pending.
    pub fn next_transformation(&mut self) -> Option<&Function> {
        if self.in_flight.is_none() {
            self.in_flight = self.queue.pop();
        }
        self.complete_step()
    }

    /// Drain the queue, returning every intermediate function in order
    ///
    /// The last element (if any) equals [`Sequencer::current`].
    pub fn apply_all(&mut self) -> Vec<Function> {
        let mut steps = Vec::with_capacity(self.queue.len() + 1);
        while let Some(function) = self.next_transformation() {
            steps.push(function.clone());
        }
        steps
    }

    /// Take the next transformation off the queue for animation
    ///
    /// Returns the in-flight transformation if one is already running, or
    /// `None` when idle with an empty queue.
    pub fn begin_step(&mut self) -> Option<Transformation> {
        if self.in_flight.is_none() {
            self.in_flight = self.queue.pop();
            if let Some(t) = &self.in_flight {
                tracing::debug!(transformation = %t, from = %self.current, "step started");
            }
        }
        self.in_flight
    }

    /// Function to draw at `progress` of the in-flight step
    ///
    /// The current function when idle.
    pub fn frame(&self, progress: f64) -> Function {
        match &self.in_flight {
            Some(t) => animate_step(&self.current, t, progress),
            None => self.current.clone(),
        }
    }

    /// Finish the in-flight step, replacing the current function
    pub fn complete_step(&mut self) -> Option<&Function> {
        let transformation = self.in_flight.take()?;
        self.current = self.current.transformed(&transformation);
        tracing::debug!(%transformation, to = %self.current, "step completed");
        Some(&self.current)
    }

    /// Abandon the in-flight step; the current function is unchanged and
    /// the transformation is not requeued
    pub fn cancel_step(&mut self) -> Option<Transformation> {
        let cancelled = self.in_flight.take();
        if let Some(t) = &cancelled {
            tracing::debug!(transformation = %t, "step cancelled");
        }
        cancelled
    }

    /// Differentiate the current function
    ///
    /// On success returns `(previous, derivative)` for a dual view, makes
    /// the derivative the new base and current function, and discards any
    /// pending or in-flight steps.
    ///
    /// # Errors
    /// `DiffError::Unsupported`; the sequencer is left exactly as it was.
    pub fn differentiate(&mut self) -> Result<(Function, Function), DiffError> {
        let derivative = self.current.derivative()?;
        let previous = std::mem::replace(&mut self.current, derivative.clone());
        self.base = derivative.clone();
        self.queue.clear();
        self.in_flight = None;
        tracing::debug!(from = %previous, to = %derivative, "differentiated");
        Ok((previous, derivative))
    }

    /// Drop every applied and pending step, returning to the base function
    pub fn reset(&mut self) {
        self.current = self.base.clone();
        self.queue.clear();
        self.in_flight = None;
    }
}
