//! Bounded FIFO of pending transformations

use std::collections::VecDeque;

use super::Transformation;
use crate::error::TransformError;

/// Capacity used by [`TransformQueue::new`]
pub const DEFAULT_QUEUE_CAPACITY: usize = 6;

/// What [`TransformQueue::push`] does when the queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Refuse the transformation with `TransformError::QueueFull`
    #[default]
    Reject,
    /// Discard the incoming transformation and log a warning
    DropNewest,
}

/// Bounded queue that preserves insertion order
///
/// # Example
/// ```
/// use graph_morph::transform::{Axis, OverflowPolicy, Transformation, TransformQueue};
///
/// let mut queue = TransformQueue::with_capacity(1).overflow_policy(OverflowPolicy::Reject);
/// queue.push(Transformation::reflect(Axis::X)).unwrap();
/// assert!(queue.push(Transformation::reflect(Axis::Y)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransformQueue {
    items: VecDeque<Transformation>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl Default for TransformQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TransformQueue {
            items: VecDeque::with_capacity(capacity),
            capacity,
            policy: OverflowPolicy::default(),
        }
    }

    /// Set the overflow policy
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append to the back of the queue
    ///
    /// # Errors
    /// `QueueFull` when full under [`OverflowPolicy::Reject`]. Under
    /// [`OverflowPolicy::DropNewest`] a full queue drops `transformation` and
    /// returns `Ok`.
    pub fn push(&mut self, transformation: Transformation) -> Result<(), TransformError> {
        if self.is_full() {
            return match self.policy {
                OverflowPolicy::Reject => Err(TransformError::QueueFull {
                    capacity: self.capacity,
                }),
                OverflowPolicy::DropNewest => {
                    tracing::warn!(%transformation, capacity = self.capacity, "transformation queue full, dropping");
                    Ok(())
                }
            };
        }
        self.items.push_back(transformation);
        Ok(())
    }

    /// Remove from the front of the queue
    pub fn pop(&mut self) -> Option<Transformation> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<&Transformation> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots left
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Pending transformations, front first
    pub fn iter(&self) -> impl Iterator<Item = &Transformation> {
        self.items.iter()
    }
}
