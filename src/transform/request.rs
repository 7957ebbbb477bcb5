//! A batch of transformations entered together

use super::{Axis, OverflowPolicy, TransformQueue, Transformation, parse_amount};
use crate::error::TransformError;

/// The six transformation inputs of a controller form
///
/// Amounts default to the identity (stretch 1, shift 0, no reflection).
/// [`TransformRequest::transformations`] yields the non-identity entries in
/// a fixed order: stretch-X, reflect-X, shift-X, stretch-Y, reflect-Y,
/// shift-Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformRequest {
    stretch_x: f64,
    reflect_x: bool,
    shift_x: f64,
    stretch_y: f64,
    reflect_y: bool,
    shift_y: f64,
}

impl Default for TransformRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformRequest {
    pub fn new() -> Self {
        TransformRequest {
            stretch_x: 1.0,
            reflect_x: false,
            shift_x: 0.0,
            stretch_y: 1.0,
            reflect_y: false,
            shift_y: 0.0,
        }
    }

    /// Build a request from raw form text; blank fields keep the identity
    ///
    /// Amounts go through [`parse_amount`], so `"1/2"` and `"2^3"` are
    /// accepted.
    ///
    /// # Errors
    /// The first field that [`parse_amount`] rejects.
    pub fn from_text(
        stretch_x: &str,
        shift_x: &str,
        stretch_y: &str,
        shift_y: &str,
        reflect_x: bool,
        reflect_y: bool,
    ) -> Result<Self, TransformError> {
        let field = |text: &str, default: f64| {
            if text.trim().is_empty() {
                Ok(default)
            } else {
                parse_amount(text)
            }
        };
        Ok(TransformRequest {
            stretch_x: field(stretch_x, 1.0)?,
            reflect_x,
            shift_x: field(shift_x, 0.0)?,
            stretch_y: field(stretch_y, 1.0)?,
            reflect_y,
            shift_y: field(shift_y, 0.0)?,
        })
    }

    pub fn stretch_x(mut self, factor: f64) -> Self {
        self.stretch_x = factor;
        self
    }

    pub fn reflect_x(mut self, reflect: bool) -> Self {
        self.reflect_x = reflect;
        self
    }

    pub fn shift_x(mut self, amount: f64) -> Self {
        self.shift_x = amount;
        self
    }

    pub fn stretch_y(mut self, factor: f64) -> Self {
        self.stretch_y = factor;
        self
    }

    pub fn reflect_y(mut self, reflect: bool) -> Self {
        self.reflect_y = reflect;
        self
    }

    pub fn shift_y(mut self, amount: f64) -> Self {
        self.shift_y = amount;
        self
    }

    /// Validated, non-identity transformations in application order
    ///
    /// # Errors
    /// The first amount that fails [`Transformation::stretch`] or
    /// [`Transformation::shift`] validation.
    pub fn transformations(&self) -> Result<Vec<Transformation>, TransformError> {
        let mut out = Vec::with_capacity(6);
        for (axis, stretch, reflect, shift) in [
            (Axis::X, self.stretch_x, self.reflect_x, self.shift_x),
            (Axis::Y, self.stretch_y, self.reflect_y, self.shift_y),
        ] {
            out.push(Transformation::stretch(axis, stretch)?);
            if reflect {
                out.push(Transformation::reflect(axis));
            }
            out.push(Transformation::shift(axis, shift)?);
        }
        out.retain(|t| !t.is_identity());
        Ok(out)
    }

    /// Push every transformation onto `queue`
    ///
    /// Nothing is pushed if validation fails, or if the queue rejects
    /// overflow and lacks room for the whole batch. Returns the number of
    /// transformations pushed.
    ///
    /// # Errors
    /// Validation errors from [`TransformRequest::transformations`];
    /// `QueueFull` as described above.
    pub fn enqueue_into(&self, queue: &mut TransformQueue) -> Result<usize, TransformError> {
        let batch = self.transformations()?;
        if batch.len() > queue.remaining() && queue.policy() == OverflowPolicy::Reject {
            return Err(TransformError::QueueFull {
                capacity: queue.capacity(),
            });
        }
        let pushed = batch.len().min(queue.remaining());
        for transformation in batch {
            queue.push(transformation)?;
        }
        Ok(pushed)
    }
}
