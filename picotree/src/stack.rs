// SPDX-License-Identifier: Apache-2.0

use crate::parse_error::{ParseError, Resource};
use crate::pool::NodeId;

/// Pending work for the parser, standing in for a recursive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    /// Parse one value. The root value must be an object.
    Call { root: bool },
    /// Parse an object member, starting from the key token already read.
    CallLoop,
    /// The value of `parent` is complete; expect `,` or `}`.
    ResumeLoop { parent: NodeId },
}

/// Fixed-capacity continuation stack ("soft stack").
pub(crate) struct SoftStack<const D: usize> {
    frames: [Frame; D],
    top: usize,
    /// Deepest point reached since the last reset
    peak: usize,
}

impl<const D: usize> SoftStack<D> {
    pub const fn new() -> Self {
        Self {
            frames: [Frame::CallLoop; D],
            top: 0,
            peak: 0,
        }
    }

    pub fn reset(&mut self) {
        self.top = 0;
        self.peak = 0;
    }

    pub fn push(&mut self, frame: Frame) -> Result<(), ParseError> {
        let slot = self
            .frames
            .get_mut(self.top)
            .ok_or(ParseError::NoMoreSpace(Resource::Stack))?;
        *slot = frame;
        self.top += 1;
        self.peak = self.peak.max(self.top);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Frame> {
        let top = self.top.checked_sub(1)?;
        let frame = self.frames.get(top).copied()?;
        self.top = top;
        Some(frame)
    }

    pub fn depth(&self) -> usize {
        self.top
    }

    pub fn peak(&self) -> usize {
        self.peak
    }
}
