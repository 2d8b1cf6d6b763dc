//! Step direction and the step sink capability.

/// Direction of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive step count.
    Forward,
    /// Negative step count.
    Backward,
}

impl Direction {
    /// Get direction from a signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// `true` for [`Direction::Forward`].
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

impl From<bool> for Direction {
    fn from(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Something that can execute single steps.
///
/// The [`StepGenerator`](super::StepGenerator) decides *when* and in which
/// direction to step; the sink does the electrical work. Implementations set
/// the direction first and then emit the pulse.
pub trait StepSink {
    /// Error raised by the underlying hardware.
    type Error;

    /// Execute one step in the positive direction.
    fn step_forward(&mut self) -> Result<(), Self::Error>;

    /// Execute one step in the negative direction.
    fn step_backward(&mut self) -> Result<(), Self::Error>;

    /// Execute one step in `direction`.
    #[inline]
    fn step_towards(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Forward => self.step_forward(),
            Direction::Backward => self.step_backward(),
        }
    }
}
