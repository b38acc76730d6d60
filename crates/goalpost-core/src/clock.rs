//! Turn clock: the single authoritative turn counter.
//!
//! Goal bookkeeping (`start_turn`, `resolved_turn`) and whatever the host
//! displays both read from this counter, so the two can never drift apart.
//! The clock only moves forward. [`TurnClock::set_turn`] can jump ahead
//! when a campaign is loaded but never rewinds; only [`TurnClock::reset`]
//! returns to the starting turn, and the engine pairs that with clearing
//! every goal.

/// Turn the clock starts on unless configured otherwise.
pub const DEFAULT_STARTING_TURN: u64 = 1;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Turn counter would overflow.
    #[error("turn counter overflow: cannot advance beyond u64::MAX")]
    TurnOverflow,

    /// A requested turn lies behind the current one.
    #[error("cannot rewind turn counter from {from} to {to}")]
    Rewind {
        /// Current turn.
        from: u64,
        /// Requested turn.
        to: u64,
    },
}

/// Monotonically increasing turn counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnClock {
    /// Current turn number.
    turn: u64,

    /// Turn the clock returns to on [`reset`](Self::reset).
    starting_turn: u64,
}

impl TurnClock {
    /// Create a clock positioned at `starting_turn`.
    pub const fn new(starting_turn: u64) -> Self {
        Self {
            turn: starting_turn,
            starting_turn,
        }
    }

    /// Advance the clock by one turn. Returns the new turn number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TurnOverflow`] if the counter would exceed
    /// `u64::MAX`. The counter is left unchanged in that case.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.turn = self.turn.checked_add(1).ok_or(ClockError::TurnOverflow)?;
        Ok(self.turn)
    }

    /// Return the current turn number.
    pub const fn current(&self) -> u64 {
        self.turn
    }

    /// Jump forward to an explicit turn number (used when restoring a
    /// campaign). Setting the current turn again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Rewind`] if `turn` is behind the current turn.
    /// The counter is left unchanged in that case.
    pub const fn set_turn(&mut self, turn: u64) -> Result<(), ClockError> {
        if turn < self.turn {
            return Err(ClockError::Rewind {
                from: self.turn,
                to: turn,
            });
        }
        self.turn = turn;
        Ok(())
    }

    /// Return the clock to its starting turn.
    pub const fn reset(&mut self) {
        self.turn = self.starting_turn;
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_TURN)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_turn_one_by_default() {
        let clock = TurnClock::default();
        assert_eq!(clock.current(), 1);
    }

    #[test]
    fn clock_advances_by_one() {
        let mut clock = TurnClock::new(0);
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.current(), 2);
    }

    #[test]
    fn overflow_is_an_error_and_leaves_turn_unchanged() {
        let mut clock = TurnClock::new(u64::MAX);
        assert!(matches!(clock.advance(), Err(ClockError::TurnOverflow)));
        assert_eq!(clock.current(), u64::MAX);
    }

    #[test]
    fn set_turn_jumps_forward_and_reset_returns_to_start() {
        let mut clock = TurnClock::new(1);
        clock.set_turn(42).unwrap();
        assert_eq!(clock.current(), 42);
        clock.set_turn(42).unwrap();
        clock.reset();
        assert_eq!(clock.current(), 1);
    }

    #[test]
    fn set_turn_refuses_to_rewind() {
        let mut clock = TurnClock::new(1);
        clock.advance().unwrap();
        clock.advance().unwrap();

        let result = clock.set_turn(1);

        assert!(matches!(result, Err(ClockError::Rewind { from: 3, to: 1 })));
        assert_eq!(clock.current(), 3);
    }
}
