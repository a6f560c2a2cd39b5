//! Session score and its on-screen readout

use serde::{Deserialize, Serialize};

/// On-screen score label, supplied by the host
pub trait ScoreDisplay {
    fn set_value(&mut self, value: u32);
}

/// Coins collected minus hits taken, floored at zero.
///
/// Lives on the game session, so it survives level transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// +1 per coin. Returns the new value.
    pub fn collect_coin(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }

    /// -1 per hit, never below zero. Returns the new value.
    pub fn take_hit(&mut self) -> u32 {
        self.0 = self.0.saturating_sub(1);
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coins_and_hits() {
        let mut score = Score::default();
        assert_eq!(score.collect_coin(), 1);
        assert_eq!(score.collect_coin(), 2);
        assert_eq!(score.take_hit(), 1);
        assert_eq!(score.to_string(), "1");
    }

    #[test]
    fn test_never_negative() {
        let mut score = Score::default();
        for _ in 0..5 {
            assert_eq!(score.take_hit(), 0);
        }
        assert_eq!(score.collect_coin(), 1);
    }

    #[test]
    fn test_saturates_at_max() {
        let mut score = Score::new(u32::MAX);
        assert_eq!(score.collect_coin(), u32::MAX);
        score.reset();
        assert_eq!(score.value(), 0);
    }
}
