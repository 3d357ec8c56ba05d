use alloy::primitives::{I256, U256};
use std::fmt;

/// Decoded result of one `latestRoundData()` read.
///
/// All fields are widened to 256 bits regardless of their wire width, so
/// nothing is truncated on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: U256,
    /// Price in the feed's own fixed-point scale
    pub answer: I256,
    pub started_at: U256,
    pub updated_at: U256,
    pub answered_in_round: U256,
}

impl fmt::Display for RoundData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RoundId: {}", self.round_id)?;
        writeln!(f, "Latest Price: {}", self.answer)?;
        writeln!(f, "Started at: {}", self.started_at)?;
        writeln!(f, "Updated at: {}", self.updated_at)?;
        writeln!(f, "Answered In Round: {}", self.answered_in_round)
    }
}
