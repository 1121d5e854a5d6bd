use serde::{Deserialize, Serialize};

/// Verdict shown under a measured reaction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionTier {
    /// Under 200 ms.
    Incredible,
    /// 200-299 ms.
    Great,
    /// 300-399 ms.
    Good,
    KeepPracticing,
}

impl ReactionTier {
    pub fn from_ms(reaction_ms: u64) -> Self {
        match reaction_ms {
            0..200 => ReactionTier::Incredible,
            200..300 => ReactionTier::Great,
            300..400 => ReactionTier::Good,
            _ => ReactionTier::KeepPracticing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReactionTier::Incredible => "Incredibly fast!",
            ReactionTier::Great => "Great reaction!",
            ReactionTier::Good => "Good!",
            ReactionTier::KeepPracticing => "You can do better",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(ReactionTier::from_ms(0), ReactionTier::Incredible);
        assert_eq!(ReactionTier::from_ms(199), ReactionTier::Incredible);
        assert_eq!(ReactionTier::from_ms(200), ReactionTier::Great);
        assert_eq!(ReactionTier::from_ms(299), ReactionTier::Great);
        assert_eq!(ReactionTier::from_ms(300), ReactionTier::Good);
        assert_eq!(ReactionTier::from_ms(399), ReactionTier::Good);
        assert_eq!(ReactionTier::from_ms(400), ReactionTier::KeepPracticing);
        assert_eq!(ReactionTier::from_ms(5_000), ReactionTier::KeepPracticing);
    }

    #[test]
    fn labels_are_distinct() {
        let tiers = [
            ReactionTier::Incredible,
            ReactionTier::Great,
            ReactionTier::Good,
            ReactionTier::KeepPracticing,
        ];
        for (i, a) in tiers.iter().enumerate() {
            for b in &tiers[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
