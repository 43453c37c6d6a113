//! Behaviour-change stages and the technique set Dawn uses for each.
//!
//! The stage is advisory input from the caller on every request. Nothing here
//! tracks or derives transitions between stages.

/// Position of the parent in the behaviour-change funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Not yet considering vaccination.
    PreContemplation,
    /// Weighing it up. Fallback for unknown or missing labels.
    #[default]
    Contemplation,
    /// Ready to act.
    Preparation,
}

/// Approach and ordered techniques for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyRecord {
    pub approach: &'static str,
    pub techniques: &'static [&'static str],
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::PreContemplation, Stage::Contemplation, Stage::Preparation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreContemplation => "pre_contemplation",
            Stage::Contemplation => "contemplation",
            Stage::Preparation => "preparation",
        }
    }

    /// Exact match on the canonical label.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.as_str() == label)
    }

    /// Resolve a caller-supplied label; anything unrecognised is `Contemplation`.
    pub fn resolve(label: Option<&str>) -> Self {
        label.and_then(Self::parse).unwrap_or_default()
    }

    pub fn strategy(&self) -> StrategyRecord {
        match self {
            Stage::PreContemplation => StrategyRecord {
                approach: "relationship_building",
                techniques: &[
                    "Validate protective instincts without validating misinformation",
                    "Use motivational interviewing - explore ambivalence",
                    "Avoid direct confrontation which increases resistance",
                    "Focus on shared values (child protection, good parenting)",
                    "Plant seeds of doubt about anti-vaccine information",
                ],
            },
            Stage::Contemplation => StrategyRecord {
                approach: "tip_toward_action",
                techniques: &[
                    "Amplify pro-vaccine motivations they already express",
                    "Use social proof - other similar parents who vaccinated",
                    "Address specific concerns with empathy + evidence",
                    "Create urgency around timing (measles outbreaks, school deadlines)",
                    "Make vaccination the easier path (remove barriers)",
                ],
            },
            Stage::Preparation => StrategyRecord {
                approach: "facilitate_action",
                techniques: &[
                    "Remove practical barriers to vaccination",
                    "Provide specific scheduling support",
                    "Address last-minute concerns confidently",
                    "Use presumptive approach - assume they will vaccinate",
                    "Offer accompaniment and support during process",
                ],
            },
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
