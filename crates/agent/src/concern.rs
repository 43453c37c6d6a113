//! Concern tags and their validation / evidence / redirect guidance.

/// A specific objection raised by the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcernTag {
    AutismFear,
    SideEffects,
    NaturalImmunity,
    IngredientFears,
    DistrustInstitutions,
    TooManyVaccines,
}

/// The three guidance lines rendered for one concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcernRecord {
    pub validation: &'static str,
    pub evidence: &'static str,
    pub redirect: &'static str,
}

impl ConcernTag {
    pub const ALL: [ConcernTag; 6] = [
        ConcernTag::AutismFear,
        ConcernTag::SideEffects,
        ConcernTag::NaturalImmunity,
        ConcernTag::IngredientFears,
        ConcernTag::DistrustInstitutions,
        ConcernTag::TooManyVaccines,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernTag::AutismFear => "autism_fear",
            ConcernTag::SideEffects => "side_effects",
            ConcernTag::NaturalImmunity => "natural_immunity",
            ConcernTag::IngredientFears => "ingredient_fears",
            ConcernTag::DistrustInstitutions => "distrust_institutions",
            ConcernTag::TooManyVaccines => "too_many_vaccines",
        }
    }

    /// Exact match on the canonical tag; unknown tags have no record.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|concern| concern.as_str() == tag)
    }

    /// Human-readable label ("side effects").
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn record(&self) -> ConcernRecord {
        match self {
            ConcernTag::AutismFear => ConcernRecord {
                validation: "I completely understand your concern about autism - it shows what a caring parent you are.",
                evidence: "The autism-vaccine link was based on a fraudulent study by Andrew Wakefield who lost his medical license. Since then, over 25 studies with millions of children have found no connection - including the largest study ever done following 657,461 children (Annals of Internal Medicine 2019).",
                redirect: "What we do know causes autism-like symptoms is measles encephalitis - brain inflammation from measles infection.",
            },
            ConcernTag::SideEffects => ConcernRecord {
                validation: "You're right to think about potential side effects - that's good parenting.",
                evidence: "MMR side effects are typically mild: soreness, low fever in some children. Serious reactions are incredibly rare - less than 1 in a million doses.",
                redirect: "Compare that to measles: 1 in 4 children hospitalized, 1 in 1,000 get brain damage, 1-2 in 1,000 die.",
            },
            ConcernTag::NaturalImmunity => ConcernRecord {
                validation: "Natural immunity is indeed strong - your instinct about that is correct.",
                evidence: "But getting natural immunity means risking the disease first. For measles, that's a 1 in 1,000 chance of brain damage or death.",
                redirect: "Vaccines give you the immunity benefit without the disease risk - it's natural immunity, safely.",
            },
            ConcernTag::IngredientFears => ConcernRecord {
                validation: "Wanting to know what goes into your child's body shows excellent parenting instincts.",
                evidence: "Vaccine ingredients are present in tiny amounts - far less than what your child encounters in food, water, and air daily. The aluminum in vaccines is less than what's in breast milk.",
                redirect: "The formaldehyde in vaccines is less than what your child's body naturally produces every day.",
            },
            ConcernTag::DistrustInstitutions => ConcernRecord {
                validation: "Your skepticism of institutions shows you're thinking critically about your child's health.",
                evidence: "Independent researchers worldwide, not just government agencies, have confirmed vaccine safety across different countries and healthcare systems.",
                redirect: "The real institutional failure would be if we didn't have systems to prevent children from dying of preventable diseases.",
            },
            ConcernTag::TooManyVaccines => ConcernRecord {
                validation: "The vaccine schedule can feel overwhelming when you see it all laid out.",
                evidence: "Your child's immune system handles thousands of antigens daily. All childhood vaccines combined contain fewer antigens (305) than a single common cold (3,000+ antigens).",
                redirect: "Spacing out vaccines actually leaves your child vulnerable longer during the most dangerous period - infancy.",
            },
        }
    }
}

impl std::fmt::Display for ConcernTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognised concern paired with its guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConcern {
    pub tag: ConcernTag,
    pub record: ConcernRecord,
}

/// Maps caller-supplied tags to guidance records.
///
/// Output follows input order with one entry per occurrence of a known tag.
/// With `dedupe` set, repeats of a tag already emitted are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcernResolver {
    pub dedupe: bool,
}

impl ConcernResolver {
    pub fn new(dedupe: bool) -> Self {
        Self { dedupe }
    }

    pub fn resolve<S: AsRef<str>>(&self, tags: &[S]) -> Vec<ResolvedConcern> {
        let mut resolved: Vec<ResolvedConcern> = Vec::new();
        for tag in tags.iter().filter_map(|t| ConcernTag::parse(t.as_ref())) {
            if self.dedupe && resolved.iter().any(|r| r.tag == tag) {
                continue;
            }
            resolved.push(ResolvedConcern {
                tag,
                record: tag.record(),
            });
        }
        resolved
    }
}
