use crate::models::{Perfume, Situation};

/// Reason given when no rule matches a perfume
pub const FALLBACK_REASON: &str = "Balanced everyday scent";

/// Lower than any attainable score, so the first candidate is always kept
const NO_SCORE: f64 = -1.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("no candidates")]
    NoCandidates,
}

/// Situational tag a rule is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Mood,
    Occasion,
    TimeOfDay,
    Weather,
}

impl Tag {
    fn value(self, situation: &Situation) -> &str {
        match self {
            Tag::Mood => &situation.mood,
            Tag::Occasion => &situation.occasion,
            Tag::TimeOfDay => &situation.time_of_day,
            Tag::Weather => &situation.weather,
        }
    }
}

/// Perfume attribute a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    ScentType,
    Notes,
}

/// One additive bonus: `tag == expected` and the attribute contains `needle`
struct Rule {
    tag: Tag,
    expected: &'static str,
    attribute: Attribute,
    needle: &'static str,
    bonus: f64,
    reason: &'static str,
}

/// Bonus table, applied in order. Rules are independent and may all fire.
const RULES: [Rule; 5] = [
    Rule {
        tag: Tag::Mood,
        expected: "confident",
        attribute: Attribute::ScentType,
        needle: "woody",
        bonus: 0.3,
        reason: "woody scents boost confidence",
    },
    Rule {
        tag: Tag::Mood,
        expected: "romantic",
        attribute: Attribute::Notes,
        needle: "sweet",
        bonus: 0.3,
        reason: "sweet notes feel romantic",
    },
    Rule {
        tag: Tag::Occasion,
        expected: "office",
        attribute: Attribute::ScentType,
        needle: "fresh",
        bonus: 0.2,
        reason: "fresh scents suit office wear",
    },
    Rule {
        tag: Tag::TimeOfDay,
        expected: "evening",
        attribute: Attribute::Notes,
        needle: "spicy",
        bonus: 0.2,
        reason: "spicy notes work well in evenings",
    },
    Rule {
        tag: Tag::Weather,
        expected: "cool",
        attribute: Attribute::Notes,
        needle: "amber",
        bonus: 0.2,
        reason: "amber notes perform well in cool weather",
    },
];

/// Raw score of a single perfume
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub value: f64,
    /// Fragments of the rules that fired, in table order
    pub reasons: Vec<&'static str>,
}

impl Score {
    /// Human-readable justification, never empty
    pub fn reason(&self) -> String {
        if self.reasons.is_empty() {
            FALLBACK_REASON.to_string()
        } else {
            self.reasons.join(", ")
        }
    }
}

/// The perfume chosen for a situation
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub perfume: &'a Perfume,
    /// Score rounded to two decimals. Not clamped, so it can exceed 1.0.
    pub confidence: f64,
    pub reason: String,
}

/// Scores one perfume against a situation
///
/// Scent type and notes are matched case-insensitively by substring, so
/// "woody" also matches inside "woodyish". Missing attributes match nothing.
pub fn score(perfume: &Perfume, situation: &Situation) -> Score {
    let scent = perfume.scent_type.as_deref().unwrap_or_default().to_lowercase();
    let notes = perfume.notes.as_deref().unwrap_or_default().to_lowercase();

    let mut value = 0.0;
    let mut reasons = Vec::new();

    for rule in &RULES {
        if rule.tag.value(situation) != rule.expected {
            continue;
        }
        let haystack = match rule.attribute {
            Attribute::ScentType => &scent,
            Attribute::Notes => &notes,
        };
        if haystack.contains(rule.needle) {
            value += rule.bonus;
            reasons.push(rule.reason);
        }
    }

    Score { value, reasons }
}

/// Picks the best perfume for a situation
///
/// Linear scan keeping the strictly greater score, so on ties the earliest
/// candidate wins.
pub fn select<'a>(
    perfumes: &'a [Perfume],
    situation: &Situation,
) -> Result<Selection<'a>, ScoringError> {
    let mut best: Option<(&Perfume, Score)> = None;
    let mut best_value = NO_SCORE;

    for perfume in perfumes {
        let candidate = score(perfume, situation);
        if candidate.value > best_value {
            best_value = candidate.value;
            best = Some((perfume, candidate));
        }
    }

    let (perfume, winner) = best.ok_or(ScoringError::NoCandidates)?;

    Ok(Selection {
        perfume,
        confidence: round2(winner.value),
        reason: winner.reason(),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
