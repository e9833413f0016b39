use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four fixed dimensions a gap analysis is structured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Revisit,
    Resolution,
    Coverage,
    Cost,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Revisit, Axis::Resolution, Axis::Coverage, Axis::Cost];

    /// Maps English, Japanese and field-name style axis labels onto an axis.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if let Some(axis) = Axis::ALL.into_iter().find(|axis| axis.to_string() == lower) {
            return Some(axis);
        }

        const REVISIT: &[&str] = &["revisit", "frequency", "temporal", "観測頻度", "頻度", "再訪"];
        const RESOLUTION: &[&str] = &["resolution", "gsd", "空間分解能", "分解能"];
        const COVERAGE: &[&str] = &["coverage", "swath", "area", "extent", "観測範囲", "範囲"];
        const COST: &[&str] = &["cost", "budget", "price", "コスト", "予算", "費用"];

        let matches = |needles: &[&str]| needles.iter().any(|needle| lower.contains(needle));
        if matches(REVISIT) {
            Some(Axis::Revisit)
        } else if matches(RESOLUTION) {
            Some(Axis::Resolution)
        } else if matches(COVERAGE) {
            Some(Axis::Coverage)
        } else if matches(COST) {
            Some(Axis::Cost)
        } else if lower.contains("spatial") {
            // "spatial coverage" and "spatial extent" already matched above
            Some(Axis::Resolution)
        } else {
            None
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Axis::Revisit => "revisit",
            Axis::Resolution => "resolution",
            Axis::Coverage => "coverage",
            Axis::Cost => "cost",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapLevel {
    Large,
    Medium,
    Small,
}

impl GapLevel {
    /// Reads a level from the whole label, then from its first word, so
    /// `"大（高）"` and `"Large - cloud limited"` both count as large.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        Self::from_word(&lower).or_else(|| {
            lower
                .split(|ch: char| !ch.is_alphanumeric())
                .find(|word| !word.is_empty())
                .and_then(Self::from_word)
        })
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "large" | "high" | "big" | "major" | "大" => Some(GapLevel::Large),
            "medium" | "moderate" | "mid" | "中" => Some(GapLevel::Medium),
            "small" | "low" | "minor" | "小" => Some(GapLevel::Small),
            _ => None,
        }
    }
}

impl fmt::Display for GapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GapLevel::Large => "large",
            GapLevel::Medium => "medium",
            GapLevel::Small => "small",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapDimension {
    pub axis: Axis,
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub gap_level: Option<GapLevel>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub risk: String,
    #[serde(default)]
    pub mitigation: String,
}

impl GapDimension {
    /// Whether the reason carries at least one numeric token.
    pub fn reason_is_quantified(&self) -> bool {
        self.reason.chars().any(char::is_numeric)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriorityGap {
    #[serde(default)]
    pub axis: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub quick_win: bool,
}

/// Goal, to-be requirements and per-axis gaps produced by the second step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GapAnalysisRecord {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub to_be_requirements: BTreeMap<String, String>,
    #[serde(default)]
    pub dimensions: Vec<GapDimension>,
    #[serde(default)]
    pub priority_gaps_top3: Vec<PriorityGap>,
}

impl GapAnalysisRecord {
    pub fn dimension(&self, axis: Axis) -> Option<&GapDimension> {
        self.dimensions.iter().find(|dimension| dimension.axis == axis)
    }
}
