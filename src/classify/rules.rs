//! Classifier rule sets.
//!
//! The app list and the home-screen widget historically classified the same
//! feed with slightly different rules. Both are expressed here as presets of
//! one [`ClassifierRules`] value so the differences are explicit.
use serde::{Deserialize, Serialize};

use super::types::{EmergencyType, PriorityCode};

/// Title keyword that selects a priority code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityKeyword {
    pub keyword: String,
    pub priority: PriorityCode,
}

/// One step of the emergency type decision.
///
/// Matches when the description contains any of `description_keywords`, or
/// the already computed priority is one of `priorities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    pub emergency_type: EmergencyType,
    #[serde(default)]
    pub description_keywords: Vec<String>,
    #[serde(default)]
    pub priorities: Vec<PriorityCode>,
}

impl TypeRule {
    fn new(emergency_type: EmergencyType, keywords: &[&str], priorities: &[PriorityCode]) -> Self {
        Self {
            emergency_type,
            description_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            priorities: priorities.to_vec(),
        }
    }
}

/// Full configuration of the classifier.
///
/// Priority keywords and type rules are evaluated in order; the first match
/// wins. Anything unmatched falls back to [`PriorityCode::Unknown`] and
/// [`EmergencyType::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    pub priority_keywords: Vec<PriorityKeyword>,
    pub type_rules: Vec<TypeRule>,
    /// Compute the screen reader sentence.
    pub accessibility_label: bool,
    /// Strip weekday and offset from real `pubDate` values.
    pub normalize_date: bool,
    /// Match priority keywords against the title case-insensitively.
    pub fold_title_case: bool,
    /// Match type keywords against the description case-insensitively.
    pub fold_description_case: bool,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ClassifierRules {
    /// Rules used by the announcement list: full type table, normalized
    /// dates and accessibility labels.
    pub fn canonical() -> Self {
        use EmergencyType::*;
        use PriorityCode::*;

        Self {
            priority_keywords: default_priority_keywords(),
            type_rules: vec![
                TypeRule::new(Ambulance, &["Ambulance"], &[A1, A2, B2]),
                TypeRule::new(Firefighters, &["Brand"], &[P1, P2]),
                TypeRule::new(Trauma, &["Trauma", "heli"], &[]),
            ],
            accessibility_label: true,
            normalize_date: true,
            fold_title_case: true,
            fold_description_case: false,
        }
    }

    /// Rules used by the home-screen widget: A-codes do not force the
    /// ambulance type, there is no trauma rule, raw dates and no label.
    pub fn widget() -> Self {
        use EmergencyType::*;
        use PriorityCode::*;

        Self {
            priority_keywords: default_priority_keywords(),
            type_rules: vec![
                TypeRule::new(Ambulance, &["Ambulance"], &[]),
                TypeRule::new(Firefighters, &["Brand"], &[P1, P2]),
            ],
            accessibility_label: false,
            normalize_date: false,
            fold_title_case: false,
            fold_description_case: false,
        }
    }
}

fn default_priority_keywords() -> Vec<PriorityKeyword> {
    [
        ("a1", PriorityCode::A1),
        ("a2", PriorityCode::A2),
        ("b2", PriorityCode::B2),
        ("p 1", PriorityCode::P1),
        ("p 2", PriorityCode::P2),
    ]
    .into_iter()
    .map(|(keyword, priority)| PriorityKeyword {
        keyword: keyword.to_string(),
        priority,
    })
    .collect()
}

/// Named rule presets, selectable from configuration and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Canonical,
    Widget,
}

impl Variant {
    pub fn rules(self) -> ClassifierRules {
        match self {
            Variant::Canonical => ClassifierRules::canonical(),
            Variant::Widget => ClassifierRules::widget(),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" | "app" => Ok(Variant::Canonical),
            "widget" => Ok(Variant::Widget),
            other => Err(format!("unknown variant '{}' (expected canonical or widget)", other)),
        }
    }
}
