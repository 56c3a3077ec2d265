use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Priority
// ============================================================================

/// Dispatch urgency code inferred from the announcement title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityCode {
    A1,
    A2,
    B2,
    P1,
    P2,
    Unknown,
}

impl PriorityCode {
    pub const ALL: [PriorityCode; 6] = [
        PriorityCode::A1,
        PriorityCode::A2,
        PriorityCode::B2,
        PriorityCode::P1,
        PriorityCode::P2,
        PriorityCode::Unknown,
    ];

    /// Symbolic name, as used in accessibility labels and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            PriorityCode::A1 => "A1",
            PriorityCode::A2 => "A2",
            PriorityCode::B2 => "B2",
            PriorityCode::P1 => "P1",
            PriorityCode::P2 => "P2",
            PriorityCode::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PriorityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Emergency type
// ============================================================================

/// Responding service category.
///
/// `Police` is part of the taxonomy but no classifier rule produces it; the
/// feed has not been observed to carry police-only dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmergencyType {
    Ambulance,
    Firefighters,
    Police,
    Trauma,
    Other,
}

impl EmergencyType {
    pub const ALL: [EmergencyType; 5] = [
        EmergencyType::Ambulance,
        EmergencyType::Firefighters,
        EmergencyType::Police,
        EmergencyType::Trauma,
        EmergencyType::Other,
    ];

    /// Dutch label shown to users and read by screen readers.
    pub fn display_name(self) -> &'static str {
        match self {
            EmergencyType::Ambulance => "Ambulance",
            EmergencyType::Firefighters => "Brandweer",
            EmergencyType::Police => "Politie",
            EmergencyType::Trauma => "Trauma helikopter",
            EmergencyType::Other => "Onbekend",
        }
    }

    /// Icon for this type. The only way an [`IconKey`] is chosen.
    pub fn icon(self) -> IconKey {
        match self {
            EmergencyType::Ambulance => IconKey::Ambulance,
            EmergencyType::Firefighters => IconKey::FirefighterHelmet,
            EmergencyType::Trauma => IconKey::Heli,
            EmergencyType::Police | EmergencyType::Other => IconKey::HelpCircle,
        }
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Icon
// ============================================================================

/// Token selecting a display image in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IconKey {
    #[serde(rename = "ambulance")]
    Ambulance,
    #[serde(rename = "firefighter-helmet")]
    FirefighterHelmet,
    #[serde(rename = "heli")]
    Heli,
    #[serde(rename = "help-circle")]
    HelpCircle,
}

impl IconKey {
    pub fn as_str(self) -> &'static str {
        match self {
            IconKey::Ambulance => "ambulance",
            IconKey::FirefighterHelmet => "firefighter-helmet",
            IconKey::Heli => "heli",
            IconKey::HelpCircle => "help-circle",
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Announcement
// ============================================================================

/// A classified feed item, ready for presentation.
///
/// Constructed only by the classifier; fields are read through accessors so
/// the icon always matches the emergency type.
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    id: Uuid,
    title: String,
    description: String,
    link: String,
    pub_date: String,
    published_at: Option<DateTime<FixedOffset>>,
    priority: PriorityCode,
    emergency_type: EmergencyType,
    icon: IconKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    accessibility_label: Option<String>,
}

impl Announcement {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        title: String,
        description: String,
        link: String,
        pub_date: String,
        published_at: Option<DateTime<FixedOffset>>,
        priority: PriorityCode,
        emergency_type: EmergencyType,
        accessibility_label: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            link,
            pub_date,
            published_at,
            priority,
            emergency_type,
            icon: emergency_type.icon(),
            accessibility_label,
        }
    }

    /// Identity generated fresh for every classification.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Publication date as shown to users (normalized when the rules ask for it).
    pub fn pub_date(&self) -> &str {
        &self.pub_date
    }

    /// Publication time parsed from the raw RFC 2822 `pubDate`, if it parsed.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.published_at
    }

    pub fn priority(&self) -> PriorityCode {
        self.priority
    }

    pub fn emergency_type(&self) -> EmergencyType {
        self.emergency_type
    }

    pub fn icon(&self) -> IconKey {
        self.icon
    }

    pub fn accessibility_label(&self) -> Option<&str> {
        self.accessibility_label.as_deref()
    }

    /// Compares everything except the identity.
    pub fn same_content(&self, other: &Announcement) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.link == other.link
            && self.pub_date == other.pub_date
            && self.published_at == other.published_at
            && self.priority == other.priority
            && self.emergency_type == other.emergency_type
            && self.icon == other.icon
            && self.accessibility_label == other.accessibility_label
    }
}
