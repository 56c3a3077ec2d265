//! Rule-based classification of raw feed items.
//!
//! [`classify`] turns a [`RawFeedItem`] into an [`Announcement`] in three
//! ordered steps:
//!
//! 1. **Priority** from title keywords (first match in table order wins)
//! 2. **Emergency type** from description keywords and the priority
//! 3. **Icon** from the emergency type
//!
//! Classification never fails. Unrecognized content ends up as
//! [`PriorityCode::Unknown`] / [`EmergencyType::Other`].

mod rules;
mod types;

pub use rules::{ClassifierRules, PriorityKeyword, TypeRule, Variant};
pub use types::{Announcement, EmergencyType, IconKey, PriorityCode};

use chrono::DateTime;

use crate::feed::{normalize_pub_date, RawFeedItem};

/// Classifies one feed item. Pure apart from the fresh announcement id.
pub fn classify(item: &RawFeedItem, rules: &ClassifierRules) -> Announcement {
    let priority = classify_priority(&item.title, rules);
    let emergency_type = classify_type(&item.description, priority, rules);

    let label = rules
        .accessibility_label
        .then(|| accessibility_label(emergency_type, &item.title, priority));

    let (pub_date, published_at) = if item.has_pub_date {
        let published_at = DateTime::parse_from_rfc2822(item.pub_date.trim()).ok();
        let shown = if rules.normalize_date {
            normalize_pub_date(&item.pub_date)
        } else {
            item.pub_date.clone()
        };
        (shown, published_at)
    } else {
        (item.pub_date.clone(), None)
    };

    Announcement::new(
        item.title.clone(),
        item.description.clone(),
        item.link.clone(),
        pub_date,
        published_at,
        priority,
        emergency_type,
        label,
    )
}

/// Picks the priority for `title` from the ordered keyword table.
pub fn classify_priority(title: &str, rules: &ClassifierRules) -> PriorityCode {
    rules
        .priority_keywords
        .iter()
        .find(|k| contains(title, &k.keyword, rules.fold_title_case))
        .map(|k| k.priority)
        .unwrap_or(PriorityCode::Unknown)
}

/// Picks the emergency type from the ordered type rules.
pub fn classify_type(
    description: &str,
    priority: PriorityCode,
    rules: &ClassifierRules,
) -> EmergencyType {
    rules
        .type_rules
        .iter()
        .find(|rule| {
            rule.priorities.contains(&priority)
                || rule
                    .description_keywords
                    .iter()
                    .any(|k| contains(description, k, rules.fold_description_case))
        })
        .map(|rule| rule.emergency_type)
        .unwrap_or(EmergencyType::Other)
}

/// Screen reader sentence, e.g. `"Brandweer naar P 1 Breda met spoedniveau P1"`.
pub fn accessibility_label(
    emergency_type: EmergencyType,
    title: &str,
    priority: PriorityCode,
) -> String {
    format!(
        "{} naar {} met spoedniveau {}",
        emergency_type.display_name(),
        title,
        priority
    )
}

fn contains(haystack: &str, needle: &str, fold_case: bool) -> bool {
    if fold_case {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn item(title: &str, description: &str) -> RawFeedItem {
        RawFeedItem {
            title: title.to_string(),
            description: description.to_string(),
            link: "https://www.alarmeringen.nl/melding/1".to_string(),
            pub_date: "Thu, 10 Feb 2022 14:05:00 +0100".to_string(),
            has_pub_date: true,
        }
    }

    // ========================================================================
    // Priority
    // ========================================================================

    #[test]
    fn test_priority_each_keyword() {
        let rules = ClassifierRules::canonical();
        assert_eq!(classify_priority("A1 Rit 12345 Breda", &rules), PriorityCode::A1);
        assert_eq!(classify_priority("A2 Rit Tilburg", &rules), PriorityCode::A2);
        assert_eq!(classify_priority("B2 Besteld vervoer", &rules), PriorityCode::B2);
        assert_eq!(classify_priority("P 1 BDH-01 Brand", &rules), PriorityCode::P1);
        assert_eq!(classify_priority("P 2 Dienstverlening", &rules), PriorityCode::P2);
    }

    #[test]
    fn test_every_priority_reachable_from_its_own_code() {
        // Each code's lowercase name, with a space before the digit for P codes,
        // is the keyword that selects it.
        let rules = ClassifierRules::canonical();
        for code in PriorityCode::ALL {
            let title = match code {
                PriorityCode::P1 => "P 1 melding".to_string(),
                PriorityCode::P2 => "P 2 melding".to_string(),
                other => format!("{} melding", other.as_str()),
            };
            assert_eq!(classify_priority(&title, &rules), code, "title {:?}", title);
        }
    }

    #[test]
    fn test_priority_no_match_is_unknown() {
        let rules = ClassifierRules::canonical();
        assert_eq!(classify_priority("Melding zonder code", &rules), PriorityCode::Unknown);
        assert_eq!(classify_priority("", &rules), PriorityCode::Unknown);
    }

    #[test]
    fn test_priority_first_rule_wins() {
        let rules = ClassifierRules::canonical();
        assert_eq!(classify_priority("p 1 en a1 tegelijk", &rules), PriorityCode::A1);
        assert_eq!(classify_priority("p 2 b2", &rules), PriorityCode::B2);
    }

    #[test]
    fn test_priority_p_codes_need_space() {
        let rules = ClassifierRules::canonical();
        assert_eq!(classify_priority("P1 zonder spatie", &rules), PriorityCode::Unknown);
    }

    #[test]
    fn test_priority_case_sensitive_when_not_folding() {
        let rules = ClassifierRules::widget();
        assert_eq!(classify_priority("A1 Breda", &rules), PriorityCode::Unknown);
        assert_eq!(classify_priority("a1 Breda", &rules), PriorityCode::A1);
    }

    // ========================================================================
    // Emergency type
    // ========================================================================

    #[test]
    fn test_type_ambulance_beats_brand_with_p1() {
        let rules = ClassifierRules::canonical();
        let t = classify_type("Ambulance en Brandweer ter plaatse", PriorityCode::P1, &rules);
        assert_eq!(t, EmergencyType::Ambulance);
    }

    #[test]
    fn test_type_priority_bonus() {
        let rules = ClassifierRules::canonical();
        for p in [PriorityCode::A1, PriorityCode::A2, PriorityCode::B2] {
            assert_eq!(classify_type("", p, &rules), EmergencyType::Ambulance);
        }
        for p in [PriorityCode::P1, PriorityCode::P2] {
            assert_eq!(classify_type("", p, &rules), EmergencyType::Firefighters);
        }
    }

    #[test]
    fn test_type_trauma_keywords() {
        let rules = ClassifierRules::canonical();
        assert_eq!(
            classify_type("Traumaheli ingezet", PriorityCode::Unknown, &rules),
            EmergencyType::Trauma
        );
        assert_eq!(
            classify_type("Lifeliner heli geland", PriorityCode::Unknown, &rules),
            EmergencyType::Trauma
        );
    }

    #[test]
    fn test_type_fallback_other() {
        let rules = ClassifierRules::canonical();
        assert_eq!(
            classify_type("Politie ter plaatse", PriorityCode::Unknown, &rules),
            EmergencyType::Other
        );
    }

    #[test]
    fn test_type_description_case_sensitive_by_default() {
        let rules = ClassifierRules::canonical();
        assert_eq!(
            classify_type("ambulance onderweg", PriorityCode::Unknown, &rules),
            EmergencyType::Other
        );
        assert_eq!(
            classify_type("kleine brand", PriorityCode::Unknown, &rules),
            EmergencyType::Other
        );
    }

    #[test]
    fn test_type_description_folding() {
        let rules = ClassifierRules {
            fold_description_case: true,
            ..ClassifierRules::canonical()
        };
        assert_eq!(
            classify_type("kleine brand", PriorityCode::Unknown, &rules),
            EmergencyType::Firefighters
        );
    }

    #[test]
    fn test_widget_has_no_ambulance_bonus_or_trauma() {
        let rules = ClassifierRules::widget();
        assert_eq!(classify_type("", PriorityCode::A1, &rules), EmergencyType::Other);
        assert_eq!(
            classify_type("Traumaheli", PriorityCode::Unknown, &rules),
            EmergencyType::Other
        );
        assert_eq!(classify_type("", PriorityCode::P2, &rules), EmergencyType::Firefighters);
    }

    // ========================================================================
    // Whole item
    // ========================================================================

    #[test]
    fn test_brandweer_a1_classifies_as_ambulance() {
        // A-codes force the ambulance type even for fire brigade text.
        let a = classify(
            &item(
                "Brandweer A1 groot alarm",
                "Brandweer wordt opgeroepen voor grote brand",
            ),
            &ClassifierRules::canonical(),
        );
        assert_eq!(a.priority(), PriorityCode::A1);
        assert_eq!(a.emergency_type(), EmergencyType::Ambulance);
        assert_eq!(a.icon(), IconKey::Ambulance);
    }

    #[test]
    fn test_accessibility_label() {
        let a = classify(
            &item("P 1 BDH-01 Gebouwbrand Breda", "Brandweer"),
            &ClassifierRules::canonical(),
        );
        assert_eq!(
            a.accessibility_label(),
            Some("Brandweer naar P 1 BDH-01 Gebouwbrand Breda met spoedniveau P1")
        );
    }

    #[test]
    fn test_accessibility_label_unknown() {
        let a = classify(&item("Melding", "Onbekend"), &ClassifierRules::canonical());
        assert_eq!(
            a.accessibility_label(),
            Some("Onbekend naar Melding met spoedniveau Unknown")
        );
    }

    #[test]
    fn test_widget_omits_label_and_keeps_raw_date() {
        let a = classify(&item("a1 Breda", "Ambulance"), &ClassifierRules::widget());
        assert_eq!(a.accessibility_label(), None);
        assert_eq!(a.pub_date(), "Thu, 10 Feb 2022 14:05:00 +0100");
    }

    #[test]
    fn test_date_normalized_and_parsed() {
        let a = classify(&item("t", "d"), &ClassifierRules::canonical());
        assert_eq!(a.pub_date(), " 10 Feb 2022 14:05:00");
        let published = a.published_at().unwrap();
        assert_eq!(published.to_rfc3339(), "2022-02-10T14:05:00+01:00");
    }

    #[test]
    fn test_placeholder_date_not_parsed_or_normalized() {
        let raw = RawFeedItem {
            pub_date: "No date".to_string(),
            has_pub_date: false,
            ..item("t", "d")
        };
        let a = classify(&raw, &ClassifierRules::canonical());
        assert_eq!(a.pub_date(), "No date");
        assert!(a.published_at().is_none());
    }

    #[test]
    fn test_unparseable_date_still_classifies() {
        let raw = RawFeedItem {
            pub_date: "gisteren, rond +- 14 uur".to_string(),
            ..item("t", "d")
        };
        let a = classify(&raw, &ClassifierRules::canonical());
        assert!(a.published_at().is_none());
        assert_eq!(a.pub_date(), " rond");
    }

    #[test]
    fn test_fresh_ids() {
        let raw = item("A1", "Ambulance");
        let rules = ClassifierRules::canonical();
        let a = classify(&raw, &rules);
        let b = classify(&raw, &rules);
        assert_ne!(a.id(), b.id());
        assert!(a.same_content(&b));
    }

    #[test]
    fn test_custom_keyword_table() {
        let rules = ClassifierRules {
            priority_keywords: vec![PriorityKeyword {
                keyword: "prio 1".to_string(),
                priority: PriorityCode::P1,
            }],
            ..ClassifierRules::canonical()
        };
        let a = classify(&item("Prio 1 Brand", "x"), &rules);
        assert_eq!(a.priority(), PriorityCode::P1);
        assert_eq!(a.emergency_type(), EmergencyType::Firefighters);
    }

    // ========================================================================
    // Properties
    // ========================================================================

    proptest! {
        #[test]
        fn prop_icon_follows_type(title in ".{0,40}", description in ".{0,60}") {
            for rules in [ClassifierRules::canonical(), ClassifierRules::widget()] {
                let a = classify(&item(&title, &description), &rules);
                prop_assert_eq!(a.icon(), a.emergency_type().icon());
            }
        }

        #[test]
        fn prop_never_police(title in ".{0,40}", description in ".{0,60}") {
            let a = classify(&item(&title, &description), &ClassifierRules::canonical());
            prop_assert_ne!(a.emergency_type(), EmergencyType::Police);
        }

        #[test]
        fn prop_a1_prefix_wins(rest in "[a-z 0-9]{0,30}") {
            let title = format!("a1 {}", rest);
            prop_assert_eq!(
                classify_priority(&title, &ClassifierRules::canonical()),
                PriorityCode::A1
            );
        }
    }

    #[test]
    fn test_icon_is_function_of_type_for_every_type() {
        for t in EmergencyType::ALL {
            let expected = match t {
                EmergencyType::Ambulance => "ambulance",
                EmergencyType::Firefighters => "firefighter-helmet",
                EmergencyType::Trauma => "heli",
                EmergencyType::Police | EmergencyType::Other => "help-circle",
            };
            assert_eq!(t.icon().as_str(), expected);
        }
    }
}
