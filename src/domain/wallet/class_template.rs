//! Per-club wallet class templates.
//!
//! A class is the shared layout resource every issued object references.
//! Template bodies stay loosely typed (`serde_json::Value`): the platform
//! accepts a wide document, and the admin surface lets operators submit raw
//! templates. The engine only guarantees the `id` field matches the
//! addressed class.

use serde_json::{json, Value};

use crate::domain::club::ClubDefinition;

/// A class as acknowledged by the wallet platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletClass {
    pub id: String,
    pub body: Value,
}

/// Builds the default generic-class template for a club.
pub fn build_class_template(club: &ClubDefinition, issuer_id: &str) -> Value {
    let mut template = json!({
        "id": club.class_id(issuer_id),
        "classTemplateInfo": {
            "cardTemplateOverride": {
                "cardRowTemplateInfos": [
                    {
                        "twoItems": {
                            "startItem": {
                                "firstValue": {
                                    "fields": [
                                        { "fieldPath": "object.textModulesData['member_id']" }
                                    ]
                                }
                            },
                            "endItem": {
                                "firstValue": {
                                    "fields": [
                                        { "fieldPath": "object.textModulesData['valid_for']" }
                                    ]
                                }
                            }
                        }
                    }
                ]
            }
        },
        "enableSmartTap": false,
        "multipleDevicesAndHoldersAllowedStatus": "ONE_USER_ALL_DEVICES",
    });

    if !club.benefits.is_empty() {
        template["textModulesData"] = json!([{
            "id": "benefits",
            "header": "Member Benefits",
            "body": club.benefits.join("\n"),
        }]);
    }

    template
}

/// Forces the `id` field of a template to the addressed class id.
pub fn with_class_id(mut template: Value, class_id: &str) -> Value {
    template["id"] = json!(class_id);
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::club::RosterColumns;

    fn test_club() -> ClubDefinition {
        ClubDefinition {
            id: "data-science-student-society".to_string(),
            display_name: "Data Science Student Society".to_string(),
            class_suffix: "club-pass-v1".to_string(),
            logo_url: None,
            hero_image_url: None,
            name_format: "{last}, {first}".to_string(),
            benefits: vec!["Campus cafe - 10%".to_string(), "Bookstore - 5%".to_string()],
            roster_columns: RosterColumns::default(),
        }
    }

    #[test]
    fn template_id_matches_class_id() {
        let template = build_class_template(&test_club(), "338800");
        assert_eq!(template["id"], "338800.club-pass-v1");
    }

    #[test]
    fn benefits_render_as_text_module() {
        let template = build_class_template(&test_club(), "338800");
        let body = template["textModulesData"][0]["body"].as_str().unwrap();
        assert!(body.contains("Campus cafe - 10%"));
        assert!(body.contains("Bookstore - 5%"));
    }

    #[test]
    fn no_benefits_module_without_benefits() {
        let mut club = test_club();
        club.benefits.clear();
        let template = build_class_template(&club, "338800");
        assert!(template.get("textModulesData").is_none());
    }

    #[test]
    fn with_class_id_overrides_mismatched_id() {
        let template = json!({"id": "wrong.id", "reviewStatus": "UNDER_REVIEW"});
        let fixed = with_class_id(template, "338800.club-pass-v1");
        assert_eq!(fixed["id"], "338800.club-pass-v1");
        assert_eq!(fixed["reviewStatus"], "UNDER_REVIEW");
    }

    #[test]
    fn with_class_id_adds_missing_id() {
        let fixed = with_class_id(json!({}), "338800.club-pass-v1");
        assert_eq!(fixed["id"], "338800.club-pass-v1");
    }
}
