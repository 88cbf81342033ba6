//! Component classification from free-text item names.

use labstock_config::ComponentKeywords;
use labstock_model::Component;

/// Classifies item descriptions by case-insensitive keyword containment.
///
/// Keyword groups are checked in order reagent, calibrator, qc; an item
/// matching none of them is [`Component::Other`].
#[derive(Debug, Clone)]
pub struct ComponentClassifier {
    rules: Vec<(Component, Vec<String>)>,
}

impl ComponentClassifier {
    pub fn new(keywords: &ComponentKeywords) -> Self {
        let lower = |values: &[String]| -> Vec<String> {
            values.iter().map(|value| value.trim().to_lowercase()).collect()
        };
        Self {
            rules: vec![
                (Component::Reagent, lower(&keywords.reagent)),
                (Component::Calibrator, lower(&keywords.calibrator)),
                (Component::Qc, lower(&keywords.qc)),
            ],
        }
    }

    pub fn classify(&self, item: Option<&str>) -> Component {
        let Some(item) = item else {
            return Component::Other;
        };
        let item = item.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| item.contains(keyword.as_str())))
            .map_or(Component::Other, |(component, _)| *component)
    }
}

impl Default for ComponentClassifier {
    fn default() -> Self {
        Self::new(&ComponentKeywords::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_item_names() {
        let classifier = ComponentClassifier::default();
        let cases = [
            ("Glucose Reagent Kit", Component::Reagent),
            ("ALT REAGENT 2x100", Component::Reagent),
            ("HDL Calibrator", Component::Calibrator),
            ("Multi-Calib Set", Component::Calibrator),
            ("Universal CALIBRATOR 1", Component::Calibrator),
            ("Liquichek QC Level 1", Component::Qc),
            ("Immunoassay Plus Control", Component::Qc),
            ("Lipid control level 2", Component::Qc),
            ("Cal reagent", Component::Reagent),
            ("Calibrator control pack", Component::Calibrator),
            ("Reaction cuvettes", Component::Other),
            ("Wash Solution", Component::Other),
            ("", Component::Other),
        ];
        for (item, expected) in cases {
            assert_eq!(classifier.classify(Some(item)), expected, "item: {item}");
        }
        assert_eq!(classifier.classify(None), Component::Other);
    }

    #[test]
    fn keywords_are_configurable() {
        let keywords = ComponentKeywords {
            reagent: vec!["R1".to_string()],
            calibrator: vec!["CAL".to_string()],
            qc: vec!["level".to_string()],
        };
        let classifier = ComponentClassifier::new(&keywords);
        assert_eq!(classifier.classify(Some("TSH r1 pack")), Component::Reagent);
        assert_eq!(classifier.classify(Some("TSH Cal Set")), Component::Calibrator);
        assert_eq!(classifier.classify(Some("Level 3")), Component::Qc);
        assert_eq!(classifier.classify(Some("TSH Reagent")), Component::Other);
    }
}
