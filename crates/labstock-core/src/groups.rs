//! Calibrator and QC group resolution.

use std::collections::BTreeSet;

use labstock_config::GroupMaps;
use labstock_model::Component;

/// Resolves a test type to the set of types whose records feed its
/// calibrator or QC cell.
///
/// Lookup is a single exact-string indirection on the trimmed type. A
/// pooled type is never looked up again, and a miss resolves to the type
/// itself.
#[derive(Debug, Clone, Copy)]
pub struct GroupResolver<'a> {
    groups: &'a GroupMaps,
}

impl<'a> GroupResolver<'a> {
    pub fn new(groups: &'a GroupMaps) -> Self {
        Self { groups }
    }

    /// `{type}` or `{type, pooled calibrator type}`.
    pub fn resolve_calibrators(&self, test_type: &str) -> BTreeSet<String> {
        self.resolve(Component::Calibrator, test_type)
    }

    /// `{type}` or `{type, pooled QC type}`.
    pub fn resolve_qc(&self, test_type: &str) -> BTreeSet<String> {
        self.resolve(Component::Qc, test_type)
    }

    /// Pooled type for `component`, if the map has an entry for `test_type`.
    ///
    /// Reagents and other components are never pooled.
    pub fn pooled_type(&self, component: Component, test_type: &str) -> Option<&'a str> {
        let map = match component {
            Component::Calibrator => &self.groups.calibrator,
            Component::Qc => &self.groups.qc,
            Component::Reagent | Component::Other => return None,
        };
        map.get(test_type.trim()).map(String::as_str)
    }

    fn resolve(&self, component: Component, test_type: &str) -> BTreeSet<String> {
        let mut types = BTreeSet::new();
        types.insert(test_type.to_string());
        if let Some(pooled) = self.pooled_type(component, test_type) {
            types.insert(pooled.to_string());
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> GroupMaps {
        let mut groups = GroupMaps::default();
        groups
            .calibrator
            .insert("AST 2".to_string(), "Universal Calibrator 1".to_string());
        groups
            .calibrator
            .insert("Universal Calibrator 1".to_string(), "Master Cal".to_string());
        groups.qc.insert("HDL".to_string(), "QC2".to_string());
        groups
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn mapped_type_resolves_to_pair() {
        let groups = groups();
        let resolver = GroupResolver::new(&groups);
        assert_eq!(
            resolver.resolve_calibrators("AST 2"),
            set(&["AST 2", "Universal Calibrator 1"])
        );
        assert_eq!(resolver.resolve_qc("HDL"), set(&["HDL", "QC2"]));
    }

    #[test]
    fn miss_resolves_to_identity() {
        let groups = groups();
        let resolver = GroupResolver::new(&groups);
        assert_eq!(resolver.resolve_qc("AST 2"), set(&["AST 2"]));
        assert_eq!(resolver.resolve_calibrators("ast 2"), set(&["ast 2"]));
        assert_eq!(resolver.resolve_calibrators("nan"), set(&["nan"]));
    }

    #[test]
    fn lookup_is_single_level() {
        let groups = groups();
        let resolver = GroupResolver::new(&groups);
        let resolved = resolver.resolve_calibrators("AST 2");
        assert!(!resolved.contains("Master Cal"));
    }

    #[test]
    fn reagents_are_never_pooled() {
        let groups = groups();
        let resolver = GroupResolver::new(&groups);
        assert_eq!(resolver.pooled_type(Component::Reagent, "AST 2"), None);
        assert_eq!(
            resolver.pooled_type(Component::Calibrator, "AST 2"),
            Some("Universal Calibrator 1")
        );
    }
}
