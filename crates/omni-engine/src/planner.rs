//! # Planner
//!
//! Matches every target property to at most one source leaf and records
//! the decision in a [`TransformPlan`]. Planning never fails: a property
//! with no candidate is simply left unmapped and may later surface as a
//! missing required field.
//!
//! ## Match tiers
//!
//! Tried in order per property; the first tier with any candidate wins and
//! later tiers are not consulted.
//!
//! | Tier | Candidates |
//! |------|------------|
//! | [`MatchTier::Exact`] | leaf paths equal to the property name |
//! | [`MatchTier::ShallowNormalized`] | top-level leaves whose normalized name equals the normalized property |
//! | [`MatchTier::NestedLeaf`] | nested leaves whose final segment, normalized, equals the normalized property |
//!
//! Normalization removes underscores and lower-cases. Among a tier's
//! candidates the path with the fewest characters wins, then the
//! lexicographically smallest.
//!
//! Only nested-leaf collisions are reported as ambiguous. Collisions in the
//! first two tiers are tie-broken without a warning.

use std::collections::BTreeSet;

use omni_core::{FieldPath, Mapping, Payload, TransformPlan};
use omni_schema::TargetSchema;

use crate::flatten::flatten;

/// Which heuristic produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchTier {
    /// Full path equals the property name.
    Exact,
    /// Depth-1 path equal after normalization.
    ShallowNormalized,
    /// Final segment of a nested path equal after normalization.
    NestedLeaf,
}

impl MatchTier {
    /// Tiers in priority order.
    pub const ALL: [MatchTier; 3] = [Self::Exact, Self::ShallowNormalized, Self::NestedLeaf];

    /// Whether `path` is a candidate for `property` in this tier.
    /// `normalized_property` is `normalize(property)`, passed in to avoid
    /// recomputing it for every path.
    fn admits(self, path: &FieldPath, property: &str, normalized_property: &str) -> bool {
        match self {
            Self::Exact => path.as_str() == property,
            Self::ShallowNormalized => {
                path.is_shallow() && normalize(path.as_str()) == normalized_property
            }
            Self::NestedLeaf => !path.is_shallow() && normalize(path.leaf()) == normalized_property,
        }
    }
}

/// The outcome of matching one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMatch {
    /// Tier whose candidate set was non-empty.
    pub tier: MatchTier,
    /// Every candidate in that tier, sorted.
    pub candidates: Vec<FieldPath>,
    /// The tie-break winner.
    pub chosen: FieldPath,
}

impl PropertyMatch {
    /// Whether this match should be reported as ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        self.tier == MatchTier::NestedLeaf && self.candidates.len() > 1
    }
}

/// Canonical comparison form of a name: underscores removed, lower-cased.
pub fn normalize(name: &str) -> String {
    name.replace('_', "").to_lowercase()
}

/// Pick the path with the fewest characters, then the lexicographically
/// smallest.
pub fn tie_break<'a>(candidates: impl IntoIterator<Item = &'a FieldPath>) -> Option<&'a FieldPath> {
    candidates.into_iter().min_by(|a, b| a.tie_break_cmp(b))
}

/// Find the best source leaf for `property` among `paths`.
pub fn match_property(property: &str, paths: &[FieldPath]) -> Option<PropertyMatch> {
    let normalized = normalize(property);
    MatchTier::ALL.into_iter().find_map(|tier| {
        let mut candidates: Vec<FieldPath> = paths
            .iter()
            .filter(|p| tier.admits(p, property, &normalized))
            .cloned()
            .collect();
        let chosen = tie_break(&candidates)?.clone();
        candidates.sort();
        Some(PropertyMatch {
            tier,
            candidates,
            chosen,
        })
    })
}

fn ambiguity_warning(property: &str, found: &PropertyMatch) -> String {
    let listed: Vec<String> = found
        .candidates
        .iter()
        .map(|c| format!("'{c}'"))
        .collect();
    format!(
        "ambiguous mapping for '{property}': candidates=[{}]; chose '{}'",
        listed.join(", "),
        found.chosen
    )
}

/// Build the mapping plan for `source` against an already guarded `schema`.
pub fn build_plan(source: &Payload, schema: &TargetSchema) -> TransformPlan {
    let paths: Vec<FieldPath> = flatten(source).into_iter().map(|leaf| leaf.path).collect();

    let mut mappings = Vec::new();
    let mut warnings = Vec::new();
    let mut consumed: BTreeSet<&FieldPath> = BTreeSet::new();

    for property in schema.property_names() {
        let Some(found) = match_property(property, &paths) else {
            tracing::debug!(property, "no source candidate");
            continue;
        };
        tracing::debug!(
            property,
            tier = ?found.tier,
            chosen = %found.chosen,
            candidates = found.candidates.len(),
            "matched property"
        );
        if found.is_ambiguous() {
            let warning = ambiguity_warning(property, &found);
            tracing::warn!("{warning}");
            warnings.push(warning);
        }
        if let Some(path) = paths.iter().find(|p| **p == found.chosen) {
            consumed.insert(path);
        }
        mappings.push(Mapping::copy(found.chosen, property));
    }

    let mut drops: Vec<FieldPath> = paths
        .iter()
        .filter(|p| !consumed.contains(p))
        .cloned()
        .collect();
    drops.sort();

    TransformPlan::new(mappings, drops, schema.required().to_vec(), warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omni_schema::validate_schema;
    use serde_json::{json, Value};

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn schema(properties: &[&str], required: &[&str]) -> TargetSchema {
        let props: serde_json::Map<String, Value> = properties
            .iter()
            .map(|p| (p.to_string(), json!({"type": "string"})))
            .collect();
        validate_schema(&json!({
            "type": "object",
            "properties": props,
            "required": required,
        }))
        .unwrap()
    }

    fn paths(items: &[&str]) -> Vec<FieldPath> {
        items.iter().map(|s| FieldPath::from(*s)).collect()
    }

    #[test]
    fn normalize_strips_underscores_and_case() {
        assert_eq!(normalize("Full_Name"), "fullname");
        assert_eq!(normalize("__EMAIL__"), "email");
        assert_eq!(normalize("name"), "name");
    }

    #[test]
    fn normalize_lowercases_the_whole_word() {
        // Word-final capital sigma lowers to the final form.
        assert_eq!(normalize("ΟΔΟΣ"), "οδος");
        assert_eq!(normalize("ΟΔΟΣ").chars().last(), Some('ς'));
        let found = match_property("οδος", &paths(&["ΟΔΟ_Σ"])).unwrap();
        assert_eq!(found.tier, MatchTier::ShallowNormalized);
    }

    #[test]
    fn exact_match_selected() {
        let plan = build_plan(&payload(json!({"name": "John"})), &schema(&["name"], &[]));
        assert_eq!(plan.mappings, vec![Mapping::copy("name".into(), "name")]);
        assert!(plan.warnings.is_empty());
        assert!(plan.drops.is_empty());
    }

    #[test]
    fn exact_match_beats_nested_candidate_without_warning() {
        let source = payload(json!({"email": "top", "a": {"email": "x"}, "b": {"email": "y"}}));
        let plan = build_plan(&source, &schema(&["email"], &[]));
        assert_eq!(plan.mappings[0].from_path.as_str(), "email");
        assert!(plan.warnings.is_empty());
        assert_eq!(plan.drops, paths(&["a.email", "b.email"]));
    }

    #[test]
    fn case_differing_key_matches_shallow_tier() {
        let found = match_property("name", &paths(&["Name"])).unwrap();
        assert_eq!(found.tier, MatchTier::ShallowNormalized);
        assert_eq!(found.chosen.as_str(), "Name");
    }

    #[test]
    fn normalization_is_not_synonym_aware() {
        assert!(match_property("name", &paths(&["full_name"])).is_none());
    }

    #[test]
    fn nested_leaf_match() {
        let plan = build_plan(
            &payload(json!({"contact": {"email": "a@b.com"}})),
            &schema(&["email"], &[]),
        );
        assert_eq!(plan.mappings, vec![Mapping::copy("contact.email".into(), "email")]);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn nested_collision_is_reported_as_ambiguous() {
        let plan = build_plan(
            &payload(json!({"a": {"email": "x"}, "b": {"email": "y"}})),
            &schema(&["email"], &[]),
        );
        assert_eq!(plan.mappings[0].from_path.as_str(), "a.email");
        assert_eq!(plan.warnings.len(), 1);
        let warning = &plan.warnings[0];
        assert!(warning.to_lowercase().contains("ambiguous"));
        assert!(warning.contains("'a.email', 'b.email'"));
        assert!(warning.contains("chose 'a.email'"));
        assert_eq!(plan.drops, paths(&["b.email"]));
    }

    #[test]
    fn shallow_collision_is_tie_broken_silently() {
        let source = payload(json!({"E_mail": 1, "EMAIL": 2, "e_Mail_": 3}));
        let plan = build_plan(&source, &schema(&["email"], &[]));
        assert_eq!(plan.mappings[0].from_path.as_str(), "EMAIL");
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn shortest_nested_path_wins_over_lexicographic() {
        let found = match_property("id", &paths(&["aa.id", "b.id", "a.b.id"])).unwrap();
        assert_eq!(found.chosen.as_str(), "b.id");
        assert_eq!(found.candidates, paths(&["a.b.id", "aa.id", "b.id"]));
        assert!(found.is_ambiguous());
    }

    #[test]
    fn tie_break_counts_characters_not_bytes() {
        let plan = build_plan(
            &payload(json!({"ab": {"x": 1}, "é": {"x": 2}})),
            &schema(&["x"], &[]),
        );
        assert_eq!(plan.mappings, vec![Mapping::copy("é.x".into(), "x")]);
        assert_eq!(plan.drops, paths(&["ab.x"]));
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn shallow_tier_blocks_nested_fallthrough() {
        let found = match_property("email", &paths(&["Email", "contact.email"])).unwrap();
        assert_eq!(found.tier, MatchTier::ShallowNormalized);
        assert_eq!(found.candidates, paths(&["Email"]));
    }

    #[test]
    fn drops_are_unconsumed_paths_sorted() {
        let plan = build_plan(
            &payload(json!({"name": "John", "age": 30, "extra": "x", "z": {"k": 1}})),
            &schema(&["name", "age"], &["name"]),
        );
        assert_eq!(plan.drops, paths(&["extra", "z.k"]));
        assert_eq!(plan.required, vec!["name".to_string()]);
    }

    #[test]
    fn unmatched_property_is_left_out() {
        let plan = build_plan(
            &payload(json!({"full_name": "John"})),
            &schema(&["name", "email"], &["name", "email"]),
        );
        assert!(plan.mappings.is_empty());
        assert_eq!(plan.drops, paths(&["full_name"]));
        assert_eq!(plan.required, vec!["name".to_string(), "email".to_string()]);
    }

    #[test]
    fn mappings_follow_sorted_property_order() {
        let plan = build_plan(
            &payload(json!({"b": 1, "a": 2})),
            &schema(&["b", "a"], &[]),
        );
        let targets: Vec<&str> = plan.mappings.iter().map(|m| m.to_key.as_str()).collect();
        assert_eq!(targets, vec!["a", "b"]);
    }

    #[test]
    fn one_source_leaf_may_feed_two_properties() {
        let plan = build_plan(
            &payload(json!({"user": {"user_id": 7}})),
            &schema(&["userid", "user_id"], &[]),
        );
        assert_eq!(plan.mappings.len(), 2);
        assert!(plan.mappings.iter().all(|m| m.from_path.as_str() == "user.user_id"));
        assert!(plan.drops.is_empty());
    }

    #[test]
    fn tie_break_of_nothing_is_none() {
        assert!(tie_break(&Vec::<FieldPath>::new()).is_none());
    }
}
