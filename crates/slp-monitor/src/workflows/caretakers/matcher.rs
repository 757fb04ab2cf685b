//! Three-tier fuzzy comparison for free-text association names.
//!
//! Caretakers and site visits reference associations by hand-entered labels,
//! so reconciliation must tolerate casing drift, surrounding whitespace, and
//! the "Association of …" prefix convention used on the paper forms.

/// Which tier bound a candidate to a target. Diagnostic only; callers must
/// not branch on the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Substring,
    AffixStripped,
}

impl MatchTier {
    pub const fn label(self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Substring => "substring",
            MatchTier::AffixStripped => "affix-stripped",
        }
    }
}

/// Case-insensitive three-tier comparison. Symmetric by construction, and a
/// blank name on either side never matches.
pub fn names_match(candidate: &str, target: &str) -> bool {
    match_tier(candidate, target).is_some()
}

/// As [`names_match`], reporting the first tier that bound the pair.
pub fn match_tier(candidate: &str, target: &str) -> Option<MatchTier> {
    let candidate = normalize(candidate);
    let target = normalize(target);
    if candidate.is_empty() || target.is_empty() {
        return None;
    }

    if candidate == target {
        return Some(MatchTier::Exact);
    }
    if candidate.contains(&target) || target.contains(&candidate) {
        return Some(MatchTier::Substring);
    }

    let candidate = strip_association_affix(&candidate);
    let target = strip_association_affix(&target);
    if candidate.is_empty() || target.is_empty() {
        return None;
    }
    if candidate == target || candidate.contains(target) || target.contains(candidate) {
        return Some(MatchTier::AffixStripped);
    }

    None
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Drops one anchored `association ` prefix or ` association` suffix token.
fn strip_association_affix(name: &str) -> &str {
    if let Some(stripped) = name.strip_prefix("association ") {
        return stripped.trim();
    }
    if let Some(stripped) = name.strip_suffix(" association") {
        return stripped.trim();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tier_ignores_case_and_surrounding_whitespace() {
        assert_eq!(
            match_tier("Farmers Coop", "farmers coop"),
            Some(MatchTier::Exact)
        );
        assert_eq!(
            match_tier("  Farmers Coop  ", "FARMERS COOP"),
            Some(MatchTier::Exact)
        );
    }

    #[test]
    fn substring_tier_matches_either_direction() {
        assert_eq!(
            match_tier("Association of Rice Growers", "Rice Growers"),
            Some(MatchTier::Substring)
        );
        assert_eq!(
            match_tier("Rice Growers", "Association of Rice Growers"),
            Some(MatchTier::Substring)
        );
    }

    #[test]
    fn affix_stripped_tier_reconciles_prefix_and_suffix_forms() {
        assert_eq!(
            match_tier("Association of Rice Growers", "Rice Growers Association"),
            Some(MatchTier::AffixStripped)
        );
    }

    #[test]
    fn unrelated_names_never_match() {
        assert_eq!(match_tier("Hog Raisers", "Rice Growers"), None);
    }

    #[test]
    fn blank_names_never_match_on_either_side() {
        assert!(!names_match("", "Rice Growers"));
        assert!(!names_match("Rice Growers", ""));
        assert!(!names_match("   ", "Rice Growers"));
        assert!(!names_match("", ""));
    }

    #[test]
    fn bare_association_token_does_not_match_everything() {
        // The bare word is not an anchored affix, so nothing gets stripped.
        assert!(!names_match("Association", "Rice Growers"));
    }

    #[test]
    fn matching_is_symmetric() {
        let pairs = [
            ("Farmers Coop", "farmers coop"),
            ("Association of Rice Growers", "Rice Growers"),
            ("Association of Rice Growers", "Rice Growers Association"),
            ("Hog Raisers", "Rice Growers"),
            ("", "Rice Growers"),
            ("Weavers Guild", "Guild"),
        ];
        for (left, right) in pairs {
            assert_eq!(
                names_match(left, right),
                names_match(right, left),
                "asymmetric result for ({left:?}, {right:?})"
            );
        }
    }
}
