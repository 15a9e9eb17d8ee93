//! Property-based tests for partial name matching

use kz::matcher::matching;
use kz::tracked::TrackedSettings;
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-z0-9-]{0,12}"
}

proptest! {
    /// Every result contains the query and results keep candidate order.
    #[test]
    fn matches_are_an_ordered_subsequence(
        candidates in prop::collection::vec(name(), 0..20),
        query in "[a-z0-9-]{0,3}",
    ) {
        let matched = matching(&query, &candidates);

        for m in &matched {
            prop_assert!(m.contains(&query));
        }

        let mut rest = candidates.iter();
        for m in &matched {
            prop_assert!(rest.any(|c| c == m), "{} out of order", m);
        }

        let expected = candidates.iter().filter(|c| c.contains(&query)).count();
        prop_assert_eq!(matched.len(), expected);
    }

    /// The empty query matches every candidate.
    #[test]
    fn empty_query_matches_all(candidates in prop::collection::vec(name(), 0..20)) {
        prop_assert_eq!(matching("", &candidates), candidates);
    }

    /// A candidate always matches itself.
    #[test]
    fn candidate_matches_itself(candidates in prop::collection::vec(name(), 1..20), pick in any::<prop::sample::Index>()) {
        let chosen = pick.get(&candidates).clone();
        prop_assert!(matching(&chosen, &candidates).contains(&chosen));
    }

    /// Adding namespaces never introduces duplicates and keeps first-seen order.
    #[test]
    fn tracked_namespaces_stay_unique(
        first in prop::collection::vec(name(), 0..10),
        second in prop::collection::vec(name(), 0..10),
    ) {
        let mut settings = TrackedSettings::default();
        settings.add_namespaces(&first);
        settings.add_namespaces(&second);
        settings.add_namespaces(&first);

        let mut expected: Vec<String> = Vec::new();
        for n in first.iter().chain(second.iter()) {
            if !expected.contains(n) {
                expected.push(n.clone());
            }
        }
        prop_assert_eq!(settings.namespaces, expected);
    }

    /// Deleting what was added leaves nothing behind.
    #[test]
    fn delete_removes_every_listed_namespace(names in prop::collection::vec(name(), 0..10)) {
        let mut settings = TrackedSettings::default();
        settings.add_namespaces(&names);
        settings.delete_namespaces(&names);
        prop_assert!(settings.namespaces.is_empty());
    }
}
