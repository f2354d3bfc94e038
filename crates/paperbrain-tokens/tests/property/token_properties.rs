use paperbrain_tokens::{estimate_total, truncate_chars, TokenCounter};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cached_equals_uncached(s in ".{0,200}") {
        let counter = TokenCounter::new(100).unwrap();
        prop_assert_eq!(counter.count(&s), counter.count_cached(&s));
    }

    #[test]
    fn estimate_is_subadditive_within_rounding(a in ".{0,100}", b in ".{0,100}") {
        let joined = estimate_total([a.as_str(), b.as_str()]);
        let separate = estimate_total([a.as_str()]) + estimate_total([b.as_str()]);
        prop_assert!(joined <= separate + 1);
        prop_assert!(joined >= separate);
    }

    #[test]
    fn truncate_never_exceeds_limit(s in ".{0,100}", n in 0usize..120) {
        let cut = truncate_chars(&s, n);
        prop_assert!(cut.chars().count() <= n);
        prop_assert!(s.starts_with(cut));
    }
}
