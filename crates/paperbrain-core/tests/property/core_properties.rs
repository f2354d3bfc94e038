use paperbrain_core::config::ProfileOverride;
use paperbrain_core::task::{TaskKind, TaskProfile};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_is_total(s in ".*") {
        // Must return without panicking for any input.
        let _ = TaskKind::parse(&s);
    }

    #[test]
    fn parse_reads_decorated_leading_label(
        prefix in "[ \"*]{0,6}",
        idx in 0usize..TaskKind::COUNT,
        suffix in "[.!?*\"]{0,3}",
        rest in "( [0-9a-z]{1,8}){0,4}",
    ) {
        let kind = TaskKind::ALL[idx];
        let text = format!("{prefix}{}{suffix}{rest}", kind.as_str().to_uppercase());
        prop_assert_eq!(TaskKind::parse(&text), Some(kind));
    }

    #[test]
    fn overrides_never_break_top_n_le_top_k(
        top_k in 0usize..40,
        top_n in 0usize..40,
        lambda in -0.5f64..1.5,
    ) {
        let base = TaskProfile::builtin(TaskKind::Explain);
        let ov = ProfileOverride {
            top_k: Some(top_k),
            top_n: Some(top_n),
            lambda: Some(lambda),
            ..Default::default()
        };
        if let Ok(profile) = base.with_override(&ov) {
            prop_assert!(profile.top_n() <= profile.top_k());
            prop_assert!((0.0..=1.0).contains(&profile.lambda()));
        }
    }
}
