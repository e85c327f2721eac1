//! Property-based tests using proptest
//!
//! Tests that verify properties hold for arbitrary inputs.

use node_exporter_deploy::collectors::{is_known_collector, KNOWN_COLLECTORS};
use node_exporter_deploy::config::ExporterConfig;
use node_exporter_deploy::options::validate;
use proptest::prelude::*;

fn known_subset() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(KNOWN_COLLECTORS.to_vec(), 0..KNOWN_COLLECTORS.len())
        .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn test_any_known_subset_validates(enabled in known_subset(), disabled in known_subset()) {
        // Given: Lists drawn entirely from the known vocabulary
        let config = ExporterConfig {
            collectors_enabled: enabled,
            collectors_disabled: disabled,
            ..Default::default()
        };

        // Then: Validation always succeeds
        prop_assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_any_unknown_token_fails(
        token in "[a-z_]{1,15}".prop_filter("must be unknown", |t| !is_known_collector(t))
    ) {
        // Given: A single token outside the vocabulary
        let config = ExporterConfig {
            collectors_enabled: vec![token],
            ..Default::default()
        };

        // Then: Validation always fails
        prop_assert!(validate(&config).is_err());
    }

    #[test]
    fn test_render_is_deterministic_for_any_listen_address(addr in "[!-~]{1,30}") {
        // Given: An arbitrary printable listen address
        let config = ExporterConfig {
            web_listen_address: addr,
            ..Default::default()
        };
        let valid = validate(&config).unwrap();

        // Then: Two renders are byte-identical
        prop_assert_eq!(valid.render(), valid.render());
    }

    #[test]
    fn test_enabled_count_matches_flag_count(enabled in known_subset()) {
        // Given: Only the enabled list set on top of defaults
        let n = enabled.len();
        let config = ExporterConfig {
            collectors_enabled: enabled,
            ..Default::default()
        };

        // When: Rendering
        let rendered = validate(&config).unwrap().render();

        // Then: Exactly one --collector.<name> per list entry
        prop_assert_eq!(rendered.matches("--collector.").count(), n);
    }

    #[test]
    fn test_disabled_flags_follow_enabled_flags(
        enabled in known_subset(), disabled in known_subset()
    ) {
        prop_assume!(!enabled.is_empty() && !disabled.is_empty());

        let config = ExporterConfig {
            collectors_enabled: enabled,
            collectors_disabled: disabled,
            ..Default::default()
        };
        let rendered = validate(&config).unwrap().render();

        // Then: Every --no-collector flag sits after every plain toggle
        let first_disabled = rendered.find("--no-collector.").unwrap();
        let last_enabled = rendered.rfind(" --collector.").unwrap();
        prop_assert!(last_enabled < first_disabled);
    }
}
