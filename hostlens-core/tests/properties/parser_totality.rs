//! Every parser is total: arbitrary input never panics, whitespace input
//! yields an empty (or zeroed) result, and numeric fields default to 0.

use proptest::prelude::*;

use hostlens_core::telemetry::{DetailParser, SnapshotParser};

/// Strategy covering pathological shell output: control characters,
/// delimiters, unicode, and fragments that look almost like real records
fn shell_noise() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[ ,:\t\n/0-9a-zA-Z%.-]{0,400}",
        Just("\n\n\n".to_string()),
        Just(",,,,,,,".to_string()),
        Just("MemTotal: not-a-number kB".to_string()),
        Just("default via".to_string()),
        Just("1: : <UP>".to_string()),
    ]
}

proptest! {
    /// Property: snapshot parsers never panic and never invent data
    #[test]
    fn snapshot_parsers_are_total(raw in shell_noise()) {
        let _ = SnapshotParser::parse_memory(&raw);
        let _ = SnapshotParser::parse_partitions(&raw);
        let _ = SnapshotParser::parse_cpu(&raw, &raw);
        let _ = SnapshotParser::parse_interfaces(&raw);
        let _ = SnapshotParser::parse_dns(&raw);
        let _ = SnapshotParser::parse_gateway(&raw);
        let _ = SnapshotParser::parse_net_counters(&raw);
        let _ = SnapshotParser::parse_uptime(&raw);
        let _ = SnapshotParser::parse_count(&raw);

        let load = SnapshotParser::parse_load_average(&raw);
        prop_assert_eq!(load.len(), 3);
    }

    /// Property: detail parsers never panic on arbitrary input
    #[test]
    fn detail_parsers_are_total(raw in shell_noise()) {
        let _ = DetailParser::parse_processes(&raw);
        let _ = DetailParser::parse_connections(&raw);
        let _ = DetailParser::parse_services(&raw);
        let _ = DetailParser::parse_users(&raw);
        let _ = DetailParser::parse_autostart(&raw);
        let _ = DetailParser::parse_cron(&raw);
        let _ = DetailParser::parse_firewall(&raw);
    }

    /// Property: whitespace-only input always yields an empty sequence
    #[test]
    fn whitespace_input_yields_empty_sequences(raw in "[ \t\n]{0,64}") {
        prop_assert!(SnapshotParser::parse_partitions(&raw).is_empty());
        prop_assert!(SnapshotParser::parse_interfaces(&raw).is_empty());
        prop_assert!(SnapshotParser::parse_dns(&raw).is_empty());
        prop_assert!(DetailParser::parse_processes(&raw).is_empty());
        prop_assert!(DetailParser::parse_connections(&raw).is_empty());
        prop_assert!(DetailParser::parse_services(&raw).is_empty());
        prop_assert!(DetailParser::parse_users(&raw).is_empty());
        prop_assert!(DetailParser::parse_autostart(&raw).is_empty());
        prop_assert!(DetailParser::parse_cron(&raw).is_empty());
        prop_assert!(DetailParser::parse_firewall(&raw).is_empty());
    }

    /// Property: counts parse to 0 unless the input leads with an integer
    #[test]
    fn count_parser_defaults_to_zero(raw in "[^0-9]*") {
        prop_assert_eq!(SnapshotParser::parse_count(&raw), 0);
    }

    /// Property: load average is always exactly three slots, each
    /// defaulting to "0" when missing
    #[test]
    fn load_average_always_three_slots(tokens in prop::collection::vec("[0-9.]{1,6}", 0..6)) {
        let raw = tokens.join(" ");
        let load = SnapshotParser::parse_load_average(&raw);
        for (i, slot) in load.iter().enumerate() {
            if i < tokens.len() {
                prop_assert_eq!(slot, &tokens[i]);
            } else {
                prop_assert_eq!(slot.as_str(), "0");
            }
        }
    }
}
