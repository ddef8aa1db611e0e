//! Aggregation and conversion tests

use pretty_assertions::assert_eq;
use royalbit_reservas::config::ReportConfig;
use royalbit_reservas::core::{aggregate, conversion_rate, parse_quote_input, Aggregator};
use royalbit_reservas::types::{QuoteBook, RawRow};

fn reservation(instance: &str, status: &str) -> RawRow {
    RawRow::new().with("B", instance).with("U", status)
}

fn sample_rows() -> Vec<RawRow> {
    vec![
        reservation("Hotel Sol", "Confirmada"),
        reservation("Hotel Sol", "Pendiente"),
        reservation("Hotel Mar", "Fallida"),
        reservation("Hotel Sol", "Procesando"),
        reservation("Hotel Mar", "Confirmada"),
        reservation("Hotel Luna", "cancelada"),
        RawRow::new().with("U", "Confirmada"),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// GROUPING SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_two_instances() {
    let config = ReportConfig::default();
    let rows = vec![
        reservation("A", "Confirmada"),
        reservation("A", "pendiente"),
        reservation("B", "Fallida"),
    ];

    let result = Aggregator::new(&config).aggregate(&rows);

    let a = result.get("A").unwrap();
    assert_eq!(
        (a.confirmed, a.pending, a.failed, a.processing, a.total),
        (1, 1, 0, 0, 2)
    );
    let b = result.get("B").unwrap();
    assert_eq!(
        (b.confirmed, b.pending, b.failed, b.processing, b.total),
        (0, 0, 1, 0, 1)
    );
    assert_eq!(result.len(), 2);
}

#[test]
fn test_scenario_padded_uppercase_status() {
    let config = ReportConfig::default();
    let rows = vec![reservation("A", "  CONFIRMADA  ")];

    let result = Aggregator::new(&config).aggregate(&rows);

    assert_eq!(result.get("A").unwrap().confirmed, 1);
}

#[test]
fn test_scenario_missing_instance_uses_fallback() {
    let config = ReportConfig::default();
    let rows = vec![
        RawRow::new().with("U", "Pendiente"),
        reservation("", "Fallida"),
    ];

    let result = Aggregator::new(&config).aggregate(&rows);

    let fallback = result.get("Sin Instancia").unwrap();
    assert_eq!(fallback.total, 2);
    assert_eq!(fallback.pending, 1);
    assert_eq!(fallback.failed, 1);
}

#[test]
fn test_custom_fallback_and_columns() {
    let config = ReportConfig::from_yaml(
        "columns:\n  instance: C\n  status: D\nfallback_instance: Desconocida\n",
    )
    .unwrap();
    let rows = vec![
        RawRow::new().with("C", "Norte").with("D", "Confirmada"),
        RawRow::new().with("D", "Confirmada"),
        // Default columns are ignored under a custom mapping
        RawRow::new().with("B", "Sur").with("U", "Confirmada"),
    ];

    let result = Aggregator::new(&config).aggregate(&rows);

    assert_eq!(result.get("Norte").unwrap().confirmed, 1);
    assert_eq!(result.get("Desconocida").unwrap().total, 2);
    assert!(!result.contains("Sur"));
}

#[test]
fn test_numeric_instance_ids_group_as_text() {
    let config = ReportConfig::default();
    let rows = vec![
        RawRow::new().with("B", 1042.0).with("U", "Confirmada"),
        RawRow::new().with("B", "1042").with("U", "Pendiente"),
    ];

    let result = Aggregator::new(&config).aggregate(&rows);

    assert_eq!(result.get("1042").unwrap().total, 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// INVARIANTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_total_equals_buckets_plus_unrecognized() {
    let config = ReportConfig::default();
    let result = Aggregator::new(&config).aggregate(&sample_rows());

    for stats in result.iter() {
        assert_eq!(
            stats.total,
            stats.confirmed + stats.pending + stats.failed + stats.processing + stats.unrecognized,
            "instance {}",
            stats.name
        );
    }
}

#[test]
fn test_total_equals_buckets_when_all_statuses_known() {
    let config = ReportConfig::default();
    let rows: Vec<RawRow> = sample_rows()
        .into_iter()
        .filter(|row| row.get("U").and_then(|v| v.as_str()) != Some("cancelada"))
        .collect();

    let result = Aggregator::new(&config).aggregate(&rows);

    for stats in result.iter() {
        assert_eq!(stats.unrecognized, 0);
        assert_eq!(stats.total, stats.recognized());
    }
}

#[test]
fn test_unrecognized_status_counts_toward_total_only() {
    let config = ReportConfig::default();
    let rows = vec![reservation("A", "cancelada"), reservation("A", "")];

    let result = Aggregator::new(&config).aggregate(&rows);

    let a = result.get("A").unwrap();
    assert_eq!(a.total, 2);
    assert_eq!(a.recognized(), 0);
    assert_eq!(a.unrecognized, 2);
}

#[test]
fn test_aggregation_is_deterministic() {
    let config = ReportConfig::default();
    let aggregator = Aggregator::new(&config);
    let rows = sample_rows();

    assert_eq!(aggregator.aggregate(&rows), aggregator.aggregate(&rows));
}

#[test]
fn test_first_seen_order_and_stable_ranking() {
    let config = ReportConfig::default();
    let rows = vec![
        reservation("C", "Confirmada"),
        reservation("A", "Confirmada"),
        reservation("B", "Confirmada"),
        reservation("B", "Pendiente"),
    ];

    let result = Aggregator::new(&config).aggregate(&rows);

    assert_eq!(result.names().collect::<Vec<_>>(), vec!["C", "A", "B"]);
    let ranked: Vec<&str> = result.ranked().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(ranked, vec!["B", "C", "A"]);
}

#[test]
fn test_global_totals_sum_instances() {
    let config = ReportConfig::default();
    let result = Aggregator::new(&config).aggregate(&sample_rows());
    let totals = result.totals();

    assert_eq!(totals.reservations, 7);
    assert_eq!(totals.confirmed, 3);
    assert_eq!(totals.pending, 1);
    assert_eq!(totals.failed, 1);
    assert_eq!(totals.processing, 1);
    assert_eq!(totals.unrecognized, 1);
    assert_eq!(totals.instances, 4);
}

#[test]
fn test_empty_rows_aggregate_to_nothing() {
    let config = ReportConfig::default();
    let result = Aggregator::new(&config).aggregate(&[]);
    assert!(result.is_empty());
    assert_eq!(result.totals().reservations, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// QUOTE CARRY-OVER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_new_instances_get_zero_quotes() {
    let config = ReportConfig::default();
    let (_, quotes) = aggregate(&sample_rows(), &config, &QuoteBook::new());

    assert_eq!(quotes.len(), 4);
    assert!(quotes.contains("Hotel Sol"));
    assert_eq!(quotes.get("Hotel Sol"), 0);
}

#[test]
fn test_existing_quotes_are_preserved() {
    let config = ReportConfig::default();
    let mut existing = QuoteBook::new();
    existing.set("Hotel Sol", 40);
    existing.set("Hotel Viejo", 7);

    let (_, quotes) = aggregate(&sample_rows(), &config, &existing);

    assert_eq!(quotes.get("Hotel Sol"), 40);
    assert_eq!(quotes.get("Hotel Viejo"), 7);
    assert_eq!(quotes.get("Hotel Mar"), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERSION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_conversion_rate_properties() {
    for x in [0, 1, 17, 1_000_000] {
        assert_eq!(conversion_rate(x, 0).to_string(), "0.00");
    }
    assert_eq!(conversion_rate(0, 5).to_string(), "0.00");
    assert_eq!(conversion_rate(50, 200).to_string(), "25.00");
}

#[test]
fn test_conversion_rate_rounds_to_two_decimals() {
    assert_eq!(conversion_rate(1, 3).to_string(), "33.33");
    assert_eq!(conversion_rate(2, 3).to_string(), "66.67");
    assert_eq!(conversion_rate(1, 8).to_string(), "12.50");
    assert_eq!(conversion_rate(3, 2).to_string(), "150.00");
}

#[test]
fn test_quote_input_is_lenient() {
    assert_eq!(parse_quote_input("120"), 120);
    assert_eq!(parse_quote_input(" 45 "), 45);
    assert_eq!(parse_quote_input("12abc"), 12);
    assert_eq!(parse_quote_input("abc"), 0);
    assert_eq!(parse_quote_input(""), 0);
    assert_eq!(parse_quote_input("-5"), 0);
}
