//! Tests for minimum-site interval partitioning

use crate::utils::{case, case_on, test_date, three_case_scenario};
use chrono::NaiveDate;
use site_analysis::{Buffers, compute_minimum_resources, peak_concurrency};

#[test]
fn test_three_case_scenario_needs_two_sites() {
    let cases = three_case_scenario();
    let (daily, assignment) = compute_minimum_resources(&cases, &Buffers::none()).unwrap();

    assert_eq!(daily.minimum_resources, 2);
    assert_eq!(daily.minimum_resources_raw, 2);
    assert_eq!(daily.case_count, 3);
    assert_eq!(daily.date, Some(test_date()));
    assert_eq!(daily.utilization_pct, None);

    // case1 ends exactly when case3 starts, so they share a site
    assert_eq!(assignment.slot_of("case1"), assignment.slot_of("case3"));
    assert_ne!(assignment.slot_of("case1"), assignment.slot_of("case2"));
    assert_eq!(assignment.resource_count(), 2);
    assert!(assignment.conflicts().is_empty());
}

#[test]
fn test_back_to_back_cases_share_a_site() {
    let cases = vec![
        case("a", (8, 0), (9, 0)),
        case("b", (9, 0), (10, 0)),
        case("c", (10, 0), (11, 0)),
    ];
    let (daily, assignment) = compute_minimum_resources(&cases, &Buffers::none()).unwrap();
    assert_eq!(daily.minimum_resources, 1);
    assert_eq!(assignment.cases_in_slot(0).len(), 3);
}

#[test]
fn test_buffers_touching_exactly_share_a_site() {
    // a buffered: 07:30-09:15, b buffered: 09:15-10:15
    let cases = vec![case("a", (8, 0), (9, 0)), case("b", (9, 45), (10, 0))];
    let (daily, _) = compute_minimum_resources(&cases, &Buffers::default()).unwrap();
    assert_eq!(daily.minimum_resources, 1);

    // One minute closer and the buffered intervals overlap
    let cases = vec![case("a", (8, 0), (9, 0)), case("b", (9, 44), (10, 0))];
    let (daily, _) = compute_minimum_resources(&cases, &Buffers::default()).unwrap();
    assert_eq!(daily.minimum_resources, 2);
    assert_eq!(daily.minimum_resources_raw, 1);
}

#[test]
fn test_buffered_and_raw_counts_differ() {
    // Raw intervals are back-to-back; buffered they overlap
    let cases = vec![
        case("a", (7, 0), (8, 0)),
        case("b", (8, 0), (9, 0)),
        case("c", (9, 0), (10, 0)),
    ];
    let (daily, assignment) = compute_minimum_resources(&cases, &Buffers::default()).unwrap();
    assert_eq!(daily.minimum_resources_raw, 1);
    assert_eq!(daily.minimum_resources, 2);
    assert!(assignment.conflicts().is_empty());
}

#[test]
fn test_empty_input_needs_no_sites() {
    let (daily, assignment) = compute_minimum_resources(&[], &Buffers::default()).unwrap();
    assert_eq!(daily.minimum_resources, 0);
    assert_eq!(daily.minimum_resources_raw, 0);
    assert_eq!(daily.case_count, 0);
    assert_eq!(daily.date, None);
    assert!(assignment.is_empty());
    assert_eq!(assignment.resource_count(), 0);
}

#[test]
fn test_malformed_interval_fails_fast() {
    let cases = vec![case("ok", (8, 0), (9, 0)), case("bad", (10, 0), (10, 0))];
    let err = compute_minimum_resources(&cases, &Buffers::default()).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("bad"));

    let reversed = vec![case("rev", (11, 0), (10, 0))];
    assert!(compute_minimum_resources(&reversed, &Buffers::none()).is_err());
}

#[test]
fn test_mixed_dates_rejected() {
    let other = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();
    let cases = vec![case("a", (8, 0), (9, 0)), case_on("b", other, (8, 0), (9, 0))];
    let err = compute_minimum_resources(&cases, &Buffers::none()).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_negative_buffers_rejected() {
    let buffers = Buffers {
        pre: chrono::Duration::minutes(-10),
        post: chrono::Duration::zero(),
    };
    let err = compute_minimum_resources(&three_case_scenario(), &buffers).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_input_order_does_not_change_minimum() {
    let mut cases = vec![
        case("a", (7, 0), (12, 0)),
        case("b", (8, 0), (9, 0)),
        case("c", (8, 30), (10, 0)),
        case("d", (9, 0), (11, 0)),
        case("e", (10, 0), (13, 0)),
        case("f", (11, 30), (12, 30)),
    ];
    let (forward, _) = compute_minimum_resources(&cases, &Buffers::default()).unwrap();
    cases.reverse();
    let (backward, assignment) = compute_minimum_resources(&cases, &Buffers::default()).unwrap();

    assert_eq!(forward.minimum_resources, backward.minimum_resources);
    assert_eq!(forward.minimum_resources_raw, backward.minimum_resources_raw);
    assert!(assignment.conflicts().is_empty());
}

#[test]
fn test_repeated_calls_are_identical() {
    let cases = three_case_scenario();
    let first = compute_minimum_resources(&cases, &Buffers::default()).unwrap();
    let second = compute_minimum_resources(&cases, &Buffers::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_minimum_matches_sweep_line_peak() {
    let cases = vec![
        case("a", (7, 0), (12, 0)),
        case("b", (8, 0), (9, 0)),
        case("c", (8, 30), (10, 0)),
        case("d", (9, 0), (11, 0)),
    ];
    let buffers = Buffers::default();
    let (daily, _) = compute_minimum_resources(&cases, &buffers).unwrap();
    let peak = peak_concurrency(cases.iter().map(|c| c.buffered_interval(&buffers)));
    assert_eq!(daily.minimum_resources, peak);
}

#[test]
fn test_oversized_buffers_rejected() {
    let buffers = Buffers {
        pre: chrono::Duration::MAX,
        post: chrono::Duration::zero(),
    };
    let err = compute_minimum_resources(&three_case_scenario(), &buffers).unwrap_err();
    assert!(err.is_validation());

    let buffers = Buffers {
        pre: chrono::Duration::zero(),
        post: chrono::Duration::days(2),
    };
    assert!(compute_minimum_resources(&three_case_scenario(), &buffers).is_err());
    assert!(site_analysis::simulate_capacity(&three_case_scenario(), &buffers, 2).is_err());

    assert!(Buffers::from_mins(200_000_000_000, 0).unwrap_err().is_validation());
}
