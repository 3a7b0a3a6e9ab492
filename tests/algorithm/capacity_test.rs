//! Tests for the capacity-limited what-if simulation

use crate::utils::{case, three_case_scenario};
use site_analysis::{Buffers, compute_minimum_resources, simulate_capacity};

#[test]
fn test_three_case_scenario_with_one_site() {
    let result = simulate_capacity(&three_case_scenario(), &Buffers::none(), 1).unwrap();

    assert_eq!(result.capacity, 1);
    assert_eq!(result.uncovered_count(), 1);
    assert_eq!(result.uncovered, vec!["case2".to_string()]);
    assert!(result.is_uncovered("case2"));
    assert_eq!(result.covered_count(), 2);
    assert_eq!(result.covered.slot_of("case1"), Some(0));
    assert_eq!(result.covered.slot_of("case3"), Some(0));
    assert_eq!(result.covered.slot_of("case2"), None);
}

#[test]
fn test_capacity_at_minimum_covers_everything() {
    let cases = three_case_scenario();
    let (daily, assignment) = compute_minimum_resources(&cases, &Buffers::none()).unwrap();

    let result = simulate_capacity(&cases, &Buffers::none(), daily.minimum_resources).unwrap();
    assert_eq!(result.uncovered_count(), 0);
    assert_eq!(result.covered, assignment);

    let result = simulate_capacity(&cases, &Buffers::none(), daily.minimum_resources + 5).unwrap();
    assert_eq!(result.uncovered_count(), 0);
}

#[test]
fn test_rejected_case_does_not_fill_later_gap() {
    // "late" arrives while both sites are busy and is turned away even
    // though a site frees up at 10:00, before the case would have ended.
    let cases = vec![
        case("a", (8, 0), (10, 0)),
        case("b", (8, 0), (12, 0)),
        case("late", (9, 0), (11, 0)),
        case("next", (10, 0), (11, 0)),
    ];
    let result = simulate_capacity(&cases, &Buffers::none(), 2).unwrap();
    assert_eq!(result.uncovered, vec!["late".to_string()]);
    assert_eq!(result.covered.slot_of("next"), result.covered.slot_of("a"));
}

#[test]
fn test_uncovered_case_does_not_block_others() {
    let cases = vec![
        case("long", (8, 0), (12, 0)),
        case("reject1", (9, 0), (17, 0)),
        case("after", (12, 0), (13, 0)),
    ];
    let result = simulate_capacity(&cases, &Buffers::none(), 1).unwrap();
    assert_eq!(result.uncovered, vec!["reject1".to_string()]);
    assert!(!result.is_uncovered("after"));
}

#[test]
fn test_buffers_apply_to_capacity() {
    // Raw back-to-back, buffered overlapping
    let cases = vec![case("a", (8, 0), (9, 0)), case("b", (9, 0), (10, 0))];
    let raw = simulate_capacity(&cases, &Buffers::none(), 1).unwrap();
    assert_eq!(raw.uncovered_count(), 0);

    let buffered = simulate_capacity(&cases, &Buffers::default(), 1).unwrap();
    assert_eq!(buffered.uncovered, vec!["b".to_string()]);
}

#[test]
fn test_invalid_input_rejected() {
    assert!(simulate_capacity(&three_case_scenario(), &Buffers::none(), 0).is_err());

    let bad = vec![case("bad", (9, 0), (8, 0))];
    let err = simulate_capacity(&bad, &Buffers::none(), 3).unwrap_err();
    assert!(err.is_validation());
}
