//! Unit tests for [`Component`] bookkeeping and the merge threshold.

use proptest::prelude::*;
use rstest::rstest;

use super::{Component, Property};
use crate::test_utils::suite_proptest_config;

fn component(vertices: &[u32], property: f64) -> Component<u32, f64> {
    let mut component = Component::with_property(property);
    component.extend(vertices.iter().copied());
    component
}

#[test]
fn default_component_is_empty_with_zero_property() {
    let component = Component::<u32, f64>::default();
    assert!(component.is_empty());
    assert_eq!(component.num_vertices(), 0);
    assert_eq!(*component.property(), 0.0);
    assert_eq!(component, Component::new());
}

#[test]
fn singleton_holds_one_vertex() {
    let component = Component::<u32, f32>::singleton(7);
    assert_eq!(component.vertices(), &[7]);
    assert_eq!(*component.property(), 0.0);
}

#[rstest]
#[case::one_each(&[1], 0.0, &[2], 0.0, 1.0, 1.0)]
#[case::big_low_variance(&[1, 2], 2.0, &[3], 0.0, 10.0, 7.0)]
#[case::small_side_wins(&[1, 2, 3, 4], 5.0, &[9], 1.0, 4.0, 5.0)]
#[case::zero_granularity(&[1], 3.0, &[2, 3], 4.0, 0.0, 3.0)]
#[case::negative_property(&[1], -2.0, &[2], 0.0, 1.0, -1.0)]
fn compare_returns_minimum_internal_difference(
    #[case] left: &[u32],
    #[case] left_property: f64,
    #[case] right: &[u32],
    #[case] right_property: f64,
    #[case] k: f64,
    #[case] expected: f64,
) {
    let left = component(left, left_property);
    let right = component(right, right_property);
    assert_eq!(left.compare(&right, k), expected);
    assert_eq!(right.compare(&left, k), expected);
}

#[test]
fn compare_ignores_the_empty_side() {
    let empty = Component::<u32, f64>::with_property(0.0);
    let full = component(&[1, 2], 1.0);
    assert_eq!(empty.compare(&full, 4.0), 3.0);
    assert_eq!(empty.threshold(4.0), f64::INFINITY);
}

#[test]
fn insert_keeps_duplicates() {
    let mut component = component(&[4], 0.0);
    component.insert_vertex(4);
    component.insert_vertex(4);
    assert_eq!(component.vertices(), &[4, 4, 4]);
    assert_eq!(component.num_vertices(), 3);
}

#[test]
fn remove_takes_first_occurrence_only() {
    let mut component = component(&[1, 2, 1, 3], 0.0);
    assert!(component.remove_vertex(&1));
    assert_eq!(component.vertices(), &[2, 1, 3]);
    assert!(component.contains(&1));
}

#[test]
fn remove_missing_vertex_is_a_no_op() {
    let mut component = component(&[1, 2], 0.5);
    assert!(!component.remove_vertex(&9));
    assert_eq!(component, self::component(&[1, 2], 0.5));
}

#[test]
fn merge_drains_the_other_component() {
    let mut left = component(&[1, 2], 1.5);
    let mut right = component(&[3, 2], 4.0);
    left.merge(&mut right);

    assert_eq!(left.vertices(), &[1, 2, 3, 2]);
    assert_eq!(*left.property(), 1.5);
    assert!(right.is_empty());
    assert_eq!(*right.property(), 4.0, "merge leaves the drained property alone");
}

#[test]
fn merge_into_empty_takes_the_other_members() {
    let mut left = Component::<u32, f64>::with_property(2.0);
    let mut right = component(&[5, 6], 0.0);
    left.merge(&mut right);
    assert_eq!(left.vertices(), &[5, 6]);
    assert!(right.is_empty());
}

#[test]
fn clear_keeps_the_property() {
    let mut component = component(&[1, 2, 3], 6.25);
    component.clear();
    assert_eq!(component.num_vertices(), 0);
    assert_eq!(*component.property(), 6.25);
}

#[test]
fn property_accessors_round_trip() {
    let mut component = component(&[1], 0.0);
    component.set_property(-3.0);
    assert_eq!(*component.property(), -3.0);
    *component.property_mut() += 1.0;
    assert_eq!(*component.property(), -2.0);
}

#[test]
fn iteration_visits_members_in_order() {
    let component = component(&[8, 6, 7], 0.0);
    let borrowed: Vec<u32> = (&component).into_iter().copied().collect();
    assert_eq!(borrowed, vec![8, 6, 7]);
    assert_eq!(component.iter().count(), 3);
    assert_eq!(component.into_vertices(), vec![8, 6, 7]);
}

#[test]
fn three_vertex_scenario_merges_everything_with_coarse_granularity() {
    let mut first = Component::<u32, f64>::singleton(1);
    let mut second = Component::singleton(2);
    let mut third = Component::singleton(3);

    // With k = 1 the (1, 2) edge of weight 2 is rejected.
    assert_eq!(first.compare(&second, 1.0), 1.0);
    assert!(2.0 > first.compare(&second, 1.0));

    let threshold = first.compare(&second, 10.0);
    assert_eq!(threshold, 10.0);
    assert!(2.0 <= threshold);
    first.merge(&mut second);
    first.set_property(2.0);

    let threshold = first.compare(&third, 10.0);
    assert_eq!(threshold, 7.0);
    assert!(5.0 <= threshold);
    first.merge(&mut third);
    first.set_property(5.0);

    assert_eq!(first.num_vertices(), 3);
    assert!(second.is_empty());
    assert!(third.is_empty());
}

#[test]
fn float_properties_share_the_threshold_rule() {
    assert_eq!(f32::size_penalty(3.0, 2), 1.5);
    assert_eq!(f32::ZERO.plus(2.0), 2.0);
    assert_eq!(f64::NAN.lesser(1.0), 1.0);
}

fn vertices() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0_u32..64, 1..32)
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn compare_matches_closed_form(
        left in vertices(),
        right in vertices(),
        left_property in -100.0_f64..100.0,
        right_property in -100.0_f64..100.0,
        k in 0.0_f64..1_000.0,
    ) {
        let a = component(&left, left_property);
        let b = component(&right, right_property);
        let expected = (left_property + k / left.len() as f64)
            .min(right_property + k / right.len() as f64);
        prop_assert_eq!(a.compare(&b, k), expected);
    }

    #[test]
    fn merge_concatenates_multisets(left in vertices(), right in vertices()) {
        let mut a = component(&left, 0.0);
        let mut b = component(&right, 0.0);
        a.merge(&mut b);

        prop_assert_eq!(a.num_vertices(), left.len() + right.len());
        prop_assert_eq!(b.num_vertices(), 0);

        let mut merged = a.into_vertices();
        merged.sort_unstable();
        let mut expected = left;
        expected.extend(right);
        expected.sort_unstable();
        prop_assert_eq!(merged, expected);
    }

    #[test]
    fn insert_then_remove_restores_size(members in vertices(), vertex in 0_u32..128) {
        let mut component = component(&members, 0.0);
        component.insert_vertex(vertex);
        prop_assert!(component.remove_vertex(&vertex));
        prop_assert_eq!(component.num_vertices(), members.len());
    }
}
