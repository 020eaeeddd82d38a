//! Property-based tests for OrderedStore.
//!
//! Every property compares the store against a plain `Vec` model holding the
//! first occurrence of each element in order.

use proptest::prelude::*;
use setwise::equality::Structural;
use setwise::store::OrderedStore;

fn first_occurrences(elements: &[u8]) -> Vec<u8> {
    let mut model = Vec::new();
    for &element in elements {
        if !model.contains(&element) {
            model.push(element);
        }
    }
    model
}

#[derive(Debug, Clone)]
enum Operation {
    Add(u8),
    Remove(u8),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0..32_u8).prop_map(Operation::Add),
        (0..32_u8).prop_map(Operation::Remove),
    ]
}

// =============================================================================
// Insertion Order Law
// Description: Iteration yields the first occurrence of each element in order
// =============================================================================

proptest! {
    #[test]
    fn prop_insertion_order_law(elements in prop::collection::vec(any::<u8>(), 0..100)) {
        let store: OrderedStore<u8> = elements.iter().copied().collect();

        prop_assert_eq!(store.to_vec(), first_occurrences(&elements));
        prop_assert_eq!(store.len(), first_occurrences(&elements).len());
    }
}

// =============================================================================
// Model Law
// Description: Any sequence of adds and removes matches the Vec model
// =============================================================================

proptest! {
    #[test]
    fn prop_operations_match_model_law(
        operations in prop::collection::vec(operation(), 0..200)
    ) {
        let mut store: OrderedStore<u8> = OrderedStore::new();
        let mut model: Vec<u8> = Vec::new();

        for operation in operations {
            match operation {
                Operation::Add(element) => {
                    let added = store.add(element);
                    prop_assert_eq!(added, !model.contains(&element));
                    if added {
                        model.push(element);
                    }
                }
                Operation::Remove(element) => {
                    let removed = store.remove(&element);
                    prop_assert_eq!(removed, model.contains(&element));
                    model.retain(|&existing| existing != element);
                }
            }
            prop_assert_eq!(store.len(), model.len());
        }

        prop_assert_eq!(store.to_vec(), model.clone());
        let reversed: Vec<u8> = store.iter().rev().copied().collect();
        prop_assert_eq!(reversed, model.into_iter().rev().collect::<Vec<_>>());
    }
}

// =============================================================================
// Position Monotonicity Law
// Description: Positions strictly increase along iteration and stay below
// the next position
// =============================================================================

proptest! {
    #[test]
    fn prop_position_monotonicity_law(
        operations in prop::collection::vec(operation(), 0..200)
    ) {
        let mut store: OrderedStore<u8> = OrderedStore::new();
        for operation in operations {
            match operation {
                Operation::Add(element) => { store.add(element); }
                Operation::Remove(element) => { store.remove(&element); }
            }
        }

        let positions: Vec<u64> = store
            .iter()
            .filter_map(|element| store.position_of(element))
            .collect();

        prop_assert_eq!(positions.len(), store.len());
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(positions.iter().all(|&position| position < store.next_position()));
    }
}

// =============================================================================
// Clone Law
// Description: A clone has the same order and positions 0..n
// =============================================================================

proptest! {
    #[test]
    fn prop_clone_law(
        elements in prop::collection::vec(any::<u8>(), 0..60),
        removed in prop::collection::vec(any::<u8>(), 0..30)
    ) {
        let mut store: OrderedStore<u8> = elements.into_iter().collect();
        for element in &removed {
            store.remove(element);
        }
        let cloned = store.clone();

        prop_assert_eq!(cloned.to_vec(), store.to_vec());
        for (expected, element) in (0_u64..).zip(cloned.iter()) {
            prop_assert_eq!(cloned.position_of(element), Some(expected));
        }
    }
}

// =============================================================================
// Union Order Law
// Description: add_from keeps the receiver's order and appends new elements
// in the argument's order
// =============================================================================

proptest! {
    #[test]
    fn prop_union_order_law(
        left in prop::collection::vec(0..40_u8, 0..30),
        right in prop::collection::vec(0..40_u8, 0..30)
    ) {
        let mut store: OrderedStore<u8> = left.iter().copied().collect();
        let other: OrderedStore<u8> = right.iter().copied().collect();
        store.add_from(&other);

        let mut combined = left;
        combined.extend(right);
        prop_assert_eq!(store.to_vec(), first_occurrences(&combined));
    }
}

// =============================================================================
// Filter Order Law
// Description: remove_from and retain_from keep survivors in their order
// =============================================================================

proptest! {
    #[test]
    fn prop_filter_order_law(
        left in prop::collection::vec(0..40_u8, 0..30),
        right in prop::collection::vec(0..40_u8, 0..30)
    ) {
        let store: OrderedStore<u8> = left.iter().copied().collect();
        let other: OrderedStore<u8> = right.iter().copied().collect();

        let mut difference = store.clone();
        difference.remove_from(&other);
        let mut intersection = store.clone();
        intersection.retain_from(&other);

        let model = first_occurrences(&left);
        let expected_difference: Vec<u8> =
            model.iter().copied().filter(|element| !right.contains(element)).collect();
        let expected_intersection: Vec<u8> =
            model.iter().copied().filter(|element| right.contains(element)).collect();

        prop_assert_eq!(difference.to_vec(), expected_difference);
        prop_assert_eq!(intersection.to_vec(), expected_intersection);
    }
}

// =============================================================================
// Strategy Agreement Law
// Description: Structural and intrinsic strategies agree on primitive elements
// =============================================================================

proptest! {
    #[test]
    fn prop_strategy_agreement_law(
        operations in prop::collection::vec(operation(), 0..100)
    ) {
        let mut intrinsic: OrderedStore<u8> = OrderedStore::new();
        let mut structural: OrderedStore<u8, Structural> = OrderedStore::new();

        for operation in operations {
            match operation {
                Operation::Add(element) => {
                    prop_assert_eq!(intrinsic.add(element), structural.add(element));
                }
                Operation::Remove(element) => {
                    prop_assert_eq!(intrinsic.remove(&element), structural.remove(&element));
                }
            }
        }

        prop_assert_eq!(intrinsic.to_vec(), structural.to_vec());
    }
}

// =============================================================================
// Clear Law
// Description: clear empties the store and restarts positions at zero
// =============================================================================

proptest! {
    #[test]
    fn prop_clear_law(elements in prop::collection::vec(any::<u8>(), 1..50), next: u8) {
        let mut store: OrderedStore<u8> = elements.into_iter().collect();
        store.clear();

        prop_assert!(store.is_empty());
        prop_assert_eq!(store.next_position(), 0);
        store.add(next);
        prop_assert_eq!(store.position_of(&next), Some(0));
    }
}
