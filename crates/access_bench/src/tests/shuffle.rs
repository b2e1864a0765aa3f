use crate::shuffle::{IndexPermutation, time_seed};

fn assert_is_permutation(permutation: &IndexPermutation) {
    let mut sorted = permutation.as_slice().to_vec();
    sorted.sort_unstable();
    let identity: Vec<usize> = (0..permutation.len()).collect();
    assert_eq!(sorted, identity);
}

#[test]
fn shuffle_yields_permutation() {
    for len in [1, 2, 3, 10, 1000, 4097] {
        for seed in [0, 1, 42, u64::MAX] {
            let permutation = IndexPermutation::shuffled(len, seed).unwrap();
            assert_eq!(permutation.len(), len);
            assert_is_permutation(&permutation);
        }
    }
}

#[test]
fn single_element_is_a_no_op() {
    let permutation = IndexPermutation::shuffled(1, 7).unwrap();
    assert_eq!(permutation.as_slice(), &[0]);
}

#[test]
fn empty_permutation() {
    let permutation = IndexPermutation::shuffled(0, 7).unwrap();
    assert!(permutation.is_empty());
}

#[test]
fn same_seed_same_permutation() {
    let a = IndexPermutation::shuffled(500, 1234).unwrap();
    let b = IndexPermutation::shuffled(500, 1234).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_reorder_differently() {
    let a = IndexPermutation::shuffled(1000, 1).unwrap();
    let b = IndexPermutation::shuffled(1000, 2).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, IndexPermutation::identity(1000).unwrap());
}

#[test]
fn time_seed_moves_forward() {
    let first = time_seed();
    assert!(first > 0);
    assert!(time_seed() >= first);
}
