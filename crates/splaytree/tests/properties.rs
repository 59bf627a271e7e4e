use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use splaytree::SplayTree;

#[test]
fn test_bst_invariant_under_random_ops() {
    let mut rng = Pcg64::seed_from_u64(0x5eed);
    let mut tree = SplayTree::new();
    let mut inserted = Vec::new();

    for step in 0..2_000 {
        if step % 3 == 0 && !inserted.is_empty() {
            let key = inserted[rng.random_range(0..inserted.len())];
            assert_eq!(tree.find(&key).map(|(k, _)| *k), Some(key));
            assert_eq!(tree.root_key(), Some(&key));
        } else {
            let key: u32 = rng.random_range(0..500);
            tree.insert(key, step);
            inserted.push(key);
        }
        assert!(tree.is_valid_bst(), "invariant broken at step {step}");
    }

    assert_eq!(tree.len(), inserted.len());
}

#[test]
fn test_every_present_key_splays_to_root() {
    let mut rng = Pcg64::seed_from_u64(42);
    let mut tree = SplayTree::new();
    let mut keys: Vec<u64> = (0..300).collect();

    // Shuffle by swapping so the tree is not a spine
    for i in (1..keys.len()).rev() {
        let j = rng.random_range(0..=i);
        keys.swap(i, j);
    }
    for &key in &keys {
        tree.insert(key, key * key);
    }

    for &key in keys.iter().rev() {
        let (found, value) = tree.find(&key).expect("present key");
        assert_eq!((*found, *value), (key, key * key));
        assert_eq!(tree.root_key(), Some(&key));
    }
    assert!(tree.is_valid_bst());
}

#[test]
fn test_misses_do_not_change_shape() {
    let mut tree = SplayTree::new();
    for key in [40, 20, 60, 10, 30, 50, 70] {
        tree.insert(key, ());
    }
    let before: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();

    for missing in [0, 15, 35, 65, 100] {
        assert!(tree.find(&missing).is_none());
    }

    assert_eq!(tree.root_key(), Some(&40));
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.iter().map(|(k, _)| *k).collect::<Vec<_>>(), before);
}

#[test]
fn test_repeated_access_keeps_hot_key_shallow() {
    let mut tree = SplayTree::new();
    for key in 0..1_000u32 {
        tree.insert(key, ());
    }

    tree.find(&999);
    tree.find(&500);
    assert_eq!(tree.root_key(), Some(&500));
    assert!(tree.height() < 1_000);
}
