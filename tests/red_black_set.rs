use rand::Rng;
use red_black_set::red_black_tree::{Greater, RedBlackSet};
use simplelog::{Config, LevelFilter, TestLogger};
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 10_000;

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn new_rng() -> rand::XorShiftRng {
    rand::SeedableRng::from_seed([1, 1, 1, 1])
}

#[test]
fn int_test_ascending_inserts() {
    init_logging();
    let mut set = RedBlackSet::new();
    for key in 1..=10 {
        assert!(set.insert(key).1);
        set.validate().unwrap();
    }

    assert_eq!(set.len(), 10);
    assert_eq!(
        set.iter().cloned().collect::<Vec<u32>>(),
        (1..=10).collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_duplicate_insert() {
    init_logging();
    let mut set = RedBlackSet::new();
    assert!(set.insert(5).1);
    assert!(!set.insert(5).1);
    assert_eq!(set.len(), 1);
    set.validate().unwrap();
}

#[test]
fn int_test_erase_middle() {
    init_logging();
    let mut set: RedBlackSet<u32> = RedBlackSet::from([10, 20, 30]);
    assert_eq!(set.erase(&20), 1);
    assert_eq!(set.len(), 2);
    assert_eq!(set.find(&20), set.end());
    assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&10, &30]);
    set.validate().unwrap();
}

#[test]
fn int_test_insert_then_erase_all() {
    init_logging();
    let mut rng = new_rng();
    let mut set = RedBlackSet::new();
    let mut keys = Vec::new();

    while keys.len() < 50 {
        let key = rng.gen_range(0, 1000);
        if set.insert(key).1 {
            keys.push(key);
        }
        set.validate().unwrap();
    }

    rng.shuffle(&mut keys);
    for key in &keys {
        assert_eq!(set.erase(key), 1);
        set.validate().unwrap();
    }

    assert!(set.is_empty());
    assert_eq!(set.begin(), set.end());
}

#[test]
fn int_test_reverse_order() {
    init_logging();
    let mut set = RedBlackSet::with_comparator(Greater);
    set.insert_all(vec![1, 2, 3]);
    assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    set.validate().unwrap();
}

#[test]
fn int_test_round_trip() {
    init_logging();
    let mut set = RedBlackSet::new();
    for key in &[8, 3, 11, 1, 6] {
        set.insert(*key);
        assert_eq!(set.find(key).key(), Ok(key));
    }
    for key in &[3, 8] {
        set.erase(key);
        assert!(set.find(key).is_end());
    }
    set.validate().unwrap();
}

#[test]
fn int_test_cursor_walk_matches_len() {
    init_logging();
    let set: RedBlackSet<u32> = (0..257).map(|key| key * 7 % 257).collect();

    let mut cursor = set.begin();
    let mut count = 0;
    while cursor != set.end() {
        assert_eq!(cursor.key(), Ok(&count));
        cursor.move_next();
        count += 1;
    }
    assert_eq!(count as usize, set.len());
}

#[test]
fn int_test_against_btreeset() {
    init_logging();
    let mut rng = new_rng();
    let mut set = RedBlackSet::with_chunk_size(64);
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 2048u32);
        if rng.gen::<bool>() {
            assert_eq!(set.insert(key).1, expected.insert(key));
        } else {
            assert_eq!(set.erase(&key) == 1, expected.remove(&key));
        }
        assert_eq!(set.len(), expected.len());
    }

    set.validate().unwrap();
    assert_eq!(set.min(), expected.iter().next());
    assert_eq!(set.max(), expected.iter().next_back());
    assert_eq!(
        set.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    assert_eq!(
        set.iter().rev().collect::<Vec<&u32>>(),
        expected.iter().rev().collect::<Vec<&u32>>(),
    );
    assert_eq!(
        set.into_iter().collect::<Vec<u32>>(),
        expected.into_iter().collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_insertion_order_does_not_matter() {
    init_logging();
    let mut rng = new_rng();
    let mut keys: Vec<u32> = (0..500).collect();
    let sorted: RedBlackSet<u32> = keys.iter().cloned().collect();

    rng.shuffle(&mut keys);
    let shuffled: RedBlackSet<u32> = keys.into_iter().collect();

    assert_eq!(sorted, shuffled);
    shuffled.validate().unwrap();
}
