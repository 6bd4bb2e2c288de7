// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::{BTreeMap, BTreeSet};

use containers::{Map, Set};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u32),
    Assign(u8, u32),
    Bump(u8),
    Remove(u8),
    PopFirst,
    PopLast,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| Op::Assign(k, v)),
        2 => any::<u8>().prop_map(Op::Bump),
        3 => any::<u8>().prop_map(Op::Remove),
        1 => Just(Op::PopFirst),
        1 => Just(Op::PopLast),
    ]
}

proptest! {
    #[test]
    fn map_matches_btreemap(ops in proptest::collection::vec(op(), 1..300)) {
        let mut map: Map<u8, u32> = Map::new();
        let mut model: BTreeMap<u8, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let absent = !model.contains_key(&k);
                    model.entry(k).or_insert(v);
                    prop_assert_eq!(map.insert(k, v), absent);
                }
                Op::Assign(k, v) => {
                    prop_assert_eq!(map.insert_or_assign(k, v), model.insert(k, v));
                }
                Op::Bump(k) => {
                    let slot = map.get_or_insert_default(k);
                    *slot = slot.wrapping_add(1);
                    let expected = model.entry(k).or_default();
                    *expected = expected.wrapping_add(1);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                Op::PopFirst => {
                    prop_assert_eq!(map.pop_first(), model.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(map.pop_last(), model.pop_last());
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.iter().eq(model.iter()));
        }

        for k in 0..=u8::MAX {
            prop_assert_eq!(map.get(&k), model.get(&k));
            prop_assert_eq!(
                map.lower_bound(&k).key_value(),
                model.range(k..).next()
            );
        }
    }

    #[test]
    fn set_matches_btreeset(
        keys in proptest::collection::vec(any::<u16>(), 0..300),
        remove in proptest::collection::vec(any::<u16>(), 0..100),
    ) {
        let mut set: Set<u16> = keys.iter().copied().collect();
        let mut model: BTreeSet<u16> = keys.iter().copied().collect();

        for key in &remove {
            prop_assert_eq!(set.remove(key), model.remove(key));
        }

        prop_assert_eq!(set.len(), model.len());
        prop_assert!(set.iter().eq(model.iter()));
        prop_assert_eq!(set.first(), model.first());
        prop_assert_eq!(set.last(), model.last());
    }

    #[test]
    fn erase_range_matches_model(
        keys in proptest::collection::btree_set(any::<u16>(), 0..300),
        lo in any::<u16>(),
        hi in any::<u16>(),
        inclusive in any::<bool>(),
    ) {
        let mut set: Set<u16> = keys.iter().copied().collect();
        let mut map: Map<u16, u16> = keys.iter().map(|k| (*k, !*k)).collect();
        let mut model = keys.clone();

        let in_range = |k: &u16| lo <= *k && if inclusive { *k <= hi } else { *k < hi };
        let expected = model.iter().filter(|k| in_range(k)).count();
        model.retain(|k| !in_range(k));

        let removed = if inclusive { set.erase_range(lo..=hi) } else { set.erase_range(lo..hi) };
        prop_assert_eq!(removed, expected);
        prop_assert!(set.iter().eq(model.iter()));

        let removed = if inclusive { map.erase_range(lo..=hi) } else { map.erase_range(lo..hi) };
        prop_assert_eq!(removed, expected);
        prop_assert!(map.keys().eq(model.iter()));
        prop_assert!(map.iter().all(|(k, v)| *v == !*k));
    }
}
