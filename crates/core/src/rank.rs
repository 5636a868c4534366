//! Shared sibling-ranking engine.
//!
//! Ranks are integer ordering keys among siblings of the same parent (lower
//! sorts first). The same policy is used for aisles within a location,
//! products within an aisle, and locations within a type: inserting or
//! moving an item to rank `R` shifts every other sibling whose rank is `>= R`
//! up by one. Gaps are allowed; duplicates are never produced from a
//! duplicate-free input. Only rows whose rank actually changed are returned,
//! which keeps writes minimal.

/// An entity that participates in sibling ranking.
pub trait Ranked {
    type Key: Copy + PartialEq;

    fn ranked_key(&self) -> Self::Key;
    fn rank(&self) -> i64;
    fn set_rank(&mut self, rank: i64);
}

/// Move (or insert) a sibling to `new_rank`.
///
/// `siblings` is the full current sibling set. `moved` identifies the item
/// taking `new_rank`; it may be absent from `siblings` (the insertion case;
/// the caller persists the new row at `new_rank` itself). On an equal
/// requested rank the moved item wins and every collider shifts up in its
/// existing relative order.
///
/// Returns only the siblings whose rank changed, with their new ranks.
pub fn reorder<T>(siblings: &[T], moved: T::Key, new_rank: i64) -> Vec<T>
where
    T: Ranked + Clone,
{
    let mut changed = Vec::new();
    for sibling in siblings {
        if sibling.ranked_key() == moved {
            if sibling.rank() != new_rank {
                let mut updated = sibling.clone();
                updated.set_rank(new_rank);
                changed.push(updated);
            }
        } else if sibling.rank() >= new_rank {
            let mut updated = sibling.clone();
            updated.set_rank(sibling.rank() + 1);
            changed.push(updated);
        }
    }
    changed
}

/// Re-rank `items` alphabetically by `name`, case-insensitive, assigning
/// ranks `0..n`. Returns only the items whose rank changed.
pub fn rerank_by_name<T, F>(items: &[T], name: F) -> Vec<T>
where
    T: Ranked + Clone,
    F: Fn(&T) -> &str,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| name(item).to_lowercase());

    let mut changed = Vec::new();
    for (position, item) in sorted.into_iter().enumerate() {
        let target = position as i64;
        if item.rank() != target {
            let mut updated = item.clone();
            updated.set_rank(target);
            changed.push(updated);
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
        rank: i64,
    }

    impl Ranked for Row {
        type Key = i64;

        fn ranked_key(&self) -> i64 {
            self.id
        }

        fn rank(&self) -> i64 {
            self.rank
        }

        fn set_rank(&mut self, rank: i64) {
            self.rank = rank;
        }
    }

    fn row(id: i64, rank: i64) -> Row {
        Row {
            id,
            name: "",
            rank,
        }
    }

    #[test]
    fn moving_into_the_middle_shifts_colliders_up() {
        let siblings = vec![row(1, 0), row(2, 1), row(3, 2), row(4, 3)];

        let changed = reorder(&siblings, 4, 1);

        // 4 takes rank 1; 2 and 3 shift up; 1 is untouched.
        assert_eq!(changed.len(), 3);
        assert!(changed.contains(&row(4, 1)));
        assert!(changed.contains(&row(2, 2)));
        assert!(changed.contains(&row(3, 3)));
    }

    #[test]
    fn moving_to_the_current_rank_writes_nothing() {
        let siblings = vec![row(1, 0), row(2, 5)];
        // Everything below rank 5 stays put and 2 already holds rank 5,
        // but rank-5-and-above siblings other than the moved one still shift.
        let changed = reorder(&siblings, 2, 5);
        assert!(changed.is_empty());
    }

    #[test]
    fn inserting_an_absent_key_shifts_the_tail() {
        let siblings = vec![row(1, 0), row(2, 1), row(3, 2)];

        let changed = reorder(&siblings, 99, 0);

        assert_eq!(
            changed,
            vec![row(1, 1), row(2, 2), row(3, 3)],
            "every existing sibling moves up to make room at rank 0"
        );
    }

    #[test]
    fn appending_past_the_end_writes_nothing() {
        let siblings = vec![row(1, 0), row(2, 1)];
        assert!(reorder(&siblings, 99, 2).is_empty());
    }

    #[test]
    fn rerank_by_name_is_case_insensitive_and_minimal() {
        let rows = vec![
            Row {
                id: 1,
                name: "bananas",
                rank: 0,
            },
            Row {
                id: 2,
                name: "Apples",
                rank: 1,
            },
            Row {
                id: 3,
                name: "Cheese",
                rank: 2,
            },
        ];

        let changed = rerank_by_name(&rows, |r| r.name);

        // Apples and bananas swap; Cheese already sits at rank 2.
        assert_eq!(changed.len(), 2);
        assert!(changed.iter().any(|r| r.id == 2 && r.rank == 0));
        assert!(changed.iter().any(|r| r.id == 1 && r.rank == 1));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::{BTreeMap, HashSet};

        fn unique_siblings() -> impl Strategy<Value = Vec<Row>> {
            proptest::collection::btree_set(0i64..40, 1..12).prop_map(|ranks| {
                ranks
                    .into_iter()
                    .enumerate()
                    .map(|(i, rank)| row(i as i64 + 1, rank))
                    .collect()
            })
        }

        proptest! {
            /// Ranks stay pairwise distinct after any reorder of an existing
            /// sibling.
            #[test]
            fn reorder_preserves_rank_uniqueness(
                siblings in unique_siblings(),
                pick in 0usize..12,
                new_rank in 0i64..45,
            ) {
                let moved = siblings[pick % siblings.len()].id;
                let changed = reorder(&siblings, moved, new_rank);

                let mut merged: BTreeMap<i64, i64> =
                    siblings.iter().map(|r| (r.id, r.rank)).collect();
                for r in &changed {
                    merged.insert(r.id, r.rank);
                }

                let ranks: HashSet<i64> = merged.values().copied().collect();
                prop_assert_eq!(ranks.len(), merged.len());

                prop_assert_eq!(merged[&moved], new_rank);
            }

            /// Untouched siblings keep their relative order.
            #[test]
            fn reorder_keeps_relative_order(
                siblings in unique_siblings(),
                pick in 0usize..12,
                new_rank in 0i64..45,
            ) {
                let moved = siblings[pick % siblings.len()].id;
                let changed = reorder(&siblings, moved, new_rank);

                let mut merged: BTreeMap<i64, i64> =
                    siblings.iter().map(|r| (r.id, r.rank)).collect();
                for r in &changed {
                    merged.insert(r.id, r.rank);
                }

                let mut before: Vec<i64> = siblings
                    .iter()
                    .filter(|r| r.id != moved)
                    .map(|r| r.id)
                    .collect();
                before.sort_by_key(|id| siblings.iter().find(|r| r.id == *id).unwrap().rank);

                let mut after: Vec<i64> = merged
                    .keys()
                    .copied()
                    .filter(|id| *id != moved)
                    .collect();
                after.sort_by_key(|id| merged[id]);

                prop_assert_eq!(before, after);
            }
        }
    }
}
