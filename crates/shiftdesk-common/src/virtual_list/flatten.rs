use crate::models::{Bucket, Record, RecordId};

/// One renderable row of the flattened list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem<R> {
    /// Day separator carrying the bucket label
    Title { label: String },
    Record(R),
}

impl<R> DisplayItem<R> {
    pub fn as_record(&self) -> Option<&R> {
        match self {
            DisplayItem::Record(record) => Some(record),
            DisplayItem::Title { .. } => None,
        }
    }
}

/// Cheap identity of a bucket sequence, computed by the caller.
///
/// Bucket vectors are rebuilt on every fetch, so object identity says
/// nothing. `revision` is bumped by the caller whenever the query (filter,
/// sort) changes, which keeps equal-shaped results of different queries
/// apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub revision: u64,
    pub bucket_count: usize,
    pub record_count: usize,
    pub first_label: Option<String>,
    pub last_label: Option<String>,
}

impl Fingerprint {
    pub fn of<R>(revision: u64, buckets: &[Bucket<R>]) -> Self {
        Self {
            revision,
            bucket_count: buckets.len(),
            record_count: buckets.iter().map(|b| b.records.len()).sum(),
            first_label: buckets.first().map(|b| b.label.clone()),
            last_label: buckets.last().map(|b| b.label.clone()),
        }
    }

    /// Length of the flattened sequence this fingerprint describes
    pub fn item_count(&self) -> usize {
        self.bucket_count + self.record_count
    }
}

/// Flatten buckets into title and record rows, preserving every order.
///
/// Empty buckets still contribute their title.
pub fn flatten<R: Clone>(buckets: &[Bucket<R>]) -> Vec<DisplayItem<R>> {
    let mut items = Vec::with_capacity(buckets.iter().map(|b| b.records.len() + 1).sum());
    for bucket in buckets {
        items.push(DisplayItem::Title {
            label: bucket.label.clone(),
        });
        items.extend(bucket.records.iter().cloned().map(DisplayItem::Record));
    }
    items
}

/// Index of the record with `id` in a flattened sequence
pub fn position_of<R: Record>(items: &[DisplayItem<R>], id: RecordId) -> Option<usize> {
    items
        .iter()
        .position(|item| item.as_record().is_some_and(|r| r.record_id() == id))
}

/// Memoized [`flatten`] keyed on a [`Fingerprint`].
#[derive(Debug, Clone)]
pub struct FlattenCache<R> {
    key: Option<Fingerprint>,
    items: Vec<DisplayItem<R>>,
    recomputes: usize,
}

impl<R> Default for FlattenCache<R> {
    fn default() -> Self {
        Self {
            key: None,
            items: Vec::new(),
            recomputes: 0,
        }
    }
}

impl<R: Clone> FlattenCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the flattened items, recomputing only when the fingerprint moved.
    pub fn get(&mut self, fingerprint: &Fingerprint, buckets: &[Bucket<R>]) -> &[DisplayItem<R>] {
        if self.key.as_ref() != Some(fingerprint) {
            self.items = flatten(buckets);
            self.key = Some(fingerprint.clone());
            self.recomputes += 1;
        }
        &self.items
    }

    pub fn items(&self) -> &[DisplayItem<R>] {
        &self.items
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.key.as_ref()
    }

    /// How many times [`FlattenCache::get`] actually flattened
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    impl Record for u64 {
        fn record_id(&self) -> RecordId {
            *self
        }
    }

    fn title(label: &str) -> DisplayItem<u64> {
        DisplayItem::Title {
            label: label.to_string(),
        }
    }

    #[test]
    fn test_flatten_emits_title_then_records() {
        let buckets = vec![Bucket::new("Mon", vec![1u64, 2]), Bucket::new("Tue", vec![])];
        assert_eq!(
            flatten(&buckets),
            vec![
                title("Mon"),
                DisplayItem::Record(1),
                DisplayItem::Record(2),
                title("Tue"),
            ]
        );
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let buckets = vec![
            Bucket::new("Mon", vec![4u64, 9]),
            Bucket::new("Wed", vec![1]),
        ];
        assert_eq!(flatten(&buckets), flatten(&buckets));
    }

    #[test]
    fn test_position_of() {
        let items = flatten(&[Bucket::new("Mon", vec![10u64, 11]), Bucket::new("Tue", vec![12])]);
        assert_eq!(position_of(&items, 10), Some(1));
        assert_eq!(position_of(&items, 12), Some(4));
        assert_eq!(position_of(&items, 99), None);
    }

    #[test]
    fn test_fingerprint_counts() {
        let buckets = vec![Bucket::new("Mon", vec![1u64, 2]), Bucket::new("Tue", vec![3])];
        let fp = Fingerprint::of(4, &buckets);
        assert_eq!(fp.bucket_count, 2);
        assert_eq!(fp.record_count, 3);
        assert_eq!(fp.item_count(), 5);
        assert_eq!(fp.first_label.as_deref(), Some("Mon"));
        assert_eq!(fp.last_label.as_deref(), Some("Tue"));
        assert_eq!(fp.revision, 4);
    }

    #[test]
    fn test_cache_reuses_until_fingerprint_changes() {
        let mut cache = FlattenCache::new();
        let buckets = vec![Bucket::new("Mon", vec![1u64, 2])];
        let fp = Fingerprint::of(0, &buckets);

        assert_eq!(cache.get(&fp, &buckets).len(), 3);
        assert_eq!(cache.get(&fp, &buckets.clone()).len(), 3);
        assert_eq!(cache.recomputes(), 1);

        let grown = vec![Bucket::new("Mon", vec![1u64, 2]), Bucket::new("Tue", vec![3])];
        let fp = Fingerprint::of(0, &grown);
        assert_eq!(cache.get(&fp, &grown).len(), 5);
        assert_eq!(cache.recomputes(), 2);

        // Same shape, new query revision
        let fp = Fingerprint::of(1, &grown);
        cache.get(&fp, &grown);
        assert_eq!(cache.recomputes(), 3);
    }

    fn buckets_strategy() -> impl Strategy<Value = Vec<Bucket<u64>>> {
        prop::collection::vec(
            ("[A-Z][a-z]{2}", prop::collection::vec(any::<u64>(), 0..6))
                .prop_map(|(label, records)| Bucket::new(label, records)),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn prop_flatten_preserves_order_and_counts(buckets in buckets_strategy()) {
            let items = flatten(&buckets);

            let titles: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    DisplayItem::Title { label } => Some(label.as_str()),
                    DisplayItem::Record(_) => None,
                })
                .collect();
            let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
            prop_assert_eq!(titles, labels);

            let records: Vec<u64> = items.iter().filter_map(|i| i.as_record().copied()).collect();
            let expected: Vec<u64> = buckets.iter().flat_map(|b| b.records.iter().copied()).collect();
            prop_assert_eq!(records, expected);

            prop_assert_eq!(items.len(), Fingerprint::of(0, &buckets).item_count());
        }
    }
}
