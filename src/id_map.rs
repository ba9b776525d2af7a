use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::bead::BeadRecord;
use crate::error::Result;
use crate::task_id::{TaskId, TaskIdGenerationError, os_random};

/// Source id -> generated output id.
///
/// Keys keep the order in which they were first seen; re-inserting a key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    entries: Vec<(String, TaskId)>,
    index: HashMap<String, usize>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a fresh OS-random id to every record.
    pub fn assign(records: &[BeadRecord]) -> Result<Self> {
        Self::assign_with(records, os_random)
    }

    /// Assign ids drawing randomness from `fill_random`, one draw per record.
    pub fn assign_with<F>(records: &[BeadRecord], mut fill_random: F) -> Result<Self>
    where
        F: FnMut(&mut [u8]) -> std::result::Result<(), TaskIdGenerationError>,
    {
        let mut map = Self::new();
        for record in records {
            map.insert(record.id.clone(), TaskId::generate_with(&mut fill_random)?);
        }
        Ok(map)
    }

    pub fn insert(&mut self, source: String, id: TaskId) {
        match self.index.get(&source) {
            Some(&slot) => self.entries[slot].1 = id,
            None => {
                self.index.insert(source.clone(), self.entries.len());
                self.entries.push((source, id));
            }
        }
    }

    pub fn get(&self, source: &str) -> Option<&TaskId> {
        self.index.get(source).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaskId)> {
        self.entries.iter().map(|(source, id)| (source.as_str(), id))
    }
}

impl Serialize for IdMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (source, id) in &self.entries {
            map.serialize_entry(source, id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task_id::ALPHABET;

    fn record(id: &str) -> BeadRecord {
        BeadRecord {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Counter-backed random source: the n-th draw fills the buffer with n.
    fn counting_source() -> impl FnMut(&mut [u8]) -> std::result::Result<(), TaskIdGenerationError>
    {
        let mut draws = 0_u8;
        move |buf: &mut [u8]| {
            draws += 1;
            buf.fill(0);
            if let Some(last) = buf.last_mut() {
                *last = draws;
            }
            Ok(())
        }
    }

    #[test]
    fn assign_covers_every_source_id() {
        let records = vec![record("a"), record("b"), record("c")];
        let map = IdMap::assign(&records).unwrap();

        assert_eq!(map.len(), 3);
        for source in ["a", "b", "c"] {
            let id = map.get(source).expect("every source id is mapped");
            assert_eq!(id.as_str().len(), TaskId::LEN);
            assert!(id.as_str().bytes().all(|b| ALPHABET.contains(&b)));
        }
        assert!(map.get("d").is_none());
    }

    #[test]
    fn assign_with_draws_once_per_record_and_last_write_wins() {
        let records = vec![record("a"), record("b"), record("a")];
        let map = IdMap::assign_with(&records, counting_source()).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a").unwrap().as_str(), "00000003");
        assert_eq!(map.get("b").unwrap().as_str(), "00000002");

        let order: Vec<&str> = map.iter().map(|(source, _)| source).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn assign_with_propagates_random_source_failure() {
        let records = vec![record("a")];
        let err = IdMap::assign_with(&records, |_| {
            Err(TaskIdGenerationError::RandomSource("dry".into()))
        })
        .unwrap_err();
        assert_eq!(err.code(), "id_generation");
    }

    #[test]
    fn serializes_as_ordered_object() {
        let records = vec![record("z"), record("a")];
        let map = IdMap::assign_with(&records, counting_source()).unwrap();

        let json = serde_json::to_string_pretty(&map).unwrap();
        assert_eq!(json, "{\n  \"z\": \"00000001\",\n  \"a\": \"00000002\"\n}");
    }

    #[test]
    fn empty_map_serializes_as_empty_object() {
        let map = IdMap::new();
        assert!(map.is_empty());
        assert_eq!(serde_json::to_string_pretty(&map).unwrap(), "{}");
    }
}
