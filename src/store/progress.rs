use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{ItemId, MessageLearningRecord, WrongAnswer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

pub const KEY_CHECKED_WORDS: &str = "checkedWords";
pub const KEY_DIFFICULT_WORDS: &str = "difficultWords";
pub const KEY_WRONG_SENTENCES: &str = "wrongSentences";
pub const KEY_MESSAGE_RECORDS: &str = "messageLearningRecords";
pub const KEY_PREMIUM: &str = "isPremium";
pub const KEY_DAILY_USAGE_PREFIX: &str = "dailyUsage_";

pub fn daily_usage_key(date_label: &str) -> String {
    format!("{}{}", KEY_DAILY_USAGE_PREFIX, date_label)
}

/// Per-item boolean progress flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Learned / known.
    Checked,
    Difficult,
}

impl Flag {
    fn key(self) -> &'static str {
        match self {
            Flag::Checked => KEY_CHECKED_WORDS,
            Flag::Difficult => KEY_DIFFICULT_WORDS,
        }
    }
}

/// Typed access to the learner's persisted progress.
pub struct ProgressRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProgressRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &raw)
    }

    pub fn flags(&self, flag: Flag) -> StoreResult<BTreeMap<ItemId, bool>> {
        Ok(self.read_json(flag.key())?.unwrap_or_default())
    }

    pub fn is_flagged(&self, flag: Flag, id: ItemId) -> StoreResult<bool> {
        Ok(self.flags(flag)?.get(&id).copied().unwrap_or(false))
    }

    /// Stores the flag. Clearing removes the entry instead of storing `false`.
    pub fn set_flag(&mut self, flag: Flag, id: ItemId, value: bool) -> StoreResult<()> {
        let mut flags = self.flags(flag)?;
        if value {
            flags.insert(id, true);
        } else {
            flags.remove(&id);
        }
        self.write_json(flag.key(), &flags)
    }

    /// Flips the flag and returns the new value.
    pub fn toggle_flag(&mut self, flag: Flag, id: ItemId) -> StoreResult<bool> {
        let value = !self.is_flagged(flag, id)?;
        self.set_flag(flag, id, value)?;
        Ok(value)
    }

    pub fn wrong_answers(&self) -> StoreResult<Vec<WrongAnswer>> {
        Ok(self.read_json(KEY_WRONG_SENTENCES)?.unwrap_or_default())
    }

    /// Appends the record unless one already exists for the same item id.
    /// Returns whether it was appended.
    pub fn record_wrong_answer(&mut self, wrong: WrongAnswer) -> StoreResult<bool> {
        let mut records = self.wrong_answers()?;
        if records.iter().any(|r| r.id == wrong.id) {
            return Ok(false);
        }
        records.push(wrong);
        self.write_json(KEY_WRONG_SENTENCES, &records)?;
        Ok(true)
    }

    pub fn message_records(&self) -> StoreResult<Vec<MessageLearningRecord>> {
        Ok(self.read_json(KEY_MESSAGE_RECORDS)?.unwrap_or_default())
    }

    pub fn append_message_record(&mut self, record: MessageLearningRecord) -> StoreResult<()> {
        let mut records = self.message_records()?;
        records.push(record);
        self.write_json(KEY_MESSAGE_RECORDS, &records)
    }

    pub fn daily_usage(&self, date_label: &str) -> StoreResult<u32> {
        Ok(self.read_json(&daily_usage_key(date_label))?.unwrap_or(0))
    }

    /// Increments and returns the new count for the given day.
    pub fn increment_daily_usage(&mut self, date_label: &str) -> StoreResult<u32> {
        let count = self.daily_usage(date_label)? + 1;
        self.write_json(&daily_usage_key(date_label), &count)?;
        Ok(count)
    }

    pub fn is_premium(&self) -> StoreResult<bool> {
        Ok(self.read_json(KEY_PREMIUM)?.unwrap_or(false))
    }

    pub fn set_premium(&mut self, premium: bool) -> StoreResult<()> {
        self.write_json(KEY_PREMIUM, &premium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SqliteStore};

    fn repo() -> ProgressRepository<MemoryStore> {
        ProgressRepository::new(MemoryStore::new())
    }

    fn wrong(id: ItemId, chosen: &str) -> WrongAnswer {
        WrongAnswer {
            id,
            chosen: chosen.to_string(),
            correct: "정답".to_string(),
            category: "병원".to_string(),
            timestamp: "2026-10-15T09:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_toggle_twice_restores_value() {
        let mut repo = repo();
        for flag in [Flag::Checked, Flag::Difficult] {
            for id in [1, 2, 99] {
                let before = repo.is_flagged(flag, id).unwrap();
                repo.toggle_flag(flag, id).unwrap();
                assert_ne!(repo.is_flagged(flag, id).unwrap(), before);
                repo.toggle_flag(flag, id).unwrap();
                assert_eq!(repo.is_flagged(flag, id).unwrap(), before);
            }
        }

        repo.set_flag(Flag::Checked, 5, true).unwrap();
        assert!(!repo.toggle_flag(Flag::Checked, 5).unwrap());
        assert!(repo.toggle_flag(Flag::Checked, 5).unwrap());
        assert!(repo.is_flagged(Flag::Checked, 5).unwrap());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut repo = repo();
        repo.set_flag(Flag::Checked, 1, true).unwrap();
        repo.set_flag(Flag::Difficult, 2, true).unwrap();
        assert!(repo.is_flagged(Flag::Checked, 1).unwrap());
        assert!(!repo.is_flagged(Flag::Difficult, 1).unwrap());
        assert!(!repo.is_flagged(Flag::Checked, 2).unwrap());
    }

    #[test]
    fn test_flags_stored_as_json_object() {
        let mut repo = repo();
        repo.set_flag(Flag::Checked, 12, true).unwrap();
        repo.set_flag(Flag::Checked, 3, true).unwrap();
        repo.set_flag(Flag::Checked, 3, false).unwrap();
        assert_eq!(
            repo.store().get(KEY_CHECKED_WORDS).unwrap(),
            Some(r#"{"12":true}"#.to_string())
        );
    }

    #[test]
    fn test_reads_false_entries_written_elsewhere() {
        let mut store = MemoryStore::new();
        store.set(KEY_CHECKED_WORDS, r#"{"1":true,"2":false}"#).unwrap();
        let repo = ProgressRepository::new(store);
        assert!(repo.is_flagged(Flag::Checked, 1).unwrap());
        assert!(!repo.is_flagged(Flag::Checked, 2).unwrap());
    }

    #[test]
    fn test_wrong_answer_first_one_wins() {
        let mut repo = repo();
        assert!(repo.record_wrong_answer(wrong(3, "first")).unwrap());
        assert!(!repo.record_wrong_answer(wrong(3, "second")).unwrap());
        assert!(repo.record_wrong_answer(wrong(4, "other")).unwrap());

        let records = repo.wrong_answers().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chosen, "first");
    }

    #[test]
    fn test_daily_usage_per_date() {
        let mut repo = repo();
        assert_eq!(repo.daily_usage("Thu Oct 15 2026").unwrap(), 0);
        assert_eq!(repo.increment_daily_usage("Thu Oct 15 2026").unwrap(), 1);
        assert_eq!(repo.increment_daily_usage("Thu Oct 15 2026").unwrap(), 2);
        assert_eq!(repo.daily_usage("Fri Oct 16 2026").unwrap(), 0);
        assert_eq!(
            repo.store().get("dailyUsage_Thu Oct 15 2026").unwrap(),
            Some("2".to_string())
        );
    }

    #[test]
    fn test_premium_flag() {
        let mut repo = repo();
        assert!(!repo.is_premium().unwrap());
        repo.set_premium(true).unwrap();
        assert!(repo.is_premium().unwrap());
        assert_eq!(repo.store().get(KEY_PREMIUM).unwrap(), Some("true".to_string()));
    }

    #[test]
    fn test_message_records_append() {
        let mut repo = repo();
        for i in 0..2 {
            repo.append_message_record(MessageLearningRecord {
                id: i,
                scenario_id: 5,
                original_message: "할머니가 아프다".to_string(),
                corrected_message: "할머니께서 아프시다".to_string(),
                timestamp: "2026-10-15T09:00:00+00:00".to_string(),
                category: "가족".to_string(),
            })
            .unwrap();
        }
        assert_eq!(repo.message_records().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_value_is_decode_error() {
        let mut store = MemoryStore::new();
        store.set(KEY_WRONG_SENTENCES, "not json").unwrap();
        let repo = ProgressRepository::new(store);
        assert!(matches!(
            repo.wrong_answers(),
            Err(StoreError::Decode { .. })
        ));
    }

    #[test]
    fn test_repository_over_sqlite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        {
            let mut repo = ProgressRepository::new(SqliteStore::open(&db_path).unwrap());
            repo.toggle_flag(Flag::Checked, 7).unwrap();
            repo.record_wrong_answer(wrong(7, "x")).unwrap();
        }
        let repo = ProgressRepository::new(SqliteStore::open(&db_path).unwrap());
        assert!(repo.is_flagged(Flag::Checked, 7).unwrap());
        assert_eq!(repo.wrong_answers().unwrap().len(), 1);
    }
}
