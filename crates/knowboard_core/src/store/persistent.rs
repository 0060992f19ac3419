//! Typed state persisted in one durable slot.
//!
//! # Invariants
//! - `hydrate` reads the slot at most once; later calls are no-ops.
//! - Before hydration, `set` only touches memory.
//! - Only an unparsable snapshot counts as corrupt. Any other read failure
//!   makes the state memory-only for the rest of the session, so a stored
//!   board that could not be read is never overwritten.
//! - After `StoreError::Unavailable` on write, the state is memory-only too.

use crate::store::kv::KvStore;
use crate::store::{StoreError, StoreResult};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// What hydration found in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Stored snapshot was parsed and adopted.
    Loaded,
    /// Nothing stored; default kept.
    Missing,
    /// Stored snapshot could not be parsed; default kept.
    Corrupt,
    /// Store could not be read; default kept, memory-only from now on.
    Unavailable,
    /// Already hydrated earlier.
    AlreadyHydrated,
}

/// Outcome of a write-back attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBack {
    Written,
    /// Not hydrated yet or running memory-only.
    Skipped,
    /// Write failed and was logged.
    Failed,
}

/// A value mirrored into `store` under `key`.
pub struct PersistentState<T, S: KvStore> {
    key: String,
    store: S,
    value: T,
    hydrated: bool,
    durable: bool,
}

impl<T, S> PersistentState<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KvStore,
{
    /// Creates an unhydrated state holding `default`.
    pub fn new(store: S, key: impl Into<String>, default: T) -> Self {
        Self {
            key: key.into(),
            store,
            value: default,
            hydrated: false,
            durable: true,
        }
    }

    /// Loads the stored snapshot, falling back to the current value.
    ///
    /// Never fails; the outcome is logged and returned for callers that care.
    pub fn hydrate(&mut self) -> Hydration {
        if self.hydrated {
            return Hydration::AlreadyHydrated;
        }
        let outcome = match self.load() {
            Ok(Some(value)) => {
                self.value = value;
                Hydration::Loaded
            }
            Ok(None) => Hydration::Missing,
            Err(err @ StoreError::Parse(_)) => {
                warn!(
                    "event=state_hydrate module=store status=error key={} error_code=storage_parse_failed error={err}",
                    self.key
                );
                Hydration::Corrupt
            }
            Err(err) => {
                self.durable = false;
                warn!(
                    "event=state_hydrate module=store status=error key={} error_code=storage_unavailable error={err}",
                    self.key
                );
                Hydration::Unavailable
            }
        };
        self.hydrated = true;
        info!(
            "event=state_hydrate module=store status=ok key={} outcome={outcome:?}",
            self.key
        );
        outcome
    }

    fn load(&self) -> StoreResult<Option<T>> {
        match self.store.get(&self.key)? {
            Some(raw) if !raw.is_empty() => {
                serde_json::from_str(&raw).map(Some).map_err(StoreError::Parse)
            }
            _ => Ok(None),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and writes it back when hydrated.
    pub fn set(&mut self, value: T) -> WriteBack {
        self.value = value;
        self.write_back()
    }

    fn write_back(&mut self) -> WriteBack {
        if !self.hydrated || !self.durable {
            debug!(
                "event=state_write module=store status=skipped key={} hydrated={} durable={}",
                self.key, self.hydrated, self.durable
            );
            return WriteBack::Skipped;
        }

        let result = serde_json::to_string(&self.value)
            .map_err(StoreError::Serialize)
            .and_then(|raw| self.store.set(&self.key, &raw));

        match result {
            Ok(()) => WriteBack::Written,
            Err(err) => {
                if err.is_unavailable() {
                    self.durable = false;
                }
                warn!(
                    "event=state_write module=store status=error key={} durable={} error={err}",
                    self.key, self.durable
                );
                WriteBack::Failed
            }
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// `false` once the store was found unreachable.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::{Hydration, PersistentState, WriteBack};
    use crate::store::kv::{KvStore, MemoryKvStore};
    use crate::store::{StoreError, StoreResult};

    const KEY: &str = "numbers";

    /// Holds a snapshot but fails every read like a locked database.
    struct UnreadableStore {
        inner: MemoryKvStore,
    }

    impl KvStore for UnreadableStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::UninitializedConnection {
                expected_version: 1,
                actual_version: 0,
            })
        }

        fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
            self.inner.set(key, value)
        }
    }

    #[test]
    fn hydrate_adopts_stored_value_and_is_idempotent() {
        let store = MemoryKvStore::with_entry(KEY, "[1,2,3]");
        let mut state = PersistentState::new(store, KEY, vec![9u32]);

        assert_eq!(state.hydrate(), Hydration::Loaded);
        assert_eq!(state.get(), &vec![1, 2, 3]);
        assert_eq!(state.hydrate(), Hydration::AlreadyHydrated);
    }

    #[test]
    fn no_write_back_before_hydration() {
        let store = MemoryKvStore::with_entry(KEY, "[1]");
        let mut state = PersistentState::new(store, KEY, Vec::<u32>::new());

        assert_eq!(state.set(vec![5]), WriteBack::Skipped);
        assert_eq!(state.store().raw(KEY), Some("[1]"));

        state.hydrate();
        assert_eq!(state.get(), &vec![1]);
    }

    #[test]
    fn corrupt_or_empty_snapshot_keeps_default() {
        let mut corrupt =
            PersistentState::new(MemoryKvStore::with_entry(KEY, "{not json"), KEY, vec![7u32]);
        assert_eq!(corrupt.hydrate(), Hydration::Corrupt);
        assert_eq!(corrupt.get(), &vec![7]);
        assert!(corrupt.is_durable());

        let mut empty = PersistentState::new(MemoryKvStore::with_entry(KEY, ""), KEY, vec![7u32]);
        assert_eq!(empty.hydrate(), Hydration::Missing);
    }

    #[test]
    fn rejected_write_keeps_memory_authoritative_and_retries() {
        let mut state = PersistentState::new(MemoryKvStore::new(), KEY, vec![1u32]);
        state.hydrate();
        state.store_mut().set_reject_writes(true);

        assert_eq!(state.set(vec![2]), WriteBack::Failed);
        assert_eq!(state.get(), &vec![2]);
        assert!(state.is_durable());

        state.store_mut().set_reject_writes(false);
        assert_eq!(state.set(vec![3]), WriteBack::Written);
        assert_eq!(state.store().raw(KEY), Some("[3]"));
    }

    #[test]
    fn unavailable_store_degrades_to_memory_only() {
        let mut store = MemoryKvStore::new();
        store.set_unavailable(true);
        let mut state = PersistentState::new(store, KEY, vec![1u32]);

        assert_eq!(state.hydrate(), Hydration::Unavailable);
        assert!(!state.is_durable());

        state.store_mut().set_unavailable(false);
        assert_eq!(state.set(vec![4]), WriteBack::Skipped);
        assert_eq!(state.get(), &vec![4]);
        assert_eq!(state.store().write_count(), 0);
    }

    #[test]
    fn read_failure_other_than_parse_never_overwrites_slot() {
        let store = UnreadableStore {
            inner: MemoryKvStore::with_entry(KEY, "[1,2]"),
        };
        let mut state = PersistentState::new(store, KEY, vec![9u32]);

        assert_eq!(state.hydrate(), Hydration::Unavailable);
        assert!(!state.is_durable());

        assert_eq!(state.set(vec![3]), WriteBack::Skipped);
        assert_eq!(state.store().inner.raw(KEY), Some("[1,2]"));
        assert_eq!(state.store().inner.write_count(), 0);
    }
}
