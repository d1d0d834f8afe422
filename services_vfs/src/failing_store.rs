//! # Failing Store
//!
//! A KeyValueStore wrapper that can simulate failures for testing that
//! storage trouble never breaks filesystem operations.

use crate::storage::{KeyValueStore, StorageError};

/// Policy for when failures should occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Never fail (passthrough)
    Never,
    /// Every read fails
    Reads,
    /// Every write fails
    Writes,
    /// Writes fail once N writes have succeeded
    AfterWrites(usize),
    /// Reads and writes of these keys fail
    OnKeys(Vec<String>),
}

/// Wrapper around a KeyValueStore that can simulate failures
#[derive(Debug, Clone)]
pub struct FailingStore<S: KeyValueStore> {
    inner: S,
    policy: FailurePolicy,
    write_count: usize,
    failed_writes: usize,
}

impl<S: KeyValueStore> FailingStore<S> {
    /// Create a new failing store with the given policy
    pub fn new(inner: S, policy: FailurePolicy) -> Self {
        Self {
            inner,
            policy,
            write_count: 0,
            failed_writes: 0,
        }
    }

    fn read_fails(&self, key: &str) -> bool {
        match &self.policy {
            FailurePolicy::Reads => true,
            FailurePolicy::OnKeys(keys) => keys.iter().any(|k| k == key),
            _ => false,
        }
    }

    fn write_fails(&self, key: &str) -> bool {
        match &self.policy {
            FailurePolicy::Never | FailurePolicy::Reads => false,
            FailurePolicy::Writes => true,
            FailurePolicy::AfterWrites(n) => self.write_count >= *n,
            FailurePolicy::OnKeys(keys) => keys.iter().any(|k| k == key),
        }
    }

    /// Get the underlying store (for inspection)
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Get mutable access to the underlying store
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwraps the underlying store
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Number of writes that reached the underlying store
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Number of writes rejected by the policy
    pub fn failed_writes(&self) -> usize {
        self.failed_writes
    }

    /// Reset the failure policy
    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
        self.write_count = 0;
        self.failed_writes = 0;
    }
}

impl<S: KeyValueStore> KeyValueStore for FailingStore<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.read_fails(key) {
            return Err(StorageError::Unavailable(format!("simulated read failure: {}", key)));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.write_fails(key) {
            self.failed_writes += 1;
            return Err(StorageError::Io {
                key: key.to_string(),
                message: "simulated write failure".to_string(),
            });
        }

        self.write_count += 1;
        self.inner.set(key, value)
    }
}
