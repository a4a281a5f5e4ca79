use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Serializes work per key. Callers on different keys never wait on each other.
///
/// Entries are created on first use and removed when the last guard for a key
/// is dropped with no other task waiting, so the map only holds keys in use.
#[derive(Clone, Default)]
pub struct KeyedLock {
    locks: LockMap,
}

pub struct KeyGuard {
    key: String,
    locks: LockMap,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyGuard {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = mutex.lock_owned().await;

        KeyGuard {
            key: key.to_string(),
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or awaited.
    pub fn active_keys(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        self.guard.take();
        // 只剩 map 自身持有时无人使用；被取消的等待者留下的条目在该 key 下次释放时清理
        if locks
            .get(&self.key)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        let locks = KeyedLock::new();
        {
            let _guard = locks.lock("9876543210").await;
            assert_eq!(locks.active_keys(), 1);
        }
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_key_is_serialized() {
        let locks = KeyedLock::new();
        let in_critical = Arc::new(AtomicU32::new(0));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let locks = locks.clone();
            let in_critical = in_critical.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.lock("same").await;
                let inside = in_critical.fetch_add(1, Ordering::SeqCst);
                assert_eq!(inside, 0);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_critical.fetch_sub(1, Ordering::SeqCst);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_release_only_removes_own_key() {
        let locks = KeyedLock::new();
        let a = locks.lock("a").await;
        let b = locks.lock("b").await;
        assert_eq!(locks.active_keys(), 2);

        drop(a);
        assert_eq!(locks.active_keys(), 1);
        drop(b);
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_entry_kept_while_waiter_pending() {
        let locks = KeyedLock::new();
        let first = locks.lock("same").await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("same").await;
            })
        };
        tokio::task::yield_now().await;

        drop(first);
        waiter.await.unwrap();
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLock::new();
        let _a = locks.lock("a").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.lock("b")).await;
        assert!(b.is_ok());
    }
}
