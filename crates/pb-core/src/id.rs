use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for entity IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Source of the numeric suffix handed out by [`EntityId::with_prefix`].
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A lightweight, interned identifier for players and shapes.
/// Internally a 4-byte `Spur` index.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(Spur);

impl EntityId {
    /// Intern a string as an EntityId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        EntityId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh ID with a category prefix (e.g. `player_4`, `arrow_12`).
    ///
    /// The suffix comes from a process-wide monotonic counter, so an ID is
    /// never handed out twice in one session.
    pub fn with_prefix(prefix: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// Register an ID that arrived from outside (a loaded board) so that
    /// later [`EntityId::with_prefix`] calls cannot collide with it.
    pub fn observe(s: &str) -> Self {
        if let Some(n) = numeric_suffix(s) {
            COUNTER.fetch_max(counter_floor(n), Ordering::Relaxed);
        }
        Self::intern(s)
    }

    /// The category prefix, i.e. everything before the last `_` or `-`.
    pub fn category(&self) -> &str {
        let s = self.as_str();
        s.split(['_', '-']).next().unwrap_or(s)
    }
}

/// Lowest counter value that cannot reissue suffix `n`.
fn counter_floor(n: u64) -> u64 {
    n.saturating_add(1)
}

/// Trailing decimal run after the last `_` or `-` separator.
fn numeric_suffix(s: &str) -> Option<u64> {
    let (_, tail) = s.rsplit_once(['_', '-'])?;
    tail.parse().ok()
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EntityId::observe(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = EntityId::intern("player_home_gk");
        let b = EntityId::intern("player_home_gk");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "player_home_gk");
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = EntityId::with_prefix("player");
        let b = EntityId::with_prefix("player");
        assert_ne!(a, b);
        assert_eq!(a.category(), "player");
    }

    #[test]
    fn observed_ids_push_the_counter_forward() {
        let far = EntityId::observe("cone_900000");
        let next = EntityId::with_prefix("cone");
        assert_ne!(far, next);
        let n: u64 = next.as_str().trim_start_matches("cone_").parse().unwrap();
        assert!(n > 900_000);
    }

    #[test]
    fn huge_suffixes_do_not_overflow() {
        assert_eq!(numeric_suffix("arrow_18446744073709551615"), Some(u64::MAX));
        assert_eq!(counter_floor(u64::MAX), u64::MAX);
        assert_eq!(counter_floor(41), 42);
        assert_eq!(numeric_suffix("arrow_99999999999999999999"), None);
    }

    #[test]
    fn legacy_ids_keep_their_category() {
        let id = EntityId::intern("football-default-1717171717");
        assert_eq!(id.category(), "football");
    }
}
