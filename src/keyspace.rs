//! Derives the four store keys backing a single lock name.

/// The four keys a lock name `N` expands to: `N:exclusive`,
/// `N:exclusive_waiting`, `N:shared`, `N:shared_waiting`.
#[derive(Debug, Clone)]
pub struct Keyspace {
    /// Scalar string key holding the current exclusive holder's owner id.
    pub exclusive: String,
    /// Sorted set of owner ids queued for exclusive access.
    pub exclusive_waiting: String,
    /// Sorted set of owner ids currently holding shared access.
    pub shared: String,
    /// Sorted set of owner ids queued for shared access.
    pub shared_waiting: String,
}

impl Keyspace {
    /// Derive the four keys for lock name `name`.
    pub fn new(name: &str) -> Self {
        Self {
            exclusive: format!("{name}:exclusive"),
            exclusive_waiting: format!("{name}:exclusive_waiting"),
            shared: format!("{name}:shared"),
            shared_waiting: format!("{name}:shared_waiting"),
        }
    }

    /// All four keys, in the order an administrative flush deletes them.
    pub fn all(&self) -> [&str; 4] {
        [
            &self.exclusive,
            &self.exclusive_waiting,
            &self.shared,
            &self.shared_waiting,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_expected_keys() {
        let ks = Keyspace::new("A");
        assert_eq!(ks.exclusive, "A:exclusive");
        assert_eq!(ks.exclusive_waiting, "A:exclusive_waiting");
        assert_eq!(ks.shared, "A:shared");
        assert_eq!(ks.shared_waiting, "A:shared_waiting");
        assert_eq!(
            ks.all(),
            ["A:exclusive", "A:exclusive_waiting", "A:shared", "A:shared_waiting"]
        );
    }

    #[test]
    fn separator_is_colon_and_names_compose_literally() {
        let ks = Keyspace::new("jobs:default");
        assert_eq!(ks.exclusive, "jobs:default:exclusive");
    }
}
