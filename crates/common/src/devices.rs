use std::sync::Arc;

use parking_lot::Mutex;

/// In-memory registry of client addresses, in first-seen order.
///
/// Addresses are compared as exact strings. Nothing expires: an address stays
/// until it is removed explicitly or the process restarts. Clones share the
/// same underlying list.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    inner: Arc<Mutex<Vec<String>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit from `ip`. Returns true if the address was not known yet.
    pub fn record_visit(&self, ip: &str) -> bool {
        let mut devices = self.inner.lock();
        if devices.iter().any(|d| d == ip) {
            return false;
        }
        devices.push(ip.to_string());
        true
    }

    /// Snapshot of every known address in insertion order
    pub fn list_devices(&self) -> Vec<String> {
        self.inner.lock().clone()
    }

    /// Remove `ip` from the registry. Returns false if it was not present.
    pub fn remove_device(&self, ip: &str) -> bool {
        let mut devices = self.inner.lock();
        match devices.iter().position(|d| d == ip) {
            Some(idx) => {
                devices.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_visit_deduplicates() {
        let registry = DeviceRegistry::new();
        assert!(registry.record_visit("10.0.0.5"));
        assert!(!registry.record_visit("10.0.0.5"));
        assert_eq!(registry.list_devices(), vec!["10.0.0.5".to_string()]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let registry = DeviceRegistry::new();
        registry.record_visit("10.0.0.3");
        registry.record_visit("10.0.0.1");
        registry.record_visit("10.0.0.2");
        registry.record_visit("10.0.0.1");
        assert_eq!(
            registry.list_devices(),
            vec!["10.0.0.3", "10.0.0.1", "10.0.0.2"]
        );
    }

    #[test]
    fn test_remove_missing_device() {
        let registry = DeviceRegistry::new();
        assert!(!registry.remove_device("9.9.9.9"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_present_device() {
        let registry = DeviceRegistry::new();
        registry.record_visit("10.0.0.5");
        registry.record_visit("10.0.0.6");
        assert!(registry.remove_device("10.0.0.5"));
        assert_eq!(registry.list_devices(), vec!["10.0.0.6".to_string()]);
        // a removed address can come back on its next visit
        assert!(registry.record_visit("10.0.0.5"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = DeviceRegistry::new();
        let other = registry.clone();
        other.record_visit("192.168.1.20");
        assert_eq!(registry.len(), 1);
    }
}
