use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Config;
use crate::schema::ResourceAddress;

/// Shared state between the REPL loop and the line editor's completer.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Resource whose attributes are being completed
    current_address: Arc<RwLock<ResourceAddress>>,

    /// Hide read-only attributes from completion
    writable_only: Arc<RwLock<bool>>,

    /// Color output setting
    color_enabled: Arc<RwLock<bool>>,
}

impl SharedState {
    /// Create a new shared state.
    ///
    /// * `address` - Initial resource address
    pub fn new(address: ResourceAddress) -> Self {
        Self {
            current_address: Arc::new(RwLock::new(address)),
            writable_only: Arc::new(RwLock::new(false)),
            color_enabled: Arc::new(RwLock::new(true)),
        }
    }

    /// Create a new shared state from configuration.
    ///
    /// * `address` - Initial resource address
    /// * `config` - Loaded configuration
    pub fn with_config(address: ResourceAddress, config: &Config) -> Self {
        let state = Self::new(address);
        state.set_writable_only(config.completion.writable_only);
        state.set_color_enabled(config.display.color);
        state
    }

    /// Get current resource address.
    pub fn address(&self) -> ResourceAddress {
        self.current_address
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set current resource address.
    pub fn set_address(&self, address: ResourceAddress) {
        *self
            .current_address
            .write()
            .unwrap_or_else(PoisonError::into_inner) = address;
    }

    /// Get writable-only completion setting.
    pub fn writable_only(&self) -> bool {
        *self
            .writable_only
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Set writable-only completion.
    pub fn set_writable_only(&self, enabled: bool) {
        *self
            .writable_only
            .write()
            .unwrap_or_else(PoisonError::into_inner) = enabled;
    }

    /// Get current color setting.
    pub fn color_enabled(&self) -> bool {
        *self
            .color_enabled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Set color output.
    pub fn set_color_enabled(&self, enabled: bool) {
        *self
            .color_enabled
            .write()
            .unwrap_or_else(PoisonError::into_inner) = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let state = SharedState::new(ResourceAddress::root());
        let other = state.clone();

        other.set_address("/subsystem=web".parse().unwrap());
        other.set_writable_only(true);

        assert_eq!(state.address().to_string(), "/subsystem=web");
        assert!(state.writable_only());
    }

    #[test]
    fn test_with_config() {
        let mut config = Config::default();
        config.completion.writable_only = true;
        config.display.color = false;

        let state = SharedState::with_config(ResourceAddress::root(), &config);
        assert!(state.writable_only());
        assert!(!state.color_enabled());
    }
}
