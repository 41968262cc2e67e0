//! Logical service name resolution.
//!
//! Discovery itself is out of scope for the gateway; it only depends on the
//! `resolve(name) -> address` capability, supplied at startup.

use std::collections::HashMap;

use gateway_kernel::settings::BackendSettings;

use crate::ClientError;

/// Resolves a logical service name to a reachable base address.
pub trait ServiceResolver: Send + Sync {
    fn resolve(&self, service: &str) -> Result<String, ClientError>;
}

/// Resolver backed by a fixed name → address table from settings.
pub struct StaticResolver {
    addresses: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new(addresses: HashMap<String, String>) -> Self {
        Self { addresses }
    }

    /// Build the table from the configured backend endpoints.
    pub fn from_settings(backends: &BackendSettings) -> Self {
        let mut addresses = HashMap::new();
        addresses.insert(
            backends.book.service.clone(),
            backends.book.address.clone(),
        );
        addresses.insert(
            backends.user.service.clone(),
            backends.user.address.clone(),
        );
        Self::new(addresses)
    }
}

impl ServiceResolver for StaticResolver {
    fn resolve(&self, service: &str) -> Result<String, ClientError> {
        self.addresses
            .get(service)
            .cloned()
            .ok_or_else(|| ClientError::Unresolved(service.to_string()))
    }
}
