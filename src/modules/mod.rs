pub mod library;

use std::sync::Arc;

use gateway_client::RemoteCallClient;
use gateway_kernel::ModuleRegistry;

/// Register all gateway modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, client: Arc<RemoteCallClient>) {
    registry.register(library::create_module(client));
}
