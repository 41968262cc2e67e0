/// One of the backend services fronted by the gateway.
///
/// Each variant carries the logical discovery name the resolver understands
/// and the collection path exposed by that service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Book,
    User,
}

impl Backend {
    /// Logical service name handed to the resolver.
    pub fn service(&self) -> &'static str {
        match self {
            Backend::Book => "book-service",
            Backend::User => "user-service",
        }
    }

    /// Collection path on the backend's REST surface.
    pub fn collection(&self) -> &'static str {
        match self {
            Backend::Book => "/api/books",
            Backend::User => "/api/users",
        }
    }

    /// Singular resource name, used in logs and error messages.
    pub fn resource(&self) -> &'static str {
        match self {
            Backend::Book => "book",
            Backend::User => "user",
        }
    }
}
