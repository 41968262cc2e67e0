use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record the gateway can forward on behalf of a backend.
///
/// Backends assign the identifier; inbound create bodies carry none, update
/// bodies must carry the one from the path.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    fn id(&self) -> Option<i64>;
}

/// Book record as exposed by the book service. Field names on the wire stay
/// camelCase; optional fields are dropped when absent so bodies are forwarded
/// as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// User record as exposed by the user service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl Entity for Book {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for User {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

/// Envelope returned for create operations: only the identifier the backend
/// assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}

impl Created {
    /// Wrap the backend-assigned identifier. Backends are required to assign
    /// one on create; a missing id is a contract violation, not a client
    /// mistake.
    pub fn from_entity<E: Entity>(entity: &E) -> anyhow::Result<Self> {
        match entity.id() {
            Some(id) => Ok(Self { id }),
            None => Err(anyhow::anyhow!(
                "backend returned a created entity without an id"
            )),
        }
    }
}
