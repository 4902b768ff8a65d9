use serde::{Deserialize, Deserializer};

use crate::errors::ItemError;
use crate::state::items::{Item, ItemStore};

/// Body accepted by `POST /items`.
///
/// A client-supplied `key` is ignored; the server always assigns one.
#[derive(Debug, Deserialize)]
pub struct NewItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

/// An explicit `null` value is stored as the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a `POST /items` body.
pub fn parse_new_item(body: &[u8]) -> Result<NewItem, ItemError> {
    serde_json::from_slice(body).map_err(|e| ItemError::InvalidBody(e.to_string()))
}

/// Assign a fresh key to `new_item` and store it. Returns the stored copy.
pub fn create(store: &ItemStore, new_item: NewItem) -> Result<Item, ItemError> {
    let item = Item {
        key: store.next_key(),
        value: new_item.value,
    };

    store.put(item.clone())?;

    tracing::debug!("Created item {}", item.key);
    Ok(item)
}

/// All stored items, in no particular order.
pub fn list(store: &ItemStore) -> Result<Vec<Item>, ItemError> {
    store.list()
}

/// Retrieve a single item by exact key.
pub fn get(store: &ItemStore, key: &str) -> Result<Item, ItemError> {
    store.get(key)
}
