#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The normalized Pokémon record persisted by the loader.
//!
//! Every remote API response is reduced to a [`Pokemon`] before it is
//! written to the document store. The remote resource's own `id` is the
//! document key, so re-ingesting the same resource replaces the existing
//! document instead of creating a new one.

use serde::{Deserialize, Serialize};

/// Default document-store collection holding [`Pokemon`] documents.
pub const COLLECTION: &str = "pokemons";

/// A Pokémon normalized from the remote API's JSON representation.
///
/// Built once per fetch and never mutated afterwards. Optional scalar
/// fields serialize as `null` when the source omits them so the stored
/// document always carries the full field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Remote resource ID. Used verbatim as the document key.
    pub id: i64,
    /// Species name (e.g. `"bulbasaur"`).
    pub name: Option<String>,
    /// Height as reported by the API (decimetres).
    pub height: Option<i64>,
    /// Weight as reported by the API (hectograms).
    pub weight: Option<i64>,
    /// Type names in the order the API lists them.
    pub types: Vec<String>,
    /// Number of entries in the source's `moves` collection.
    pub moves_count: u64,
}

impl Pokemon {
    /// Returns the document key for this record: the string form of
    /// [`Pokemon::id`].
    #[must_use]
    pub fn document_key(&self) -> String {
        self.id.to_string()
    }

    /// Returns the name for log output, falling back to `"<unnamed>"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulbasaur() -> Pokemon {
        Pokemon {
            id: 1,
            name: Some("bulbasaur".to_string()),
            height: Some(7),
            weight: Some(69),
            types: vec!["grass".to_string(), "poison".to_string()],
            moves_count: 3,
        }
    }

    #[test]
    fn document_key_is_id_string() {
        assert_eq!(bulbasaur().document_key(), "1");
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let value = serde_json::to_value(bulbasaur()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "name": "bulbasaur",
                "height": 7,
                "weight": 69,
                "types": ["grass", "poison"],
                "moves_count": 3,
            })
        );
    }

    #[test]
    fn missing_scalars_serialize_as_null() {
        let pokemon = Pokemon {
            id: 25,
            name: None,
            height: None,
            weight: None,
            types: Vec::new(),
            moves_count: 0,
        };
        let value = serde_json::to_value(&pokemon).unwrap();
        assert!(value["name"].is_null());
        assert!(value["height"].is_null());
        assert!(value["weight"].is_null());
        assert_eq!(pokemon.display_name(), "<unnamed>");
    }
}
