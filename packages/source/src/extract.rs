//! Field extraction from the remote API's JSON representation.
//!
//! Only `id`, `name`, `height`, `weight`, `types`, and `moves` are read;
//! everything else in the payload is ignored. An absent key counts as
//! missing, and so does a `null` scalar. A `null` list, or any key that is
//! present with the wrong JSON type, is a [`SourceError::Normalization`].

use poke_loader_pokemon_models::Pokemon;
use serde_json::{Map, Value};

use crate::SourceError;

/// Reduces a remote API response to a [`Pokemon`].
///
/// * `id` is required and must be an integer.
/// * `name`, `height`, and `weight` are copied when present.
/// * `types` maps each entry's nested `type.name`, in order; an absent key
///   means no types.
/// * `moves_count` is the length of `moves`; an absent key means zero.
///
/// # Errors
///
/// Returns [`SourceError::Normalization`] if the body is not an object,
/// `id` is missing, any field has the wrong type, or a `types` entry has no
/// nested `type.name` string.
pub fn extract_pokemon(data: &Value) -> Result<Pokemon, SourceError> {
    let obj = data
        .as_object()
        .ok_or_else(|| normalization("expected a JSON object".to_string()))?;

    let id = field(obj, "id")
        .ok_or_else(|| normalization("missing required field 'id'".to_string()))?;
    let id = id.as_i64().ok_or_else(|| mistyped("id", "an integer"))?;

    let name = field(obj, "name")
        .map(|v| {
            v.as_str()
                .map(str::to_owned)
                .ok_or_else(|| mistyped("name", "a string"))
        })
        .transpose()?;

    let height = optional_i64(obj, "height")?;
    let weight = optional_i64(obj, "weight")?;

    let types = optional_array(obj, "types")?
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .map(|(i, entry)| type_name(i, entry))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    let moves_count = optional_array(obj, "moves")?.map_or(0, |moves| moves.len() as u64);

    Ok(Pokemon {
        id,
        name,
        height,
        weight,
        types,
        moves_count,
    })
}

/// Looks up a scalar `key`, treating `null` the same as an absent key.
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn optional_i64(obj: &Map<String, Value>, key: &str) -> Result<Option<i64>, SourceError> {
    field(obj, key)
        .map(|v| v.as_i64().ok_or_else(|| mistyped(key, "an integer")))
        .transpose()
}

/// Looks up a list `key`. Only an absent key is optional; `null` is
/// rejected like any other non-array value.
fn optional_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Vec<Value>>, SourceError> {
    obj.get(key)
        .map(|v| v.as_array().ok_or_else(|| mistyped(key, "an array")))
        .transpose()
}

/// Pulls `type.name` out of one `types` entry
/// (`{"slot": 1, "type": {"name": "grass", "url": "…"}}`).
fn type_name(index: usize, entry: &Value) -> Result<String, SourceError> {
    entry
        .get("type")
        .and_then(|t| t.get("name"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| normalization(format!("types[{index}] has no 'type.name' string")))
}

fn mistyped(key: &str, expected: &str) -> SourceError {
    normalization(format!("field '{key}' is not {expected}"))
}

const fn normalization(message: String) -> SourceError {
    SourceError::Normalization { message }
}
