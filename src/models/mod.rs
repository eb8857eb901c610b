pub mod params;
pub mod response;
pub mod route;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A number that may arrive as a JSON number or, from XML, as text.
/// Anything that does not fit `T` is treated as absent.
pub(crate) fn maybe_de_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + std::str::FromStr,
{
    let value = <Option<Value> as Deserialize>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| T::try_from(n).ok()),
        // XML renders an empty element as an empty string
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// A string field. Values of any other type are treated as absent.
pub(crate) fn maybe_de_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Option<Value> as Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// A list that may arrive as a lone string when it has exactly one entry.
pub(crate) fn maybe_de_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Option<Value> as Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(vec![s]),
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// `null` and a missing key both become an empty string; other scalars are
/// rendered as text.
pub(crate) fn de_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Option<Value> as Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    })
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}
