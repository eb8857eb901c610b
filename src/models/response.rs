//! The shaped reply returned by every route method.

use crate::{
    error::ParseError,
    models::{
        de_string_or_empty, macros::str_opt_ref, maybe_de_list, maybe_de_number, maybe_de_string,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The API reply, reshaped the same way whether it arrived as JSON or XML.
///
/// Built once per call and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    /// Single result URL.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_string"
    )]
    url: Option<String>,

    /// Several result URLs.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_list"
    )]
    urls: Option<Vec<String>>,

    /// Text results, for the text routes like `truth` and `dare`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_list"
    )]
    text_content: Option<Vec<String>>,

    /// Number of text entries available on the route.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_number"
    )]
    text_count: Option<u32>,

    /// Number of images available on the route.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_number"
    )]
    image_count: Option<u32>,

    /// Error text reported by the API; empty on success.
    #[serde(default, deserialize_with = "de_string_or_empty")]
    error_messages: String,

    /// Status code reported inside the payload.
    #[serde(
        default,
        alias = "statusCode",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_number"
    )]
    status: Option<u16>,

    /// The whole parsed body.
    #[serde(skip)]
    raw_response: Value,
}

impl NormalizedResponse {
    /// Shapes `payload` into a response, keeping `raw` as the full parsed body.
    ///
    /// A bare string payload, such as the `""` of an empty `<response/>`,
    /// carries no fields and yields a response with every field unset.
    /// Field values of an unexpected type are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Payload`] if `payload` is neither an object nor
    /// a string.
    pub fn from_payload(payload: Value, raw: Value) -> Result<Self, ParseError> {
        let payload = match payload {
            Value::String(_) => Value::Object(serde_json::Map::new()),
            other => other,
        };
        let mut response: NormalizedResponse =
            serde_json::from_value(payload).map_err(ParseError::Payload)?;
        response.raw_response = raw;
        Ok(response)
    }

    /// Returns the single result URL.
    pub fn url(&self) -> Option<&str> {
        str_opt_ref!(self.url)
    }

    /// Returns the result URL list.
    pub fn urls(&self) -> Option<&[String]> {
        str_opt_ref!(self.urls)
    }

    /// Returns every URL in the response, `url` first.
    pub fn all_urls(&self) -> impl Iterator<Item = &str> {
        self.url
            .as_deref()
            .into_iter()
            .chain(self.urls.iter().flatten().map(String::as_str))
    }

    /// Returns the text results.
    pub fn text_content(&self) -> Option<&[String]> {
        str_opt_ref!(self.text_content)
    }

    /// Returns how many text entries the route holds.
    pub fn text_count(&self) -> Option<u32> {
        self.text_count
    }

    /// Returns how many images the route holds.
    pub fn image_count(&self) -> Option<u32> {
        self.image_count
    }

    /// Returns the error text reported by the API.
    pub fn error_messages(&self) -> &str {
        &self.error_messages
    }

    /// Returns the status code reported inside the payload.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the full parsed body: a JSON value, or the XML tree.
    pub fn raw_response(&self) -> &Value {
        &self.raw_response
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn shape(payload: Value) -> NormalizedResponse {
        NormalizedResponse::from_payload(payload.clone(), payload).unwrap()
    }

    #[test]
    fn json_payload() {
        let res = shape(json!({
            "url": "https://x/1.gif",
            "status": 200,
            "errorMessages": ""
        }));
        assert_eq!(res.url(), Some("https://x/1.gif"));
        assert_eq!(res.status(), Some(200));
        assert_eq!(res.error_messages(), "");
        assert_eq!(res.urls(), None);
        assert_eq!(res.raw_response()["url"], "https://x/1.gif");
    }

    #[test]
    fn xml_style_strings_are_accepted() {
        let res = shape(json!({
            "urls": "https://x/1.gif",
            "textContent": ["a", "b"],
            "textCount": "2",
            "imageCount": "",
            "statusCode": "200",
            "errorMessages": ""
        }));
        assert_eq!(res.urls(), Some(&["https://x/1.gif".to_string()][..]));
        assert_eq!(res.text_content().map(<[String]>::len), Some(2));
        assert_eq!(res.text_count(), Some(2));
        assert_eq!(res.image_count(), None);
        assert_eq!(res.status(), Some(200));
    }

    #[test]
    fn all_urls_chains_both_fields() {
        let res = shape(json!({ "url": "a", "urls": ["b", "c"] }));
        assert_eq!(res.all_urls().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn missing_fields_default() {
        let res = shape(json!({}));
        assert_eq!(res.url(), None);
        assert_eq!(res.error_messages(), "");
        assert_eq!(res.status(), None);
    }

    #[test]
    fn string_payload_has_no_fields() {
        let raw = json!({ "response": "" });
        let res = NormalizedResponse::from_payload(json!(""), raw.clone()).unwrap();
        assert_eq!(res.url(), None);
        assert_eq!(res.urls(), None);
        assert_eq!(res.status(), None);
        assert_eq!(res.error_messages(), "");
        assert_eq!(res.raw_response(), &raw);
    }

    #[test]
    fn odd_field_values_are_dropped() {
        let res = shape(json!({
            "url": 12,
            "urls": ["a", 3, "b"],
            "status": "ok",
            "textCount": 1.5,
            "imageCount": -4,
            "errorMessages": 500
        }));
        assert_eq!(res.url(), None);
        assert_eq!(res.urls(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(res.status(), None);
        assert_eq!(res.text_count(), None);
        assert_eq!(res.image_count(), None);
        assert_eq!(res.error_messages(), "500");
        assert_eq!(res.raw_response()["status"], "ok");
    }

    #[test]
    fn status_out_of_range_is_dropped() {
        let res = shape(json!({ "status": 70000 }));
        assert_eq!(res.status(), None);
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        for payload in [json!(null), json!([1, 2]), json!(true), json!(7)] {
            let err = NormalizedResponse::from_payload(payload, Value::Null).unwrap_err();
            assert!(matches!(err, ParseError::Payload(_)));
        }
    }
}
