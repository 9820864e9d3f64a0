use crate::clock::Timestamp;
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// 传输头集合，键有序以保证编码结果稳定
pub type Headers = BTreeMap<String, HeaderValue>;

/// 传输头的取值
///
/// 线上形态：布尔、整数、浮点与字符串直接编码为 JSON 原生值；
/// 时间戳编码为 `{"$timestamp": "<RFC 3339>"}`，避免普通字符串被误识别为时间。
/// 非有限浮点数（NaN、无穷）无法编码，序列化时报错。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp {
        #[serde(rename = "$timestamp")]
        at: Timestamp,
    },
}

impl Serialize for HeaderValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            HeaderValue::Bool(v) => serializer.serialize_bool(*v),
            HeaderValue::Integer(v) => serializer.serialize_i64(*v),
            HeaderValue::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            HeaderValue::Float(v) => Err(S::Error::custom(format!(
                "non-finite header value {v} cannot be encoded"
            ))),
            HeaderValue::String(v) => serializer.serialize_str(v),
            HeaderValue::Timestamp { at } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$timestamp", at)?;
                map.end()
            }
        }
    }
}

impl HeaderValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HeaderValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            HeaderValue::Timestamp { at } => Some(*at),
            _ => None,
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::String(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::String(value)
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        HeaderValue::Bool(value)
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Integer(value)
    }
}

impl From<i32> for HeaderValue {
    fn from(value: i32) -> Self {
        HeaderValue::Integer(value.into())
    }
}

impl From<f64> for HeaderValue {
    fn from(value: f64) -> Self {
        HeaderValue::Float(value)
    }
}

impl From<Timestamp> for HeaderValue {
    fn from(at: Timestamp) -> Self {
        HeaderValue::Timestamp { at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn wire_shape_of_each_variant() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let mut headers = Headers::new();
        headers.insert("trace".into(), "xyz".into());
        headers.insert("retries".into(), 3.into());
        headers.insert("ratio".into(), 0.5.into());
        headers.insert("replayed".into(), true.into());
        headers.insert("sent".into(), at.into());

        let value = serde_json::to_value(&headers).unwrap();
        assert_eq!(
            value,
            json!({
                "ratio": 0.5,
                "replayed": true,
                "retries": 3,
                "sent": { "$timestamp": "2024-03-01T08:30:00Z" },
                "trace": "xyz",
            })
        );

        let back: Headers = serde_json::from_value(value).unwrap();
        assert_eq!(back, headers);
    }

    #[test]
    fn timestamp_like_string_stays_a_string() {
        let raw = json!({ "at": "2024-03-01T08:30:00Z", "whole": 2.0 });
        let headers: Headers = serde_json::from_value(raw).unwrap();
        assert_eq!(headers["at"].as_str(), Some("2024-03-01T08:30:00Z"));
        assert_eq!(headers["whole"], HeaderValue::Float(2.0));
    }

    #[test]
    fn non_finite_float_is_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut headers = Headers::new();
            headers.insert("ratio".into(), bad.into());
            let err = serde_json::to_string(&headers).unwrap_err();
            assert!(err.to_string().contains("non-finite"));
        }
    }
}
