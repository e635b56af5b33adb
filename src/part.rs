use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form rendering options handed through to the glyph renderers,
/// e.g. `{"color": "#cc1f1f", "x_extent": 24}`.
pub type PartOptions = Map<String, Value>;

/// One drawable part, as handed to a `DnaRenderer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartDescriptor {
    #[serde(rename = "type")]
    pub part_type: String,
    pub name: String,
    pub fwd: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opts: Option<PartOptions>,
}

impl PartDescriptor {
    pub fn new(part_type: &str, name: &str) -> Self {
        Self {
            part_type: part_type.to_string(),
            name: name.to_string(),
            fwd: true,
            start: None,
            end: None,
            opts: None,
        }
    }

    /// Start coordinate used for left-to-right ordering; parts without one sort as 0.
    pub fn sort_key(&self) -> i64 {
        self.start.unwrap_or(0)
    }

    fn opt(&self, key: &str) -> Option<&Value> {
        self.opts.as_ref()?.get(key)
    }

    pub fn opt_f64(&self, key: &str) -> Result<Option<f64>, RenderError> {
        match self.opt(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| RenderError::InvalidOption {
                key: key.to_string(),
                part_name: self.name.clone(),
                reason: format!("expected a number, got {value}"),
            }),
        }
    }

    pub fn opt_f64_or(&self, key: &str, default: f64) -> Result<f64, RenderError> {
        Ok(self.opt_f64(key)?.unwrap_or(default))
    }

    pub fn opt_str(&self, key: &str) -> Result<Option<&str>, RenderError> {
        match self.opt(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(value) => Err(RenderError::InvalidOption {
                key: key.to_string(),
                part_name: self.name.clone(),
                reason: format!("expected a string, got {value}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_opts(value: Value) -> PartDescriptor {
        let mut part = PartDescriptor::new("CDS", "gfp");
        part.opts = value.as_object().cloned();
        part
    }

    #[test]
    fn test_serializes_with_dnaplotlib_keys() {
        let mut part = PartDescriptor::new("Promoter", "pTet");
        part.start = Some(1);
        part.end = Some(55);
        let value = serde_json::to_value(&part).expect("serialize");
        assert_eq!(
            value,
            json!({"type": "Promoter", "name": "pTet", "fwd": true, "start": 1, "end": 55})
        );
    }

    #[test]
    fn test_sort_key_defaults_to_zero() {
        assert_eq!(PartDescriptor::new("CDS", "gfp").sort_key(), 0);
    }

    #[test]
    fn test_option_accessors() {
        let part = with_opts(json!({"color": "#00ff00", "x_extent": 24, "label": null}));
        assert_eq!(part.opt_str("color").expect("color"), Some("#00ff00"));
        assert_eq!(part.opt_f64("x_extent").expect("x_extent"), Some(24.0));
        assert_eq!(part.opt_str("label").expect("label"), None);
        assert_eq!(part.opt_f64_or("y_extent", 5.0).expect("y_extent"), 5.0);
    }

    #[test]
    fn test_option_type_mismatch_is_reported() {
        let part = with_opts(json!({"x_extent": "wide"}));
        let err = part.opt_f64("x_extent").expect_err("string is not a number");
        assert!(
            err.to_string().contains("x_extent"),
            "expected option name in error, got: {err}"
        );
    }
}
