//! Color schema for the `theme` task.
//!
//! The same key list drives the `responseSchema` sent upstream and the
//! typed decode of the reply, so the two cannot drift.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::AppError;
use crate::llm_client::strip_json_fences;

pub const BALL_PALETTE_KEY: &str = "ballColorPalette";
pub const BALL_PALETTE_LEN: usize = 5;

/// Told to the model in both the schema and the prompt.
pub const HEX_COLOR_FORMAT: &str =
    "CSS hex color: #RGB, #RGBA, #RRGGBB or #RRGGBBAA (alpha optional)";

/// The 20 scalar keys, in the order the model is asked to emit them.
pub const COLOR_KEYS: [&str; 20] = [
    "background",
    "surface",
    "surfaceAlt",
    "primary",
    "primaryHover",
    "secondary",
    "accent",
    "accentHover",
    "text",
    "textMuted",
    "textInverse",
    "heading",
    "border",
    "link",
    "linkHover",
    "buttonBackground",
    "buttonText",
    "navBackground",
    "navText",
    "shadow",
];

/// A generated site palette. Every value is a CSS hex color: `#RGB`, `#RGBA`,
/// `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemePalette {
    pub background: String,
    pub surface: String,
    pub surface_alt: String,
    pub primary: String,
    pub primary_hover: String,
    pub secondary: String,
    pub accent: String,
    pub accent_hover: String,
    pub text: String,
    pub text_muted: String,
    pub text_inverse: String,
    pub heading: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    pub button_background: String,
    pub button_text: String,
    pub nav_background: String,
    pub nav_text: String,
    pub shadow: String,
    pub ball_color_palette: [String; BALL_PALETTE_LEN],
}

impl ThemePalette {
    /// Scalar colors paired with their wire names, in `COLOR_KEYS` order.
    pub fn colors(&self) -> [(&'static str, &str); 20] {
        [
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("surfaceAlt", self.surface_alt.as_str()),
            ("primary", self.primary.as_str()),
            ("primaryHover", self.primary_hover.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("accentHover", self.accent_hover.as_str()),
            ("text", self.text.as_str()),
            ("textMuted", self.text_muted.as_str()),
            ("textInverse", self.text_inverse.as_str()),
            ("heading", self.heading.as_str()),
            ("border", self.border.as_str()),
            ("link", self.link.as_str()),
            ("linkHover", self.link_hover.as_str()),
            ("buttonBackground", self.button_background.as_str()),
            ("buttonText", self.button_text.as_str()),
            ("navBackground", self.nav_background.as_str()),
            ("navText", self.nav_text.as_str()),
            ("shadow", self.shadow.as_str()),
        ]
    }

    fn validate(&self) -> Result<(), AppError> {
        for (key, value) in self.colors() {
            if !is_hex_color(value) {
                return Err(AppError::UpstreamSchemaViolation(format!(
                    "{key} is not a hex color: {value:?}"
                )));
            }
        }
        for (i, value) in self.ball_color_palette.iter().enumerate() {
            if !is_hex_color(value) {
                return Err(AppError::UpstreamSchemaViolation(format!(
                    "{BALL_PALETTE_KEY}[{i}] is not a hex color: {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// `responseSchema` for the structured-output request.
pub fn response_schema() -> Value {
    let mut properties = Map::new();
    for key in COLOR_KEYS {
        properties.insert(
            key.to_string(),
            json!({ "type": "STRING", "description": HEX_COLOR_FORMAT }),
        );
    }
    properties.insert(
        BALL_PALETTE_KEY.to_string(),
        json!({
            "type": "ARRAY",
            "items": { "type": "STRING", "description": HEX_COLOR_FORMAT },
            "minItems": BALL_PALETTE_LEN,
            "maxItems": BALL_PALETTE_LEN
        }),
    );

    let ordering: Vec<&str> = COLOR_KEYS
        .iter()
        .copied()
        .chain(std::iter::once(BALL_PALETTE_KEY))
        .collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": ordering,
        "propertyOrdering": ordering
    })
}

/// Typed decode of the model's reply. Anything that is not a complete,
/// well-formed palette is an `UpstreamSchemaViolation`.
pub fn decode_palette(text: &str) -> Result<ThemePalette, AppError> {
    let palette: ThemePalette = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| AppError::UpstreamSchemaViolation(e.to_string()))?;
    palette.validate()?;
    Ok(palette)
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .filter(|hex| matches!(hex.len(), 3 | 4 | 6 | 8))
        .is_some_and(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// A complete palette as the model would return it.
    pub fn sample_palette_json() -> Value {
        let mut map = Map::new();
        for (i, key) in COLOR_KEYS.iter().enumerate() {
            map.insert(key.to_string(), json!(format!("#{:06x}", i * 0x0a0b0c)));
        }
        map.insert(
            BALL_PALETTE_KEY.to_string(),
            json!(["#ff6b6b", "#feca57", "#48dbfb", "#1dd1a1", "#5f27cd"]),
        );
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_palette_json;
    use super::*;

    #[test]
    fn test_struct_keys_match_schema_keys() {
        let palette = decode_palette(&sample_palette_json().to_string()).unwrap();
        let keys: Vec<&str> = palette.colors().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, COLOR_KEYS);

        let serialized = serde_json::to_value(&palette).unwrap();
        let object = serialized.as_object().unwrap();
        assert_eq!(object.len(), COLOR_KEYS.len() + 1);
        assert!(COLOR_KEYS.iter().all(|k| object.contains_key(*k)));
    }

    #[test]
    fn test_decode_round_trips_parsed_object() {
        let source = sample_palette_json();
        let palette = decode_palette(&source.to_string()).unwrap();
        assert_eq!(serde_json::to_value(&palette).unwrap(), source);
    }

    #[test]
    fn test_decode_accepts_fenced_json() {
        let fenced = format!("```json\n{}\n```", sample_palette_json());
        assert!(decode_palette(&fenced).is_ok());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_palette("Here is a lovely palette!").unwrap_err();
        assert!(matches!(err, AppError::UpstreamSchemaViolation(_)));
    }

    #[test]
    fn test_decode_rejects_missing_key() {
        let mut value = sample_palette_json();
        value.as_object_mut().unwrap().remove("linkHover");
        let err = decode_palette(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("linkHover"));
    }

    #[test]
    fn test_decode_rejects_wrong_palette_length() {
        let mut value = sample_palette_json();
        value[BALL_PALETTE_KEY] = json!(["#000", "#111", "#222", "#333"]);
        assert!(matches!(
            decode_palette(&value.to_string()),
            Err(AppError::UpstreamSchemaViolation(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_hex_value() {
        let mut value = sample_palette_json();
        value["accent"] = json!("teal");
        let err = decode_palette(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("accent"));
    }

    #[test]
    fn test_decode_accepts_alpha_hex() {
        let mut value = sample_palette_json();
        value["shadow"] = json!("#0000001a");
        value[BALL_PALETTE_KEY][0] = json!("#f00c");
        let palette = decode_palette(&value.to_string()).unwrap();
        assert_eq!(palette.shadow, "#0000001a");
        assert_eq!(palette.ball_color_palette[0], "#f00c");
    }

    #[test]
    fn test_hex_color_forms() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#1A2b3C"));
        assert!(is_hex_color("#ffff"));
        assert!(is_hex_color("#0000001a"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#fffff"));
        assert!(!is_hex_color("#0000001a2"));
        assert!(!is_hex_color("#gggggg"));
    }

    #[test]
    fn test_schema_requires_every_key() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 21);
        assert_eq!(schema["properties"][BALL_PALETTE_KEY]["maxItems"], 5);
        assert_eq!(schema["properties"]["navText"]["type"], "STRING");
        assert_eq!(
            schema["properties"]["shadow"]["description"],
            HEX_COLOR_FORMAT
        );
    }
}
