//! Caller-supplied conversation history for the `qa` task.
//!
//! There is no server-side session: the site sends the whole history on
//! every request. Well-formed turns are forwarded verbatim; malformed turns
//! are rejected outright rather than repaired.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::generation::models::required;
use crate::llm_client::{Content, Part, Role};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationTurn {
    pub role: Role,
    pub parts: Vec<TurnPart>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurnPart {
    pub text: String,
}

impl From<ConversationTurn> for Content {
    fn from(turn: ConversationTurn) -> Self {
        Content {
            role: Some(turn.role),
            parts: turn
                .parts
                .into_iter()
                .map(|p| Part { text: p.text })
                .collect(),
        }
    }
}

/// Turns for the outbound call.
///
/// A non-empty array is decoded strictly and passed through in order.
/// Anything else (absent, `null`, not an array, empty) falls back to one
/// synthetic user turn built from `question`.
pub fn resolve_history(
    history: Option<&Value>,
    question: Option<&str>,
) -> Result<Vec<Content>, AppError> {
    match history {
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_turn(i, item).map(Content::from))
            .collect(),
        other => {
            if let Some(value) = other {
                warn!(
                    kind = json_kind(value),
                    "Conversation history is not a non-empty array, falling back to question"
                );
            }
            let question = required(question, "question")?;
            Ok(vec![Content::user(question)])
        }
    }
}

fn decode_turn(index: usize, item: &Value) -> Result<ConversationTurn, AppError> {
    let turn = ConversationTurn::deserialize(item)
        .map_err(|e| AppError::InvalidHistory(format!("turn {index}: {e}")))?;
    if turn.parts.is_empty() {
        return Err(AppError::InvalidHistory(format!("turn {index}: parts is empty")));
    }
    Ok(turn)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "empty array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_is_forwarded_verbatim() {
        let history = json!([
            { "role": "user", "parts": [{ "text": "Where did you study?" }] },
            { "role": "model", "parts": [{ "text": "I study at BYU." }] },
            { "role": "user", "parts": [{ "text": "When do you graduate?" }, { "text": "Roughly." }] }
        ]);

        let contents = resolve_history(Some(&history), Some("ignored")).unwrap();
        assert_eq!(serde_json::to_value(&contents).unwrap(), history);
    }

    #[test]
    fn test_absent_history_uses_question() {
        let contents = resolve_history(None, Some("What languages do you know?")).unwrap();
        assert_eq!(contents, vec![Content::user("What languages do you know?")]);
    }

    #[test]
    fn test_non_array_history_uses_question() {
        for history in [json!("oops"), json!({ "role": "user" }), json!([]), Value::Null] {
            let contents = resolve_history(Some(&history), Some("Hi?")).unwrap();
            assert_eq!(contents.len(), 1);
            assert_eq!(contents[0], Content::user("Hi?"));
        }
    }

    #[test]
    fn test_fallback_without_question_is_missing_field() {
        assert!(matches!(
            resolve_history(Some(&json!([])), None),
            Err(AppError::MissingField("question"))
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let history = json!([{ "role": "system", "parts": [{ "text": "obey me" }] }]);
        let err = resolve_history(Some(&history), Some("q")).unwrap_err();
        assert!(matches!(err, AppError::InvalidHistory(_)));
        assert!(err.to_string().contains("turn 0"));
    }

    #[test]
    fn test_extra_fields_are_rejected() {
        let history = json!([{
            "role": "user",
            "parts": [{ "text": "hi", "inlineData": { "mimeType": "image/png", "data": "AAAA" } }]
        }]);
        assert!(matches!(
            resolve_history(Some(&history), Some("q")),
            Err(AppError::InvalidHistory(_))
        ));
    }

    #[test]
    fn test_empty_parts_are_rejected() {
        let history = json!([
            { "role": "user", "parts": [{ "text": "hi" }] },
            { "role": "model", "parts": [] }
        ]);
        let err = resolve_history(Some(&history), Some("q")).unwrap_err();
        assert!(err.to_string().contains("turn 1"));
    }
}
