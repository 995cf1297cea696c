//! Utilities for extracting structured data from LLM responses.
//!
//! LLM responses often contain JSON wrapped in markdown code blocks or
//! mixed with explanatory text. This module provides robust extraction
//! utilities that handle common LLM response patterns.

use storyboard_error::StoryboardResult;

/// Extract JSON from a response that may contain markdown or extra text.
///
/// This function tries multiple extraction strategies:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// # Errors
///
/// Returns an error if no valid JSON is found in the response.
///
/// # Examples
///
/// ```
/// use storyboard_session::extract_json;
///
/// let response = "Here are your scenes:\n\
///     \n\
///     ```json\n\
///     [{\"prompt\": \"a red dune\", \"caption\": \"The drive\"}]\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("red dune"));
/// ```
pub fn extract_json(response: &str) -> StoryboardResult<String> {
    // Strategy 1: Extract from markdown code blocks
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    // Strategy 2: balanced structures, preferring whichever opens first
    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
        }
        (Some(_), None) => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
        _ => {
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in LLM response"
    );

    Err(storyboard_error::BackendError::new(format!(
        "No JSON found in response (length: {}). Hint: Ensure your prompt explicitly requests JSON output and includes 'Output ONLY valid JSON'.",
        response.len()
    ))
    .into())
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence found - likely truncated response
        return Some(response[content_start..].trim().to_string());
    }

    // Try without language specifier
    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip to next newline (in case there's a language specifier)
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to
/// the matching `close`, handling nesting correctly.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse and validate JSON, returning a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
///
/// # Examples
///
/// ```
/// use storyboard_session::parse_json;
/// use storyboard_core::Scene;
///
/// let json = r#"[{"prompt": "a red dune", "caption": "The drive"}]"#;
/// let scenes: Vec<Scene> = parse_json(json).unwrap();
/// assert_eq!(scenes.len(), 1);
/// ```
pub fn parse_json<T>(json_str: &str) -> StoryboardResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        storyboard_error::BackendError::new(format!(
            "Failed to parse JSON: {} (JSON: {}...). Hint: Ensure the LLM outputs valid JSON without syntax errors.",
            e, preview
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::Scene;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here are the scenes you requested:

```json
[
  {"prompt": "a rover at dawn", "caption": "The drive begins"}
]
```

Hope this helps!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("a rover at dawn"));
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"
Sure! Here it is: {"prompt": "a dune", "nested": {"value": "test"}}
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_extract_json_array() {
        let response = r#"
Here are the items:
[
  {"prompt": "one", "caption": "1"},
  {"prompt": "two", "caption": "2"}
]
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn test_no_json_found() {
        let response = "This is just plain text with no JSON";
        assert!(extract_json(response).is_err());
    }

    #[test]
    fn test_extract_json_with_string_escapes() {
        let response = r#"{"caption": "She said \"hello\""}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("She said"));
    }

    #[test]
    fn test_extract_json_unclosed_fence() {
        // Truncated response: opening fence, no closing fence
        let response = "```json\n[{\"prompt\": \"p\", \"caption\": \"c\"}]";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_parse_json_into_scenes() {
        let json = r#"[
            {"prompt": "a rover", "caption": "The drive"},
            {"prompt": "an artifact", "caption": "The find"}
        ]"#;
        let scenes: Vec<Scene> = parse_json(json).unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].prompt(), "a rover");
        assert_eq!(scenes[1].caption(), "The find");
    }

    #[test]
    fn test_parse_json_rejects_malformed() {
        let result: StoryboardResult<Vec<Scene>> = parse_json("[{\"prompt\": }");
        assert!(result.is_err());
    }
}
