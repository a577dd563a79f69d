use super::LlmResponse;

/// Pull the JSON object out of an oracle answer.
///
/// Accepts a bare object, an object inside a ```json fence, or an object
/// surrounded by prose.
pub fn extract_json_string(text: &str) -> Result<String, String> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    if let Some(fenced) = fenced_block(text) {
        return Ok(fenced);
    }

    let start = text
        .find('{')
        .ok_or_else(|| "No JSON object found in response".to_string())?;
    let end = text
        .rfind('}')
        .ok_or_else(|| "Incomplete JSON object in response".to_string())?;

    if start < end {
        Ok(text[start..=end].to_string())
    } else {
        Err("Invalid JSON boundaries in response".to_string())
    }
}

/// Body of the first ``` fence, skipping an optional language tag
fn fenced_block(text: &str) -> Option<String> {
    let open = text.find("```")? + 3;
    let body_start = open + text[open..].find('\n')? + 1;
    let body_len = text[body_start..].find("```")?;
    Some(text[body_start..body_start + body_len].trim().to_string())
}

fn try_parse<T>(text: &str) -> Result<T, String>
where
    T: LlmResponse,
{
    let json_str = extract_json_string(text)?;

    serde_json::from_str::<T>(&json_str).map_err(|e| {
        format!(
            "Failed to parse JSON: {}. Original: {}",
            e,
            json_str.chars().take(200).collect::<String>()
        )
    })
}

/// Decode an oracle answer, returning `T::default()` marked as fallback when
/// the answer is not a usable JSON object. Never fails.
pub fn parse_with_fallback<T>(text: &str) -> T
where
    T: LlmResponse,
{
    match try_parse::<T>(text) {
        Ok(parsed) => parsed,
        Err(error_msg) => {
            tracing::warn!("Oracle answer parsing failed, using fallback: {}", error_msg);
            let mut fallback = T::default();
            fallback.mark_as_fallback(error_msg);
            fallback
        }
    }
}
