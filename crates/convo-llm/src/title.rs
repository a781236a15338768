use crate::error::{GenerationError, Result};

/// Normalize a raw title returned by the service.
///
/// Takes the first non-empty line, drops a leading `Title:` label and
/// surrounding quotes or backticks.
pub fn sanitize_title(raw: &str) -> Result<String> {
    let mut line = raw
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| GenerationError::InvalidResponse("empty title".to_string()))?
        .trim()
        .to_string();

    for prefix in ["title:", "Title:"] {
        if let Some(rest) = line.strip_prefix(prefix) {
            line = rest.trim().to_string();
            break;
        }
    }

    let trimmed = line
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string();

    if trimmed.is_empty() {
        Err(GenerationError::InvalidResponse(
            "title is empty after sanitization".to_string(),
        ))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title() {
        assert_eq!(sanitize_title("Greeting").unwrap(), "Greeting");
    }

    #[test]
    fn test_strips_label_and_quotes() {
        assert_eq!(sanitize_title("\n  Title: \"Trip planning\"\nextra").unwrap(), "Trip planning");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert!(matches!(sanitize_title("  \n\n"), Err(GenerationError::InvalidResponse(_))));
        assert!(sanitize_title("\"\"").is_err());
    }
}
