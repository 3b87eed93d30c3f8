use rmcp::ErrorData as McpError;

use crate::gemini::GeminiError;

pub(super) fn gemini_to_mcp_error(e: GeminiError) -> McpError {
    match &e {
        GeminiError::ApiKeyNotSet => McpError::invalid_params(e.to_string(), None),
        GeminiError::Unauthorized { .. } => McpError::invalid_params(
            format!("{e} — check that GEMINI_API_KEY is valid at https://aistudio.google.com"),
            None,
        ),
        GeminiError::RateLimited => {
            McpError::internal_error(format!("{e} (retriable)"), None)
        }
        _ => McpError::internal_error(e.to_string(), None),
    }
}

pub(super) fn places_unavailable() -> McpError {
    McpError::invalid_params(
        "no content pack loaded; start with --content or set DIGITRAVEL_CONTENT",
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_invalid_params() {
        let err = gemini_to_mcp_error(GeminiError::ApiKeyNotSet);
        assert_eq!(err.code, rmcp::model::ErrorCode(-32602));
        assert!(err.message.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn unauthorized_hints_api_key() {
        let err = gemini_to_mcp_error(GeminiError::Unauthorized {
            code: 403,
            message: "Permission denied".into(),
        });
        assert_eq!(err.code, rmcp::model::ErrorCode(-32602));
        assert!(err.message.contains("GEMINI_API_KEY is valid"), "got: {}", err.message);
    }

    #[test]
    fn rate_limited_is_retriable() {
        let err = gemini_to_mcp_error(GeminiError::RateLimited);
        assert!(err.message.contains("retriable"));
    }

    #[test]
    fn server_error_is_internal() {
        let err = gemini_to_mcp_error(GeminiError::Api {
            code: 500,
            message: "boom".into(),
        });
        assert_eq!(err.code, rmcp::model::ErrorCode(-32603));
    }
}
