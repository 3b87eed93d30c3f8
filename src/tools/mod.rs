mod errors;
mod params;

pub use params::{AskParams, PlacesParams};

use std::sync::Arc;

use reqwest::Client;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use errors::{gemini_to_mcp_error, places_unavailable};

use crate::gemini::{GeminiClient, GeminiError, GuideClient};
use crate::markdown::format_answer;
use crate::places::format::format_places;
use crate::places::{ContentPack, DEFAULT_LANG};

/// MCP server handler providing the travel guide and featured places tools.
///
/// Configuration via environment variables:
/// - `GEMINI_API_KEY`: enables the `ask_guide` tool (optional)
/// - `DIGITRAVEL_CONTENT`: content pack for `featured_places` (optional)
#[derive(Clone)]
pub struct DigiTravel {
    gemini: Option<GeminiClient>,
    places: Option<Arc<ContentPack>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DigiTravel {
    pub fn new(http: Client, places: Option<ContentPack>) -> Self {
        let gemini = GeminiClient::from_env(http)
            .inspect_err(|e| warn!("Gemini client not available: {e}"))
            .ok();
        Self {
            gemini,
            places: places.map(Arc::new),
            tool_router: Self::tool_router(),
        }
    }

    fn gemini(&self) -> Result<&GeminiClient, McpError> {
        self.gemini
            .as_ref()
            .ok_or_else(|| gemini_to_mcp_error(GeminiError::ApiKeyNotSet))
    }

    #[tool(
        name = "ask_guide",
        description = "Ask the DigiTravel guide a travel question. Answers use live Google Search results (prices, opening hours, weather, events, travel advisories) and list the cited sources."
    )]
    async fn ask_guide(
        &self,
        Parameters(params): Parameters<AskParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.question.trim().is_empty() {
            return Err(McpError::invalid_params("question must not be empty", None));
        }

        info!(question = %params.question, "tool:ask_guide");

        let response = self
            .gemini()?
            .query(&params.question)
            .await
            .map_err(gemini_to_mcp_error)?;

        info!(sources = response.sources.len(), "ask_guide complete");
        Ok(CallToolResult::success(vec![Content::text(format_answer(
            &response,
        ))]))
    }

    #[tool(
        name = "featured_places",
        description = "List the featured destinations from the loaded content pack with opening hours, ticket prices, booking links and map directions."
    )]
    async fn featured_places(
        &self,
        Parameters(params): Parameters<PlacesParams>,
    ) -> Result<CallToolResult, McpError> {
        let pack = self.places.as_ref().ok_or_else(places_unavailable)?;
        let lang = params.lang.as_deref().unwrap_or(DEFAULT_LANG);

        info!(lang, places = pack.places().len(), "tool:featured_places");

        Ok(CallToolResult::success(vec![Content::text(format_places(
            pack.places(),
            lang,
        ))]))
    }
}

#[tool_handler]
impl ServerHandler for DigiTravel {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "digitravel".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "DigiTravel is a real-time global travel guide: ask_guide answers travel questions with Google Search grounding and cited sources; featured_places lists curated destinations."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
