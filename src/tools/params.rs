use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Deserialize, JsonSchema)]
pub struct AskParams {
    /// Travel question, e.g. "Best time to visit Kyoto" or "Louvre opening hours today"
    pub question: String,
}

#[derive(Deserialize, JsonSchema)]
pub struct PlacesParams {
    /// Language code for localized text (e.g. "en", "fr"); falls back to "en"
    pub lang: Option<String>,
}
