//! Featured places: typed point-of-interest records loaded from a JSON content pack.

pub(crate) mod format;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content pack {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid content pack JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid place '{id}': {reason}")]
    Invalid { id: String, reason: String },
}

pub const DEFAULT_LANG: &str = "en";

/// Text keyed by language code; always carries an `en` entry once validated.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn get(&self, lang: &str) -> &str {
        self.0
            .get(lang)
            .or_else(|| self.0.get(DEFAULT_LANG))
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn has_default(&self) -> bool {
        self.0.contains_key(DEFAULT_LANG)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Poi {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: LocalizedText,
    pub short_description: LocalizedText,
    pub opening_hours: LocalizedText,
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub image_url: Option<String>,
    pub price_from: Option<String>,
    pub booking_url: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Poi {
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.lat, self.lng
        )
    }

    pub fn share_text(&self, lang: &str) -> String {
        format!(
            "Check out {} in {}. \n\n{}",
            self.name.get(lang),
            self.location,
            self.short_description.get(lang)
        )
    }

    /// The image URL, unless it points at a placeholder host.
    pub fn display_image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|raw| {
            Url::parse(raw)
                .ok()
                .and_then(|url| url.host_str().map(|h| !is_placeholder_host(h)))
                .unwrap_or(false)
        })
    }

    fn validate(&self) -> Result<(), ContentError> {
        let invalid = |reason: String| ContentError::Invalid {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".into()));
        }
        for (field, text) in [
            ("name", &self.name),
            ("short_description", &self.short_description),
            ("opening_hours", &self.opening_hours),
        ] {
            if !text.has_default() {
                return Err(invalid(format!("{field} has no '{DEFAULT_LANG}' entry")));
            }
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid(format!("lat {} out of range", self.lat)));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(invalid(format!("lng {} out of range", self.lng)));
        }
        for (field, value) in [
            ("image_url", &self.image_url),
            ("booking_url", &self.booking_url),
            ("website", &self.website),
        ] {
            if let Some(raw) = value
                && !is_web_url(raw)
            {
                return Err(invalid(format!("{field} is not an http(s) URL: {raw}")));
            }
        }
        Ok(())
    }
}

fn is_placeholder_host(host: &str) -> bool {
    host == "example.com" || host.ends_with(".example.com")
}

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[derive(Deserialize)]
struct RawPack {
    #[serde(default)]
    poi_examples: Vec<Poi>,
}

#[derive(Debug, Default)]
pub struct ContentPack {
    places: Vec<Poi>,
}

impl ContentPack {
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let raw: RawPack = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for poi in &raw.poi_examples {
            poi.validate()?;
            if !seen.insert(poi.id.as_str()) {
                return Err(ContentError::Invalid {
                    id: poi.id.clone(),
                    reason: "duplicate id".into(),
                });
            }
        }

        Ok(Self {
            places: raw.poi_examples,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn places(&self) -> &[Poi] {
        &self.places
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const SAMPLE_PACK: &str = r#"{
        "poi_examples": [
            {
                "id": "jardin-majorelle",
                "type": "garden",
                "name": {"en": "Jardin Majorelle", "fr": "Jardin Majorelle"},
                "short_description": {
                    "en": "A cobalt-blue garden created by Jacques Majorelle.",
                    "fr": "Un jardin bleu cobalt."
                },
                "opening_hours": {"en": "8:00 - 18:00"},
                "location": "Rue Yves St Laurent, Marrakech",
                "lat": 31.6417,
                "lng": -8.0035,
                "image_url": "https://images.example.com/majorelle.jpg",
                "price_from": "€15",
                "booking_url": "https://tickets.jardinmajorelle.com",
                "website": "https://www.jardinmajorelle.com",
                "tags": ["garden", "art"]
            },
            {
                "id": "jemaa-el-fna",
                "type": "square",
                "name": {"en": "Jemaa el-Fnaa"},
                "short_description": {"en": "The lively main square of the medina."},
                "opening_hours": {"en": "Open 24 hours"},
                "location": "Medina, Marrakech",
                "lat": 31.6258,
                "lng": -7.9891
            }
        ]
    }"#;

    fn pack_with(poi_overrides: serde_json::Value) -> String {
        let mut poi = serde_json::json!({
            "id": "p1",
            "type": "museum",
            "name": {"en": "Museum"},
            "short_description": {"en": "Desc"},
            "opening_hours": {"en": "9-5"},
            "location": "Somewhere",
            "lat": 10.0,
            "lng": 20.0
        });
        for (k, v) in poi_overrides.as_object().unwrap() {
            poi[k.as_str()] = v.clone();
        }
        serde_json::json!({ "poi_examples": [poi] }).to_string()
    }

    fn invalid_reason(json: &str) -> String {
        match ContentPack::from_json(json) {
            Err(ContentError::Invalid { reason, .. }) => reason,
            other => panic!("expected Invalid, got: {other:?}"),
        }
    }

    #[test]
    fn parses_sample_pack() {
        let pack = ContentPack::from_json(SAMPLE_PACK).unwrap();
        let places = pack.places();

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].kind, "garden");
        assert_eq!(places[0].tags, ["garden", "art"]);
        assert_eq!(places[1].price_from, None);
        assert!(places[1].tags.is_empty());
    }

    #[test]
    fn missing_poi_list_is_empty_pack() {
        let pack = ContentPack::from_json("{}").unwrap();
        assert!(pack.places().is_empty());
    }

    #[test]
    fn localized_text_falls_back_to_english() {
        let pack = ContentPack::from_json(SAMPLE_PACK).unwrap();
        let poi = &pack.places()[0];

        assert_eq!(poi.short_description.get("fr"), "Un jardin bleu cobalt.");
        assert_eq!(poi.opening_hours.get("fr"), "8:00 - 18:00");
        assert_eq!(poi.name.get("de"), "Jardin Majorelle");
    }

    #[test]
    fn directions_url_uses_coordinates() {
        let pack = ContentPack::from_json(SAMPLE_PACK).unwrap();
        assert_eq!(
            pack.places()[1].directions_url(),
            "https://www.google.com/maps/search/?api=1&query=31.6258,-7.9891"
        );
    }

    #[test]
    fn share_text_mentions_name_and_location() {
        let pack = ContentPack::from_json(SAMPLE_PACK).unwrap();
        assert_eq!(
            pack.places()[1].share_text("en"),
            "Check out Jemaa el-Fnaa in Medina, Marrakech. \n\nThe lively main square of the medina."
        );
    }

    #[test]
    fn placeholder_images_are_hidden() {
        let pack = ContentPack::from_json(SAMPLE_PACK).unwrap();
        assert_eq!(pack.places()[0].display_image(), None);

        let json = pack_with(serde_json::json!({"image_url": "https://cdn.visitmorocco.com/a.jpg"}));
        let pack = ContentPack::from_json(&json).unwrap();
        assert_eq!(
            pack.places()[0].display_image(),
            Some("https://cdn.visitmorocco.com/a.jpg")
        );
    }

    #[test]
    fn rejects_missing_english_name() {
        let reason = invalid_reason(&pack_with(serde_json::json!({"name": {"fr": "Musée"}})));
        assert!(reason.contains("name"), "got: {reason}");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(invalid_reason(&pack_with(serde_json::json!({"lat": 91.0}))).contains("lat"));
        assert!(invalid_reason(&pack_with(serde_json::json!({"lng": -180.5}))).contains("lng"));
    }

    #[test]
    fn rejects_non_web_urls() {
        let reason = invalid_reason(&pack_with(
            serde_json::json!({"booking_url": "javascript:alert(1)"}),
        ));
        assert!(reason.contains("booking_url"), "got: {reason}");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let pack: serde_json::Value = serde_json::from_str(&pack_with(serde_json::json!({}))).unwrap();
        let poi = pack["poi_examples"][0].clone();
        let json = serde_json::json!({ "poi_examples": [poi.clone(), poi] }).to_string();

        assert_eq!(invalid_reason(&json), "duplicate id");
    }

    #[test]
    fn rejects_wrong_field_types() {
        let json = pack_with(serde_json::json!({"lat": "north"}));
        assert!(matches!(
            ContentPack::from_json(&json),
            Err(ContentError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_pack_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_PACK.as_bytes()).unwrap();

        let pack = ContentPack::load(file.path()).unwrap();
        assert_eq!(pack.places().len(), 2);
    }

    #[test]
    fn load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = ContentPack::load(&path).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
