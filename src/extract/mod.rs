//! Entity extraction — people and places mentioned in an entry.
//!
//! Extraction is a best-effort collaborator: an empty result is a full
//! answer, and a failure must never stop an entry from being saved.
//! `extract_best_effort` absorbs errors and returns `None` instead.
//!
//! The HTTP extractor is behind the `entity-extract` feature flag.  It
//! POSTs `{"text": ...}` to a configured endpoint and expects
//! `{"people": [...], "places": [...]}` back.

use tracing::{debug, warn};

use crate::errors::Result;
use crate::journal::Entities;

/// Something that can pull people and places out of free text.
pub trait EntityExtractor {
    fn extract(&self, text: &str) -> Result<Entities>;
}

/// Run `extractor`, turning any failure into `None`.
///
/// Returns `Some` with possibly-empty lists on success.
pub fn extract_best_effort(extractor: &dyn EntityExtractor, text: &str) -> Option<Entities> {
    match extractor.extract(text) {
        Ok(entities) => {
            debug!(
                people = entities.people.len(),
                places = entities.places.len(),
                "extracted entities"
            );
            Some(entities)
        }
        Err(e) => {
            warn!(error = %e, "entity extraction failed, saving entry without entities");
            None
        }
    }
}

/// Pick the extractor for this build and configuration.
///
/// `None` means extraction is skipped and entries are saved without
/// an `entities` field.
pub fn from_settings(extractor_url: Option<&str>) -> Option<Box<dyn EntityExtractor>> {
    match extractor_url {
        #[cfg(feature = "entity-extract")]
        Some(url) => Some(Box::new(HttpExtractor::new(url))),
        #[cfg(not(feature = "entity-extract"))]
        Some(_) => {
            warn!("extractor_url is set but this build lacks the `entity-extract` feature");
            None
        }
        None => None,
    }
}

#[cfg(feature = "entity-extract")]
pub use http::HttpExtractor;

#[cfg(feature = "entity-extract")]
mod http {
    use serde::{Deserialize, Serialize};

    use super::EntityExtractor;
    use crate::errors::{QuillError, Result};
    use crate::journal::Entities;

    #[derive(Serialize)]
    struct ExtractRequest<'a> {
        text: &'a str,
    }

    /// Missing lists count as empty.
    #[derive(Deserialize)]
    struct ExtractResponse {
        #[serde(default)]
        people: Vec<String>,
        #[serde(default)]
        places: Vec<String>,
    }

    /// Calls an HTTP endpoint that does the extraction.
    #[derive(Debug, Clone)]
    pub struct HttpExtractor {
        url: String,
    }

    impl HttpExtractor {
        pub fn new(url: &str) -> Self {
            Self {
                url: url.to_string(),
            }
        }
    }

    impl EntityExtractor for HttpExtractor {
        fn extract(&self, text: &str) -> Result<Entities> {
            let mut resp = ureq::post(&self.url)
                .header("User-Agent", &format!("quill/{}", env!("CARGO_PKG_VERSION")))
                .send_json(ExtractRequest { text })
                .map_err(|e| QuillError::ExtractionFailed(format!("request: {e}")))?;

            let body: ExtractResponse = resp
                .body_mut()
                .read_json()
                .map_err(|e| QuillError::ExtractionFailed(format!("response: {e}")))?;

            Ok(Entities {
                people: body.people,
                places: body.places,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QuillError;

    struct Failing;

    impl EntityExtractor for Failing {
        fn extract(&self, _text: &str) -> Result<Entities> {
            Err(QuillError::ExtractionFailed("service unavailable".into()))
        }
    }

    struct Fixed;

    impl EntityExtractor for Fixed {
        fn extract(&self, _text: &str) -> Result<Entities> {
            Ok(Entities {
                people: vec!["Sister".into()],
                places: vec!["Lisbon".into()],
            })
        }
    }

    #[test]
    fn failure_is_absorbed() {
        assert!(extract_best_effort(&Failing, "Dinner with my sister").is_none());
    }

    #[test]
    fn success_is_passed_through() {
        let entities = extract_best_effort(&Fixed, "Dinner with my sister in Lisbon").unwrap();
        assert_eq!(entities.people, vec!["Sister"]);
        assert_eq!(entities.places, vec!["Lisbon"]);
    }

    #[test]
    fn unconfigured_settings_skip_extraction() {
        assert!(from_settings(None).is_none());
    }

    #[cfg(not(feature = "entity-extract"))]
    #[test]
    fn url_without_feature_skips_extraction() {
        assert!(from_settings(Some("http://localhost:9/extract")).is_none());
    }
}
