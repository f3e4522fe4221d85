//! Image source resolution and the one-shot load-failure fallback.

use serde::{Deserialize, Serialize};

fn default_static_root() -> String {
    "/static/images".into()
}

fn default_asset() -> String {
    "default.jpg".into()
}

/// Static asset locations for place images.
///
/// The default asset is the terminal fallback and must itself be reliably
/// loadable at the deployed root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    /// Root every relative image path is resolved against.
    #[serde(default = "default_static_root")]
    pub static_root: String,

    /// Filename of the fallback image, relative to `static_root`.
    #[serde(default = "default_asset")]
    pub default_asset: String,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            static_root: default_static_root(),
            default_asset: default_asset(),
        }
    }
}

impl Assets {
    /// Resolved URL of the fallback image.
    #[must_use]
    pub fn default_url(&self) -> String {
        format!(
            "{}/{}",
            self.static_root.trim_end_matches('/'),
            self.default_asset
        )
    }

    /// Resolve a place's raw image field to a loadable source.
    ///
    /// Resolution order: no path (or an empty one) falls back to the
    /// default asset; a path containing a scheme separator is an absolute
    /// URL and passes through verbatim; anything else has its backslashes
    /// normalized to forward slashes and is rooted under `static_root`.
    #[must_use]
    pub fn resolve(&self, source: Option<&str>) -> String {
        match source {
            None | Some("") => self.default_url(),
            Some(raw) if raw.contains("://") => raw.to_string(),
            Some(raw) => {
                let normalized = raw.replace('\\', "/");
                format!("{}/{normalized}", self.static_root.trim_end_matches('/'))
            }
        }
    }
}

/// A resolved image source with its one-shot fallback.
///
/// The fallback is armed at construction and consumed by the first load
/// failure; a second failure finds the slot disarmed and changes nothing,
/// so a broken default asset cannot loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    src: String,
    alt: String,
    fallback: Option<String>,
}

impl ImageSlot {
    /// Resolve a raw image field into a slot with the fallback armed.
    pub fn new(source: Option<&str>, alt: impl Into<String>, assets: &Assets) -> Self {
        Self {
            src: assets.resolve(source),
            alt: alt.into(),
            fallback: Some(assets.default_url()),
        }
    }

    /// The source to load.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Alternative text for the image.
    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }

    /// Whether a load failure would still swap the source.
    #[must_use]
    pub fn fallback_armed(&self) -> bool {
        self.fallback.is_some()
    }

    /// React to a load failure of the current source.
    ///
    /// Swaps to the default asset and disarms itself. Returns `true` when a
    /// swap happened, `false` when the slot was already disarmed.
    pub fn on_load_failure(&mut self) -> bool {
        match self.fallback.take() {
            Some(fallback) => {
                self.src = fallback;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_uses_default() {
        let assets = Assets::default();
        assert_eq!(assets.resolve(None), "/static/images/default.jpg");
        assert_eq!(assets.resolve(Some("")), "/static/images/default.jpg");
    }

    #[test]
    fn test_absolute_url_passes_through_unmodified() {
        let assets = Assets::default();
        let url = "https://images.example.com/photo-1502602898657";
        assert_eq!(assets.resolve(Some(url)), url);
    }

    #[test]
    fn test_relative_path_is_normalized_and_rooted() {
        let assets = Assets::default();
        assert_eq!(
            assets.resolve(Some("paris\\eiffel.jpg")),
            "/static/images/paris/eiffel.jpg"
        );
        assert_eq!(assets.resolve(Some("tokyo.jpg")), "/static/images/tokyo.jpg");
    }

    #[test]
    fn test_custom_root_trailing_slash() {
        let assets = Assets {
            static_root: "/assets/img/".into(),
            default_asset: "fallback.png".into(),
        };
        assert_eq!(assets.resolve(Some("a.jpg")), "/assets/img/a.jpg");
        assert_eq!(assets.default_url(), "/assets/img/fallback.png");
    }

    #[test]
    fn test_fallback_fires_exactly_once() {
        let assets = Assets::default();
        let mut slot = ImageSlot::new(Some("broken.jpg"), "Paris", &assets);
        assert_eq!(slot.src(), "/static/images/broken.jpg");
        assert!(slot.fallback_armed());

        // First failure swaps to the default asset.
        assert!(slot.on_load_failure());
        assert_eq!(slot.src(), "/static/images/default.jpg");
        assert!(!slot.fallback_armed());

        // A failing default asset does not loop.
        assert!(!slot.on_load_failure());
        assert_eq!(slot.src(), "/static/images/default.jpg");
    }

    #[test]
    fn test_fallback_armed_even_when_source_is_default() {
        let assets = Assets::default();
        let mut slot = ImageSlot::new(None, "Place", &assets);
        assert_eq!(slot.src(), "/static/images/default.jpg");

        assert!(slot.on_load_failure());
        assert!(!slot.on_load_failure());
    }
}
