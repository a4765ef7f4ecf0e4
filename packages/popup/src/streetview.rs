//! Street-view thumbnail linking to the panorama viewer.

use serde::{Deserialize, Serialize};

use crate::fragment::Element;

/// Narrowest field of view the thumbnail is requested with.
pub const MIN_FOV: u32 = 120;

/// Thumbnail size in pixels.
pub const THUMBNAIL_WIDTH: u32 = 300;
pub const THUMBNAIL_HEIGHT: u32 = 200;

const PANORAMA_URL: &str = "https://www.google.com/maps/@?api=1&map_action=pano";
const THUMBNAIL_URL: &str = "https://maps.googleapis.com/maps/api/streetview";

/// Camera settings for the street-view block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetViewOptions {
    /// Field of view in degrees; never below [`MIN_FOV`].
    pub fov: u32,
    /// Camera pitch in degrees; negative looks down.
    pub pitch: i32,
    /// Compass heading, or `None` to let the viewer pick.
    pub heading: Option<f64>,
    /// Static API key appended to the thumbnail request.
    pub api_key: Option<String>,
}

impl Default for StreetViewOptions {
    fn default() -> Self {
        Self {
            fov: MIN_FOV,
            pitch: -15,
            heading: None,
            api_key: None,
        }
    }
}

impl StreetViewOptions {
    /// Field of view actually requested, floored at [`MIN_FOV`].
    #[must_use]
    pub fn effective_fov(&self) -> u32 {
        self.fov.max(MIN_FOV)
    }

    fn camera_query(&self) -> String {
        let mut query = format!("&fov={}&pitch={}", self.effective_fov(), self.pitch);
        if let Some(heading) = self.heading {
            query.push_str(&format!("&heading={heading}"));
        }
        query
    }

    /// Link to the interactive panorama at `latitude`, `longitude`.
    #[must_use]
    pub fn panorama_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{PANORAMA_URL}&viewpoint={latitude},{longitude}{}",
            self.camera_query()
        )
    }

    /// Static thumbnail image URL for `latitude`, `longitude`.
    #[must_use]
    pub fn thumbnail_url(&self, latitude: f64, longitude: f64) -> String {
        let mut url = format!(
            "{THUMBNAIL_URL}?size={THUMBNAIL_WIDTH}x{THUMBNAIL_HEIGHT}&location={latitude},{longitude}{}",
            self.camera_query()
        );
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            url.push_str("&key=");
            url.push_str(key);
        }
        url
    }
}

/// A clickable thumbnail that opens the panorama in a new tab.
#[must_use]
pub fn street_view(latitude: f64, longitude: f64, options: &StreetViewOptions) -> Element {
    Element::new("a")
        .attr("href", options.panorama_url(latitude, longitude))
        .attr("target", "_blank")
        .attr("rel", "noopener")
        .child(
            Element::new("img")
                .attr("src", options.thumbnail_url(latitude, longitude))
                .attr("title", "Street view")
                .attr("width", THUMBNAIL_WIDTH.to_string())
                .attr("height", THUMBNAIL_HEIGHT.to_string())
                .class("streetview"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls() {
        let options = StreetViewOptions::default();
        assert_eq!(
            options.panorama_url(-41.29, 174.78),
            "https://www.google.com/maps/@?api=1&map_action=pano&viewpoint=-41.29,174.78&fov=120&pitch=-15"
        );
        assert_eq!(
            options.thumbnail_url(-41.29, 174.78),
            "https://maps.googleapis.com/maps/api/streetview?size=300x200&location=-41.29,174.78&fov=120&pitch=-15"
        );
    }

    #[test]
    fn fov_is_floored() {
        let narrow = StreetViewOptions {
            fov: 60,
            ..StreetViewOptions::default()
        };
        assert_eq!(narrow.effective_fov(), 120);

        let wide = StreetViewOptions {
            fov: 150,
            ..StreetViewOptions::default()
        };
        assert_eq!(wide.effective_fov(), 150);
    }

    #[test]
    fn heading_and_key_are_appended() {
        let options = StreetViewOptions {
            heading: Some(90.0),
            api_key: Some("abc".to_string()),
            ..StreetViewOptions::default()
        };
        let url = options.thumbnail_url(-36.85, 174.76);
        assert!(url.ends_with("&fov=120&pitch=-15&heading=90&key=abc"));
        assert!(!options.panorama_url(-36.85, 174.76).contains("key="));
    }

    #[test]
    fn thumbnail_links_to_panorama() {
        let link = street_view(-41.29, 174.78, &StreetViewOptions::default());
        assert_eq!(link.tag(), "a");
        assert_eq!(link.get_attr("target"), Some("_blank"));

        let img = link.child_nodes()[0].as_element().unwrap();
        assert_eq!(img.get_attr("width"), Some("300"));
        assert_eq!(img.get_attr("height"), Some("200"));
        assert!(link.to_string().contains("&amp;fov=120"));
    }
}
