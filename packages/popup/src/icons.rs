//! Icon `<img>` elements.

use crash_map_decoder_models::{DecoderCategory, DecoderRecord, DecoderSnapshot};
use serde::{Deserialize, Serialize};

use crate::fragment::Element;

/// Where icons live and how big they are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconOptions {
    /// Directory (or URL prefix) relative icon paths are resolved against.
    pub base: String,
    /// Rendered width and height in pixels.
    pub size: u32,
    /// Icon shown when a child was harmed.
    pub child: String,
    /// Directory, under `base`, holding one `{phase}.svg` per moon phase.
    pub moon_dir: String,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            base: "./icons".to_string(),
            size: 30,
            child: "child.svg".to_string(),
            moon_dir: "moon".to_string(),
        }
    }
}

impl IconOptions {
    /// Resolves an icon path against [`Self::base`].
    ///
    /// Absolute paths and URLs are returned unchanged.
    #[must_use]
    pub fn src(&self, icon: &str) -> String {
        if icon.starts_with('/') || icon.contains("://") {
            return icon.to_string();
        }
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            icon.trim_start_matches("./")
        )
    }

    /// An `<img>` for `icon`.
    #[must_use]
    pub fn icon(&self, icon: &str, title: &str, class: &str) -> Element {
        let size = self.size.to_string();
        Element::new("img")
            .attr("src", self.src(icon))
            .attr("title", title)
            .attr("height", size.clone())
            .attr("width", size)
            .class(class)
    }

    /// An `<img>` for a decoder record, or `None` if it has no icon.
    #[must_use]
    pub fn record_icon(&self, record: &DecoderRecord, daylight: bool, class: &str) -> Option<Element> {
        record
            .icon_for(daylight)
            .map(|icon| self.icon(icon, &record.title, class))
    }

    /// Looks `code` up in `category` and renders its icon.
    ///
    /// Missing tables, codes and icons all yield `None`.
    #[must_use]
    pub fn decoded_icon(
        &self,
        decoders: &DecoderSnapshot,
        category: DecoderCategory,
        code: &str,
        daylight: bool,
        class: &str,
    ) -> Option<Element> {
        let record = decoders.lookup(category, code)?;
        self.record_icon(record, daylight, class)
    }
}
