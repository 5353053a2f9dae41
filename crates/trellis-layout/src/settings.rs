//! Document-level layout settings.
//!
//! These are the few facts about the document and the device that layout
//! consults directly: compatibility mode, whether we are printing, the
//! viewport, and whether the view is paginated.

use serde::{Deserialize, Serialize};
use trellis_style::WritingMode;

/// Scrollbar thickness used when a scene does not specify one.
pub const DEFAULT_SCROLLBAR_THICKNESS: f32 = 15.0;

/// Size of the viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width including any scrollbar.
    pub width: f32,
    /// Height including any scrollbar.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// [Quirks Mode Standard](https://quirks.spec.whatwg.org/) and device settings
/// for one layout.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// [§ 3.5 The percentage height calculation quirk](https://quirks.spec.whatwg.org/#the-percentage-height-calculation-quirk)
    /// and [§ 3.6 The html element fills the viewport quirk](https://quirks.spec.whatwg.org/#the-html-element-fills-the-viewport-quirk)
    pub quirks_mode: bool,
    /// Laying out for print.
    pub printing: bool,
    /// The initial containing block's size.
    pub viewport: Viewport,
    /// Thickness of the viewport's scrollbars, subtracted when fixed-position
    /// boxes anchor to the visible viewport.
    pub viewport_scrollbar_thickness: f32,
    /// The viewport shows a vertical scrollbar.
    pub viewport_has_vertical_scrollbar: bool,
    /// The viewport shows a horizontal scrollbar.
    pub viewport_has_horizontal_scrollbar: bool,
    /// Page height of a paginated view. `None` means continuous media.
    pub page_logical_height: Option<f32>,
    /// Writing mode of the view box.
    pub writing_mode: WritingMode,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            quirks_mode: false,
            printing: false,
            viewport: Viewport::default(),
            viewport_scrollbar_thickness: DEFAULT_SCROLLBAR_THICKNESS,
            viewport_has_vertical_scrollbar: false,
            viewport_has_horizontal_scrollbar: false,
            page_logical_height: None,
            writing_mode: WritingMode::HorizontalTb,
        }
    }
}

impl DocumentSettings {
    /// The view is split into pages.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.page_logical_height.is_some()
    }

    /// Viewport size with visible scrollbars removed, `(width, height)`.
    #[must_use]
    pub fn visible_viewport_size(&self) -> (f32, f32) {
        let mut width = self.viewport.width;
        let mut height = self.viewport.height;
        if self.viewport_has_vertical_scrollbar {
            width -= self.viewport_scrollbar_thickness;
        }
        if self.viewport_has_horizontal_scrollbar {
            height -= self.viewport_scrollbar_thickness;
        }
        (width.max(0.0), height.max(0.0))
    }

    /// Viewport extent along the view's block axis.
    #[must_use]
    pub const fn viewport_logical_height(&self) -> f32 {
        if self.writing_mode.is_horizontal() {
            self.viewport.height
        } else {
            self.viewport.width
        }
    }

    /// Viewport extent along the view's inline axis.
    #[must_use]
    pub const fn viewport_logical_width(&self) -> f32 {
        if self.writing_mode.is_horizontal() {
            self.viewport.width
        } else {
            self.viewport.height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_viewport_subtracts_scrollbars() {
        let settings = DocumentSettings {
            viewport_has_vertical_scrollbar: true,
            ..DocumentSettings::default()
        };
        assert_eq!(settings.visible_viewport_size(), (785.0, 600.0));
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: DocumentSettings =
            serde_json::from_str(r#"{"quirks_mode": true, "page_logical_height": 500}"#)
                .unwrap();
        assert!(settings.quirks_mode);
        assert!(settings.is_paginated());
        assert_eq!(settings.viewport, Viewport::default());
    }
}
