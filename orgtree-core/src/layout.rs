//! Layout parameters and canvas sizing for the rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::graph::{HierarchyGraph, measure};

/// Smallest canvas edge, in pixels.
pub const MIN_CANVAS_EDGE: f64 = 3000.0;

/// Spacing and node-size parameters.
///
/// The defaults are fixed values rather than [`LayoutSettings::from_sliders`]
/// applied to the default slider position; the first slider change snaps the
/// spacings onto the derived scale.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Node size slider value.
    pub node_size: f64,
    /// Spacing slider position.
    pub spacing_slider: f64,
    /// Horizontal distance between sibling nodes.
    pub horizontal_spacing: f64,
    /// Vertical distance between levels.
    pub vertical_spacing: f64,
    /// Length of connector elbows.
    pub elbow_length: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            node_size: 150.0,
            spacing_slider: 100.0,
            horizontal_spacing: 300.0,
            vertical_spacing: 200.0,
            elbow_length: 80.0,
        }
    }
}

impl LayoutSettings {
    /// Derives every spacing from the two slider values.
    ///
    /// # Examples
    /// ```
    /// use orgtree_core::LayoutSettings;
    ///
    /// let layout = LayoutSettings::from_sliders(150.0, 40.0);
    /// assert_eq!(layout.horizontal_spacing, 250.0);
    /// assert_eq!(layout.vertical_spacing, 168.0);
    /// assert_eq!(layout.elbow_length, 92.0);
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "spacing is a linear function of the slider")]
    pub fn from_sliders(node_size: f64, spacing_slider: f64) -> Self {
        Self {
            node_size,
            spacing_slider,
            horizontal_spacing: 150.0 + spacing_slider * 2.5,
            vertical_spacing: 120.0 + spacing_slider * 1.2,
            elbow_length: 60.0 + spacing_slider * 0.8,
        }
    }
}

/// A manual node position.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CanvasSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Sizes the canvas to fit the hierarchy, never below [`MIN_CANVAS_EDGE`].
///
/// Width is breadth times horizontal spacing, height is depth times vertical
/// spacing.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "level counts are far below f64's exact integer range"
)]
pub fn canvas_size(graph: &HierarchyGraph, layout: &LayoutSettings) -> CanvasSize {
    let metrics = measure(graph);
    CanvasSize {
        width: MIN_CANVAS_EDGE.max(metrics.breadth as f64 * layout.horizontal_spacing),
        height: MIN_CANVAS_EDGE.max(metrics.depth as f64 * layout.vertical_spacing),
    }
}
