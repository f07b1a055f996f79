//! Tunables for the gallery.
//!
//! Plain structs with `Default`; hosts override fields they care about.

use crate::easing::CubicBezier;

/// Grid geometry and infinite-scroll growth.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal padding on each side of the grid, logical px.
    pub padding: f32,
    /// Gap between columns and between rows, logical px.
    pub gap: f32,
    /// Column count when the grid descriptor does not declare one.
    pub columns: u32,
    /// Sections laid out after content changes.
    pub initial_sections: u32,
    /// Sections added each time scrolling nears the end.
    pub section_growth: u32,
    pub max_sections: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 48.0,
            gap: 24.0,
            columns: 12,
            initial_sections: 3,
            section_growth: 2,
            max_sections: 64,
        }
    }
}

/// Camera moves and selection dimming.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomConfig {
    /// Fraction of the viewport a centered card may occupy.
    pub center_fill: f32,
    pub max_center_zoom: f32,
    /// Over-scan applied to the cover zoom so no edge gap shows.
    pub cover_overscan: f32,
    pub center_duration_ms: f64,
    pub cover_duration_ms: f64,
    pub zoom_out_duration_ms: f64,
    pub easing: CubicBezier,
    /// Cover-tween progress at which the detail overlay is shown.
    pub overlay_reveal_at: f32,
    /// Opacity of non-selected cards while a selection is held.
    pub dim_opacity: f32,
    /// Per-frame smoothing of card opacity.
    pub opacity_easing: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            center_fill: 0.82,
            max_center_zoom: 4.0,
            cover_overscan: 1.02,
            center_duration_ms: 850.0,
            cover_duration_ms: 900.0,
            zoom_out_duration_ms: 700.0,
            easing: CubicBezier::EASE_IN_OUT,
            overlay_reveal_at: 0.55,
            dim_opacity: 0.12,
            opacity_easing: 0.12,
        }
    }
}

/// Hover-warp animation.
#[derive(Debug, Clone, PartialEq)]
pub struct DistortionConfig {
    /// Intensity per logical px of pointer travel between move events.
    pub speed_px_gain: f32,
    /// Intensity per uv unit of pointer travel between move events.
    pub speed_uv_gain: f32,
    /// Intensity a hovered card rests at when the pointer is still.
    pub idle_floor: f32,
    pub max_intensity: f32,
    /// Weight of a new pick uv when pulling the warp center toward it.
    pub hover_blend: f32,
    /// Time without pointer movement after which intensity drops to `idle_floor`.
    pub idle_reset_ms: f64,
    /// Pull target held while hovered.
    pub hover_pull: f32,
    /// Per-frame multiplier on target intensity once unhovered.
    pub decay: f32,
    /// Per-frame multiplier on target pull once unhovered.
    pub pull_decay: f32,
    /// Per-frame smoothing of current values toward targets.
    pub easing: f32,
    /// Per-frame smoothing of shader uniforms toward current values.
    pub uniform_lerp: f32,
    /// Warp radius in card uv.
    pub radius: f32,
    pub strength: f32,
    pub edge_mix: f32,
    /// Magnitudes below this snap to zero.
    pub snap_epsilon: f32,
}

impl Default for DistortionConfig {
    fn default() -> Self {
        Self {
            speed_px_gain: 0.012,
            speed_uv_gain: 6.0,
            idle_floor: 0.08,
            max_intensity: 1.0,
            hover_blend: 0.45,
            idle_reset_ms: 100.0,
            hover_pull: 0.85,
            decay: 0.9,
            pull_decay: 0.72,
            easing: 0.06,
            uniform_lerp: 0.35,
            radius: 0.35,
            strength: 0.18,
            edge_mix: 0.65,
            snap_epsilon: 1e-3,
        }
    }
}

/// Top-level gallery configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub layout: LayoutConfig,
    pub zoom: ZoomConfig,
    pub distortion: DistortionConfig,
    /// Pointer or scroll travel (logical px) at which a press stops being a tap.
    pub tap_threshold_px: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            zoom: ZoomConfig::default(),
            distortion: DistortionConfig::default(),
            tap_threshold_px: 16.0,
        }
    }
}
