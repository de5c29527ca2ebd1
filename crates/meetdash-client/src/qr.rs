//! QR artifact renderers.
//!
//! Implementations of the core [`ArtifactRenderer`] capability: the engine
//! hands over a URL and gets back an artifact without knowing whether it was
//! rendered as SVG, terminal cells, or passed through as plain text.

use qrcode::QrCode;
use qrcode::render::{svg, unicode};

use meetdash_core::{ArtifactError, ArtifactRenderer, ShareArtifact};

/// Renders a URL as an SVG QR code, suitable for saving or embedding.
#[derive(Debug, Clone)]
pub struct SvgQrRenderer {
    /// Minimum edge length of the rendered image, in pixels.
    pub min_size: u32,
}

impl Default for SvgQrRenderer {
    fn default() -> Self {
        Self { min_size: 240 }
    }
}

impl ArtifactRenderer for SvgQrRenderer {
    fn render(&self, url: &str) -> Result<ShareArtifact, ArtifactError> {
        let code = QrCode::new(url.as_bytes())
            .map_err(|e| ArtifactError(format!("QR encoding failed: {e}")))?;
        let svg = code
            .render::<svg::Color>()
            .min_dimensions(self.min_size, self.min_size)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();
        Ok(ShareArtifact::Svg(svg))
    }
}

/// Renders a URL as a unicode QR grid for direct terminal output.
#[derive(Debug, Clone, Default)]
pub struct TerminalQrRenderer;

impl ArtifactRenderer for TerminalQrRenderer {
    fn render(&self, url: &str) -> Result<ShareArtifact, ArtifactError> {
        let code = QrCode::new(url.as_bytes())
            .map_err(|e| ArtifactError(format!("QR encoding failed: {e}")))?;
        let grid = code
            .render::<unicode::Dense1x2>()
            .quiet_zone(true)
            .build();
        Ok(ShareArtifact::Text(grid))
    }
}

/// Fallback renderer: the plain URL itself.
#[derive(Debug, Clone, Default)]
pub struct PlainUrlRenderer;

impl ArtifactRenderer for PlainUrlRenderer {
    fn render(&self, url: &str) -> Result<ShareArtifact, ArtifactError> {
        Ok(ShareArtifact::Url(url.to_string()))
    }
}
