pub mod geometry;
pub mod layout;
pub mod lexer;
pub mod log;
pub mod measure;
pub mod metrics;
pub mod parser;
pub mod scale;
pub mod svg;
pub mod tree;

use wasm_bindgen::prelude::*;

use layout::{LayoutError, LayoutMode, Projection, Scaling, assign_coordinates};
use metrics::compute_metrics;
use parser::{ParseError, parse};
use scale::{ScaleCalculator, ScaleConfig};
use svg::{RenderFeatures, SvgRenderer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Everything needed to turn a Newick string into an SVG document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub mode: LayoutMode,
    pub width: f64,
    pub height: f64,
    pub features: RenderFeatures,
    pub scale: ScaleConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            width: 800.0,
            height: 600.0,
            features: RenderFeatures::default(),
            scale: ScaleConfig::default(),
        }
    }
}

/// Parse, measure, scale, lay out and render in one go.
pub fn render_newick(source: &str, options: &RenderOptions) -> Result<String, Error> {
    let tree = parse(source)?;
    let metrics = compute_metrics(&tree);
    let scale = ScaleCalculator::new(options.scale).compute(&metrics, options.width, options.height);
    let layout = assign_coordinates(&tree, options.mode, scale.axis(options.mode.projection))?;

    let renderer = SvgRenderer {
        text: options.scale.text,
        ..SvgRenderer::default()
    };
    Ok(renderer.render_with(&tree, &layout, &scale, options.features))
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render a Newick tree to SVG
#[wasm_bindgen(js_name = "newickToSvg")]
pub fn render_newick_js(
    source: &str,
    width: f64,
    height: f64,
    layout: Option<String>,
    scaling: Option<String>,
) -> Result<String, String> {
    let projection = match layout.as_deref() {
        Some(s) => Projection::from_str(s).ok_or_else(|| format!("Invalid layout: {s}"))?,
        None => Projection::Rectangular,
    };
    let scaling = match scaling.as_deref() {
        Some(s) => Scaling::from_str(s).ok_or_else(|| format!("Invalid scaling: {s}"))?,
        None => Scaling::LengthScaled,
    };

    let options = RenderOptions {
        mode: LayoutMode::new(projection, scaling),
        width,
        height,
        ..RenderOptions::default()
    };
    render_newick(source, &options).map_err(|e| e.to_string())
}
