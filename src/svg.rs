use crate::geometry::{Num, edge_paths, label_guides};
use crate::layout::{Layout, Projection, Scaling};
use crate::measure::TextMetrics;
use crate::scale::ScaleParams;
use crate::tree::Tree;
use std::fmt::{self, Write};

/// Height of the scale bar end ticks.
const SCALE_MARK_HEIGHT: f64 = 2.0;

/// Optional decorations, drawn only in length-scaled layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFeatures {
    pub scale_bar: bool,
    pub branch_lengths: bool,
}

impl Default for RenderFeatures {
    fn default() -> Self {
        Self {
            scale_bar: true,
            branch_lengths: true,
        }
    }
}

pub struct SvgRenderer {
    pub stroke_color: String,
    pub stroke_width: f64,
    pub background_color: String,
    pub font_family: String,
    /// Decimal places of branch-length annotations.
    pub length_decimal_places: u32,
    /// Branch length represented by the scale bar.
    pub scale_bar_length: f64,
    /// Sizes length annotations; should match the `TextMetrics` the scale
    /// was computed with.
    pub text: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            stroke_color: "#333639".to_string(),
            stroke_width: 1.0,
            background_color: "#fafafc".to_string(),
            font_family: "sans-serif".to_string(),
            length_decimal_places: 2,
            scale_bar_length: 0.1,
            text: TextMetrics::default(),
        }
    }
}

impl SvgRenderer {
    pub fn render(&self, tree: &Tree, layout: &Layout, scale: &ScaleParams) -> String {
        self.render_with(tree, layout, scale, RenderFeatures::default())
    }

    pub fn render_with(
        &self,
        tree: &Tree,
        layout: &Layout,
        scale: &ScaleParams,
        features: RenderFeatures,
    ) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_document(&mut svg, tree, layout, scale, features);
        svg
    }

    fn write_document(
        &self,
        svg: &mut String,
        tree: &Tree,
        layout: &Layout,
        scale: &ScaleParams,
        features: RenderFeatures,
    ) -> fmt::Result {
        let (w, h) = (Num(scale.width), Num(scale.height));
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;

        writeln!(
            svg,
            r#"<style>
  .tree-link, .radial-link {{ fill: none; stroke: {stroke}; stroke-width: {sw}; }}
  .radial-link-extent {{ fill: none; stroke: {stroke}; stroke-width: {sw}; stroke-opacity: 0.25; }}
  .tree-text {{ font-family: {font}; font-size: {name}px; }}
  .data-len, .scale-bar-text {{ font-family: {font}; font-size: {len}px; }}
  .scale-bar {{ stroke: {stroke}; stroke-width: {sw}; }}
</style>"#,
            stroke = self.stroke_color,
            sw = Num(self.stroke_width),
            font = self.font_family,
            name = Num(scale.name_font_size),
            len = Num(scale.length_font_size),
        )?;

        writeln!(
            svg,
            r#"<rect class="background-rect" width="{w}" height="{h}" fill="{}" />"#,
            self.background_color
        )?;

        let mode = layout.mode();
        match mode.projection {
            Projection::Rectangular => {
                self.write_rectangular(svg, tree, layout, scale)?;
                if features.branch_lengths && mode.scaling == Scaling::LengthScaled {
                    self.write_branch_lengths(svg, tree, layout, scale)?;
                }
            }
            Projection::Radial => self.write_radial(svg, tree, layout, scale)?,
        }

        if features.scale_bar && mode.scaling == Scaling::LengthScaled {
            self.write_scale_bar(svg, mode.projection, scale)?;
        }

        writeln!(svg, "</svg>")
    }

    fn write_rectangular(
        &self,
        svg: &mut String,
        tree: &Tree,
        layout: &Layout,
        scale: &ScaleParams,
    ) -> fmt::Result {
        writeln!(svg, r#"<g class="g-rect-tree">"#)?;

        // Links first so labels sit on top
        for edge in edge_paths(tree, layout) {
            writeln!(svg, r#"<path class="tree-link" d="{}" />"#, edge.path)?;
        }

        for leaf in tree.leaves() {
            let (Some(label), Some((x, y))) = (leaf.label(), layout.cartesian(leaf.id)) else {
                continue;
            };
            writeln!(
                svg,
                r#"<text class="tree-text" x="{}" y="{}" dy=".35em" text-anchor="start">{}</text>"#,
                Num(x + scale.link_text_gap),
                Num(y),
                escape_xml(label)
            )?;
        }

        writeln!(svg, "</g>")
    }

    /// Annotate each branch with its length: centred on the branch when the
    /// text fits, otherwise right-aligned just before the node.
    fn write_branch_lengths(
        &self,
        svg: &mut String,
        tree: &Tree,
        layout: &Layout,
        scale: &ScaleParams,
    ) -> fmt::Result {
        let font = scale.length_font_size;
        let sample = format!("a.{}", "a".repeat(self.length_decimal_places as usize));
        let text_width = self.text.text_width(&sample, font);
        let secondary_scale = scale.rectangular.secondary_scale;

        writeln!(svg, r#"<g class="g-data-len">"#)?;
        // The root edge is never drawn.
        for node in tree.preorder().into_iter().skip(1) {
            let (Some(length), Some((x, y))) = (node.length, layout.cartesian(node.id)) else {
                continue;
            };
            let branch = length * secondary_scale;
            let (tx, anchor) = if branch >= text_width {
                (x - 0.5 * branch, "middle")
            } else {
                (x - 0.35 * font, "end")
            };
            writeln!(
                svg,
                r#"<text class="data-len" x="{}" y="{}" dy="-0.35em" text-anchor="{}">{}</text>"#,
                Num(tx),
                Num(y),
                anchor,
                Num(round_to(length, self.length_decimal_places))
            )?;
        }
        writeln!(svg, "</g>")
    }

    fn write_radial(
        &self,
        svg: &mut String,
        tree: &Tree,
        layout: &Layout,
        scale: &ScaleParams,
    ) -> fmt::Result {
        let alignment = scale.radial.outer_alignment_radius;

        writeln!(
            svg,
            r#"<g class="g-radial-tree" transform="translate({}, {})">"#,
            Num(scale.width / 2.0),
            Num(scale.height / 2.0)
        )?;

        writeln!(svg, r#"<g class="g-radial-link-extent">"#)?;
        for guide in label_guides(tree, layout, alignment) {
            writeln!(svg, r#"<path class="radial-link-extent" d="{}" />"#, guide.path)?;
        }
        writeln!(svg, "</g>")?;

        writeln!(svg, r#"<g class="g-radial-link">"#)?;
        for edge in edge_paths(tree, layout) {
            writeln!(svg, r#"<path class="radial-link" d="{}" />"#, edge.path)?;
        }
        writeln!(svg, "</g>")?;

        writeln!(svg, r#"<g class="g-radial-text">"#)?;
        for leaf in tree.leaves() {
            let (Some(label), Some(node)) = (leaf.label(), layout.node(leaf.id)) else {
                continue;
            };
            let angle = node.primary;
            // Labels on the left half are flipped to stay upright
            let (flip, anchor) = if angle < 180.0 {
                ("", "start")
            } else {
                (" rotate(180)", "end")
            };
            writeln!(
                svg,
                r#"<text class="tree-text" dy=".31em" transform="rotate({}) translate({},0){}" text-anchor="{}">{}</text>"#,
                Num(angle - 90.0),
                Num(alignment + scale.link_text_gap),
                flip,
                anchor,
                escape_xml(label)
            )?;
        }
        writeln!(svg, "</g>")?;

        writeln!(svg, "</g>")
    }

    fn write_scale_bar(
        &self,
        svg: &mut String,
        projection: Projection,
        scale: &ScaleParams,
    ) -> fmt::Result {
        let pad = scale.padding;
        let bar_width = self.scale_bar_length * scale.axis(projection).secondary_scale;

        // Radial trees are centred, so the bar moves in next to the circle.
        let (dx, dy) = match projection {
            Projection::Rectangular => (0.0, 0.0),
            Projection::Radial => {
                if scale.width + pad.right + pad.left >= scale.height + pad.bottom + pad.top {
                    (scale.width / 2.0 - scale.outer_radius - pad.left, 0.0)
                } else {
                    (0.0, scale.height / 2.0 - scale.outer_radius - pad.bottom)
                }
            }
        };

        writeln!(
            svg,
            r#"<g class="g-sbar" transform="translate({}, {})">"#,
            Num(pad.left + dx),
            Num(scale.height - pad.bottom - SCALE_MARK_HEIGHT + dy)
        )?;
        writeln!(
            svg,
            r#"<line class="scale-bar" x1="0" y1="0" x2="{}" y2="0" />"#,
            Num(bar_width)
        )?;
        for x in [0.0, bar_width] {
            writeln!(
                svg,
                r#"<line class="scale-bar" x1="{x}" y1="{m}" x2="{x}" y2="-{m}" />"#,
                x = Num(x),
                m = Num(SCALE_MARK_HEIGHT)
            )?;
        }
        writeln!(
            svg,
            r#"<text class="scale-bar-text" x="{}" y="0" dy="-0.35em" text-anchor="middle">{}</text>"#,
            Num(bar_width / 2.0),
            Num(self.scale_bar_length)
        )?;
        writeln!(svg, "</g>")
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
