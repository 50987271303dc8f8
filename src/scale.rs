//! Adaptive sizing: paddings, steps, radii and font sizes derived from the
//! tree's metrics and the viewport.

use std::f64::consts::FRAC_PI_2;

use crate::layout::{AxisParams, Projection};
use crate::log::{debug, warn};
use crate::measure::TextMetrics;
use crate::metrics::TreeMetrics;

/// `fraction(n) = a·atan(1/(b·n)) + c`, decreasing in `n`, bounded by
/// `(c, a·π/2 + c]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddingCurve {
    /// Amplitude.
    pub a: f64,
    /// Larger values shrink the padding faster as `n` grows.
    pub b: f64,
    /// Floor approached for very large trees.
    pub c: f64,
}

impl Default for PaddingCurve {
    fn default() -> Self {
        Self {
            a: 0.05,
            b: 0.02,
            c: 0.005,
        }
    }
}

impl PaddingCurve {
    /// Padding as a fraction of the viewport dimension. `n` is floored at 1.
    pub fn fraction(&self, n: usize) -> f64 {
        let n = n.max(1) as f64;
        self.a * (1.0 / (self.b * n)).atan() + self.c
    }

    pub fn lower_bound(&self) -> f64 {
        self.c
    }

    pub fn upper_bound(&self) -> f64 {
        self.a * FRAC_PI_2 + self.c
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    /// Leaf labels.
    pub name: f64,
    /// Branch-length annotations and the scale bar caption.
    pub length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    pub curve: PaddingCurve,
    /// Scale-bar reserve as a fraction of the bottom padding.
    pub space_padding_scale: f64,
    /// Connector-to-label gap as a fraction of the right padding.
    pub gap_padding_scale: f64,
    /// Label room, as a fraction of the right padding, when the longest
    /// label would not fit.
    pub label_fallback_fraction: f64,
    /// Leaf spacing at or below which fonts shrink with the spacing.
    pub font_threshold: f64,
    pub default_font_size: f64,
    /// Radial arc covered by the leaves; kept short of 360 so the first and
    /// last leaf do not touch.
    pub arc_span_degrees: f64,
    pub start_angle: f64,
    pub text: TextMetrics,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            curve: PaddingCurve::default(),
            space_padding_scale: 1.0,
            gap_padding_scale: 0.2,
            label_fallback_fraction: 0.8,
            font_threshold: 6.0,
            default_font_size: 10.0,
            arc_span_degrees: 330.0,
            start_angle: 0.0,
            text: TextMetrics::default(),
        }
    }
}

impl ScaleConfig {
    /// Font sizes for a given per-leaf spacing.
    pub fn font_sizes(&self, step: f64) -> FontSizes {
        if step <= self.font_threshold {
            let base = step.floor().max(0.0);
            FontSizes {
                name: base,
                length: (base - 1.0).max(0.0),
            }
        } else {
            FontSizes {
                name: self.default_font_size,
                length: self.default_font_size,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Everything the layout and the renderer need to size one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    /// Space kept free below the tree for the scale bar.
    pub scale_bar_space: f64,
    /// Gap between a connector end and its label.
    pub link_text_gap: f64,
    pub name_font_size: f64,
    pub length_font_size: f64,
    /// Estimated width of the longest label at `name_font_size`.
    pub max_name_width: f64,
    pub rectangular: AxisParams,
    pub radial: AxisParams,
    /// Radius available to the whole radial drawing, labels included.
    pub outer_radius: f64,
    pub arc_span_degrees: f64,
}

impl ScaleParams {
    pub fn axis(&self, projection: Projection) -> &AxisParams {
        match projection {
            Projection::Rectangular => &self.rectangular,
            Projection::Radial => &self.radial,
        }
    }
}

pub struct ScaleCalculator {
    config: ScaleConfig,
}

impl Default for ScaleCalculator {
    fn default() -> Self {
        Self::new(ScaleConfig::default())
    }
}

impl ScaleCalculator {
    pub fn new(config: ScaleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    pub fn compute(&self, metrics: &TreeMetrics, width: f64, height: f64) -> ScaleParams {
        let cfg = &self.config;

        let vertical = (cfg.curve.fraction(metrics.leaf_count) * height).round();
        let horizontal = (cfg.curve.fraction(metrics.height) * width).round();
        let padding = Padding {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        };
        let scale_bar_space = (cfg.space_padding_scale * padding.bottom).round();
        let link_text_gap = (cfg.gap_padding_scale * padding.right).round();
        let fallback_room = (cfg.label_fallback_fraction * padding.right).round();

        let drawable_height = height - padding.top - padding.bottom - scale_bar_space;
        let drawable_width = width - padding.left - padding.right;

        let leaf_gaps = metrics.leaf_count.saturating_sub(1);
        let rect_step = per_gap(drawable_height, leaf_gaps);
        // A lone leaf has no spacing to shrink to.
        let fonts = if leaf_gaps == 0 {
            FontSizes {
                name: cfg.default_font_size,
                length: cfg.default_font_size,
            }
        } else {
            cfg.font_sizes(rect_step)
        };
        let max_name_width = cfg.text.placeholder_width(metrics.max_label_length, fonts.name);

        // Rectangular: leaves top to bottom, root at the left padding.
        let label_room = if drawable_width - link_text_gap > max_name_width {
            max_name_width
        } else {
            fallback_room
        };
        let available_width = drawable_width - link_text_gap - label_room;
        let label_column = width - padding.right - link_text_gap - label_room;
        let rectangular = AxisParams {
            primary_origin: padding.top,
            primary_step: rect_step,
            secondary_origin: padding.left,
            secondary_scale: ratio(available_width, metrics.max_cumulative_length),
            secondary_baseline: label_column,
            secondary_step: per_gap(available_width, metrics.height),
            outer_alignment_radius: label_column,
        };

        // Radial: the circle fits the tighter viewport dimension.
        let outer_radius = if width + padding.left + padding.right <= height + padding.top + padding.bottom {
            width / 2.0 - padding.left.max(padding.right)
        } else {
            height / 2.0 - padding.top.max(padding.bottom)
        };
        let inner_radius = if outer_radius - link_text_gap > max_name_width {
            outer_radius - link_text_gap - max_name_width
        } else {
            outer_radius - link_text_gap - fallback_room
        };
        if inner_radius <= 0.0 {
            warn!(inner_radius, width, height, "viewport too small for a radial layout");
        }
        let radial = AxisParams {
            primary_origin: cfg.start_angle,
            primary_step: per_gap(cfg.arc_span_degrees, leaf_gaps),
            secondary_origin: 0.0,
            secondary_scale: ratio(inner_radius, metrics.max_cumulative_length),
            secondary_baseline: inner_radius,
            secondary_step: per_gap(inner_radius, metrics.height),
            outer_alignment_radius: inner_radius,
        };

        debug!(
            ?padding,
            rect_step,
            name_font = fonts.name,
            outer_radius,
            inner_radius,
            "computed scale parameters"
        );

        ScaleParams {
            width,
            height,
            padding,
            scale_bar_space,
            link_text_gap,
            name_font_size: fonts.name,
            length_font_size: fonts.length,
            max_name_width,
            rectangular,
            radial,
            outer_radius,
            arc_span_degrees: cfg.arc_span_degrees,
        }
    }
}

/// Scale parameters for `metrics` in a `width` × `height` viewport, using
/// the default configuration.
pub fn compute_scale(metrics: &TreeMetrics, width: f64, height: f64) -> ScaleParams {
    ScaleCalculator::default().compute(metrics, width, height)
}

/// `span / gaps`, or 0 when there is nothing to divide.
fn per_gap(span: f64, gaps: usize) -> f64 {
    if gaps == 0 { 0.0 } else { span / gaps as f64 }
}

fn ratio(span: f64, total: f64) -> f64 {
    if total > 0.0 { span / total } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::parser::parse;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample_metrics() -> TreeMetrics {
        compute_metrics(&parse("(A:1,B:2,(C:3,D:4):5);").unwrap())
    }

    #[test]
    fn test_curve_decreasing_and_bounded() {
        let curve = PaddingCurve::default();
        let small = curve.fraction(1);
        let large = curve.fraction(1000);

        assert!(small > large);
        for f in [small, large] {
            assert!(f > curve.lower_bound());
            assert!(f <= curve.upper_bound());
        }
    }

    #[test]
    fn test_curve_monotonic() {
        let curve = PaddingCurve::default();
        let mut previous = curve.fraction(1);
        for n in 2..500 {
            let f = curve.fraction(n);
            assert!(f < previous, "n = {n}");
            previous = f;
        }
    }

    #[test]
    fn test_curve_floors_n_at_one() {
        let curve = PaddingCurve::default();
        assert_eq!(curve.fraction(0), curve.fraction(1));
        assert!(curve.fraction(0).is_finite());
    }

    #[test]
    fn test_font_sizes() {
        let cfg = ScaleConfig::default();
        assert_eq!(cfg.font_sizes(4.7), FontSizes { name: 4.0, length: 3.0 });
        assert_eq!(cfg.font_sizes(6.0), FontSizes { name: 6.0, length: 5.0 });
        assert_eq!(cfg.font_sizes(6.01), FontSizes { name: 10.0, length: 10.0 });
        assert_eq!(cfg.font_sizes(35.0), FontSizes { name: 10.0, length: 10.0 });
        assert_eq!(cfg.font_sizes(0.5), FontSizes { name: 0.0, length: 0.0 });
    }

    #[test]
    fn test_paddings() {
        let m = sample_metrics();
        let s = compute_scale(&m, 800.0, 600.0);
        let curve = PaddingCurve::default();

        assert_eq!(s.padding.top, (curve.fraction(4) * 600.0).round());
        assert_eq!(s.padding.bottom, s.padding.top);
        assert_eq!(s.padding.left, (curve.fraction(2) * 800.0).round());
        assert_eq!(s.padding.right, s.padding.left);
        assert_eq!(s.scale_bar_space, s.padding.bottom);
        assert_eq!(s.link_text_gap, (0.2 * s.padding.right).round());
    }

    #[test]
    fn test_rectangular_fits_viewport() {
        let m = sample_metrics();
        let s = compute_scale(&m, 800.0, 600.0);
        let r = s.rectangular;

        assert_eq!(r.primary_origin, s.padding.top);
        let last_leaf = r.primary_origin + 3.0 * r.primary_step;
        assert!(approx_eq(last_leaf, 600.0 - s.padding.bottom - s.scale_bar_space));

        // the deepest node ends where the uniform baseline starts
        let deepest = r.secondary_origin + m.max_cumulative_length * r.secondary_scale;
        assert!(approx_eq(deepest, r.secondary_baseline));
        let root = r.secondary_baseline - m.height as f64 * r.secondary_step;
        assert!(approx_eq(root, r.secondary_origin));

        assert_eq!(s.name_font_size, 10.0);
        assert!(s.max_name_width > 0.0);
    }

    #[test]
    fn test_radial_parameters() {
        let m = sample_metrics();
        let s = compute_scale(&m, 800.0, 600.0);
        let r = s.radial;

        assert_eq!(r.primary_origin, 0.0);
        assert_eq!(r.primary_step, 110.0);
        assert_eq!(r.secondary_origin, 0.0);
        // landscape viewport: the height limits the circle
        assert_eq!(s.outer_radius, 300.0 - s.padding.top);
        assert!(r.outer_alignment_radius < s.outer_radius);
        assert!(approx_eq(m.max_cumulative_length * r.secondary_scale, r.outer_alignment_radius));
        assert!(approx_eq(r.secondary_baseline - 2.0 * r.secondary_step, 0.0));
    }

    #[test]
    fn test_dense_tree_shrinks_fonts() {
        let leaves: Vec<String> = (0..200).map(|i| format!("t{i}:1")).collect();
        let tree = parse(&format!("({});", leaves.join(","))).unwrap();
        let s = compute_scale(&compute_metrics(&tree), 800.0, 600.0);
        assert!(s.rectangular.primary_step <= 6.0);
        assert_eq!(s.name_font_size, s.rectangular.primary_step.floor());
        assert_eq!(s.length_font_size, s.name_font_size - 1.0);
    }

    #[test]
    fn test_degenerate_metrics_do_not_divide_by_zero() {
        let m = compute_metrics(&parse("A;").unwrap());
        let s = compute_scale(&m, 800.0, 600.0);
        for axis in [s.rectangular, s.radial] {
            assert_eq!(axis.primary_step, 0.0);
            assert_eq!(axis.secondary_scale, 0.0);
            assert_eq!(axis.secondary_step, 0.0);
        }
        // no leaf spacing to shrink to: fonts stay at the default
        assert_eq!(s.name_font_size, 10.0);
        assert_eq!(s.length_font_size, 10.0);
    }

    #[test]
    fn test_axis_selector() {
        let s = compute_scale(&sample_metrics(), 800.0, 600.0);
        assert_eq!(s.axis(Projection::Rectangular), &s.rectangular);
        assert_eq!(s.axis(Projection::Radial), &s.radial);
    }
}
