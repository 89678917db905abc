//! Cairo-based rendering functions for annotations.

use super::annotation::Annotation;
use super::color::Color;
use super::point::Point;
use super::style::{ArrowStyle, RenderStyle};
use super::text::TextAnnotation;
use crate::background::BackgroundImage;
use crate::util;
use std::f64::consts::PI;

/// Clears the canvas to the background.
///
/// Fills the whole surface with `color`, then paints the background image
/// scaled to the canvas bounds when one is loaded.
pub fn render_background(
    ctx: &cairo::Context,
    width: f64,
    height: f64,
    color: Color,
    background: Option<&BackgroundImage>,
) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    color.apply(ctx);
    ctx.rectangle(0.0, 0.0, width, height);
    let _ = ctx.fill();
    let _ = ctx.restore();

    if let Some(image) = background {
        image.draw(ctx, width, height);
    }
}

/// Redraws everything: background first, then every annotation in order.
pub fn render_scene(
    ctx: &cairo::Context,
    width: f64,
    height: f64,
    background: Option<&BackgroundImage>,
    annotations: &[Annotation],
    style: &RenderStyle,
) {
    render_background(ctx, width, height, style.background_color, background);
    render_annotations(ctx, annotations, style);
}

/// Renders all annotations in a slice.
///
/// Annotations are drawn in the order they appear (first = bottom layer).
pub fn render_annotations(ctx: &cairo::Context, annotations: &[Annotation], style: &RenderStyle) {
    for annotation in annotations {
        render_annotation(ctx, annotation, style);
    }
}

/// Renders a single annotation to a Cairo context.
pub fn render_annotation(ctx: &cairo::Context, annotation: &Annotation, style: &RenderStyle) {
    match annotation {
        Annotation::Curve(stroke) => {
            render_curve(ctx, &stroke.points, stroke.color, stroke.size);
        }
        Annotation::Arrow(stroke) => {
            if let Some((from, to)) = stroke.endpoints() {
                render_arrow(ctx, from, to, stroke.color, stroke.size, &style.arrow);
            }
        }
        Annotation::Text(text) => {
            render_text(ctx, text, style);
        }
    }
}

fn set_stroke_style(ctx: &cairo::Context, color: Color, size: f64) {
    color.apply(ctx);
    ctx.set_line_width(size);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

/// Renders a freehand curve through every point.
///
/// A single point is not a stroke and draws nothing.
pub fn render_curve(ctx: &cairo::Context, points: &[Point], color: Color, size: f64) {
    let [first, rest @ ..] = points else {
        return;
    };
    if rest.is_empty() {
        return;
    }

    set_stroke_style(ctx, color, size);
    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    let _ = ctx.stroke();
}

/// Renders one curve segment; used to extend a live stroke without a full redraw.
pub fn render_curve_segment(ctx: &cairo::Context, from: &Point, to: &Point, color: Color, size: f64) {
    set_stroke_style(ctx, color, size);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
}

/// Renders an arrow: shaft from `from` to `to` plus a two-sided head at `to`.
///
/// `size` only sets the line width; the head geometry comes from `arrow`.
pub fn render_arrow(
    ctx: &cairo::Context,
    from: &Point,
    to: &Point,
    color: Color,
    size: f64,
    arrow: &ArrowStyle,
) {
    let [top, bottom] =
        util::calculate_arrowhead(from.x, from.y, to.x, to.y, arrow.head_length, arrow.head_angle);

    set_stroke_style(ctx, color, size);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);

    ctx.move_to(top.0, top.1);
    ctx.line_to(to.x, to.y);
    ctx.line_to(bottom.0, bottom.1);
    let _ = ctx.stroke();
}

/// Renders a text label line by line, plus its selection decorations.
///
/// Each line is laid out with Pango and drawn with its top edge at
/// `y + index * line_height`.
pub fn render_text(ctx: &cairo::Context, text: &TextAnnotation, style: &RenderStyle) {
    let _ = ctx.save();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&style.text.font.to_pango_description(text.font_size)));
    layout.set_alignment(pango::Alignment::Left);

    text.color.apply(ctx);
    for (index, line) in text.lines().enumerate() {
        let (x, y) = text.line_origin(index);
        layout.set_text(line);
        ctx.move_to(x, y);
        pangocairo::functions::show_layout(ctx, &layout);
    }

    let _ = ctx.restore();

    if text.selected && style.show_selection {
        render_selection(ctx, text, style);
    }
}

fn render_selection(ctx: &cairo::Context, text: &TextAnnotation, style: &RenderStyle) {
    let _ = ctx.save();

    style.selection_color.apply(ctx);
    ctx.set_line_width(1.0);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(text.x, text.y, text.width, text.height);
    let _ = ctx.stroke();

    let zones = text.zones(&style.text);
    let (dx, dy) = zones.delete.center();
    render_delete_glyph(ctx, dx, dy, zones.delete.width, style.selection_color);
    let (rx, ry) = zones.resize.center();
    render_resize_glyph(ctx, rx, ry, zones.resize.width, style.selection_color);

    let _ = ctx.restore();
}

fn render_handle_disc(ctx: &cairo::Context, cx: f64, cy: f64, size: f64, color: Color) {
    ctx.new_path();
    ctx.arc(cx, cy, size / 2.0, 0.0, 2.0 * PI);
    ctx.set_source_rgba(0.0, 0.0, 0.0, 0.6);
    let _ = ctx.fill_preserve();
    color.apply(ctx);
    ctx.set_line_width(1.5);
    let _ = ctx.stroke();
}

/// Circled cross centered on the box's top-left corner.
fn render_delete_glyph(ctx: &cairo::Context, cx: f64, cy: f64, size: f64, color: Color) {
    render_handle_disc(ctx, cx, cy, size, color);

    let arm = size * 0.2;
    color.apply(ctx);
    ctx.set_line_width(2.0);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.move_to(cx - arm, cy - arm);
    ctx.line_to(cx + arm, cy + arm);
    ctx.move_to(cx + arm, cy - arm);
    ctx.line_to(cx - arm, cy + arm);
    let _ = ctx.stroke();
}

/// Circled diagonal double arrow centered on the box's bottom-right corner.
fn render_resize_glyph(ctx: &cairo::Context, cx: f64, cy: f64, size: f64, color: Color) {
    render_handle_disc(ctx, cx, cy, size, color);

    let arm = size * 0.22;
    let tip = size * 0.12;
    color.apply(ctx);
    ctx.set_line_width(2.0);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(cx - arm, cy - arm);
    ctx.line_to(cx + arm, cy + arm);

    ctx.move_to(cx - arm + tip, cy - arm);
    ctx.line_to(cx - arm, cy - arm);
    ctx.line_to(cx - arm, cy - arm + tip);

    ctx.move_to(cx + arm - tip, cy + arm);
    ctx.line_to(cx + arm, cy + arm);
    ctx.line_to(cx + arm, cy + arm - tip);
    let _ = ctx.stroke();
}
