// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a heatmap [`Scene`].

use std::fmt::Write as _;

use peniko::Color;
use vizir_heatmap::{AxisDescriptor, AxisOrient, Scene, TextAnchor};

const AXIS_COLOR: &str = "#000000";
const GRID_OPACITY: f64 = 0.1;

pub(crate) fn scene_to_svg(scene: &Scene) -> String {
    let view = scene.view;
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    let _ = writeln!(
        out,
        r#"viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif" font-size="{}">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height(),
        scene.style.font_size,
    );

    write_axis(&mut out, scene, &scene.x_axis);
    write_axis(&mut out, scene, &scene.y_axis);

    out.push_str("<g>\n");
    for tile in &scene.tiles {
        let r = tile.rect;
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
        );
        write_paint_attr(&mut out, "fill", tile.fill);
        write_paint_attr(&mut out, "stroke", tile.stroke);
        let _ = write!(out, r#" stroke-width="{}""#, scene.style.stroke_width);
        match &tile.title {
            Some(title) => {
                let _ = writeln!(out, "><title>{}</title></rect>", escape_xml(title));
            }
            None => out.push_str("/>\n"),
        }
    }
    out.push_str("</g>\n</svg>\n");
    out
}

fn write_axis(out: &mut String, scene: &Scene, axis: &AxisDescriptor) {
    let _ = writeln!(
        out,
        r#"<g transform="translate({},{})" font-size="{}">"#,
        axis.offset.x, axis.offset.y, axis.tick_font_size
    );
    let (r0, r1) = axis.range;
    if axis.show_domain {
        let _ = writeln!(
            out,
            r#"<line x1="{r0}" y1="0" x2="{r1}" y2="0" stroke="{AXIS_COLOR}"/>"#
        );
    }
    for tick in &axis.ticks {
        let p = tick.position;
        let label = escape_xml(&tick.label);
        match axis.orient {
            AxisOrient::Bottom => {
                let _ = writeln!(
                    out,
                    r#"<line x1="{p}" y1="0" x2="{p}" y2="{}" stroke="{AXIS_COLOR}" stroke-opacity="{GRID_OPACITY}"/>"#,
                    axis.grid_length
                );
                let _ = writeln!(
                    out,
                    r#"<line x1="{p}" y1="0" x2="{p}" y2="6" stroke="{AXIS_COLOR}"/>"#
                );
                let _ = writeln!(
                    out,
                    r#"<text x="{p}" y="9" dy="0.71em" text-anchor="middle">{label}</text>"#
                );
            }
            AxisOrient::Left => {
                let _ = writeln!(
                    out,
                    r#"<line x1="0" y1="{p}" x2="{}" y2="{p}" stroke="{AXIS_COLOR}" stroke-opacity="{GRID_OPACITY}"/>"#,
                    axis.grid_length
                );
                let _ = writeln!(
                    out,
                    r#"<line x1="-6" y1="{p}" x2="0" y2="{p}" stroke="{AXIS_COLOR}"/>"#
                );
                let _ = writeln!(
                    out,
                    r#"<text x="-9" y="{p}" dy="0.32em" text-anchor="end">{label}</text>"#
                );
            }
        }
    }
    if let Some(title) = &axis.title {
        let anchor = match title.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}""#,
            title.pos.x, title.pos.y, title.font_size
        );
        write_paint_attr(out, "stroke", scene.style.halo);
        let _ = writeln!(
            out,
            r#" stroke-width="{}" paint-order="stroke">{}</text>"#,
            scene.style.halo_width,
            escape_xml(&title.text)
        );
    }
    out.push_str("</g>\n");
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (value, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
