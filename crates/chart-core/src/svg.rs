// File: crates/chart-core/src/svg.rs
// Summary: SVG serialization of a Scene.

use std::fmt::Write as _;

use crate::format::format_number;
use crate::scene::{Def, Mark, Scene, Shape, Style};

/// Escape text for XML content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Coordinates are written with at most three decimals.
pub fn num(v: f64) -> String {
    format_number((v * 1000.0).round() / 1000.0)
}

impl Scene {
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" overflow="visible">"#,
            w = num(self.width),
            h = num(self.height)
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            for d in &self.defs {
                write_def(&mut out, d);
            }
            out.push_str("</defs>");
        }
        for m in &self.marks {
            write_mark(&mut out, m);
        }
        out.push_str("</svg>");
        out
    }
}

fn write_def(out: &mut String, def: &Def) {
    match def {
        Def::ClipRect { id, x, y, width, height } => {
            let _ = write!(
                out,
                r#"<clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                escape(id),
                num(*x),
                num(*y),
                num(width.max(0.0)),
                num(height.max(0.0))
            );
        }
        Def::LinearGradient { id, from, to, user_space, stops } => {
            let _ = write!(
                out,
                r#"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}""#,
                escape(id),
                num(from.0),
                num(from.1),
                num(to.0),
                num(to.1)
            );
            if *user_space {
                out.push_str(r#" gradientUnits="userSpaceOnUse""#);
            }
            out.push('>');
            for s in stops {
                let _ = write!(
                    out,
                    r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
                    num(s.offset),
                    escape(&s.color),
                    num(s.opacity)
                );
            }
            out.push_str("</linearGradient>");
        }
    }
}

/// `fill_none`: write `fill="none"` when no fill is set (shapes), or leave it out (text).
fn write_style(out: &mut String, style: &Style, fill_none: bool) {
    if let Some(c) = &style.class {
        let _ = write!(out, r#" class="{}""#, escape(c));
    }
    match &style.fill {
        Some(f) => {
            let _ = write!(out, r#" fill="{}""#, escape(f));
        }
        None if fill_none => out.push_str(r#" fill="none""#),
        None => {}
    }
    if let Some(s) = &style.stroke {
        let _ = write!(out, r#" stroke="{}""#, escape(s));
    }
    if let Some(w) = style.stroke_width {
        let _ = write!(out, r#" stroke-width="{}""#, num(w));
    }
    if let Some(d) = style.dash {
        let _ = write!(out, r#" stroke-dasharray="{}""#, num(d));
    }
    if let Some(o) = style.opacity {
        let _ = write!(out, r#" opacity="{}""#, num(o));
    }
    if let Some(c) = &style.clip {
        let _ = write!(out, r#" clip-path="url(#{})""#, escape(c));
    }
    if style.pointer_events_none {
        out.push_str(r#" pointer-events="none""#);
    }
}

fn write_mark(out: &mut String, mark: &Mark) {
    match &mark.shape {
        Shape::Line { from, to } => {
            let _ = write!(out, r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#, num(from.0), num(from.1), num(to.0), num(to.1));
            write_style(out, &mark.style, true);
            out.push_str("/>");
        }
        Shape::Rect { x, y, width, height } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(*x),
                num(*y),
                num(width.max(0.0)),
                num(height.max(0.0))
            );
            write_style(out, &mark.style, true);
            out.push_str("/>");
        }
        Shape::Circle { center, r } => {
            let _ = write!(out, r#"<circle cx="{}" cy="{}" r="{}""#, num(center.0), num(center.1), num(*r));
            write_style(out, &mark.style, true);
            out.push_str("/>");
        }
        Shape::Path { d } => {
            let _ = write!(out, r#"<path d="{}""#, escape(d));
            write_style(out, &mark.style, true);
            out.push_str("/>");
        }
        Shape::Text { pos, content, font_size, anchor, dx, dy, central } => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}""#,
                num(pos.0),
                num(pos.1),
                num(*font_size),
                anchor.as_str()
            );
            if *dx != 0.0 {
                let _ = write!(out, r#" dx="{}""#, num(*dx));
            }
            if *dy != 0.0 {
                let _ = write!(out, r#" dy="{}""#, num(*dy));
            }
            if *central {
                out.push_str(r#" dominant-baseline="central""#);
            }
            write_style(out, &mark.style, false);
            let _ = write!(out, ">{}</text>", escape(content));
        }
        Shape::Group { translate, children } => {
            let _ = write!(out, r#"<g transform="translate({}, {})">"#, num(translate.0), num(translate.1));
            for c in children {
                write_mark(out, c);
            }
            out.push_str("</g>");
        }
    }
}
