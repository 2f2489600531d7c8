// File: crates/chart-core/src/scene.rs
// Summary: Renderer-agnostic mark tree produced by the charts (lines, rects, circles, paths, text).

/// Horizontal text alignment relative to the text position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line { from: (f64, f64), to: (f64, f64) },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { center: (f64, f64), r: f64 },
    /// SVG path data.
    Path { d: String },
    Text { pos: (f64, f64), content: String, font_size: f64, anchor: TextAnchor, dx: f64, dy: f64, central: bool },
    Group { translate: (f64, f64), children: Vec<Mark> },
}

/// Paint attributes; unset fields are left to the renderer's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub dash: Option<f64>,
    pub opacity: Option<f64>,
    pub clip: Option<String>,
    pub class: Option<String>,
    pub pointer_events_none: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub shape: Shape,
    pub style: Style,
}

impl Mark {
    fn new(shape: Shape) -> Self {
        Self { shape, style: Style::default() }
    }

    pub fn line(from: (f64, f64), to: (f64, f64), stroke: &str, width: f64) -> Self {
        Self::new(Shape::Line { from, to }).with_stroke(stroke, width)
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64, fill: &str) -> Self {
        Self::new(Shape::Rect { x, y, width, height }).with_fill(fill)
    }

    pub fn circle(center: (f64, f64), r: f64, fill: &str) -> Self {
        Self::new(Shape::Circle { center, r }).with_fill(fill)
    }

    pub fn path(d: String) -> Self {
        Self::new(Shape::Path { d })
    }

    pub fn text(pos: (f64, f64), content: impl Into<String>, font_size: f64) -> Self {
        Self::new(Shape::Text {
            pos,
            content: content.into(),
            font_size,
            anchor: TextAnchor::Start,
            dx: 0.0,
            dy: 0.0,
            central: false,
        })
    }

    pub fn group(translate: (f64, f64), children: Vec<Mark>) -> Self {
        Self::new(Shape::Group { translate, children })
    }

    pub fn with_fill(mut self, fill: &str) -> Self {
        self.style.fill = Some(fill.to_string());
        self
    }

    pub fn with_stroke(mut self, stroke: &str, width: f64) -> Self {
        self.style.stroke = Some(stroke.to_string());
        self.style.stroke_width = Some(width);
        self
    }

    pub fn with_dash(mut self, dash: f64) -> Self {
        self.style.dash = Some(dash);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = Some(opacity);
        self
    }

    pub fn with_clip(mut self, id: &str) -> Self {
        self.style.clip = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.style.class = Some(class.to_string());
        self
    }

    pub fn without_pointer_events(mut self) -> Self {
        self.style.pointer_events_none = true;
        self
    }

    /// Text alignment and pixel nudges; no-op for non-text marks.
    pub fn aligned(mut self, anchor_to: TextAnchor, dx_px: f64, dy_px: f64) -> Self {
        if let Shape::Text { anchor, dx, dy, .. } = &mut self.shape {
            *anchor = anchor_to;
            *dx = dx_px;
            *dy = dy_px;
        }
        self
    }

    /// Vertically centre text on its position; no-op for non-text marks.
    pub fn centered_baseline(mut self) -> Self {
        if let Shape::Text { central, .. } = &mut self.shape {
            *central = true;
        }
        self
    }

    /// Number of marks in this subtree (groups count their children, not themselves).
    pub fn leaf_count(&self) -> usize {
        match &self.shape {
            Shape::Group { children, .. } => children.iter().map(Mark::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// Gradient stop: offset in percent, color and opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

/// Reusable paint servers and clip regions referenced by id.
#[derive(Clone, Debug, PartialEq)]
pub enum Def {
    ClipRect { id: String, x: f64, y: f64, width: f64, height: f64 },
    LinearGradient { id: String, from: (f64, f64), to: (f64, f64), user_space: bool, stops: Vec<GradientStop> },
}

/// A complete drawing for one chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub defs: Vec<Def>,
    pub marks: Vec<Mark>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, defs: Vec::new(), marks: Vec::new() }
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    /// Every non-group mark, depth first.
    pub fn leaves(&self) -> Vec<&Mark> {
        fn walk<'a>(marks: &'a [Mark], out: &mut Vec<&'a Mark>) {
            for m in marks {
                match &m.shape {
                    Shape::Group { children, .. } => walk(children, out),
                    _ => out.push(m),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.marks, &mut out);
        out
    }
}
