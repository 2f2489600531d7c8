// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark color presets for axes, text, grid, cursor and bar labels.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub axis: &'static str,
    pub text: &'static str,
    /// Two hex digits of alpha appended to the axis color for grid lines.
    pub grid_alpha: &'static str,
    pub cursor_line: &'static str,
    pub cursor_dot_stroke: &'static str,
    pub bar_text: &'static str,
    pub tooltip_background: &'static str,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            axis: "#07080A",
            text: "#07080A",
            grid_alpha: "44",
            cursor_line: "gray",
            cursor_dot_stroke: "white",
            bar_text: "white",
            tooltip_background: "#FFFFFF",
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            axis: "#B4B4BE",
            text: "#EBEBF5",
            grid_alpha: "33",
            cursor_line: "#8C8C96",
            cursor_dot_stroke: "#121214",
            bar_text: "white",
            tooltip_background: "#1E1E22",
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            axis: "#FFFFFF",
            text: "#FFFFFF",
            grid_alpha: "66",
            cursor_line: "#FFFF00",
            cursor_dot_stroke: "#000000",
            bar_text: "#000000",
            tooltip_background: "#000000",
        }
    }

    /// Grid line color derived from an axis color (`#RRGGBB` + alpha).
    pub fn grid_color(&self, axis_color: &str) -> String {
        format!("{axis_color}{}", self.grid_alpha)
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(|| {
            tracing::warn!(name, "unknown theme; using light");
            Theme::light()
        })
}
