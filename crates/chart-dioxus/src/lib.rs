// File: crates/chart-dioxus/src/lib.rs
// Summary: Dioxus component hosting a chart: container measurement, pointer routing, tooltip overlay.
// Notes:
// - UI deps stay behind the `desktop` feature, so the workspace builds without fetching
//   Dioxus unless explicitly enabled.
// - The chart scene is painted as SVG markup; the tooltip and legend are HTML siblings.

use std::rc::Rc;

use chart_core::Chart;

/// Factory for the chart a component hosts; equal only to clones of itself.
#[derive(Clone)]
pub struct ChartHandle(Rc<dyn Fn() -> Box<dyn Chart>>);

impl ChartHandle {
    pub fn new<C: Chart + 'static>(build: impl Fn() -> C + 'static) -> Self {
        Self(Rc::new(move || Box::new(build()) as Box<dyn Chart>))
    }

    pub fn build(&self) -> Box<dyn Chart> {
        (self.0)()
    }
}

impl PartialEq for ChartHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChartHandle(..)")
    }
}

/// CSS for the tooltip panel and legend; mount once per window.
pub const STYLESHEET: &str = r#"
.meridian { position: relative; width: 100%; height: 100%; }
.meridian__tooltip { position: absolute; pointer-events: none; padding: 6px 8px; border-radius: 4px;
  box-shadow: 0 1px 4px rgba(0,0,0,.3); font: 12px sans-serif; white-space: nowrap; }
.meridian__tooltip__table td { padding: 0 4px; }
.meridian__legend { font: 12px sans-serif; margin-top: 4px; }
.meridian__loading-chart { opacity: .6; }
"#;

#[cfg(feature = "desktop")]
pub mod ui {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    use chart_core::tooltip::{Overflow, PanelRect};
    use chart_core::{Chart, ChartWrapper, OffsetPatch};
    use dioxus::prelude::*;

    use super::{ChartHandle, STYLESHEET};

    type SharedWrapper = Rc<RefCell<ChartWrapper<Box<dyn Chart>>>>;

    #[derive(Props, Clone, PartialEq)]
    pub struct ChartViewProps {
        pub chart: ChartHandle,
        /// Margin override merged over the chart's defaults.
        #[props(default)]
        pub offset: OffsetPatch,
        /// Fixed pixel size; unset sides follow the container.
        #[props(default)]
        pub width: Option<f64>,
        #[props(default)]
        pub height: Option<f64>,
    }

    /// Chart hosted in a container that fills its parent.
    ///
    /// Nothing is drawn until the container has reported a non-empty size.
    #[component]
    pub fn ChartView(props: ChartViewProps) -> Element {
        let wrapper: SharedWrapper = use_hook(|| {
            let w = ChartWrapper::new(props.chart.build())
                .with_offset(props.offset)
                .with_size(props.width, props.height);
            Rc::new(RefCell::new(w))
        });
        // bumped whenever the wrapper reports a visible change
        let mut revision = use_signal(|| 0u64);
        let mut panel = use_signal(|| None::<Rc<MountedData>>);
        let mut overflow = use_signal(Overflow::default);
        let _ = revision();

        {
            let mut w = wrapper.borrow_mut();
            w.set_offset(props.offset);
            w.set_size(props.width, props.height);
        }
        let frame = wrapper.borrow_mut().render();
        let (background, class_name) = {
            let w = wrapper.borrow();
            let opts = w.chart().options();
            (opts.theme.tooltip_background, opts.class_name.clone().unwrap_or_default())
        };

        // panel size is only known after paint
        use_effect(move || {
            let _ = revision();
            let Some(el) = panel() else { return };
            spawn(async move {
                let Ok(rect) = el.get_client_rect().await else { return };
                let window = dioxus_desktop::window();
                let viewport = window.inner_size().to_logical::<f64>(window.scale_factor()).width;
                let rect = PanelRect { left: rect.min_x(), right: rect.max_x(), width: rect.width() };
                let next = Overflow::detect(Some(rect), viewport);
                if next != *overflow.peek() {
                    overflow.set(next);
                }
            });
        });

        let on_resize = {
            let w = wrapper.clone();
            move |e: Event<ResizeData>| {
                if let Ok(size) = e.get_content_box_size() {
                    w.borrow_mut().resize(size.width, size.height);
                    revision += 1;
                }
            }
        };
        let on_move = {
            let w = wrapper.clone();
            move |e: MouseEvent| {
                let p = e.element_coordinates();
                if w.borrow_mut().pointer_move(p.x, p.y, Instant::now()) {
                    revision += 1;
                }
            }
        };
        let on_leave = {
            let w = wrapper.clone();
            move |_: MouseEvent| {
                if w.borrow_mut().pointer_leave() {
                    revision += 1;
                }
            }
        };

        let Some(frame) = frame else {
            return rsx! {
                style { {STYLESHEET} }
                div { class: "meridian {class_name}", onresize: on_resize }
            };
        };
        let tooltip = frame.tooltip.map(|p| {
            let o = overflow();
            let classes = o.class_names().join(" ");
            let style = format!(
                "left: {}px; top: {}px; transform: {}; background: {background};",
                p.anchor.left,
                p.anchor.top,
                o.transform()
            );
            (classes, style, p.body.to_html())
        });
        let legend = frame.legend.map(|l| l.to_html());

        rsx! {
            style { {STYLESHEET} }
            div {
                class: "meridian {class_name}",
                onresize: on_resize,
                onmouseenter: on_move.clone(),
                onmousemove: on_move,
                onmouseleave: on_leave,
                div { dangerous_inner_html: frame.svg }
                if let Some((classes, style, html)) = tooltip {
                    div {
                        class: "meridian__tooltip {classes}",
                        style: style,
                        onmounted: move |e: MountedEvent| panel.set(Some(e.data())),
                        dangerous_inner_html: html,
                    }
                }
            }
            if let Some(html) = legend {
                div { dangerous_inner_html: html }
            }
        }
    }

    /// Demo window with a bar chart and a line chart over generated data.
    pub fn run_demo_ui() -> Result<(), String> {
        use chart_core::{record, BarChart, LineChart, Record, SeriesMeta};
        use chrono::{Days, NaiveDate};

        fn sample() -> Vec<Record> {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
            (0..30u64)
                .filter_map(|i| {
                    let day = start.checked_add_days(Days::new(i))?;
                    let x = i as f64;
                    Some(record! {
                        "date" => day,
                        "valueX" => day.format("%d-%m").to_string(),
                        "visits" => (x / 4.0).sin() * 10.0 + 20.0,
                        "signups" => (x / 6.0).cos() * 4.0 + 8.0,
                    })
                })
                .collect()
        }

        fn series() -> Vec<SeriesMeta> {
            vec![
                SeriesMeta::new("visits", "Visits", "#1F77B4"),
                SeriesMeta::new("signups", "Signups", "#FF7F0E").dotted(),
            ]
        }

        #[component]
        fn App() -> Element {
            let line = use_hook(|| ChartHandle::new(|| LineChart::new(sample(), series())));
            let bars = use_hook(|| ChartHandle::new(|| BarChart::new(sample().into_iter().take(6).collect(), series())));
            rsx! {
                div { style: "height: 300px; padding: 16px;", super::ui::ChartView { chart: line } }
                div { style: "height: 300px; padding: 16px;", super::ui::ChartView { chart: bars } }
            }
        }

        let cfg = dioxus_desktop::Config::new()
            .with_prerendered("<style>html,body{margin:0;height:100%;font-family:sans-serif}</style>".to_string());
        let providers: Vec<Box<dyn Fn() -> Box<dyn std::any::Any> + Send + Sync>> = Vec::new();
        let globals: Vec<Box<dyn std::any::Any>> = vec![Box::new(cfg)];
        dioxus_desktop::launch::launch(App, providers, globals);
        Ok(())
    }
}

/// Fallback when the `desktop` feature is not enabled.
#[cfg(not(feature = "desktop"))]
pub fn run_demo_ui() -> Result<(), &'static str> {
    Err("chart-dioxus built without `desktop` feature; enable features to run UI demo")
}
