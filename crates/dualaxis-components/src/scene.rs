//! Renders the visual's scene graph as Leptos SVG nodes.
//!
//! The node tree is rebuilt only on host updates. Series opacity and the
//! crosshair group are bound to signals, so legend clicks and pointer moves
//! patch those nodes in place.

use dualaxis_charts::crosshair::CROSSHAIR_ID;
use dualaxis_charts::Element;
use leptos::prelude::*;
use tracing::warn;

/// Prefix of the series path ids (`tag0`, `tag1`, ...)
const SERIES_ID_PREFIX: &str = "tag";

/// Attributes carried into the DOM for `tag`. `xmlns` is left out since
/// Leptos creates SVG nodes in the SVG namespace already.
pub fn rendered_attrs(tag: &str) -> &'static [&'static str] {
    match tag {
        "svg" => &["width", "height", "viewBox"],
        "g" => &["transform", "data-series", "data-axis"],
        "rect" => &["x", "y", "width", "height", "transform"],
        "path" => &["d", "transform"],
        "circle" => &["cx", "cy", "r"],
        "line" => &["x1", "y1", "x2", "y2"],
        "text" => &["x", "y", "dy", "transform"],
        _ => &[],
    }
}

/// Series index encoded in a path id
pub fn series_index(id: &str) -> Option<usize> {
    id.strip_prefix(SERIES_ID_PREFIX)?.parse().ok()
}

/// Inline style of a series path with `opacity` following its visibility
pub fn series_style(el: &Element, visible: bool) -> String {
    let mut style: String = el
        .styles()
        .filter(|(name, _)| *name != "opacity")
        .map(|(name, value)| format!("{name}: {value};"))
        .collect();
    style.push_str(if visible { "opacity: 1;" } else { "opacity: 0;" });
    style
}

/// Signals patched into an already mounted scene
#[derive(Clone, Copy)]
pub struct SceneBindings {
    /// Per-series draw state, indexed like the series paths
    pub visibility: Signal<Vec<bool>>,
    /// Latest crosshair group; `None` keeps the group built with the scene
    pub crosshair: Signal<Option<Element>>,
}

/// Render one element and its subtree
pub fn render_element(el: &Element, bindings: SceneBindings) -> AnyView {
    if el.id.as_deref() != Some(CROSSHAIR_ID) {
        return render_node(el, bindings);
    }
    let built = el.clone();
    let crosshair = bindings.crosshair;
    (move || {
        crosshair.with(|group| match group {
            Some(group) => render_node(group, bindings),
            None => render_node(&built, bindings),
        })
    })
    .into_any()
}

fn render_node(el: &Element, bindings: SceneBindings) -> AnyView {
    let attr = |name: &str| el.get_attr(name).map(str::to_string);
    let id = el.id.clone();
    let class = el.class.clone().unwrap_or_default();
    let text = el.text.clone();
    let children: Vec<AnyView> = el
        .children
        .iter()
        .map(|child| render_element(child, bindings))
        .collect();

    let series = el.id.as_deref().and_then(series_index);
    let (shown, hidden) = match series {
        Some(_) => (series_style(el, true), series_style(el, false)),
        None => (el.style_attr(), String::new()),
    };
    let visibility = bindings.visibility;
    let style = move || match series {
        Some(i) if !visibility.with(|v| v.get(i).copied().unwrap_or(true)) => hidden.clone(),
        _ => shown.clone(),
    };

    match el.tag.as_str() {
        "svg" => view! {
            <svg
                id=id
                class=class
                style=style
                width=attr("width")
                height=attr("height")
                viewBox=attr("viewBox")
            >
                {children}
            </svg>
        }
        .into_any(),
        "g" => view! {
            <g
                id=id
                class=class
                style=style
                transform=attr("transform")
                data-series=attr("data-series")
                data-axis=attr("data-axis")
            >
                {children}
            </g>
        }
        .into_any(),
        "rect" => view! {
            <rect
                id=id
                class=class
                style=style
                x=attr("x")
                y=attr("y")
                width=attr("width")
                height=attr("height")
                transform=attr("transform")
            />
        }
        .into_any(),
        "path" => view! {
            <path
                id=id
                class=class
                style=style
                d=attr("d")
                transform=attr("transform")
            />
        }
        .into_any(),
        "circle" => view! {
            <circle id=id class=class style=style cx=attr("cx") cy=attr("cy") r=attr("r") />
        }
        .into_any(),
        "line" => view! {
            <line
                id=id
                class=class
                style=style
                x1=attr("x1")
                y1=attr("y1")
                x2=attr("x2")
                y2=attr("y2")
            />
        }
        .into_any(),
        "text" => view! {
            <text
                id=id
                class=class
                style=style
                x=attr("x")
                y=attr("y")
                dy=attr("dy")
                transform=attr("transform")
            >
                {text}
                {children}
            </text>
        }
        .into_any(),
        other => {
            warn!(tag = other, "unsupported scene element rendered as group");
            view! { <g id=id class=class style=style>{children}</g> }.into_any()
        }
    }
}

/// Live SVG for the visual's scene
#[component]
pub fn SceneView(
    #[prop(into)] root: Signal<Option<Element>>,
    #[prop(into)] visibility: Signal<Vec<bool>>,
    #[prop(into)] crosshair: Signal<Option<Element>>,
) -> impl IntoView {
    let bindings = SceneBindings {
        visibility,
        crosshair,
    };
    move || root.with(|root| root.as_ref().map(|root| render_element(root, bindings)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualaxis_charts::series::path_id;
    use dualaxis_charts::DualAxisVisual;
    use dualaxis_core::{AxisRole, CategoryColumn, DataView, ValueColumn, Viewport, VisualUpdateOptions};

    fn visual() -> DualAxisVisual {
        let view = DataView::new(
            CategoryColumn::numbers("Day", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            vec![
                ValueColumn::new("Revenue", AxisRole::Primary, vec![10.0, 12.0, 9.0, 15.0, 14.0]),
                ValueColumn::new("Margin", AxisRole::Secondary, vec![0.2, 0.25, 0.22, 0.3, 0.28]),
            ],
        );
        let mut visual = DualAxisVisual::default();
        visual.update(&VisualUpdateOptions::new(Viewport::new(800.0, 400.0), view));
        visual
    }

    fn assert_attrs_rendered(el: &Element) {
        assert!(
            !rendered_attrs(&el.tag).is_empty(),
            "no renderer for <{}>",
            el.tag
        );
        for (name, _) in el.attrs() {
            assert!(
                name == "xmlns" || rendered_attrs(&el.tag).contains(&name),
                "<{}> drops attribute `{}`",
                el.tag,
                name
            );
        }
        el.children.iter().for_each(assert_attrs_rendered);
    }

    #[test]
    fn test_series_index_matches_path_ids() {
        assert_eq!(series_index(&path_id(0)), Some(0));
        assert_eq!(series_index(&path_id(12)), Some(12));
        assert_eq!(series_index("tagline"), None);
        assert_eq!(series_index(CROSSHAIR_ID), None);
    }

    #[test]
    fn test_series_style_replaces_opacity() {
        let path = Element::new("path")
            .style("stroke", "#a6cee3")
            .style("opacity", 1)
            .style("fill", "none");
        assert_eq!(series_style(&path, false), "stroke: #a6cee3;fill: none;opacity: 0;");
        assert_eq!(series_style(&path, true), "stroke: #a6cee3;fill: none;opacity: 1;");
    }

    #[test]
    fn test_every_scene_attribute_reaches_the_dom() {
        let mut visual = visual();
        assert_attrs_rendered(visual.scene().root());

        assert!(visual.pointer_move(300.0, 200.0));
        let crosshair = visual.scene().find(CROSSHAIR_ID).unwrap();
        assert!(!crosshair.children.is_empty());
        assert_attrs_rendered(crosshair);
    }
}
