//! Retained SVG scene graph.
//!
//! Every render pass builds a fresh tree of [`Element`]s; interaction only
//! mutates styles on elements looked up by id. Serialisation escapes all text
//! and attribute values.

use std::fmt::{self, Display, Write};

/// One SVG element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn group() -> Self {
        Self::new("g")
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Display) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn style(mut self, name: &str, value: impl Display) -> Self {
        self.set_style(name, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn set_attr(&mut self, name: &str, value: impl Display) {
        upsert(&mut self.attrs, name, value.to_string());
    }

    pub fn set_style(&mut self, name: &str, value: impl Display) {
        upsert(&mut self.styles, name, value.to_string());
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        lookup(&self.attrs, name)
    }

    pub fn get_style(&self, name: &str) -> Option<&str> {
        lookup(&self.styles, name)
    }

    /// Attribute pairs in insertion order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Declarations joined into an inline `style` value, unescaped
    pub fn style_attr(&self) -> String {
        self.styles().map(|(n, v)| format!("{n}: {v};")).collect()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Depth-first search for an element id
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Every descendant (and self) carrying `class`, in document order
    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect_class(class, &mut out);
        out
    }

    fn collect_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            out.push(self);
        }
        for child in &self.children {
            child.collect_class(class, out);
        }
    }

    fn write_svg(&self, out: &mut String) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        if let Some(id) = &self.id {
            write!(out, " id=\"{}\"", Escaped(id))?;
        }
        if let Some(class) = &self.class {
            write!(out, " class=\"{}\"", Escaped(class))?;
        }
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, Escaped(value))?;
        }
        if !self.styles.is_empty() {
            out.push_str(" style=\"");
            for (name, value) in &self.styles {
                write!(out, "{}: {};", name, Escaped(value))?;
            }
            out.push('"');
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return Ok(());
        }

        out.push('>');
        if let Some(text) = &self.text {
            write!(out, "{}", Escaped(text))?;
        }
        for child in &self.children {
            child.write_svg(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

fn upsert(pairs: &mut Vec<(String, String)>, name: &str, value: String) {
    match pairs.iter_mut().find(|(n, _)| n == name) {
        Some((_, v)) => *v = value,
        None => pairs.push((name.to_string(), value)),
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// XML escaping for text and attribute values
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// SCENE
// ============================================================================

/// Root `<svg>` sized to the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    root: Element,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            root: Self::svg(width, height),
        }
    }

    fn svg(width: f64, height: f64) -> Element {
        Element::new("svg")
            .class("dual-axis-chart")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", width)
            .attr("height", height)
            .attr("viewBox", format!("0 0 {} {}", width, height))
    }

    /// Drop all content and resize
    pub fn clear(&mut self, width: f64, height: f64) {
        self.root = Self::svg(width, height);
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn push(&mut self, element: Element) {
        self.root.push(element);
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_mut(id)
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.root.find_by_class(class)
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        // Writing into a String cannot fail
        let _ = self.root.write_svg(&mut out);
        out
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialises_nested_elements() {
        let mut scene = Scene::new(200.0, 100.0);
        scene.push(
            Element::group()
                .attr("transform", "translate(84,10)")
                .child(Element::new("rect").attr("width", 10).style("fill", "#fff")),
        );
        let svg = scene.to_svg();
        assert!(svg.starts_with("<svg class=\"dual-axis-chart\""));
        assert!(svg.contains("viewBox=\"0 0 200 100\""));
        assert!(svg.contains("<g transform=\"translate(84,10)\"><rect width=\"10\" style=\"fill: #fff;\"/></g>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let el = Element::new("text")
            .attr("data-name", "a\"b")
            .text("Sales & <Margin>");
        let mut out = String::new();
        el.write_svg(&mut out).unwrap();
        assert_eq!(
            out,
            "<text data-name=\"a&quot;b\">Sales &amp; &lt;Margin&gt;</text>"
        );
    }

    #[test]
    fn test_find_and_mutate_by_id() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.push(Element::group().child(Element::new("path").id("tag1").style("opacity", 1)));
        scene
            .find_mut("tag1")
            .unwrap()
            .set_style("opacity", 0);
        assert_eq!(scene.find("tag1").unwrap().get_style("opacity"), Some("0"));
        assert!(scene.find("tag2").is_none());
    }

    #[test]
    fn test_style_attr_keeps_declaration_order() {
        let el = Element::new("path")
            .attr("d", "M0,0")
            .style("stroke", "#000")
            .style("opacity", 1)
            .style("stroke", "red");
        assert_eq!(el.style_attr(), "stroke: red;opacity: 1;");
        assert_eq!(el.attrs().collect::<Vec<_>>(), [("d", "M0,0")]);
        assert_eq!(Element::group().style_attr(), "");
    }

    #[test]
    fn test_find_by_class_and_clear() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.push(Element::group().class("legend").child(Element::new("text").class("legend label")));
        assert_eq!(scene.find_by_class("legend").len(), 2);
        assert_eq!(scene.find_by_class("label").len(), 1);
        scene.clear(20.0, 20.0);
        assert!(scene.is_empty());
        assert_eq!(scene.root().get_attr("width"), Some("20"));
    }
}
