//! In-memory page used by the simulation and the tests

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ElementId, Rect, Surface, Viewport};

#[derive(Debug, Clone, Default)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    label: String,
    classes: BTreeSet<String>,
    data: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    text: String,
    style: BTreeMap<String, String>,
    rect: Rect,
    scroll_left: f64,
}

/// A tree of elements with classes, dataset, text, style and layout boxes
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    viewport: Viewport,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: Vec::new(),
            viewport,
        }
    }

    /// Build a document from a parsed fixture
    pub fn from_fixture(fixture: &PageFixture) -> Self {
        let mut document = Self::new(fixture.viewport);
        for element in &fixture.elements {
            document.insert_fixture(None, element);
        }
        document
    }

    fn insert_fixture(&mut self, parent: Option<ElementId>, fixture: &ElementFixture) {
        let classes: Vec<&str> = fixture.classes.iter().map(String::as_str).collect();
        let id = self.create(parent, &classes, fixture.rect);
        if let Some(label) = &fixture.label {
            self.set_label(id, label);
        }
        if let Some(dom_id) = &fixture.id {
            self.set_attribute(id, "id", dom_id);
        }
        for (key, value) in &fixture.data {
            self.set_data(id, key, &value.to_string());
        }
        for (name, value) in &fixture.attributes {
            self.set_attribute(id, name, value);
        }
        if !fixture.text.is_empty() {
            self.set_text(id, &fixture.text);
        }
        for child in &fixture.children {
            self.insert_fixture(Some(id), child);
        }
    }

    /// Append a new element under `parent` (or at the top level)
    pub fn create(&mut self, parent: Option<ElementId>, classes: &[&str], rect: Rect) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            rect,
            ..Default::default()
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn set_data(&mut self, element: ElementId, key: &str, value: &str) {
        self.nodes[element.0]
            .data
            .insert(key.to_string(), value.to_string());
    }

    pub fn set_label(&mut self, element: ElementId, label: &str) {
        self.nodes[element.0].label = label.to_string();
    }

    /// Human readable name, falling back to the id attribute or first class
    pub fn label(&self, element: ElementId) -> String {
        let node = &self.nodes[element.0];
        if !node.label.is_empty() {
            return node.label.clone();
        }
        if let Some(id) = node.attributes.get("id") {
            return format!("#{}", id);
        }
        node.classes
            .iter()
            .next()
            .map(|c| format!(".{}", c))
            .unwrap_or_else(|| format!("element {}", element.0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn text(&self, element: ElementId) -> &str {
        &self.nodes[element.0].text
    }

    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.nodes[element.0].style.get(property).map(String::as_str)
    }

    pub fn scroll_left(&self, element: ElementId) -> f64 {
        self.nodes[element.0].scroll_left
    }

    pub fn classes(&self, element: ElementId) -> impl Iterator<Item = &str> {
        self.nodes[element.0].classes.iter().map(String::as_str)
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        &self.nodes[element.0].children
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes[element.0].parent
    }

    pub fn layout_rect(&self, element: ElementId) -> Rect {
        self.nodes[element.0].rect
    }

    /// Every element in document (pre-)order
    pub fn elements(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            if node.parent.is_none() {
                self.walk(ElementId(index), &mut out);
            }
        }
        out
    }

    fn walk(&self, element: ElementId, out: &mut Vec<ElementId>) {
        out.push(element);
        for child in &self.nodes[element.0].children {
            self.walk(*child, out);
        }
    }

    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.walk(root, &mut out);
        out.remove(0);
        out
    }

    /// Scrollable height, derived from the layout when not given
    pub fn scroll_height(&self) -> f64 {
        if self.viewport.scroll_height > 0.0 {
            return self.viewport.scroll_height;
        }
        self.nodes
            .iter()
            .map(|n| n.rect.bottom())
            .fold(self.viewport.height, f64::max)
    }

    /// Scroll the window, clamped to the scrollable range
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        let max = (self.scroll_height() - self.viewport.height).max(0.0);
        self.viewport.scroll_y = scroll_y.clamp(0.0, max);
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        let scroll_y = self.viewport.scroll_y;
        self.set_scroll_y(scroll_y);
    }

    fn clone_subtree(&mut self, element: ElementId, parent: ElementId) -> ElementId {
        let source = self.nodes[element.0].clone();
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            ..source.clone()
        });
        self.nodes[parent.0].children.push(id);
        for child in source.children {
            self.clone_subtree(child, id);
        }
        id
    }
}

impl Surface for Document {
    fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.elements()
            .into_iter()
            .filter(|e| self.has_class(*e, class))
            .collect()
    }

    fn query_class_within(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|e| self.has_class(*e, class))
            .collect()
    }

    fn query_data_within(&self, root: ElementId, key: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|e| self.nodes[e.0].data.contains_key(key))
            .collect()
    }

    fn find_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements()
            .into_iter()
            .find(|e| self.nodes[e.0].attributes.get("id").map(String::as_str) == Some(id))
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes[element.0].classes.contains(class)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.nodes[element.0].classes.insert(class.to_string());
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        self.nodes[element.0].classes.remove(class);
    }

    fn data(&self, element: ElementId, key: &str) -> Option<&str> {
        self.nodes[element.0].data.get(key).map(String::as_str)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.nodes[element.0].attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        self.nodes[element.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        self.nodes[element.0].attributes.remove(name);
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.nodes[element.0].text = text.to_string();
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        self.nodes[element.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn set_scroll_left(&mut self, element: ElementId, offset: f64) {
        self.nodes[element.0].scroll_left = offset;
    }

    fn scroll_width(&self, element: ElementId) -> f64 {
        let node = &self.nodes[element.0];
        let content: f64 = node
            .children
            .iter()
            .map(|c| self.nodes[c.0].rect.width)
            .sum();
        content.max(node.rect.width)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        let rect = self.nodes[element.0].rect;
        Rect {
            y: rect.y - self.viewport.scroll_y,
            ..rect
        }
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.nodes[element.0].rect.y
    }

    fn clone_child(&mut self, element: ElementId, parent: ElementId) -> ElementId {
        self.clone_subtree(element, parent)
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_height: self.scroll_height(),
            ..self.viewport
        }
    }
}

/// Dataset values may be written as strings, numbers or booleans in fixtures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Number(n) => write!(f, "{}", n),
            DataValue::Text(s) => f.write_str(s),
        }
    }
}

/// One element of a page fixture, with its subtree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementFixture {
    /// Value of the `id` attribute
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub data: BTreeMap<String, DataValue>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub children: Vec<ElementFixture>,
}

/// Page description loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub elements: Vec<ElementFixture>,
}

impl PageFixture {
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Fixture(e.to_string()))
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        [viewport]
        width = 1024
        height = 768

        [[elements]]
        id = "home"
        classes = ["hero", "js-parallax-wrap"]
        rect = { width = 1024, height = 600 }

        [[elements.children]]
        label = "Orb"
        classes = ["layer"]
        data = { parallax = 0.25 }

        [[elements]]
        classes = ["js-counter"]
        data = { target = 1200, suffix = "+", prefix = "" }
        rect = { y = 900, width = 200, height = 80 }
    "#;

    #[test]
    fn test_fixture_builds_tree() {
        let fixture = PageFixture::from_toml(FIXTURE).unwrap();
        let doc = Document::from_fixture(&fixture);

        assert_eq!(doc.len(), 3);
        let hero = doc.find_by_id("home").unwrap();
        let layers = doc.query_data_within(hero, "parallax");
        assert_eq!(layers.len(), 1);
        assert_eq!(doc.data(layers[0], "parallax"), Some("0.25"));
        assert_eq!(doc.label(layers[0]), "Orb");

        let counter = doc.query_class("js-counter")[0];
        assert_eq!(doc.data(counter, "target"), Some("1200"));
        assert_eq!(doc.data(counter, "suffix"), Some("+"));
        assert_eq!(doc.scroll_height(), 980.0);
    }

    #[test]
    fn test_bad_fixture_is_fixture_error() {
        let err = PageFixture::from_toml("[[elements]]\nrect = 3").unwrap_err();
        assert!(matches!(err, crate::Error::Fixture(_)));
    }

    #[test]
    fn test_clone_keeps_document_order() {
        let mut doc = Document::new(Viewport::default());
        let track = doc.create(None, &["track"], Rect::new(0.0, 0.0, 500.0, 100.0));
        let card = doc.create(Some(track), &["card"], Rect::new(0.0, 0.0, 300.0, 100.0));
        doc.create(Some(card), &["quote"], Rect::default());
        let after = doc.create(None, &["footer"], Rect::default());

        let copy = doc.clone_child(card, track);

        assert_eq!(doc.children(track), &[card, copy]);
        assert_eq!(doc.query_class("quote").len(), 2);
        let order = doc.elements();
        assert_eq!(order.last(), Some(&after));
        assert_eq!(doc.scroll_width(track), 600.0);
        assert!(doc.contains(track, doc.children(copy)[0]));
        assert!(!doc.contains(card, copy));
    }

    #[test]
    fn test_bounding_rect_follows_scroll() {
        let mut doc = Document::new(Viewport {
            width: 800.0,
            height: 600.0,
            scroll_y: 0.0,
            scroll_height: 3000.0,
        });
        let el = doc.create(None, &[], Rect::new(0.0, 1000.0, 100.0, 100.0));

        doc.set_scroll_y(400.0);
        assert_eq!(doc.bounding_rect(el).top(), 600.0);

        doc.set_scroll_y(10_000.0);
        assert_eq!(doc.viewport().scroll_y, 2400.0);
        assert_eq!(doc.offset_top(el), 1000.0);
    }
}
