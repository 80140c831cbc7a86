use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// 自闭合的 html 元素，不允许有子节点
const VOID_ELEMENTS: [&str; 3] = ["input", "img", "br"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// 一个最小化的 html 元素树，只保留页面渲染和测试需要的能力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(attr) => attr.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attr("class") {
            Some(classes) if !classes.is_empty() => format!("{classes} {class}"),
            _ => class.to_owned(),
        };
        self.set_attr("class", classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(classes) = self.attr("class") {
            let classes = classes.split_whitespace().filter(|c| *c != class).collect::<Vec<_>>().join(" ");
            self.set_attr("class", classes);
        }
    }

    /// 替换所有子节点为一段文本
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => text.push_str(t),
                Node::Element(e) => text.push_str(&e.text_content()),
            }
        }
        text
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn append(&mut self, children: impl IntoIterator<Item = Element>) {
        self.children.extend(children.into_iter().map(Node::Element));
    }

    /// 深度优先查找第一个满足条件的后代元素（包括自身）
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.children().find_map(|child| child.find(pred))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(e) => e.find_mut(pred),
            Node::Text(_) => None,
        })
    }

    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if pred(self) {
            found.push(self);
        }
        for child in self.children() {
            child.find_all(pred, found);
        }
    }

    #[cfg(test)]
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e| e.has_class(class))
    }

    pub fn to_html(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
                Node::Element(e) => e.write(writer)?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }
}

/// 页面中某个带 id 元素的共享句柄，多个处理器可以同时持有
#[derive(Debug, Clone)]
pub struct ElementRef(Arc<Mutex<Element>>);

impl ElementRef {
    pub fn new(element: Element) -> Self {
        Self(Arc::new(Mutex::new(element)))
    }

    /// 在锁内修改元素，闭包内不能再获取同一个元素
    pub fn update<R>(&self, f: impl FnOnce(&mut Element) -> R) -> R {
        f(&mut self.0.lock())
    }

    pub fn read<R>(&self, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.0.lock())
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Element {
        self.0.lock().clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.read(|e| e.children().count())
    }

    pub fn text(&self) -> String {
        self.read(Element::text_content)
    }
}

/// 页面文档，根元素按声明顺序渲染，带 id 的根元素可以按 id 查找
#[derive(Debug, Clone, Default)]
pub struct Document {
    roots: Vec<ElementRef>,
    by_id: HashMap<String, ElementRef>,
}

impl Document {
    pub fn new(layout: Vec<Element>) -> Self {
        let mut document = Self::default();
        for element in layout {
            let element_ref = ElementRef::new(element);
            if let Some(id) = element_ref.read(|e| e.id().map(str::to_owned)) {
                document.by_id.insert(id, element_ref.clone());
            }
            document.roots.push(element_ref);
        }
        document
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.by_id.get(id).cloned()
    }

    /// 按 class 查找根元素，用于标签页这类成组的元素
    pub fn query_class(&self, class: &str) -> Vec<ElementRef> {
        self.roots
            .iter()
            .filter(|root| root.read(|e| e.has_class(class)))
            .cloned()
            .collect()
    }

    pub fn to_html(&self) -> Result<String> {
        let mut html = String::new();
        for root in &self.roots {
            html.push_str(&root.read(Element::to_html)?);
            html.push('\n');
        }
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_html() {
        let element = Element::new("div")
            .with_class("video-info")
            .with_child(Element::new("span").with_text("<b> & co"))
            .with_child(Element::new("input").with_attr("type", "checkbox"))
            .with_child(Element::new("video").with_attr("muted", ""));
        assert_eq!(
            element.to_html().unwrap(),
            r#"<div class="video-info"><span>&lt;b&gt; &amp; co</span><input type="checkbox"/><video muted=""></video></div>"#
        );
    }

    #[test]
    fn test_class_manipulation() {
        let mut element = Element::new("div").with_class("tab").with_class("active");
        assert!(element.has_class("tab"));
        element.add_class("active");
        assert_eq!(element.attr("class"), Some("tab active"));
        element.remove_class("active");
        assert_eq!(element.attr("class"), Some("tab"));
        assert!(!element.has_class("active"));
    }

    #[test]
    fn test_document_lookup() {
        let document = Document::new(vec![
            Element::new("button").with_id("tab-1").with_class("tab"),
            Element::new("button").with_id("tab-2").with_class("tab"),
            Element::new("table").with_id("videoTable"),
        ]);
        assert!(document.get_element_by_id("videoTable").is_some());
        assert!(document.get_element_by_id("history").is_none());
        assert_eq!(document.query_class("tab").len(), 2);
        let table = document.get_element_by_id("videoTable").unwrap();
        table.update(|e| e.append([Element::new("tr")]));
        // 句柄共享同一个元素
        assert_eq!(document.get_element_by_id("videoTable").unwrap().len(), 1);
    }
}
