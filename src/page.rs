//! A minimal retained element tree that the widget's elements live in.
//!
//! Elements carry a tag, a class list, attributes, text, an input value, a
//! hidden flag, and a left margin.  Lookups by class walk the tree in
//! document order.
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementId(usize);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tag {
    Div,
    Input,
    Link,
    Span,
    List,
    ListItem,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub tag: Tag,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub hidden: bool,
    pub margin_left: u16,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: Tag) -> Element {
        Element {
            tag,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            hidden: false,
            margin_left: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Page {
    elements: Vec<Element>,
    // Top-level elements, in order
    body: Vec<ElementId>,
}

impl Page {
    pub fn new() -> Page {
        Page::default()
    }

    /// Creates a detached element
    pub fn create(&mut self, tag: Tag) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new(tag));
        id
    }

    /// Creates a detached element whose class list is the
    /// whitespace-separated words of `classes`
    pub fn create_with_class(&mut self, tag: Tag, classes: &str) -> ElementId {
        let id = self.create(tag);
        for class in classes.split_whitespace() {
            self.add_class(id, class);
        }
        id
    }

    /// Attaches `child` as the last child of `parent`, or at the top level
    /// if `parent` is `None`.  Does nothing if `child` is already attached.
    pub fn append_child(&mut self, parent: Option<ElementId>, child: ElementId) {
        let Some(el) = self.elements.get(child.0) else {
            return;
        };
        if el.parent.is_some() || self.body.contains(&child) {
            return;
        }
        match parent {
            Some(p) => {
                let Some(pel) = self.elements.get_mut(p.0) else {
                    return;
                };
                pel.children.push(child);
                if let Some(el) = self.elements.get_mut(child.0) {
                    el.parent = Some(p);
                }
            }
            None => self.body.push(child),
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Attached elements in document order
    pub fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack = self.body.iter().rev().copied().collect::<Vec<_>>();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(el) = self.get(id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// The first attached element with the given class
    pub fn query(&self, class: &str) -> Option<ElementId> {
        self.document_order()
            .into_iter()
            .find(|&id| self.get(id).is_some_and(|el| el.has_class(class)))
    }

    /// All attached elements with the given class, in document order
    pub fn query_all(&self, class: &str) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|el| el.has_class(class)))
            .collect()
    }

    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = match self.get(id)?.parent {
            Some(p) => &self.get(p)?.children,
            None => &self.body,
        };
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            if !el.has_class(class) {
                el.classes.push(class.to_owned());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(id) {
            el.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)?.attribute(name)
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.get_mut(id) {
            text.clone_into(&mut el.text);
        }
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.get(id).map_or("", |el| el.text.as_str())
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(el) = self.get_mut(id) {
            value.clone_into(&mut el.value);
        }
    }

    pub fn value(&self, id: ElementId) -> &str {
        self.get(id).map_or("", |el| el.value.as_str())
    }

    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if let Some(el) = self.get_mut(id) {
            el.hidden = hidden;
        }
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.get(id).is_some_and(|el| el.hidden)
    }

    pub fn set_margin_left(&mut self, id: ElementId, margin: u16) {
        if let Some(el) = self.get_mut(id) {
            el.margin_left = margin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order() {
        let mut page = Page::new();
        let root = page.create_with_class(Tag::Div, "root");
        let a = page.create_with_class(Tag::Div, "a item");
        let a1 = page.create_with_class(Tag::Span, "item");
        let b = page.create_with_class(Tag::Div, "b item");
        page.append_child(None, root);
        page.append_child(Some(root), a);
        page.append_child(Some(a), a1);
        page.append_child(Some(root), b);
        assert_eq!(page.document_order(), [root, a, a1, b]);
        assert_eq!(page.query_all("item"), [a, a1, b]);
        assert_eq!(page.query("item"), Some(a));
        assert_eq!(page.query("missing"), None);
    }

    #[test]
    fn test_detached_elements_are_not_found() {
        let mut page = Page::new();
        let el = page.create_with_class(Tag::Div, "ghost");
        assert_eq!(page.query("ghost"), None);
        page.append_child(None, el);
        assert_eq!(page.query("ghost"), Some(el));
    }

    #[test]
    fn test_append_twice_is_ignored() {
        let mut page = Page::new();
        let root = page.create(Tag::Div);
        let child = page.create(Tag::Span);
        page.append_child(None, root);
        page.append_child(Some(root), child);
        page.append_child(None, child);
        assert_eq!(page.document_order(), [root, child]);
        assert_eq!(page.get(child).unwrap().parent(), Some(root));
    }

    #[test]
    fn test_next_sibling() {
        let mut page = Page::new();
        let root = page.create(Tag::Div);
        let field = page.create(Tag::Input);
        let effect = page.create(Tag::Div);
        page.append_child(None, root);
        page.append_child(Some(root), field);
        page.append_child(Some(root), effect);
        assert_eq!(page.next_sibling(field), Some(effect));
        assert_eq!(page.next_sibling(effect), None);
        assert_eq!(page.next_sibling(root), None);
    }

    #[test]
    fn test_classes() {
        let mut page = Page::new();
        let el = page.create_with_class(Tag::Link, "sa-cal-day-no");
        page.add_class(el, "selected");
        page.add_class(el, "selected");
        assert_eq!(page.get(el).unwrap().classes(), ["sa-cal-day-no", "selected"]);
        page.set_class(el, "selected", false);
        assert!(!page.has_class(el, "selected"));
        assert!(page.has_class(el, "sa-cal-day-no"));
    }

    #[test]
    fn test_attributes_and_text() {
        let mut page = Page::new();
        let el = page.create(Tag::Link);
        page.set_attribute(el, "data-date", "17");
        page.set_text(el, "17");
        assert_eq!(page.attribute(el, "data-date"), Some("17"));
        assert_eq!(page.attribute(el, "href"), None);
        assert_eq!(page.text(el), "17");
    }
}
