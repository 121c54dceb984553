use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Visual element a geometry is bound to.
///
/// Implementations are handles: writes go through `&self` the same way a DOM
/// node reference mutates the node it points at.
pub trait Element {
    /// Set one inline style property (kebab-case CSS name), replacing any
    /// previous value.
    fn set_style(&self, property: &str, value: &str);

    /// Append `child` as the last child of this element.
    fn append_child(&self, child: &Self);
}

#[derive(Debug, Default)]
struct RecordedNode {
    class_name: String,
    styles: BTreeMap<String, String>,
    style_writes: BTreeMap<String, usize>,
    children: Vec<RecordingElement>,
}

/// In-memory element that records styles and children.
///
/// Used by tests and by the native debug shell where no document exists.
#[derive(Debug, Clone, Default)]
pub struct RecordingElement {
    node: Rc<RefCell<RecordedNode>>,
}

impl RecordingElement {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            node: Rc::new(RefCell::new(RecordedNode {
                class_name: class_name.into(),
                ..RecordedNode::default()
            })),
        }
    }

    pub fn class_name(&self) -> String {
        self.node.borrow().class_name.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.node.borrow().styles.get(property).cloned()
    }

    pub fn styles(&self) -> BTreeMap<String, String> {
        self.node.borrow().styles.clone()
    }

    /// Number of times `property` has been written.
    pub fn style_writes(&self, property: &str) -> usize {
        self.node
            .borrow()
            .style_writes
            .get(property)
            .copied()
            .unwrap_or(0)
    }

    pub fn children(&self) -> Vec<RecordingElement> {
        self.node.borrow().children.clone()
    }

    /// Whether both handles point at the same node.
    pub fn same_node(&self, other: &RecordingElement) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Element for RecordingElement {
    fn set_style(&self, property: &str, value: &str) {
        let mut node = self.node.borrow_mut();
        node.styles.insert(property.to_string(), value.to_string());
        *node.style_writes.entry(property.to_string()).or_insert(0) += 1;
    }

    fn append_child(&self, child: &Self) {
        self.node.borrow_mut().children.push(child.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, RecordingElement};

    #[test]
    fn last_style_write_wins() {
        let el = RecordingElement::new("face");
        el.set_style("width", "100px");
        el.set_style("width", "120px");
        assert_eq!(el.style("width").as_deref(), Some("120px"));
        assert_eq!(el.style_writes("width"), 2);
        assert_eq!(el.style("height"), None);
    }

    #[test]
    fn clones_share_the_node() {
        let el = RecordingElement::new("pair");
        let handle = el.clone();
        handle.set_style("display", "inline-block");
        assert_eq!(el.style("display").as_deref(), Some("inline-block"));
        assert!(el.same_node(&handle));
        assert!(!el.same_node(&RecordingElement::new("pair")));
    }

    #[test]
    fn children_keep_insertion_order() {
        let parent = RecordingElement::new("map");
        parent.append_child(&RecordingElement::new("a"));
        parent.append_child(&RecordingElement::new("b"));
        let names: Vec<String> = parent.children().iter().map(|c| c.class_name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
