//! Components: a wrapper template around an ordered list of children,
//! plus the slots they declare.

use std::rc::Rc;

use kstring::KString;

use crate::{myfrom::{MyFrom, ks},
            node::{Child, Children},
            slot::{Slot, SlotRegistry},
            template::{CHILDREN_MARKER, CHILD_MARKER}};

/// Built through the consuming methods below, then rendered (any
/// number of times) via `render` or `print`. Rendering never changes
/// a component, so instances can be shared via `Rc` and appear in
/// several places of a tree.
#[derive(Debug, Clone)]
pub struct Component {
    name: Option<KString>,
    description: Option<KString>,
    wrapper: KString,
    classes: Vec<KString>,
    attributes: Vec<(KString, KString)>,
    children_wrapper: KString,
    children: Children,
    slots: SlotRegistry,
}

impl Default for Component {
    fn default() -> Self {
        Component {
            name: None,
            description: None,
            wrapper: KString::from_static(CHILDREN_MARKER),
            classes: Vec::new(),
            attributes: Vec::new(),
            children_wrapper: KString::from_static(CHILD_MARKER),
            children: Children::new(),
            slots: SlotRegistry::new(),
        }
    }
}

impl Component {
    /// A component with the given wrapper template, which should
    /// contain `%children%` (and may contain `%classes%` and
    /// `%attributes%`).
    pub fn new<T>(wrapper: T) -> Self
    where KString: MyFrom<T>
    {
        Component {
            wrapper: ks(wrapper),
            ..Default::default()
        }
    }

    pub fn into_rc(self) -> Rc<Component> {
        Rc::new(self)
    }

    // ---- metadata, informational only -----------------------------

    pub fn set_name<T>(mut self, name: T) -> Self
    where KString: MyFrom<T>
    {
        self.name = Some(ks(name));
        self
    }

    pub fn set_description<T>(mut self, description: T) -> Self
    where KString: MyFrom<T>
    {
        self.description = Some(ks(description));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    // ---- templates -------------------------------------------------

    pub fn set_wrapper<T>(mut self, wrapper: T) -> Self
    where KString: MyFrom<T>
    {
        self.wrapper = ks(wrapper);
        self
    }

    /// Template applied around each child individually, split on
    /// `%child%`.
    pub fn set_children_wrapper<T>(mut self, wrapper: T) -> Self
    where KString: MyFrom<T>
    {
        self.children_wrapper = ks(wrapper);
        self
    }

    pub fn wrapper(&self) -> &str {
        &self.wrapper
    }

    pub fn children_wrapper(&self) -> &str {
        &self.children_wrapper
    }

    // ---- classes ---------------------------------------------------

    /// Replaces all classes. Duplicates are dropped, keeping the first.
    pub fn set_classes<T, I>(mut self, classes: I) -> Self
    where I: IntoIterator<Item = T>,
          KString: MyFrom<T>
    {
        self.classes.clear();
        for class in classes {
            self = self.add_class(class);
        }
        self
    }

    /// Appends a class unless already present.
    pub fn add_class<T>(mut self, class: T) -> Self
    where KString: MyFrom<T>
    {
        let class = ks(class);
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn remove_class(mut self, class: &str) -> Self {
        self.classes.retain(|c| c.as_str() != class);
        self
    }

    pub fn classes(&self) -> &[KString] {
        &self.classes
    }

    // ---- attributes ------------------------------------------------

    /// Replaces all attributes; for repeated names the last value wins,
    /// at the position of the first.
    pub fn set_attributes<K, V, I>(mut self, attributes: I) -> Self
    where I: IntoIterator<Item = (K, V)>,
          KString: MyFrom<K> + MyFrom<V>
    {
        self.attributes.clear();
        for (k, v) in attributes {
            self = self.set_attribute(k, v);
        }
        self
    }

    /// Sets one attribute, keeping its position if it already exists.
    pub fn set_attribute<K, V>(mut self, name: K, value: V) -> Self
    where KString: MyFrom<K> + MyFrom<V>
    {
        let name = ks(name);
        let value = ks(value);
        if let Some(att) = self.attributes.iter_mut().find(|(k, _)| *k == name) {
            att.1 = value;
        } else {
            self.attributes.push((name, value));
        }
        self
    }

    pub fn remove_attribute(mut self, name: &str) -> Self {
        self.attributes.retain(|(k, _)| k.as_str() != name);
        self
    }

    pub fn attributes(&self) -> &[(KString, KString)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    // ---- children --------------------------------------------------

    pub fn set_children(mut self, children: impl Into<Children>) -> Self {
        self.children = children.into();
        self
    }

    pub fn add_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_keyed_child<K>(mut self, key: K, child: impl Into<Child>) -> Self
    where KString: MyFrom<K>
    {
        self.children.insert(key, child);
        self
    }

    pub fn add_children<I>(mut self, children: I) -> Self
    where I: IntoIterator,
          I::Item: Into<Child>
    {
        for child in children {
            self.children.push(child);
        }
        self
    }

    pub fn add_child_if(self, condition: bool, child: impl Into<Child>) -> Self {
        if condition {
            self.add_child(child)
        } else {
            self
        }
    }

    /// Adds one child per item, as produced by `f`.
    pub fn add_each<I, F, C>(self, items: I, f: F) -> Self
    where I: IntoIterator,
          F: FnMut(I::Item) -> C,
          C: Into<Child>
    {
        self.add_children(items.into_iter().map(f))
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    // ---- slots -----------------------------------------------------

    pub fn declare_slot(mut self, slot: Slot) -> Self {
        self.slots.declare(slot);
        self
    }

    /// Appends to the content of slot `name`, declared or not.
    pub fn fill_slot<T, I>(mut self, name: T, items: I) -> Self
    where KString: MyFrom<T>,
          I: IntoIterator,
          I::Item: Into<Child>
    {
        self.slots.fill(name, items);
        self
    }

    /// Declares `slot` and places a reference to it as the next child.
    pub fn add_slot(mut self, slot: Slot) -> Self {
        let slot = Rc::new(slot);
        self.slots.declare((*slot).clone());
        self.children.push(slot);
        self
    }

    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    pub(crate) fn label(&self) -> &str {
        self.name().unwrap_or("<unnamed>")
    }
}
