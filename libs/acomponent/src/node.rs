//! The kinds of values a component's children list can hold.

use std::{fmt::Debug, rc::Rc};

use anyhow::Result;
use kstring::KString;

use crate::{component::Component,
            myfrom::{MyFrom, ks},
            sink::Sink,
            slot::Slot};

/// Caller logic run at render time to produce ad hoc content. Errors
/// it returns are passed through to the caller of `render`/`print`
/// unchanged.
#[derive(Clone)]
pub struct Procedure(Rc<dyn Fn(&mut dyn Sink) -> Result<()>>);

impl Procedure {
    pub fn new(f: impl Fn(&mut dyn Sink) -> Result<()> + 'static) -> Self {
        Procedure(Rc::new(f))
    }

    pub fn call(&self, out: &mut dyn Sink) -> Result<()> {
        (self.0)(out)
    }
}

impl Debug for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Procedure(..)")
    }
}


#[derive(Debug, Clone)]
pub enum Child {
    /// Emitted verbatim, without escaping.
    Text(KString),
    Component(Rc<Component>),
    Procedure(Procedure),
    /// Reference to a slot of the component holding this child.
    Slot(Rc<Slot>),
    /// A nested list; walked into, but produces no output by itself.
    List(Children),
    None,
}

impl Child {
    pub fn text<T>(s: T) -> Child
    where KString: MyFrom<T>
    {
        Child::Text(ks(s))
    }

    pub fn procedure(f: impl Fn(&mut dyn Sink) -> Result<()> + 'static) -> Child {
        Child::Procedure(Procedure::new(f))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Child::Text(_) => "text",
            Child::Component(_) => "component",
            Child::Procedure(_) => "procedure",
            Child::Slot(_) => "slot",
            Child::List(_) => "list",
            Child::None => "none",
        }
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::text(s)
    }
}
impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::text(s)
    }
}
impl From<KString> for Child {
    fn from(s: KString) -> Self {
        Child::Text(s)
    }
}
impl From<Component> for Child {
    fn from(c: Component) -> Self {
        Child::Component(Rc::new(c))
    }
}
impl From<Rc<Component>> for Child {
    fn from(c: Rc<Component>) -> Self {
        Child::Component(c)
    }
}
impl From<Slot> for Child {
    fn from(s: Slot) -> Self {
        Child::Slot(Rc::new(s))
    }
}
impl From<Rc<Slot>> for Child {
    fn from(s: Rc<Slot>) -> Self {
        Child::Slot(s)
    }
}
impl From<Procedure> for Child {
    fn from(p: Procedure) -> Self {
        Child::Procedure(p)
    }
}
impl From<Children> for Child {
    fn from(l: Children) -> Self {
        Child::List(l)
    }
}
impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(v: Option<T>) -> Self {
        v.map_or(Child::None, Into::into)
    }
}


/// An ordered list of children, each under a key unique within the
/// list. Keys end up in the correlation paths seen by `walk`.
#[derive(Debug, Clone, Default)]
pub struct Children {
    entries: Vec<(KString, Child)>,
    next_index: usize,
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append under the next free integer key.
    pub fn push(&mut self, child: impl Into<Child>) {
        let key = ks(self.next_index);
        match self.next_index.checked_add(1) {
            Some(next) => {
                self.next_index = next;
                self.entries.push((key, child.into()));
            }
            // Integer keys used up, the last one keeps being reused
            None => self.store(key, child.into()),
        }
    }

    /// Store under `key`. An existing entry with the same key keeps
    /// its position and gets its value replaced.
    pub fn insert<K>(&mut self, key: K, child: impl Into<Child>)
    where KString: MyFrom<K>
    {
        let key = ks(key);
        if let Ok(n) = key.parse::<usize>() {
            // Only canonical integers count, "01" is a string key
            if n.to_string() == key.as_str() && n >= self.next_index {
                if let Some(next) = n.checked_add(1) {
                    self.next_index = next;
                }
            }
        }
        self.store(key, child.into());
    }

    fn store(&mut self, key: KString, child: Child) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = child;
        } else {
            self.entries.push((key, child));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Child> {
        self.entries.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KString, &Child)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<C: Into<Child>> FromIterator<C> for Children {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut children = Children::new();
        for c in iter {
            children.push(c);
        }
        children
    }
}

impl<C: Into<Child>, const N: usize> From<[C; N]> for Children {
    fn from(items: [C; N]) -> Self {
        items.into_iter().collect()
    }
}
