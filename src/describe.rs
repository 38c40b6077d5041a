//! Declarative page descriptions in JSON, turned into component
//! trees.

use std::{path::{Path, PathBuf}, rc::Rc};

use acomponent::{Child, Children, Component, Slot};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("can't read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid page description{}: {source}", in_path(.path))]
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

fn in_path(path: &Option<PathBuf>) -> String {
    path.as_ref().map(|p| format!(" in {p:?}")).unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentDesc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub wrapper: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub children_wrapper: Option<String>,
    pub slots: Vec<SlotDesc>,
    pub children: Vec<ChildDesc>,
    pub fill: Vec<FillDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDesc {
    pub name: String,
    #[serde(default)]
    pub wrapper: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preserve: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FillDesc {
    pub slot: String,
    pub items: Vec<ChildDesc>,
}

/// `null`, a string, an array, `{"component": {..}}` or
/// `{"slot": "name"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChildDesc {
    None,
    Text(String),
    List(Vec<ChildDesc>),
    Component { component: Box<ComponentDesc> },
    Slot { slot: String },
}

impl From<&SlotDesc> for Slot {
    fn from(desc: &SlotDesc) -> Self {
        let slot = Slot::new(&desc.name)
            .description(&desc.description)
            .preserve(desc.preserve);
        match &desc.wrapper {
            Some(w) => slot.wrapper(w),
            None => slot,
        }
    }
}

impl From<&ChildDesc> for Child {
    fn from(desc: &ChildDesc) -> Self {
        match desc {
            ChildDesc::None => Child::None,
            ChildDesc::Text(s) => Child::text(s),
            ChildDesc::List(items) =>
                Child::List(items.iter().map(Child::from).collect::<Children>()),
            ChildDesc::Component { component } =>
                Child::Component(Rc::new(component.to_component())),
            // Metadata comes from the declaration in the enclosing component
            ChildDesc::Slot { slot } => Child::Slot(Rc::new(Slot::new(slot))),
        }
    }
}

impl ComponentDesc {
    pub fn to_component(&self) -> Component {
        let mut c = Component::default();
        if let Some(name) = &self.name {
            c = c.set_name(name);
        }
        if let Some(description) = &self.description {
            c = c.set_description(description);
        }
        if let Some(wrapper) = &self.wrapper {
            c = c.set_wrapper(wrapper);
        }
        if let Some(children_wrapper) = &self.children_wrapper {
            c = c.set_children_wrapper(children_wrapper);
        }
        c = c.set_classes(&self.classes)
            .set_attributes(self.attributes.iter().map(|(k, v)| (k, v)));
        for slot in &self.slots {
            c = c.declare_slot(slot.into());
        }
        c = c.add_children(self.children.iter().map(Child::from));
        for fill in &self.fill {
            c = c.fill_slot(&fill.slot, fill.items.iter().map(Child::from));
        }
        c
    }
}

fn parse(s: &str, path: Option<&Path>) -> Result<Rc<Component>, LoadError> {
    let desc: ComponentDesc = serde_json::from_str(s)
        .map_err(|source| LoadError::Json {
            path: path.map(Path::to_path_buf),
            source
        })?;
    Ok(Rc::new(desc.to_component()))
}

pub fn from_json_str(s: &str) -> Result<Rc<Component>, LoadError> {
    parse(s, None)
}

pub fn load_file(path: &Path) -> Result<Rc<Component>, LoadError> {
    let s = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_owned(), source })?;
    parse(&s, Some(path))
}
