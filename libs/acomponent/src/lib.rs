//! Markup from component trees.

//! A `Component` wraps an ordered, keyed list of children (literal
//! text, other components, procedures run at render time, nested
//! lists, and references to named slots) in a marker based template.
//! Rendering happens either buffered (`Component::render`, returning
//! a `String`) or streaming (`Component::print`, writing into a
//! `Sink`); both give the same output.
//!
//! Nothing is escaped: text and attribute values are inserted
//! literally.

pub mod myfrom;
pub mod trace;
pub mod sink;
pub mod node;
pub mod template;
pub mod walker;
pub mod slot;
pub mod component;
pub mod render;

pub use component::Component;
pub use node::{Child, Children, Procedure};
pub use render::{Mode, RenderState};
pub use sink::{Sink, IoSink, capture};
pub use slot::{Slot, SlotRegistry};
pub use walker::walk;
