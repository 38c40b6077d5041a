//! Named slots: placeholders whose content is supplied separately
//! from their declaration, and the per-component registry holding
//! both.

use std::collections::HashMap;

use anyhow::Result;
use kstring::KString;

use crate::{myfrom::{MyFrom, ks},
            node::Child,
            render::Executor,
            sink::Sink,
            template,
            trace, warn};

#[derive(Debug, Clone)]
pub struct Slot {
    name: KString,
    /// Template with a `%slot%` marker; without one, content is
    /// emitted as is.
    wrapper: Option<KString>,
    description: KString,
    /// Render the wrapper even when there is no content.
    preserve: bool,
}

impl Slot {
    pub fn new<T>(name: T) -> Self
    where KString: MyFrom<T>
    {
        Slot {
            name: ks(name),
            wrapper: None,
            description: KString::from_static(""),
            preserve: false,
        }
    }

    pub fn wrapper<T>(mut self, wrapper: T) -> Self
    where KString: MyFrom<T>
    {
        self.wrapper = Some(ks(wrapper));
        self
    }

    pub fn description<T>(mut self, description: T) -> Self
    where KString: MyFrom<T>
    {
        self.description = ks(description);
        self
    }

    pub fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    pub fn name(&self) -> &KString { &self.name }
    pub fn wrapper_template(&self) -> Option<&KString> { self.wrapper.as_ref() }
    pub fn description_text(&self) -> &KString { &self.description }
    pub fn is_preserved(&self) -> bool { self.preserve }
}


/// Declared slots and their accumulated content. The two are
/// independent: declaring never clears content, and content can be
/// supplied for names never declared.
#[derive(Debug, Clone, Default)]
pub struct SlotRegistry {
    declared: HashMap<KString, Slot>,
    content: HashMap<KString, Vec<Child>>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last declaration of a name wins.
    pub fn declare(&mut self, slot: Slot) {
        self.declared.insert(slot.name.clone(), slot);
    }

    /// Append `items` to the content of slot `name`.
    pub fn fill<T, I>(&mut self, name: T, items: I)
    where KString: MyFrom<T>,
          I: IntoIterator,
          I::Item: Into<Child>
    {
        self.content.entry(ks(name)).or_default()
            .extend(items.into_iter().map(Into::into));
    }

    pub fn declared(&self, name: &KString) -> Option<&Slot> {
        self.declared.get(name)
    }

    pub fn content(&self, name: &KString) -> &[Child] {
        self.content.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Emit the content of the slot referenced by `slot_ref`, spliced
    /// into its wrapper. Metadata comes from the declaration of the
    /// same name if there is one.
    pub(crate) fn resolve(
        &self,
        slot_ref: &Slot,
        exec: &mut Executor,
        out: &mut dyn Sink
    ) -> Result<()> {
        let slot = self.declared(&slot_ref.name).unwrap_or(slot_ref);
        let items = self.content(&slot.name);
        if items.is_empty() && !slot.preserve {
            trace!("slot {:?}: empty, omitted", slot.name.as_str());
            return Ok(())
        }
        if exec.is_resolving(&slot.name) {
            warn!("slot {:?} refers to itself through its content, skipping",
                  slot.name.as_str());
            return Ok(())
        }
        trace!("slot {:?}: {} item(s)", slot.name.as_str(), items.len());

        let (opener, closer) = match &slot.wrapper {
            Some(w) => (template::slot_opener(w), template::slot_closer(w)),
            None => ("", ""),
        };
        out.emit(opener)?;
        exec.push_resolving(slot.name.clone());
        let res = items.iter().try_for_each(|item| exec.emit_item(item, out));
        exec.pop_resolving();
        res?;
        out.emit(closer)
    }
}
