//! Rendering component trees, either buffered into a `String` or
//! streamed into a `Sink`.

use std::{io::Write, rc::Rc};

use anyhow::Result;
use kstring::KString;

use crate::{component::Component,
            node::{Child, Procedure},
            sink::{Sink, IoSink, capture},
            template,
            walker::walk,
            trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Output is accumulated and returned as a string.
    Buffered,
    /// Output goes straight to the caller's sink.
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Opening,
    WalkingChildren,
    Closing,
    Done,
}

/// One render pass over one component. All state of the pass lives
/// here and in the arguments, never in the component, so a component
/// may be rendered re-entrantly (it may appear in its own slot
/// content, or be rendered from within a procedure).
pub(crate) struct Executor<'c> {
    component: &'c Component,
    mode: Mode,
    state: RenderState,
    // Names of the slots currently being resolved, innermost last.
    resolving: Vec<KString>,
}

impl<'c> Executor<'c> {
    pub(crate) fn new(component: &'c Component, mode: Mode) -> Self {
        Executor {
            component,
            mode,
            state: RenderState::Idle,
            resolving: Vec::new(),
        }
    }

    fn enter(&mut self, state: RenderState) {
        trace!("{} ({:?}): {:?} -> {:?}",
               self.component.label(), self.mode, self.state, state);
        self.state = state;
    }

    pub(crate) fn execute(&mut self, out: &mut dyn Sink) -> Result<()> {
        debug_assert_eq!(self.state, RenderState::Idle);
        let component = self.component;

        self.enter(RenderState::Opening);
        out.emit(&template::wrapper_opener(component.wrapper(),
                                           component.classes(),
                                           component.attributes()))?;

        self.enter(RenderState::WalkingChildren);
        walk(component.children(), "", &mut |child, path| {
            self.dispatch(child, path, out)
        })?;

        self.enter(RenderState::Closing);
        out.emit(template::wrapper_closer(component.wrapper()))?;

        self.enter(RenderState::Done);
        Ok(())
    }

    fn dispatch(&mut self, child: &Child, path: &str, out: &mut dyn Sink) -> Result<()> {
        trace!("{}: child {path} is {}", self.component.label(), child.kind_name());
        let component = self.component;
        match child {
            // Slots bring their own wrapper
            Child::Slot(slot) => component.slots().resolve(slot, self, out),
            _ => {
                let children_wrapper = component.children_wrapper();
                out.emit(template::children_opener(children_wrapper))?;
                self.emit_item(child, out)?;
                out.emit(template::children_closer(children_wrapper))
            }
        }
    }

    /// Emit a single child or slot content item without any wrapping.
    pub(crate) fn emit_item(&mut self, item: &Child, out: &mut dyn Sink) -> Result<()> {
        match item {
            Child::Text(s) => out.emit(s),
            Child::Component(c) => self.emit_component(c, out),
            Child::Procedure(p) => self.emit_procedure(p, out),
            Child::Slot(slot) => {
                let component = self.component;
                component.slots().resolve(slot, self, out)
            }
            // No output of their own
            Child::List(_) | Child::None => Ok(()),
        }
    }

    // The mode of this pass carries over to the whole subtree.
    fn emit_component(&mut self, c: &Rc<Component>, out: &mut dyn Sink) -> Result<()> {
        match self.mode {
            Mode::Buffered => out.emit(&c.render()?),
            Mode::Streaming => c.print(out),
        }
    }

    fn emit_procedure(&mut self, p: &Procedure, out: &mut dyn Sink) -> Result<()> {
        match self.mode {
            Mode::Buffered => out.emit(&capture(|buf| p.call(buf))?),
            Mode::Streaming => p.call(out),
        }
    }

    pub(crate) fn is_resolving(&self, name: &KString) -> bool {
        self.resolving.contains(name)
    }

    pub(crate) fn push_resolving(&mut self, name: KString) {
        self.resolving.push(name);
    }

    pub(crate) fn pop_resolving(&mut self) {
        self.resolving.pop();
    }
}


impl Component {
    /// Render into a new string. Child components are rendered the
    /// same way, procedures get a capture buffer.
    pub fn render(&self) -> Result<String> {
        let mut buf = String::new();
        Executor::new(self, Mode::Buffered).execute(&mut buf)?;
        Ok(buf)
    }

    /// Stream into `out`. Child components and procedures write into
    /// the same sink.
    pub fn print(&self, out: &mut dyn Sink) -> Result<()> {
        Executor::new(self, Mode::Streaming).execute(out)
    }

    pub fn print_to(&self, out: &mut impl Write) -> Result<()> {
        self.print(&mut IoSink::new(out))
    }

    /// Render in the given mode, returning the output either way.
    pub fn render_in(&self, mode: Mode) -> Result<String> {
        match mode {
            Mode::Buffered => self.render(),
            Mode::Streaming => capture(|out| self.print(out)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use anyhow::bail;

    use super::*;
    use crate::{node::Children, slot::Slot};

    const MODES: [Mode; 2] = [Mode::Buffered, Mode::Streaming];

    /// Render in both modes, check they agree, return the output.
    fn t(c: &Component) -> String {
        let buffered = c.render().unwrap();
        let streamed = c.render_in(Mode::Streaming).unwrap();
        assert_eq!(buffered, streamed);
        buffered
    }

    #[test]
    fn t_wrapper_only() {
        assert_eq!(t(&Component::new("<div>%children%</div>")), "<div></div>");
        assert_eq!(t(&Component::new("<div>%children%")), "<div>");
        assert_eq!(t(&Component::new("")), "");
    }

    #[test]
    fn t_children_wrapper_per_child() {
        let c = Component::new("<ul>%children%</ul>")
            .set_children_wrapper("<li>%child%</li>")
            .add_children(["A", "B"]);
        assert_eq!(t(&c), "<ul><li>A</li><li>B</li></ul>");
    }

    #[test]
    fn t_classes_and_attributes() {
        let c = Component::new("<a class=\"%classes%\"%attributes%>%children%</a>")
            .set_attribute("href", "/x")
            .set_attribute("target", "_blank")
            .add_child("go");
        assert_eq!(t(&c), "<a href=\"/x\" target=\"_blank\">go</a>");
        let c = c.add_class("btn");
        assert_eq!(t(&c), "<a class=\"btn\" href=\"/x\" target=\"_blank\">go</a>");
    }

    #[test]
    fn t_button_without_classes() {
        let c = Component::new("<button class=\"%classes%\">%children%</button>")
            .add_child("OK");
        assert_eq!(t(&c), "<button>OK</button>");
    }

    #[test]
    fn t_text_not_escaped() {
        let c = Component::default().add_child("<b>&</b>");
        assert_eq!(t(&c), "<b>&</b>");
    }

    #[test]
    fn t_nested_components() {
        let item = Component::new("<span>%children%</span>").add_child("x").into_rc();
        let c = Component::new("<p>%children%</p>")
            .set_children_wrapper("[%child%]")
            .add_child(item.clone())
            .add_child("-")
            .add_child(item);
        assert_eq!(t(&c), "<p>[<span>x</span>][-][<span>x</span>]</p>");
    }

    #[test]
    fn t_procedures() {
        let counter = Rc::new(Cell::new(0));
        let counter2 = counter.clone();
        let c = Component::new("<div>%children%</div>")
            .set_children_wrapper("<i>%child%</i>")
            .add_child(Child::procedure(move |out| {
                counter2.set(counter2.get() + 1);
                out.emit("dyn")?;
                out.emit("amic")
            }));
        assert_eq!(c.render().unwrap(), "<div><i>dynamic</i></div>");
        let mut buf = String::new();
        c.print(&mut buf).unwrap();
        assert_eq!(buf, "<div><i>dynamic</i></div>");
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn t_procedure_error_passes_through() {
        let c = Component::new("<div>%children%</div>")
            .add_child("before")
            .add_child(Child::procedure(|_| bail!("procedure failed")))
            .add_child(Child::procedure(|_| panic!("not reached")));
        for mode in MODES {
            let e = c.render_in(mode).unwrap_err();
            assert_eq!(e.to_string(), "procedure failed");
        }
        // also from deep inside a subtree
        let outer = Component::default().add_child(Component::default().add_child(c));
        assert_eq!(outer.render().unwrap_err().to_string(), "procedure failed");
    }

    #[test]
    fn t_nested_list_and_none() {
        let mut list = Children::new();
        list.push("y");
        list.push(Child::None);
        let c = Component::new("<ul>%children%</ul>")
            .set_children_wrapper("<li>%child%</li>")
            .add_child("x")
            .add_child(list);
        // the list itself gets an empty wrapper, then its entries follow
        assert_eq!(t(&c), "<ul><li>x</li><li></li><li>y</li><li></li></ul>");
    }

    #[test]
    fn t_empty_slot() {
        let c = Component::new("<main>%children%</main>")
            .add_slot(Slot::new("aside").wrapper("<aside>%slot%</aside>"));
        assert_eq!(t(&c), "<main></main>");
        let c = c.declare_slot(Slot::new("aside")
                               .wrapper("<aside>%slot%</aside>")
                               .preserve(true));
        assert_eq!(t(&c), "<main><aside></aside></main>");
    }

    #[test]
    fn t_slot_content() {
        let c = Component::default()
            .set_children_wrapper("<li>%child%</li>")
            .fill_slot("s", ["a"])
            .add_slot(Slot::new("s").wrapper("<x>%slot%</x>"))
            .fill_slot("s", ["b"]);
        // slots are not wrapped by the children wrapper
        assert_eq!(t(&c), "<x>ab</x>");
    }

    #[test]
    fn t_slot_without_wrapper_or_declaration() {
        let c = Component::new("<div>%children%</div>")
            .add_child(Slot::new("free"))
            .fill_slot("free", ["one", "two"]);
        assert_eq!(t(&c), "<div>onetwo</div>");
    }

    #[test]
    fn t_slot_declared_after_reference() {
        let c = Component::default()
            .add_child(Slot::new("s").wrapper("<old>%slot%</old>"))
            .fill_slot("s", ["v"])
            .declare_slot(Slot::new("s").wrapper("<new>%slot%</new>"));
        assert_eq!(t(&c), "<new>v</new>");
    }

    #[test]
    fn t_slot_mixed_content() {
        let c = Component::default()
            .add_slot(Slot::new("main").wrapper("<main>%slot%</main>"))
            .declare_slot(Slot::new("note").wrapper("<small>%slot%</small>"))
            .fill_slot("note", ["n"])
            .fill_slot::<_, [Child; 4]>("main", [
                Child::text("t"),
                Component::new("<b>%children%</b>").add_child("c").into(),
                Child::procedure(|out| out.emit("p")),
                Slot::new("note").into(),
            ]);
        assert_eq!(t(&c), "<main>t<b>c</b>p<small>n</small></main>");
    }

    #[test]
    fn t_slot_self_reference_skipped() {
        let c = Component::default()
            .add_slot(Slot::new("loop").wrapper("(%slot%)"))
            .fill_slot("loop", [Child::text("x"), Slot::new("loop").into()]);
        assert_eq!(t(&c), "(x)");
    }

    #[test]
    fn t_slot_marker_once() {
        let c = Component::default()
            .add_slot(Slot::new("s").wrapper("<x>%slot%|%slot%</x>"))
            .fill_slot("s", ["v"]);
        assert_eq!(t(&c), "<x>v|%slot%</x>");
    }

    #[test]
    fn t_idempotent() {
        let c = Component::new("<div class=\"%classes%\">%children%</div>")
            .add_class("c")
            .set_children_wrapper("<p>%child%</p>")
            .add_slot(Slot::new("s").wrapper("<s>%slot%</s>"))
            .fill_slot("s", ["slotted"])
            .add_child("text");
        let first = c.render().unwrap();
        assert_eq!(first, c.render().unwrap());
        assert_eq!(first, "<div class=\"c\"><s>slotted</s><p>text</p></div>");
    }

    #[test]
    fn t_print_to_writer() -> Result<()> {
        let c = Component::new("<p>%children%</p>")
            .add_child(Component::new("<em>%children%</em>")
                       .add_child(Child::procedure(|out| out.emit("ö"))));
        let mut v: Vec<u8> = Vec::new();
        c.print_to(&mut v)?;
        assert_eq!(String::from_utf8(v)?, "<p><em>ö</em></p>");
        Ok(())
    }

    #[test]
    fn t_reentrant_render_from_procedure() {
        let inner = Component::new("<i>%children%</i>").add_child("in").into_rc();
        let inner2 = inner.clone();
        let c = Component::new("<p>%children%</p>")
            .add_child(Child::procedure(move |out| {
                let s = inner2.render()?;
                out.emit(&s)
            }))
            .add_child(inner);
        assert_eq!(t(&c), "<p><i>in</i><i>in</i></p>");
    }

    #[test]
    fn t_executor_states() -> Result<()> {
        let c = Component::new("<a>%children%</a>");
        let mut exec = Executor::new(&c, Mode::Buffered);
        assert_eq!(exec.state, RenderState::Idle);
        let mut buf = String::new();
        exec.execute(&mut buf)?;
        assert_eq!(exec.state, RenderState::Done);
        Ok(())
    }
}
