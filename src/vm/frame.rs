use std::collections::HashMap;

use super::value::Value;

/// Index of a frame in its [`FrameStack`].
///
/// Links always point below the owning frame, so an id stays valid for as
/// long as the frame that recorded it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(usize);

/// One frame of the call stack.
///
/// `parent` is the scope link used by named-value resolution; `previous` is
/// the frame that receives this frame's return value. The two differ for
/// function calls, where the parent skips the caller so the callee never
/// resolves names against the call site's locals.
#[derive(Debug)]
pub struct StackFrame {
    values: Vec<Value>,
    named: HashMap<String, Value>,
    markers: HashMap<String, usize>,
    parent: Option<FrameId>,
    previous: Option<FrameId>,
    return_offset: Option<usize>,
}

impl StackFrame {
    fn empty(
        parent: Option<FrameId>,
        previous: Option<FrameId>,
        return_offset: Option<usize>,
    ) -> Self {
        StackFrame {
            values: Vec::new(),
            named: HashMap::new(),
            markers: HashMap::new(),
            parent,
            previous,
            return_offset,
        }
    }

    /// The bottom frame. Exists to receive `main`'s return value.
    pub fn global() -> Self {
        StackFrame::empty(None, None, None)
    }

    /// A block frame sharing the current frame's scope. Returning from it
    /// resumes right after the `RET`, so it carries no return offset.
    pub fn nested(current: FrameId) -> Self {
        StackFrame::empty(Some(current), Some(current), None)
    }

    /// A function frame. The parent is the caller's own parent, which keeps
    /// the callee's scope rooted where functions are defined rather than at
    /// the call site.
    pub fn call(parent: Option<FrameId>, caller: FrameId, return_offset: usize) -> Self {
        StackFrame::empty(parent, Some(caller), Some(return_offset))
    }

    pub fn push_value(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn pop_value(&mut self) -> Option<Value> {
        self.values.pop()
    }

    pub fn peek_value(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Binds directly in this frame, without the ancestor walk. Used for
    /// call arguments.
    pub fn bind(&mut self, name: String, value: Value) {
        self.named.insert(name, value);
    }

    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    pub fn previous(&self) -> Option<FrameId> {
        self.previous
    }

    pub fn return_offset(&self) -> Option<usize> {
        self.return_offset
    }
}

/// The call stack. The current frame is the last one pushed.
///
/// Never empty: the global frame is seeded at construction and [`pop`] never
/// removes it.
///
/// [`pop`]: FrameStack::pop
#[derive(Debug)]
pub struct FrameStack {
    frames: Vec<StackFrame>,
}

impl FrameStack {
    pub fn new() -> Self {
        FrameStack {
            frames: vec![StackFrame::global()],
        }
    }

    /// Number of live frames, the global frame included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_id(&self) -> FrameId {
        FrameId(self.frames.len() - 1)
    }

    fn current(&self) -> &StackFrame {
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut StackFrame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn get(&self, id: FrameId) -> &StackFrame {
        &self.frames[id.0]
    }

    pub fn get_mut(&mut self, id: FrameId) -> &mut StackFrame {
        &mut self.frames[id.0]
    }

    pub fn push(&mut self, frame: StackFrame) -> FrameId {
        self.frames.push(frame);
        self.current_id()
    }

    /// Pops the current frame. The global frame stays put.
    pub fn pop(&mut self) -> Option<StackFrame> {
        if self.frames.len() <= 1 {
            return None;
        }
        self.frames.pop()
    }

    pub fn push_value(&mut self, value: Value) {
        self.current_mut().push_value(value);
    }

    pub fn pop_value(&mut self) -> Option<Value> {
        self.current_mut().pop_value()
    }

    pub fn peek_value(&self) -> Option<&Value> {
        self.current().peek_value()
    }

    /// Resolves a name against the current frame, then up the parent chain.
    pub fn read_named(&self, name: &str) -> Option<&Value> {
        let mut cursor = Some(self.current_id());
        while let Some(id) = cursor {
            let frame = &self.frames[id.0];
            if let Some(value) = frame.named.get(name) {
                return Some(value);
            }
            cursor = frame.parent;
        }
        None
    }

    /// Writes a name into the nearest ancestor that already binds it, so a
    /// reassignment inside a nested block lands in the frame that declared
    /// the variable. Without an owning ancestor the binding is local.
    pub fn write_named(&mut self, name: &str, value: Value) {
        let mut cursor = self.current().parent;
        while let Some(id) = cursor {
            if self.frames[id.0].named.contains_key(name) {
                self.frames[id.0].named.insert(name.to_string(), value);
                return;
            }
            cursor = self.frames[id.0].parent;
        }
        self.current_mut().bind(name.to_string(), value);
    }

    /// Records a jump target in the current frame. Markers are frame-local;
    /// a marker jump never consults ancestors.
    pub fn record_marker(&mut self, name: String, offset: usize) {
        self.current_mut().markers.insert(name, offset);
    }

    pub fn marker(&self, name: &str) -> Option<usize> {
        self.current().markers.get(name).copied()
    }
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;
