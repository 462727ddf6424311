use crate::{
    core::{DrawableId, Endpoints},
    segment::OscillationSpec,
};

/// Drawing capability consumed by the builder and the pair animator.
///
/// The five operations map 1:1 onto standard vector-graphics element
/// operations (create a line, set its endpoint attributes, toggle a hidden
/// flag, remove an element, attach an indefinitely-repeating width animation).
/// Implement it for an SVG DOM, a canvas scene graph, or any other backend.
pub trait Renderer {
    /// Create a line drawable at the given endpoints and return its handle.
    fn create_segment(&mut self, endpoints: Endpoints) -> DrawableId;

    /// Move an existing line drawable.
    fn set_endpoints(&mut self, id: DrawableId, endpoints: Endpoints);

    /// Toggle a drawable's hidden flag.
    fn set_hidden(&mut self, id: DrawableId, hidden: bool);

    /// Remove a drawable entirely (used to consume source shape markers).
    fn remove(&mut self, id: DrawableId);

    /// Attach a continuous stroke-width oscillation to a drawable.
    ///
    /// Fire-and-forget: once started it runs for the drawable's lifetime and
    /// is never cancelled. Backends without a native repeat primitive can
    /// sample [`OscillationSpec::width_at`] per frame instead.
    fn start_oscillation(&mut self, id: DrawableId, spec: OscillationSpec);
}

/// Headless backend: allocates handles and discards every drawing call.
#[derive(Debug, Default)]
pub struct NullRenderer {
    next_id: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for NullRenderer {
    fn create_segment(&mut self, _endpoints: Endpoints) -> DrawableId {
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        id
    }

    fn set_endpoints(&mut self, _id: DrawableId, _endpoints: Endpoints) {}

    fn set_hidden(&mut self, _id: DrawableId, _hidden: bool) {}

    fn remove(&mut self, _id: DrawableId) {}

    fn start_oscillation(&mut self, _id: DrawableId, _spec: OscillationSpec) {}
}
