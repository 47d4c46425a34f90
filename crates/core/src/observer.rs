/// Watches the events `E` of a solver and may answer with an action `A`.
///
/// `None` lets the solver carry on. Any `FnMut(&E) -> Option<A>` closure is an
/// observer, and `()` is one that never acts.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
