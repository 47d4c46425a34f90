/// Behavior for query points outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Extrapolate<T> {
    /// Move the query point onto the nearest grid edge.
    Clamp,
    /// Return this value.
    Fill(T),
    /// Fail with an interpolation error.
    #[default]
    Error,
}

impl<T> From<Extrapolate<T>> for ninterp::interpolator::Extrapolate<T> {
    fn from(value: Extrapolate<T>) -> Self {
        use ninterp::interpolator::Extrapolate as Backend;

        match value {
            Extrapolate::Clamp => Backend::Clamp,
            Extrapolate::Fill(fill) => Backend::Fill(fill),
            Extrapolate::Error => Backend::Error,
        }
    }
}
