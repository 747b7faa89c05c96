/// A lightweight, serializable snapshot of the window bookkeeping.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`. Pass it to
/// [`crate::Window::restore`] to bring a rebuilt list back to the same window and selection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSnapshot {
    pub start: usize,
    pub pool_len: usize,
    pub count: usize,
    pub selected: Option<usize>,
    pub total_extent: f32,
}
