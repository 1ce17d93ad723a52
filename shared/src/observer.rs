use crate::Component;

/// Local consumer of a component's update stream.
///
/// Observers only drive local effects (UI, animation); they never mutate
/// replicated state or send traffic.
pub trait Observer<C: Component> {
    /// Called with the new value after each update to the observed component
    fn on_update(&mut self, value: &C);
}
