//! Step observer trait for monitoring integration progress.

/// Trait for observing [`Model::step`](crate::Model::step).
///
/// Implement this trait to watch the integrator (e.g. for debugging or
/// profiling). All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after each fixed sub-step has been integrated.
    fn on_sub_step(&mut self, _index: usize) {}

    /// Called when the mesh transitions from moving to settled.
    fn on_settled(&mut self) {}

    /// Called once per `step` call, after all sub-steps ran.
    fn on_step_complete(&mut self, _moving: bool) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
