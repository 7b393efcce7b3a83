//! Step notifications for front-ends

use tracing::info;

type StepFn = Box<dyn Fn(&str)>;

/// Forwards human-readable step messages to an optional listener
#[derive(Default)]
pub struct Progress {
    listener: Option<StepFn>,
}

impl Progress {
    pub fn new(listener: impl Fn(&str) + 'static) -> Self {
        Self {
            listener: Some(Box::new(listener)),
        }
    }

    pub fn step(&self, message: &str) {
        info!("{}", message);
        if let Some(listener) = &self.listener {
            listener(message);
        }
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
