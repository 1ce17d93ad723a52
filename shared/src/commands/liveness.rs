use std::{cell::Cell, rc::Rc};

use log::debug;

/// Shared flag marking whether the context that issued a command still cares
/// about its outcome.
///
/// Continuations wrapped with [`Liveness::guard`] are dropped silently once
/// the owner calls [`Liveness::kill`].
#[derive(Clone, Debug)]
pub struct Liveness {
    alive: Rc<Cell<bool>>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn kill(&self) {
        self.alive.set(false);
    }

    pub fn guard<T, F>(&self, context: &'static str, f: F) -> impl FnOnce(T)
    where
        F: FnOnce(T),
    {
        let liveness = self.clone();
        move |value| {
            if liveness.is_alive() {
                f(value);
            } else {
                debug!("{}: owner torn down, ignoring late resolution", context);
            }
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
