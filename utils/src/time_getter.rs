use std::sync::Arc;

use crate::time::{self, Time};

pub trait TimeGetterFn: Send + Sync {
    fn get_time(&self) -> Time;
}

impl<F> TimeGetterFn for F
where
    F: Fn() -> Time + Send + Sync,
{
    fn get_time(&self) -> Time {
        self()
    }
}

/// Source of the current time for the views; tests swap in a controlled clock
#[derive(Clone)]
pub struct TimeGetter {
    f: Arc<dyn TimeGetterFn>,
}

impl TimeGetter {
    #[must_use]
    pub fn new(f: Arc<dyn TimeGetterFn>) -> Self {
        Self { f }
    }

    #[must_use]
    pub fn get_time(&self) -> Time {
        self.f.get_time()
    }

    #[must_use]
    pub fn getter(&self) -> &dyn TimeGetterFn {
        &*self.f
    }
}

impl Default for TimeGetter {
    fn default() -> Self {
        Self::new(Arc::new(time::get_time))
    }
}
