use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::info;
use log::warn;

/// Collects the durations of named stages, for example the construction of
/// the NFA and its determinization.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, f32)>>>,
}

/// Measures the time between its creation and the call to `finish()`. A timer
/// that is dropped without being finished records nothing.
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, f32)>>>,
    registered: bool,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer with the given name.
    pub fn start(&mut self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the finished timers as (name, seconds) pairs, in the order in
    /// which they were finished.
    pub fn results(&self) -> Vec<(String, f32)> {
        self.results.borrow().clone()
    }
}

impl Timer {
    /// Finishes the timer and registers the result.
    pub fn finish(&mut self) {
        let time = self.start.elapsed().as_secs_f64();
        info!("Time {}: {:.3}s", self.name, time);

        self.results.borrow_mut().push((self.name.clone(), time as f32));
        self.registered = true
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.registered {
            warn!("Timer {} was dropped before 'finish()'", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_timing_records_finished_timers() {
        let mut timing = Timing::new();

        let mut first = timing.start("first");
        first.finish();

        // Never finished, so it must not show up.
        drop(timing.start("dropped"));

        let mut second = timing.start("second");
        second.finish();

        let names: Vec<String> = timing.results().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["first".to_string(), "second".to_string()]);
    }
}
