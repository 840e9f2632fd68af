//! Explicit subscription interface for "attendance updated" signals.

use chrono::NaiveDate;

/// Something that wants to re-derive its view after an attendance mutation.
pub trait AttendanceObserver {
    fn attendance_updated(&self, staff_id: &str, date: NaiveDate);
}

#[derive(Default)]
pub struct Notifier {
    observers: Vec<Box<dyn AttendanceObserver>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn AttendanceObserver>) {
        self.observers.push(observer);
    }

    /// Called once per successful mutation, after it has been committed.
    pub fn notify(&self, staff_id: &str, date: NaiveDate) {
        for obs in &self.observers {
            obs.attendance_updated(staff_id, date);
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::AttendanceObserver;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Observer that records every notification it receives.
    #[derive(Clone, Default)]
    pub struct Recorder {
        pub seen: Rc<RefCell<Vec<(String, NaiveDate)>>>,
    }

    impl AttendanceObserver for Recorder {
        fn attendance_updated(&self, staff_id: &str, date: NaiveDate) {
            self.seen.borrow_mut().push((staff_id.to_string(), date));
        }
    }

    impl Recorder {
        pub fn count(&self) -> usize {
            self.seen.borrow().len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::Recorder;
    use super::*;

    #[test]
    fn every_subscriber_is_notified() {
        let a = Recorder::default();
        let b = Recorder::default();
        let mut notifier = Notifier::new();
        notifier.subscribe(Box::new(a.clone()));
        notifier.subscribe(Box::new(b.clone()));

        let d = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        notifier.notify("alice", d);

        assert_eq!(a.count(), 1);
        assert_eq!(b.seen.borrow()[0], ("alice".to_string(), d));
    }
}
