//! Work scheduled against a page that may be gone by the time it runs.
//!
//! A [`DeferredAction`] keeps only a [`Weak`] handle to its target. If the
//! user navigated away and the page was dropped, firing does nothing.

use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

type Action<P> = Box<dyn FnOnce(&mut P) + Send>;

/// A one-shot action bound weakly to a shared target.
pub struct DeferredAction<P> {
    target: Weak<Mutex<P>>,
    action: Action<P>,
    delay: Duration,
}

impl<P: Send + 'static> DeferredAction<P> {
    pub fn new(
        target: &Arc<Mutex<P>>,
        delay: Duration,
        action: impl FnOnce(&mut P) + Send + 'static,
    ) -> Self {
        Self {
            target: Arc::downgrade(target),
            action: Box::new(action),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the target is still alive.
    pub fn is_live(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Run now. Returns `false` if the target was dropped or its lock is
    /// poisoned.
    pub fn fire(self) -> bool {
        let Some(target) = self.target.upgrade() else {
            tracing::debug!("deferred action dropped, target gone");
            return false;
        };
        let Ok(mut guard) = target.lock() else {
            tracing::warn!("deferred action skipped, target lock poisoned");
            return false;
        };
        (self.action)(&mut *guard);
        true
    }

    /// Run on a background thread after the configured delay.
    pub fn spawn(self) -> JoinHandle<bool> {
        thread::spawn(move || {
            thread::sleep(self.delay);
            self.fire()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdScheme;
    use crate::list::ListPage;
    use crate::models::{Bed, BedStatus};
    use chrono::NaiveDate;

    fn bed_page() -> Arc<Mutex<ListPage<Bed>>> {
        let mut bed = Bed::new("General".into(), "101".into(), "standard".into());
        bed.id = "B001".into();
        Arc::new(Mutex::new(ListPage::in_memory(IdScheme::Sequential, vec![bed])))
    }

    fn booking(page: &Arc<Mutex<ListPage<Bed>>>, delay: Duration) -> DeferredAction<ListPage<Bed>> {
        let on = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        DeferredAction::new(page, delay, move |p: &mut ListPage<Bed>| {
            let _ = p.assign_bed("B001", "Ann Lee".into(), on);
        })
    }

    #[test]
    fn test_fires_against_live_page() {
        let page = bed_page();
        let action = booking(&page, Duration::ZERO);

        assert!(action.is_live());
        assert!(action.fire());

        let page = page.lock().unwrap();
        let bed = page.get("B001").unwrap().unwrap();
        assert_eq!(bed.status, BedStatus::Occupied);
    }

    #[test]
    fn test_navigated_away_is_noop() {
        let page = bed_page();
        let action = booking(&page, Duration::from_millis(5));
        drop(page);

        assert!(!action.is_live());
        assert!(!action.fire());
    }

    #[test]
    fn test_spawn_after_delay() {
        let page = bed_page();
        let handle = booking(&page, Duration::from_millis(10)).spawn();

        assert!(handle.join().unwrap());
        let page = page.lock().unwrap();
        assert_eq!(page.get("B001").unwrap().unwrap().patient_name.as_deref(), Some("Ann Lee"));
    }

    #[test]
    fn test_spawn_after_drop_reports_false() {
        let page = bed_page();
        let handle = booking(&page, Duration::from_millis(20)).spawn();
        drop(page);

        assert!(!handle.join().unwrap());
    }
}
