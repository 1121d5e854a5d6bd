use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use chrono::NaiveDate;

/// Milliseconds on a monotonic session clock.
pub type Millis = u64;

/// Source of session time and the calendar date used to stamp reviews.
pub trait Clock {
    /// Milliseconds elapsed since the clock's origin. Never decreases.
    fn now_ms(&self) -> Millis;

    /// Today's calendar date in the local time zone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock backed by `Instant` for elapsed time and the local date.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Externally driven clock. Clones share the same time, so a host (or a
/// test) can keep a handle and push timestamps while the controller reads
/// them, e.g. feeding `performance.now()` from a browser event loop.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
    today: Rc<Cell<NaiveDate>>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            today: Rc::new(Cell::new(today)),
        }
    }

    /// Move the clock to `now`. Earlier timestamps are ignored so time
    /// stays monotonic.
    pub fn set(&self, now: Millis) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}
