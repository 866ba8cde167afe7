// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, OffsetDateTime};

/// Wall-clock capability injected into the engine.
///
/// Window-position decisions (submission eligibility, cancellation paths)
/// depend on "now"; injecting the clock keeps those decisions
/// deterministic in tests.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;

    /// Returns the current date.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Clock backed by the system UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
