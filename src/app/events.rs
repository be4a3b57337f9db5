//! Outbound application events.
//!
//! The [`AlarmSystem`](super::service::AlarmSystem) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them.

use crate::alarm::DisarmSource;
use crate::event_log::EventRecord;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The alarm system has started.
    Started,

    /// The alarm went from OFF to ON. Carries the latched sub-alarms.
    AlarmRaised { gas: bool, over_temp: bool },

    /// A correct code turned the alarm OFF.
    AlarmCleared(DisarmSource),

    /// A wrong code was entered.
    IncorrectCode { source: DisarmSource, attempts: u32 },

    /// The keypad disarm path has been locked.
    LockedOut { attempts: u32 },

    /// A record was appended to the event log.
    Logged(EventRecord),

    /// The wall clock was set from the console.
    ClockSet(i64),

    /// A new code was typed but not stored.
    CodeChangeDiscarded,

    /// Console date entry was rejected; the clock is unchanged.
    ClockEntryRejected,
}
