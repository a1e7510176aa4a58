//! Change detector.
//!
//! A pure function of (retained state, new totals, monitoring flag). It
//! decides which notifications a cycle produces and returns the state for
//! the next cycle; it never performs I/O.
//!
//! Rules, in order:
//! 1. The startup notification goes out once, unless it was already
//!    delivered (`announced`).
//! 2. First cycle: no balance notification, the totals become the
//!    baseline. Otherwise, when monitoring is enabled and the combined total moved,
//!    each class that changed gets its own notification.
//! 3. The new totals always replace the retained ones.
//!
//! Because of the combined-total gate in rule 2, two classes moving by
//! offsetting amounts produce no notification at all.

use crate::types::{AggregateTotals, MonitorState, Notification};

/// Outcome of comparing one cycle against the retained state.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub notifications: Vec<Notification>,
    pub state: MonitorState,
}

pub fn detect(state: MonitorState, new: AggregateTotals, monitoring_enabled: bool) -> Detection {
    let old = state.previous;
    let mut notifications = Vec::new();

    if !state.announced {
        notifications.push(Notification::Startup);
    }

    let gated = !state.first_cycle && monitoring_enabled;
    if gated && new.combined() != old.combined() {
        if new.public != old.public {
            notifications.push(Notification::PublicChanged {
                old: old.public,
                new: new.public,
            });
        }
        if new.shielded != old.shielded {
            notifications.push(Notification::ShieldedChanged {
                old: old.shielded,
                new: new.shielded,
            });
        }
    }

    Detection {
        notifications,
        state: MonitorState {
            previous: new,
            first_cycle: false,
            announced: true,
        },
    }
}
