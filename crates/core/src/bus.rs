//! Signal bus contract between peripherals and the host simulator.
//!
//! The host delivers named input events (edge changes, byte transfers) and
//! drains output events; peripherals never talk to the host directly. Three
//! pieces make up the contract:
//!
//! - [`SignalTable`] — explicit name→handler mapping built at init time, so
//!   the host can route an event by signal name without the peripheral
//!   knowing anything about the host's IRQ machinery
//! - [`Outbox`] — queue of output-signal events raised by a peripheral,
//!   drained by the host; a raise is only queued when the line's value
//!   actually changes
//! - [`CycleTimer`] — one-shot deadline on the host's cycle clock, used for
//!   deferred work like the motor driver's standstill detection

use std::collections::VecDeque;

/// Input-signal handler: receives the event value and the host's current
/// cycle count. The optional return value is the immediate reply raised on
/// the line's paired output (SPI byte-out, ADC sample).
pub type Handler<P> = fn(&mut P, value: u32, now: u64) -> Option<u32>;

/// Name→handler capability table for one peripheral.
///
/// Built once at init; the host keeps it next to the peripheral instance and
/// routes events with [`SignalTable::dispatch`].
pub struct SignalTable<P> {
    entries: Vec<(&'static str, Handler<P>)>,
}

impl<P> SignalTable<P> {
    pub fn new() -> Self {
        SignalTable { entries: Vec::new() }
    }

    /// Register a handler for a named input line.
    pub fn register(&mut self, name: &'static str, handler: Handler<P>) {
        self.entries.push((name, handler));
    }

    /// Names of all registered input lines.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Route one event to the named line. Unknown names are logged and
    /// ignored — a miswired script must never take down the simulation.
    pub fn dispatch(&self, periph: &mut P, name: &str, value: u32, now: u64) -> Option<u32> {
        match self.entries.iter().find(|(n, _)| *n == name) {
            Some((_, handler)) => handler(periph, value, now),
            None => {
                log::warn!("no handler for signal {:?}", name);
                None
            }
        }
    }
}

impl<P> Default for SignalTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Output-signal event queue for one peripheral.
///
/// `raise` enqueues an event only when the line's value changes, matching
/// edge-filtered IRQ delivery; the host drains pending events with `pop`.
pub struct Outbox<L: Copy + Eq> {
    events: VecDeque<(L, u32)>,
    levels: Vec<(L, u32)>,
}

impl<L: Copy + Eq> Outbox<L> {
    pub fn new() -> Self {
        Outbox { events: VecDeque::new(), levels: Vec::new() }
    }

    /// Raise `line` to `value`. Queued only if the value differs from the
    /// line's current level (or the line has never been raised).
    pub fn raise(&mut self, line: L, value: u32) {
        match self.levels.iter_mut().find(|(l, _)| *l == line) {
            Some((_, level)) => {
                if *level == value {
                    return;
                }
                *level = value;
            }
            None => self.levels.push((line, value)),
        }
        self.events.push_back((line, value));
    }

    /// Current level of `line`, if it has ever been raised.
    pub fn last(&self, line: L) -> Option<u32> {
        self.levels.iter().find(|(l, _)| *l == line).map(|(_, v)| *v)
    }

    /// Dequeue the oldest pending event.
    pub fn pop(&mut self) -> Option<(L, u32)> {
        self.events.pop_front()
    }

    /// Number of pending events.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl<L: Copy + Eq> Default for Outbox<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot deadline on the host cycle clock.
///
/// Re-arming replaces any pending deadline, so only the latest arming is
/// honored — the standstill timer relies on this to treat every step edge
/// as an implicit cancellation of the previous window.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleTimer {
    deadline: Option<u64>,
}

impl CycleTimer {
    pub fn new() -> Self {
        CycleTimer { deadline: None }
    }

    /// Schedule the timer to fire `delay` cycles from `now`.
    pub fn arm(&mut self, now: u64, delay: u64) {
        self.deadline = Some(now.saturating_add(delay));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Restore a previously saved deadline.
    pub fn restore(&mut self, deadline: Option<u64>) {
        self.deadline = deadline;
    }

    /// Consume and report an expired deadline. Returns true at most once per
    /// arming.
    pub fn fire_due(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        seen: Vec<u32>,
    }

    fn record(p: &mut Probe, value: u32, _now: u64) -> Option<u32> {
        p.seen.push(value);
        Some(value + 1)
    }

    #[test]
    fn test_dispatch_by_name() {
        let mut table: SignalTable<Probe> = SignalTable::new();
        table.register("probe.in", record);
        let mut probe = Probe { seen: Vec::new() };

        assert_eq!(table.dispatch(&mut probe, "probe.in", 7, 0), Some(8));
        assert_eq!(table.dispatch(&mut probe, "probe.bogus", 9, 0), None);
        assert_eq!(probe.seen, vec![7]);
    }

    #[test]
    fn test_outbox_filters_unchanged_levels() {
        let mut out: Outbox<u8> = Outbox::new();
        out.raise(0, 1);
        out.raise(0, 1); // no change, not queued
        out.raise(0, 0);
        out.raise(1, 0); // first raise always queued

        assert_eq!(out.pop(), Some((0, 1)));
        assert_eq!(out.pop(), Some((0, 0)));
        assert_eq!(out.pop(), Some((1, 0)));
        assert_eq!(out.pop(), None);
        assert_eq!(out.last(0), Some(0));
    }

    #[test]
    fn test_timer_rearm_replaces_deadline() {
        let mut t = CycleTimer::new();
        t.arm(0, 100);
        t.arm(50, 100); // replaces the deadline at 100 with one at 150
        assert!(!t.fire_due(120));
        assert!(t.fire_due(150));
        // fires at most once per arming
        assert!(!t.fire_due(1000));
    }

    #[test]
    fn test_timer_cancel() {
        let mut t = CycleTimer::new();
        t.arm(0, 10);
        t.cancel();
        assert!(!t.armed());
        assert!(!t.fire_due(u64::MAX));
    }
}
