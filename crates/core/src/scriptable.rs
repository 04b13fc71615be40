//! Scripted test-action contract.
//!
//! External test scripts drive peripherals by action id plus string
//! arguments, outside the normal signal-delivery path. Actions must leave
//! any in-flight SPI transaction untouched and must never panic — a bad
//! script line comes back as [`ActionStatus::Error`].

/// Status returned by one scripted action invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// The action completed.
    Finished,
    /// The action needs more simulation time; the caller re-invokes or
    /// polls until a non-`Waiting` status comes back.
    Waiting,
    /// Unknown action id or malformed arguments.
    Error,
}

/// Capability for peripherals that expose scripted actions.
///
/// Kept separate from the signal-handling side on purpose: a peripheral
/// implements both as independent interfaces rather than inheriting a
/// combined base.
pub trait Scriptable {
    /// Invoke action `id` with string arguments.
    fn process_action(&mut self, id: u32, args: &[String]) -> ActionStatus;

    /// Names of the supported actions, indexed by action id. Used by the
    /// scripting console for help listings.
    fn action_names(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Parse one numeric action argument; `None` on missing or malformed input.
pub fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize) -> Option<T> {
    args.get(index).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg() {
        let args = vec!["2".to_string(), " 15 ".to_string(), "x".to_string()];
        assert_eq!(parse_arg::<u8>(&args, 0), Some(2));
        assert_eq!(parse_arg::<u32>(&args, 1), Some(15));
        assert_eq!(parse_arg::<u8>(&args, 2), None);
        assert_eq!(parse_arg::<u8>(&args, 3), None);
    }
}
