//! Per-process window identities.
//!
//! A process may own several top-level windows. Each gets a 1-based
//! ordinal in client-list order, so `PID@ORDINAL` names exactly one
//! window within an enumeration snapshot. Ordinals are reassigned on
//! every enumeration; they carry no meaning across snapshots.

use std::collections::HashMap;
use std::str::FromStr;

use x11_dl::xlib;

use crate::prelude::*;

/// One enumerated window with its resolved identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub window: xlib::Window,
    pub pid: u32,
    /// 1-based position among this pid's windows, in client-list order.
    pub ordinal: u32,
}

/// A window named by its owning process, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub pid: u32,
    pub ordinal: u32,
}

impl FromStr for TargetSpec {
    type Err = Error;

    /// Parse `"PID"` or `"PID@ORDINAL"`. The ordinal defaults to 1.
    fn from_str(s: &str) -> CtlResult<Self> {
        let bad = || Error::Usage(format!("invalid window target '{}'", s));

        let (pid, ordinal) = match s.split_once('@') {
            Some((pid, ordinal)) => (
                pid.parse::<u32>().map_err(|_| bad())?,
                ordinal.parse::<u32>().map_err(|_| bad())?,
            ),
            None => (s.parse::<u32>().map_err(|_| bad())?, 1),
        };

        if ordinal == 0 {
            return Err(bad());
        }

        Ok(Self { pid, ordinal })
    }
}

impl std::fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.pid, self.ordinal)
    }
}

/// Assign ordinals over an enumeration snapshot.
///
/// Input is the client list in enumeration order, already reduced to
/// windows whose pid could be read; a window without a pid cannot be
/// identified and never reaches this point. For a fixed pid the assigned
/// ordinals are exactly 1..=k, gap-free, in input order.
pub fn assign_ordinals(windows: &[(xlib::Window, u32)]) -> Vec<Identity> {
    let mut seen: HashMap<u32, u32> = HashMap::new();

    windows
        .iter()
        .map(|&(window, pid)| {
            let ordinal = seen.entry(pid).or_insert(0);
            *ordinal += 1;
            Identity {
                window,
                pid,
                ordinal: *ordinal,
            }
        })
        .collect()
}

/// Find the window a [`TargetSpec`] names.
///
/// Exact match on both fields; the first hit in enumeration order wins.
pub fn find_target(identities: &[Identity], spec: TargetSpec) -> Option<xlib::Window> {
    identities
        .iter()
        .find(|id| id.pid == spec.pid && id.ordinal == spec.ordinal)
        .map(|id| id.window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_count_up_per_pid() {
        let ids = assign_ordinals(&[(10, 100), (11, 200), (12, 100), (13, 100)]);

        let ordinals: Vec<(u32, u32)> = ids.iter().map(|id| (id.pid, id.ordinal)).collect();
        assert_eq!(ordinals, vec![(100, 1), (200, 1), (100, 2), (100, 3)]);
    }

    #[test]
    fn ordinals_are_gap_free_under_interleaving() {
        let windows: Vec<(u64, u32)> = (0..9).map(|i| (i, [7u32, 8, 9][i as usize % 3])).collect();
        let ids = assign_ordinals(&windows);

        for pid in [7u32, 8, 9] {
            let mut per_pid: Vec<u32> = ids
                .iter()
                .filter(|id| id.pid == pid)
                .map(|id| id.ordinal)
                .collect();
            per_pid.sort_unstable();
            assert_eq!(per_pid, vec![1, 2, 3]);
        }
    }

    #[test]
    fn single_window_matches_default_ordinal() {
        let ids = assign_ordinals(&[(42, 55)]);
        let spec: TargetSpec = "55".parse().unwrap();

        assert_eq!(find_target(&ids, spec), Some(42));
    }

    #[test]
    fn explicit_ordinal_selects_the_nth_window() {
        let ids = assign_ordinals(&[(1, 4321), (2, 9), (3, 4321)]);
        let spec: TargetSpec = "4321@2".parse().unwrap();

        assert_eq!(find_target(&ids, spec), Some(3));
    }

    #[test]
    fn unmatched_spec_resolves_to_none() {
        let ids = assign_ordinals(&[(1, 100)]);

        assert_eq!(find_target(&ids, TargetSpec { pid: 9999, ordinal: 1 }), None);
        assert_eq!(find_target(&ids, TargetSpec { pid: 100, ordinal: 2 }), None);
    }

    #[test]
    fn parses_pid_and_composite_forms() {
        assert_eq!(
            "1234".parse::<TargetSpec>().unwrap(),
            TargetSpec { pid: 1234, ordinal: 1 }
        );
        assert_eq!(
            "1234@3".parse::<TargetSpec>().unwrap(),
            TargetSpec { pid: 1234, ordinal: 3 }
        );
    }

    #[test]
    fn rejects_malformed_specs() {
        for s in ["", "abc", "12@", "@2", "12@x", "12@0", "-5", "12@2@3"] {
            assert!(s.parse::<TargetSpec>().is_err(), "accepted '{}'", s);
        }
    }
}
