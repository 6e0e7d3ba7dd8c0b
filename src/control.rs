//! Window geometry control.
//!
//! Resolves one target window and drives the mutation sequence:
//! clear WM states, compensate for frame extents, request the move.
//! The order is load-bearing: a resize sent before the state removals
//! are flushed can race the window manager's own transition handling
//! and come back clamped.

use crate::ewmh::EwmhManager;
use crate::geometry::{FrameExtents, Rect};
use crate::identity::{self, TargetSpec};
use crate::prelude::*;

/// What became of a control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The move/resize was requested. Carries the frame extents that
    /// were compensated for, if the window manager published any.
    Requested(Option<FrameExtents>),
    /// No enumerated window matched the target spec.
    NoMatch,
}

/// Parse `xwinmv` arguments: `PID[@ORDINAL] X Y WIDTH HEIGHT`.
///
/// Fails before any display interaction.
pub fn parse_args(args: &[String]) -> CtlResult<(TargetSpec, Rect)> {
    if args.len() != 5 {
        return Err(Error::Usage(format!(
            "expected 5 arguments, got {}",
            args.len()
        )));
    }

    let spec: TargetSpec = args[0].parse()?;

    let mut fields = [0i32; 4];
    for (value, arg) in fields.iter_mut().zip(&args[1..]) {
        *value = arg
            .parse()
            .map_err(|_| Error::Usage(format!("invalid coordinate '{}'", arg)))?;
    }

    let rect = Rect {
        x: fields[0],
        y: fields[1],
        width: fields[2],
        height: fields[3],
    };

    Ok((spec, rect))
}

/// Resolve `spec` and apply `outer` to the matching window.
///
/// `outer` is the desired decorated rectangle; the window manager's
/// frame extents are folded in before the request goes out. Each step
/// completes (including its flush) before the next starts, and nothing
/// is retried.
pub fn apply_geometry(ewmh: &EwmhManager<'_>, spec: TargetSpec, outer: Rect) -> Outcome {
    let clients = ewmh.client_list();

    let identified: Vec<_> = clients
        .iter()
        .filter_map(|&window| ewmh.window_pid(window).map(|pid| (window, pid)))
        .collect();

    let window = match identity::find_target(&identity::assign_ordinals(&identified), spec) {
        Some(window) => window,
        None => return Outcome::NoMatch,
    };
    info!("Target {} resolved to window {}", spec, window);

    ewmh.clear_window_states(window);

    let extents = ewmh.frame_extents(window);
    let inner = match extents {
        Some(extents) => outer.to_inner(extents),
        None => outer,
    };

    ewmh.move_resize(window, inner);

    Outcome::Requested(extents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_target_and_rectangle() {
        let (spec, rect) = parse_args(&args(&["4321@2", "100", "100", "800", "600"])).unwrap();

        assert_eq!(spec, TargetSpec { pid: 4321, ordinal: 2 });
        assert_eq!(
            rect,
            Rect {
                x: 100,
                y: 100,
                width: 800,
                height: 600,
            }
        );
    }

    #[test]
    fn negative_coordinates_are_allowed() {
        let (_, rect) = parse_args(&args(&["55", "-10", "-20", "300", "200"])).unwrap();
        assert_eq!((rect.x, rect.y), (-10, -20));
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["55", "0", "0", "10"])).is_err());
        assert!(parse_args(&args(&["55", "0", "0", "10", "10", "10"])).is_err());
    }

    #[test]
    fn non_numeric_fields_are_usage_errors() {
        assert!(parse_args(&args(&["x", "0", "0", "10", "10"])).is_err());
        assert!(parse_args(&args(&["55", "0", "0", "wide", "10"])).is_err());
    }
}
