//! Window listing.

use serde::Serialize;

use crate::ewmh::EwmhManager;
use crate::geometry::Rect;
use crate::identity::{self, Identity};
use crate::prelude::*;

/// Placeholder process name when `/proc` has nothing for a pid.
const UNKNOWN_PROCESS: &str = "(unknown)";

/// One visible application window, as printed by `xwinls`.
///
/// Field names are the wire format consumed by layout scripts; keep
/// them stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "PID")]
    pub pid: u32,
    #[serde(rename = "UID")]
    pub ordinal: u32,
    /// Composite `PID@ORDINAL` identity, accepted by `xwinmv`.
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Process")]
    pub process: String,
    #[serde(rename = "Width")]
    pub width: i32,
    #[serde(rename = "Height")]
    pub height: i32,
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
}

impl WindowRecord {
    fn new(title: String, identity: Identity, geometry: Rect, process: String) -> Self {
        Self {
            title,
            pid: identity.pid,
            ordinal: identity.ordinal,
            id: format!("{}@{}", identity.pid, identity.ordinal),
            process,
            width: geometry.width,
            height: geometry.height,
            x: geometry.x,
            y: geometry.y,
        }
    }
}

/// Produce one record per visible normal window with a resolvable title.
///
/// Ordinals are assigned over every pid-bearing window in the client
/// list, before any filtering, so the `ID` printed here resolves to the
/// same window when handed to the control path.
pub fn list_windows(ewmh: &EwmhManager<'_>) -> Vec<WindowRecord> {
    let clients = ewmh.client_list();
    debug!("{} windows in client list", clients.len());

    let identified: Vec<_> = clients
        .iter()
        .filter_map(|&window| ewmh.window_pid(window).map(|pid| (window, pid)))
        .collect();

    identity::assign_ordinals(&identified)
        .into_iter()
        .filter(|id| ewmh.is_normal_window(id.window))
        .filter_map(|id| {
            let title = ewmh.window_title(id.window)?;
            let geometry = ewmh.window_geometry(id.window);
            Some(WindowRecord::new(title, id, geometry, process_name(id.pid)))
        })
        .collect()
}

/// Resolve a pid to its short process name via `/proc/<pid>/comm`.
fn process_name(pid: u32) -> String {
    match std::fs::read_to_string(format!("/proc/{}/comm", pid)) {
        Ok(comm) => {
            let name = comm.trim_end();
            if name.is_empty() {
                UNKNOWN_PROCESS.to_owned()
            } else {
                name.to_owned()
            }
        }
        Err(_) => UNKNOWN_PROCESS.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> WindowRecord {
        WindowRecord::new(
            "Terminal".to_owned(),
            Identity {
                window: 0x1c0000a,
                pid: 4321,
                ordinal: 2,
            },
            Rect {
                x: 10,
                y: 20,
                width: 800,
                height: 600,
            },
            "xterm".to_owned(),
        )
    }

    #[test]
    fn composite_id_joins_pid_and_ordinal() {
        assert_eq!(sample_record().id, "4321@2");
    }

    #[test]
    fn records_serialize_with_wire_keys() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["Height", "ID", "PID", "Process", "Title", "UID", "Width", "X", "Y"]
        );

        assert_eq!(object["PID"], 4321);
        assert_eq!(object["UID"], 2);
        assert_eq!(object["ID"], "4321@2");
    }

    #[test]
    fn dead_pid_reads_as_unknown_process() {
        // Pid 0 never has a /proc entry.
        assert_eq!(process_name(0), UNKNOWN_PROCESS);
    }
}
