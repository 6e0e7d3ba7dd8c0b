//! Helpers for accessing the [`EWMH`] protocol.
//!
//! All requests that change window-manager state go through the root
//! window as client messages; the manager picks them up via substructure
//! redirection. They are best-effort: the window manager is free to
//! ignore any of them, and nothing here reads back the outcome.
//!
//! [`EWMH`]: https://en.wikipedia.org/wiki/Extended_Window_Manager_Hints

use std::os::raw::c_long;

use x11_dl::xlib;

use crate::atoms::AtomCache;
use crate::display_context::DisplayContext;
use crate::geometry::{FrameExtents, Rect};
use crate::prelude::*;
use crate::props::PropertyReader;

// Atoms used from the EWMH protocol
define_string_consts! {
    pub protocols {
        _NET_CLIENT_LIST,
        _NET_WM_PID,
        _NET_WM_NAME,
        WM_NAME,
        _NET_WM_WINDOW_TYPE,
        _NET_WM_WINDOW_TYPE_NORMAL,
        _NET_FRAME_EXTENTS,
        _NET_WM_STATE,
        _NET_WM_STATE_FULLSCREEN,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_MOVERESIZE_WINDOW,
    }
}

/// `_NET_WM_STATE` client message action: remove the given state.
const WINDOW_STATE_ACTION_REMOVE: c_long = 0;
/// `_NET_WM_STATE` source indication: a normal application request.
const SOURCE_INDICATION_APPLICATION: c_long = 1;

// _NET_MOVERESIZE_WINDOW packs per-field presence bits into the second
// byte of data.l[0]; only fields with their bit set are applied.
const MOVE_RESIZE_WINDOW_X: c_long = 1 << 8;
const MOVE_RESIZE_WINDOW_Y: c_long = 1 << 9;
const MOVE_RESIZE_WINDOW_WIDTH: c_long = 1 << 10;
const MOVE_RESIZE_WINDOW_HEIGHT: c_long = 1 << 11;

/// Presence flags for a full geometry change.
fn move_resize_flags() -> c_long {
    MOVE_RESIZE_WINDOW_X
        | MOVE_RESIZE_WINDOW_Y
        | MOVE_RESIZE_WINDOW_WIDTH
        | MOVE_RESIZE_WINDOW_HEIGHT
}

/// Helper for reading EWMH properties and issuing EWMH requests.
pub struct EwmhManager<'d> {
    ctx: &'d DisplayContext,
    atoms: AtomCache<'d>,
}

impl<'d> EwmhManager<'d> {
    #[must_use]
    pub fn new(ctx: &'d DisplayContext) -> Self {
        Self {
            ctx,
            atoms: AtomCache::new(ctx),
        }
    }

    fn reader(&self) -> PropertyReader<'_> {
        PropertyReader::new(self.ctx, &self.atoms)
    }

    /// The managed top-level windows, in the order the window manager
    /// maintains them.
    ///
    /// A window manager that never published `_NET_CLIENT_LIST` looks
    /// identical to an empty desktop.
    pub fn client_list(&self) -> Vec<xlib::Window> {
        self.reader()
            .windows(self.ctx.default_root(), protocols::_NET_CLIENT_LIST)
            .unwrap_or_default()
    }

    /// The process that owns a window, if it advertised one.
    pub fn window_pid(&self, window: xlib::Window) -> Option<u32> {
        self.reader()
            .cardinal(window, protocols::_NET_WM_PID)
            .map(|pid| pid as u32)
    }

    /// A window's title: `_NET_WM_NAME` with a fallback to the legacy
    /// `WM_NAME`. Empty titles count as unresolvable.
    pub fn window_title(&self, window: xlib::Window) -> Option<String> {
        self.reader()
            .text(window, protocols::_NET_WM_NAME)
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.reader()
                    .text(window, protocols::WM_NAME)
                    .filter(|t| !t.is_empty())
            })
    }

    /// Whether the window is an ordinary application window, as opposed
    /// to a dock, desktop, splash screen and the like.
    ///
    /// A window that does not declare its type is treated as not normal;
    /// listings skip it. Target resolution never consults this.
    pub fn is_normal_window(&self, window: xlib::Window) -> bool {
        let normal = self.atoms.intern(protocols::_NET_WM_WINDOW_TYPE_NORMAL);

        match self.reader().atoms(window, protocols::_NET_WM_WINDOW_TYPE) {
            Some(types) => types.contains(&normal),
            None => false,
        }
    }

    /// A window's absolute on-screen rectangle.
    ///
    /// The attributes carry parent-relative coordinates; the client
    /// origin is translated into root coordinates to get the absolute
    /// position. A window destroyed mid-enumeration reads as zeroed
    /// geometry rather than failing the caller.
    pub fn window_geometry(&self, window: xlib::Window) -> Rect {
        let attrs = match self.ctx.window_attributes(window) {
            Some(attrs) => attrs,
            None => return Rect::ZERO,
        };

        let (x, y) = self.ctx.translate_to_root(window, 0, 0);

        Rect {
            x,
            y,
            width: attrs.width,
            height: attrs.height,
        }
    }

    /// Decoration thickness, if the window manager publishes it.
    pub fn frame_extents(&self, window: xlib::Window) -> Option<FrameExtents> {
        let values = self
            .reader()
            .cardinals(window, protocols::_NET_FRAME_EXTENTS, 4)?;

        Some(FrameExtents {
            left: values[0] as i32,
            right: values[1] as i32,
            top: values[2] as i32,
            bottom: values[3] as i32,
        })
    }

    /// Ask the window manager to drop the fullscreen and maximized
    /// states from a window.
    ///
    /// Three independent remove requests are always sent, whatever the
    /// window's actual state; managers ignore removals that do not
    /// apply. The queue is flushed before returning so a following
    /// geometry request is ordered after the state changes.
    pub fn clear_window_states(&self, window: xlib::Window) {
        let wm_state = self.atoms.intern(protocols::_NET_WM_STATE);

        for state in [
            protocols::_NET_WM_STATE_FULLSCREEN,
            protocols::_NET_WM_STATE_MAXIMIZED_HORZ,
            protocols::_NET_WM_STATE_MAXIMIZED_VERT,
        ] {
            let mut data = xlib::ClientMessageData::new();
            data.set_long(0, WINDOW_STATE_ACTION_REMOVE);
            data.set_long(1, self.atoms.intern(state) as c_long);
            data.set_long(3, SOURCE_INDICATION_APPLICATION);

            self.ctx.send_to_root(self.client_message(window, wm_state, data));
            trace!("Requested removal of {} on {}", state, window);
        }

        self.ctx.flush();
        debug!("Cleared WM states on {}", window);
    }

    /// Ask for a window's geometry to be changed.
    ///
    /// Prefers the cooperative `_NET_MOVERESIZE_WINDOW` request so the
    /// window manager can keep its bookkeeping consistent; falls back to
    /// configuring the window directly when the manager does not
    /// understand the message. Either way the request is flushed before
    /// returning, since the process may exit right after.
    pub fn move_resize(&self, window: xlib::Window, rect: Rect) {
        match self.atoms.lookup(protocols::_NET_MOVERESIZE_WINDOW) {
            Some(message_type) => {
                let mut data = xlib::ClientMessageData::new();
                data.set_long(0, move_resize_flags());
                data.set_long(1, rect.x as c_long);
                data.set_long(2, rect.y as c_long);
                data.set_long(3, rect.width as c_long);
                data.set_long(4, rect.height as c_long);

                self.ctx.send_to_root(self.client_message(window, message_type, data));
                debug!("Requested move/resize of {} to {:?}", window, rect);
            }
            None => {
                warn!("_NET_MOVERESIZE_WINDOW unsupported, configuring directly");
                self.ctx.move_resize_window(window, rect);
            }
        }

        self.ctx.flush();
    }

    fn client_message(
        &self,
        window: xlib::Window,
        message_type: xlib::Atom,
        data: xlib::ClientMessageData,
    ) -> xlib::XEvent {
        xlib::XEvent {
            client_message: xlib::XClientMessageEvent {
                type_: xlib::ClientMessage,
                serial: 0,
                send_event: xlib::True,
                display: self.ctx.display(),
                window,
                message_type,
                format: 32,
                data,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_four_geometry_fields_are_flagged() {
        assert_eq!(move_resize_flags(), 0xF00);
    }

    #[test]
    fn state_removal_payload_layout() {
        let mut data = xlib::ClientMessageData::new();
        data.set_long(0, WINDOW_STATE_ACTION_REMOVE);
        data.set_long(1, 0xABC);
        data.set_long(3, SOURCE_INDICATION_APPLICATION);

        assert_eq!(data.get_long(0), 0);
        assert_eq!(data.get_long(1), 0xABC);
        assert_eq!(data.get_long(2), 0);
        assert_eq!(data.get_long(3), 1);
        assert_eq!(data.get_long(4), 0);
    }
}
