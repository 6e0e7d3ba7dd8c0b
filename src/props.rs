//! Window property reads.
//!
//! Everything here degrades to `None`: an atom the server does not know,
//! a property the window does not carry, and a window that vanished all
//! look the same to callers. Absence is a normal outcome, not an error.

use std::os::raw::{c_int, c_long, c_uchar, c_ulong};

use x11_dl::xlib;

use crate::atoms::AtomCache;
use crate::display_context::DisplayContext;

/// Typed accessors over `XGetWindowProperty`.
pub struct PropertyReader<'d> {
    ctx: &'d DisplayContext,
    atoms: &'d AtomCache<'d>,
}

/// Server-allocated property data.
///
/// The buffer belongs to Xlib and must be handed back with `XFree` on
/// every path out of this module; tying the release to `Drop` covers
/// them all. The raw pointer never escapes; callers get owned copies.
struct PropertyBuffer<'x> {
    xlib: &'x xlib::Xlib,
    data: *mut c_uchar,
    format: c_int,
    items: c_ulong,
}

impl PropertyBuffer<'_> {
    /// Items of a 32-bit formatted property. Xlib hands these back as
    /// C longs regardless of pointer width.
    fn as_longs(&self) -> &[c_ulong] {
        if self.format != 32 || self.data.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.data as *const c_ulong, self.items as usize) }
    }

    /// Items of an 8-bit formatted property.
    fn as_bytes(&self) -> &[u8] {
        if self.format != 8 || self.data.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.data as *const u8, self.items as usize) }
    }
}

impl Drop for PropertyBuffer<'_> {
    fn drop(&mut self) {
        if !self.data.is_null() {
            unsafe { (self.xlib.XFree)(self.data as *mut std::os::raw::c_void) };
        }
    }
}

/// Read everything the property holds, however long.
const UNBOUNDED: c_long = c_long::MAX;

impl<'d> PropertyReader<'d> {
    pub fn new(ctx: &'d DisplayContext, atoms: &'d AtomCache<'d>) -> Self {
        Self { ctx, atoms }
    }

    /// A single cardinal, e.g. `_NET_WM_PID`.
    pub fn cardinal(&self, window: xlib::Window, name: &'static str) -> Option<u64> {
        let buf = self.fetch(window, name, 1, xlib::XA_CARDINAL)?;
        buf.as_longs().first().map(|&v| v as u64)
    }

    /// A fixed number of cardinals, e.g. the 4 of `_NET_FRAME_EXTENTS`.
    /// Short replies count as absent.
    pub fn cardinals(
        &self,
        window: xlib::Window,
        name: &'static str,
        count: usize,
    ) -> Option<Vec<u64>> {
        let buf = self.fetch(window, name, count as c_long, xlib::XA_CARDINAL)?;
        let longs = buf.as_longs();
        if longs.len() < count {
            return None;
        }
        Some(longs[..count].iter().map(|&v| v as u64).collect())
    }

    /// An atom list of unknown length, e.g. `_NET_WM_WINDOW_TYPE`.
    pub fn atoms(&self, window: xlib::Window, name: &'static str) -> Option<Vec<xlib::Atom>> {
        let buf = self.fetch(window, name, UNBOUNDED, xlib::XA_ATOM)?;
        Some(buf.as_longs().to_vec())
    }

    /// A window list of unknown length, e.g. `_NET_CLIENT_LIST`.
    pub fn windows(&self, window: xlib::Window, name: &'static str) -> Option<Vec<xlib::Window>> {
        let buf = self.fetch(window, name, UNBOUNDED, xlib::XA_WINDOW)?;
        Some(buf.as_longs().to_vec())
    }

    /// A text property, accepting whatever encoding the client used.
    pub fn text(&self, window: xlib::Window, name: &'static str) -> Option<String> {
        let buf = self.fetch(window, name, UNBOUNDED, xlib::AnyPropertyType as xlib::Atom)?;
        let bytes = buf.as_bytes();
        if bytes.is_empty() {
            return None;
        }
        Some(decode_text(bytes))
    }

    /// One bounded or unbounded `XGetWindowProperty` round trip.
    fn fetch(
        &self,
        window: xlib::Window,
        name: &'static str,
        length: c_long,
        req_type: xlib::Atom,
    ) -> Option<PropertyBuffer<'d>> {
        let atom = self.atoms.lookup(name)?;
        let raw = self.ctx.raw();

        let mut actual_type: xlib::Atom = 0;
        let mut format: c_int = 0;
        let mut items: c_ulong = 0;
        let mut bytes_after: c_ulong = 0;
        let mut data: *mut c_uchar = std::ptr::null_mut();

        let status = unsafe {
            (raw.XGetWindowProperty)(
                self.ctx.display(),
                window,
                atom,
                0,
                length,
                xlib::False,
                req_type,
                &mut actual_type,
                &mut format,
                &mut items,
                &mut bytes_after,
                &mut data,
            )
        };

        // The guard takes over the allocation before any checks, so a
        // mismatched reply is still released.
        let buf = PropertyBuffer {
            xlib: raw,
            data,
            format,
            items,
        };

        if status != xlib::Success as c_int || buf.data.is_null() || buf.items == 0 {
            return None;
        }

        Some(buf)
    }
}

/// Decode property bytes as text, tolerating non-UTF-8 and trailing NULs.
fn decode_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |pos| pos + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::decode_text;

    #[test]
    fn text_trims_trailing_nuls() {
        assert_eq!(decode_text(b"xterm\0\0"), "xterm");
        assert_eq!(decode_text(b"\0\0"), "");
    }

    #[test]
    fn text_survives_invalid_utf8() {
        let decoded = decode_text(&[0x66, 0xff, 0x6f]);
        assert_eq!(decoded.chars().count(), 3);
        assert!(decoded.starts_with('f'));
        assert!(decoded.ends_with('o'));
    }
}
