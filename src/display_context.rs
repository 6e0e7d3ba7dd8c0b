//! X11 wrapper.

use std::ffi::CString;
use std::os::raw::c_int;

use x11_dl::xlib;

use crate::geometry::Rect;
use crate::prelude::*;

/// Safe wrapper around an X server connection.
///
/// Every method is a synchronous round trip. The connection is closed
/// exactly once, when the context is dropped.
pub struct DisplayContext {
    /// X context
    xlib: xlib::Xlib,
    /// Connection to the server
    display: *mut xlib::_XDisplay,
}

impl DisplayContext {
    /// Create a new connection to the X server.
    pub fn new() -> CtlResult<Self> {
        // Initialize X
        let xlib = xlib::Xlib::open().map_err(|_| Error::Connection("Xlib not available"))?;
        // Connection to X server
        let display = unsafe { (xlib.XOpenDisplay)(std::ptr::null()) };

        if display.is_null() {
            return Err(Error::Connection("no server on $DISPLAY"));
        }

        info!("Connected to X server");

        Ok(Self { xlib, display })
    }

    /// Get raw xlib context.
    pub fn raw(&self) -> &xlib::Xlib {
        &self.xlib
    }

    /// Get connection id.
    pub fn display(&self) -> *mut xlib::_XDisplay {
        self.display
    }

    /// Get default root window.
    pub fn default_root(&self) -> xlib::Window {
        unsafe { (self.xlib.XDefaultRootWindow)(self.display) }
    }

    /// Intern an atom by name.
    ///
    /// With `only_if_exists` set, an atom the server has never heard of
    /// yields `None`, meaning the window manager does not support the
    /// feature the atom names.
    pub fn intern_atom(&self, name: &str, only_if_exists: bool) -> Option<xlib::Atom> {
        let name = CString::new(name).ok()?;
        let exists = if only_if_exists { xlib::True } else { xlib::False };
        let atom = unsafe { (self.xlib.XInternAtom)(self.display, name.as_ptr(), exists) };

        if atom == 0 {
            None
        } else {
            Some(atom)
        }
    }

    /// Get the attributes of a window.
    ///
    /// Returns `None` when the window is gone, e.g. destroyed between
    /// enumeration and this call.
    pub fn window_attributes(&self, window: xlib::Window) -> Option<xlib::XWindowAttributes> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status = unsafe { (self.xlib.XGetWindowAttributes)(self.display, window, &mut attrs) };

        if status == 0 {
            None
        } else {
            Some(attrs)
        }
    }

    /// Translate a window-local coordinate into root (absolute screen)
    /// coordinates.
    pub fn translate_to_root(&self, window: xlib::Window, x: c_int, y: c_int) -> (i32, i32) {
        let root = self.default_root();
        let mut abs_x = x;
        let mut abs_y = y;
        let mut child: xlib::Window = 0;

        unsafe {
            (self.xlib.XTranslateCoordinates)(
                self.display,
                window,
                root,
                x,
                y,
                &mut abs_x,
                &mut abs_y,
                &mut child,
            );
        }

        (abs_x, abs_y)
    }

    /// Unconditionally set a window's geometry.
    ///
    /// Bypasses the window manager's cooperative protocol; only used as a
    /// fallback when the manager does not understand geometry requests.
    pub fn move_resize_window(&self, window: xlib::Window, rect: Rect) {
        unsafe {
            (self.xlib.XMoveResizeWindow)(
                self.display,
                window,
                rect.x,
                rect.y,
                rect.width as u32,
                rect.height as u32,
            );
        }
        debug!("Configured window {} directly to {:?}", window, rect);
    }

    /// Send a client message to the root window.
    ///
    /// The substructure masks route the message to the window manager
    /// rather than to the named window itself.
    pub fn send_to_root(&self, mut event: xlib::XEvent) {
        let root = self.default_root();
        unsafe {
            (self.xlib.XSendEvent)(
                self.display,
                root,
                xlib::False,
                xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask,
                &mut event,
            );
        }
    }

    /// Flush the X command queue.
    ///
    /// Client messages are delivered asynchronously; a request that must
    /// be ordered after one (or that may be the last thing this process
    /// does) needs an explicit flush.
    pub fn flush(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }
}

impl Drop for DisplayContext {
    fn drop(&mut self) {
        unsafe { (self.xlib.XCloseDisplay)(self.display) };
        debug!("Closed X server connection");
    }
}
