//! X Atom utilities.

use std::cell::RefCell;
use std::collections::HashMap;

use x11_dl::xlib;

use crate::display_context::DisplayContext;

/// Helper for keeping track of atoms.
///
/// Interning an atom name is itself a server round trip, so values are
/// cached per name. Two flavors exist: [`intern`](Self::intern) always
/// produces an atom, while [`lookup`](Self::lookup) asks for an existing
/// atom only and reports `None` when the server has never seen the name,
/// which is how feature support is probed.
pub struct AtomCache<'d> {
    ctx: &'d DisplayContext,
    interned: RefCell<HashMap<&'static str, xlib::Atom>>,
    looked_up: RefCell<HashMap<&'static str, Option<xlib::Atom>>>,
}

impl<'d> AtomCache<'d> {
    #[must_use]
    pub fn new(ctx: &'d DisplayContext) -> Self {
        Self {
            ctx,
            interned: RefCell::new(HashMap::new()),
            looked_up: RefCell::new(HashMap::new()),
        }
    }

    /// Retrieve an atom value, creating the atom if needed.
    pub fn intern(&self, name: &'static str) -> xlib::Atom {
        let mut cache = self.interned.borrow_mut();

        if let Some(val) = cache.get(name) {
            *val
        } else {
            let val = self.ctx.intern_atom(name, false).unwrap_or(0);
            cache.insert(name, val);
            val
        }
    }

    /// Retrieve an atom value only if the server already knows the name.
    ///
    /// `None` means no client ever interned the name, i.e. the running
    /// window manager does not implement the corresponding feature.
    pub fn lookup(&self, name: &'static str) -> Option<xlib::Atom> {
        let mut cache = self.looked_up.borrow_mut();

        if let Some(val) = cache.get(name) {
            *val
        } else {
            let val = self.ctx.intern_atom(name, true);
            cache.insert(name, val);
            val
        }
    }
}

impl std::fmt::Debug for AtomCache<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} atoms stored",
            self.interned.borrow().len() + self.looked_up.borrow().len()
        )
    }
}
