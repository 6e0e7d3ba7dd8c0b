//! Useful macros.

/// Define string constants with names equal to their values, in a module.
///
/// Property and message names cross the wire as strings; keeping them as
/// constants named after themselves avoids typos without repeating each
/// name twice.
///
/// # Examples
/// ```ignore
/// define_string_consts! {
///     pub foo {
///         BAR,
///         BAZ,
///     }
/// }
///
/// assert_eq!(foo::BAR, "BAR");
/// assert_eq!(foo::BAZ, "BAZ");
/// ```
macro_rules! define_string_consts {
    (
        pub $mod:ident {
            $($name:ident,)*
        }
    ) => {
        pub mod $mod {
            $(pub const $name: &str = stringify!($name);)*
        }
    };
}
