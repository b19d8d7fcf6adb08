//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>`, `Weak<RefCell<T>>` and callbacks.

pub mod aliases;

pub use aliases::*;
