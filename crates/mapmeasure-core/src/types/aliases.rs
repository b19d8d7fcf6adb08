//! Type aliases for commonly used complex types.
//!
//! The measurement tools run on the host's UI thread, so shared state is
//! `Rc<RefCell<T>>` throughout. These aliases name those shapes once.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mapmeasure_core::types::*;
//!
//! // Instead of: Rc<RefCell<MyState>>
//! let state: Shared<MyState> = shared(MyState::default());
//! let weak: WeakShared<MyState> = Rc::downgrade(&state);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// # Example
/// ```rust,ignore
/// let state: Shared<AppState> = shared(AppState::default());
/// state.borrow_mut().update();
/// ```
pub type Shared<T> = Rc<RefCell<T>>;

/// A non-owning handle to [`Shared`] state.
///
/// Callbacks stored inside the state they act on hold one of these so the
/// state can still be dropped.
pub type WeakShared<T> = Weak<RefCell<T>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// A UI callback with no parameters, cloneable so several overlays can hold it.
pub type UiCallback = Rc<dyn Fn()>;

// =============================================================================
// CONSTRUCTOR HELPERS
// =============================================================================

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new empty `SharedVec<T>`.
#[inline]
pub fn shared_vec<T>() -> SharedVec<T> {
    Rc::new(RefCell::new(Vec::new()))
}
