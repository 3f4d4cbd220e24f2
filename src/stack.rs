//! The low-level stack protocol the bridge drives
//!
//! Every method takes `&self`: a context is an opaque, interior-mutable handle
//! shared between the host and any number of callable handles. Implementations
//! are expected to be single-threaded.
//!
//! Indices follow the runtime's convention: positive indices count from the
//! bottom starting at 1, negative indices count from the top with -1 being the
//! topmost slot.

use crate::interop::{CallStatus, ValueKind};

pub trait Stack {
    /// Number of occupied slots
    fn depth(&self) -> i32;

    /// Discard the top `n` slots
    fn pop(&self, n: i32);

    /// Make room for `n` more slots; false if the stack cannot grow that far
    fn reserve(&self, n: i32) -> bool;

    fn push_boolean(&self, value: bool);
    fn push_integer(&self, value: i64);
    fn push_number(&self, value: f64);

    /// Push a string; the runtime keeps its own copy of the bytes
    fn push_string(&self, value: &[u8]);

    fn kind_at(&self, index: i32) -> ValueKind;

    /// True when the slot is a number carrying the integer subtype
    fn is_integer(&self, index: i32) -> bool;

    /// Caller has checked the slot is a boolean
    fn to_boolean(&self, index: i32) -> bool;

    /// Exact integer value, `None` unless the slot has the integer subtype
    fn to_integer(&self, index: i32) -> Option<i64>;

    /// Caller has checked the slot is a number
    fn to_number(&self, index: i32) -> f64;

    /// Bytes of a string slot. Numbers are converted to their string form in
    /// place. `None` for every other kind.
    fn to_bytes(&self, index: i32) -> Option<Vec<u8>>;

    /// Push the value of the named global (nil when undefined)
    fn get_global(&self, name: &str);

    /// Pop the top value and assign it to the named global
    fn set_global(&self, name: &str);

    /// Pop the function and `nargs` arguments below the top, run it, and push
    /// exactly `nresults` values on success or a single error object on failure.
    fn protected_call(&self, nargs: i32, nresults: i32) -> CallStatus;
}

