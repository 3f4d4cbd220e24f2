//! In-memory stack used by the unit tests
//!
//! Behaves like the Lua stack for everything the bridge touches. Script
//! functions are plain Rust closures registered as globals.

use crate::interop::{CallStatus, ValueKind};
use crate::stack::Stack;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type NativeFn = Rc<dyn Fn(Vec<Slot>) -> Result<Vec<Slot>, String>>;

#[derive(Clone)]
pub enum Slot {
    Nil,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    Bytes(Vec<u8>),
    Function(NativeFn),
}

impl Slot {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) | Self::Number(_) => ValueKind::Number,
            Self::Bytes(_) => ValueKind::String,
            Self::Function(_) => ValueKind::Function,
        }
    }

    pub fn str(value: &str) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Number(n) => write!(f, "{:?}", n),
            Self::Bytes(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
            Self::Function(_) => write!(f, "function"),
        }
    }
}

/// Number to text the way Lua prints it: whole floats keep their `.0`
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

pub struct VecStack {
    slots: RefCell<Vec<Slot>>,
    limit: i32,
    globals: RefCell<HashMap<String, Slot>>,
    calls: RefCell<Vec<(i32, i32)>>,
}

impl Default for VecStack {
    fn default() -> Self {
        Self::with_limit(i32::MAX)
    }
}

impl VecStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack that refuses to `reserve` past `limit` slots
    pub fn with_limit(limit: i32) -> Self {
        Self {
            slots: RefCell::default(),
            limit,
            globals: RefCell::default(),
            calls: RefCell::default(),
        }
    }

    /// Register a native function as a global
    pub fn define<F>(&self, name: &str, f: F)
    where
        F: Fn(Vec<Slot>) -> Result<Vec<Slot>, String> + 'static,
    {
        self.globals
            .borrow_mut()
            .insert(name.to_string(), Slot::Function(Rc::new(f)));
    }

    pub fn global(&self, name: &str) -> Option<Slot> {
        self.globals.borrow().get(name).cloned()
    }

    /// Copy of the slots, bottom first
    pub fn snapshot(&self) -> Vec<Slot> {
        self.slots.borrow().clone()
    }

    /// `(nargs, nresults)` of every protected call made so far
    pub fn calls(&self) -> Vec<(i32, i32)> {
        self.calls.borrow().clone()
    }

    fn absolute(&self, index: i32) -> Option<usize> {
        let len = self.slots.borrow().len() as i32;
        let abs = if index < 0 { len + index } else { index - 1 };
        (0..len).contains(&abs).then_some(abs as usize)
    }

    fn slot(&self, index: i32) -> Option<Slot> {
        self.absolute(index).map(|i| self.slots.borrow()[i].clone())
    }

    fn push(&self, slot: Slot) {
        self.slots.borrow_mut().push(slot);
    }
}

impl Stack for VecStack {
    fn depth(&self) -> i32 {
        self.slots.borrow().len() as i32
    }

    fn pop(&self, n: i32) {
        let mut slots = self.slots.borrow_mut();
        let keep = slots.len().saturating_sub(n.max(0) as usize);
        slots.truncate(keep);
    }

    fn reserve(&self, n: i32) -> bool {
        self.depth().saturating_add(n) <= self.limit
    }

    fn push_boolean(&self, value: bool) {
        self.push(Slot::Boolean(value));
    }

    fn push_integer(&self, value: i64) {
        self.push(Slot::Integer(value));
    }

    fn push_number(&self, value: f64) {
        self.push(Slot::Number(value));
    }

    fn push_string(&self, value: &[u8]) {
        self.push(Slot::Bytes(value.to_vec()));
    }

    fn kind_at(&self, index: i32) -> ValueKind {
        self.slot(index).map_or(ValueKind::None, |s| s.kind())
    }

    fn is_integer(&self, index: i32) -> bool {
        matches!(self.slot(index), Some(Slot::Integer(_)))
    }

    fn to_boolean(&self, index: i32) -> bool {
        !matches!(self.slot(index), None | Some(Slot::Nil) | Some(Slot::Boolean(false)))
    }

    fn to_integer(&self, index: i32) -> Option<i64> {
        match self.slot(index) {
            Some(Slot::Integer(i)) => Some(i),
            _ => None,
        }
    }

    fn to_number(&self, index: i32) -> f64 {
        match self.slot(index) {
            Some(Slot::Integer(i)) => i as f64,
            Some(Slot::Number(n)) => n,
            _ => 0.0,
        }
    }

    fn to_bytes(&self, index: i32) -> Option<Vec<u8>> {
        let abs = self.absolute(index)?;
        let mut slots = self.slots.borrow_mut();
        let converted = match &slots[abs] {
            Slot::Bytes(b) => return Some(b.clone()),
            Slot::Integer(i) => i.to_string().into_bytes(),
            Slot::Number(n) => format_number(*n).into_bytes(),
            _ => return None,
        };
        slots[abs] = Slot::Bytes(converted.clone());
        Some(converted)
    }

    fn get_global(&self, name: &str) {
        let value = self.global(name).unwrap_or(Slot::Nil);
        self.push(value);
    }

    fn set_global(&self, name: &str) {
        let value = self.slots.borrow_mut().pop().unwrap_or(Slot::Nil);
        self.globals.borrow_mut().insert(name.to_string(), value);
    }

    fn protected_call(&self, nargs: i32, nresults: i32) -> CallStatus {
        self.calls.borrow_mut().push((nargs, nresults));
        let (function, args) = {
            let mut slots = self.slots.borrow_mut();
            let split = usize::try_from(nargs)
                .ok()
                .and_then(|nargs| slots.len().checked_sub(nargs + 1));
            let Some(split) = split else {
                return CallStatus::Runtime;
            };
            let args = slots.split_off(split + 1);
            (slots.pop(), args)
        };
        let outcome = match function {
            Some(Slot::Function(f)) => f(args),
            _ => Err("attempt to call a non-function value".to_string()),
        };
        match outcome {
            Ok(mut results) => {
                results.resize(nresults as usize, Slot::Nil);
                self.slots.borrow_mut().extend(results);
                CallStatus::Ok
            }
            Err(message) => {
                self.push(Slot::str(&message));
                CallStatus::Runtime
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_floats_keep_fraction() {
        let stack = VecStack::new();
        stack.push_number(1.0);
        stack.push_number(-3.0);
        stack.push_number(0.5);
        stack.push_integer(1);
        assert_eq!(stack.to_bytes(1).unwrap(), b"1.0");
        assert_eq!(stack.to_bytes(2).unwrap(), b"-3.0");
        assert_eq!(stack.to_bytes(3).unwrap(), b"0.5");
        assert_eq!(stack.to_bytes(4).unwrap(), b"1");
    }

    #[test]
    fn test_call_with_too_few_slots_fails() {
        let stack = VecStack::new();
        stack.define("f", |_| Ok(vec![]));
        stack.get_global("f");
        assert_eq!(stack.protected_call(3, 0), CallStatus::Runtime);
        assert_eq!(stack.protected_call(-1, 0), CallStatus::Runtime);
        assert_eq!(stack.depth(), 1);
    }
}
