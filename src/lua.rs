//! Lua 5.4 runtime adapter
//!
//! `State` implements [`Stack`] directly on a raw `lua_State` through the
//! C API. It either owns the state (created by [`State::new`], closed on drop)
//! or borrows one the embedding host created ([`State::from_raw`]).
//!
//! `State` holds a raw pointer and is therefore neither `Send` nor `Sync`.

use core::ffi::{c_char, c_int};
use core::fmt;
use core::ptr::{self, NonNull};
use std::ffi::CString;

use mlua_sys as ffi;

use crate::config::StateConfig;
use crate::error::StateError;
use crate::interop::{CallStatus, LuaFunction, PackArgs, Results, ValueKind};
use crate::logging::{log_chunk_error, log_state_close, log_state_open};
use crate::stack::Stack;

/// Name chunks run through [`State::exec`] report in tracebacks
const CHUNK_NAME: &[u8] = b"=luacall\0";

pub struct State {
    raw: NonNull<ffi::lua_State>,
    owned: bool,
}

impl State {
    /// Create a new state with the standard libraries opened
    pub fn new() -> Result<Self, StateError> {
        Self::with_config(&StateConfig::default())
    }

    pub fn with_config(config: &StateConfig) -> Result<Self, StateError> {
        let raw = NonNull::new(unsafe { ffi::luaL_newstate() }).ok_or(StateError::Alloc)?;
        if config.open_stdlib {
            unsafe { ffi::luaL_openlibs(raw.as_ptr()) };
        }
        log_state_open(true, config.open_stdlib);
        Ok(Self { raw, owned: true })
    }

    /// Borrow a state owned by the host; it is never closed by `State`
    ///
    /// # Safety
    /// `raw` must point to a live `lua_State` that outlives the returned
    /// value and every handle built on it, and must not be used from another
    /// thread meanwhile.
    pub unsafe fn from_raw(raw: *mut ffi::lua_State) -> Option<Self> {
        let raw = NonNull::new(raw)?;
        log_state_open(false, false);
        Some(Self { raw, owned: false })
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut ffi::lua_State {
        self.raw.as_ptr()
    }

    /// Whether dropping this value closes the underlying state
    #[inline]
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Compile and run a chunk of Lua source, discarding its results
    ///
    /// On failure the error object is popped unread and the stack is left at
    /// the depth it had on entry.
    pub fn exec(&self, source: &str) -> Result<(), StateError> {
        // the compiled chunk
        if !self.reserve(1) {
            return Err(StateError::StackExhausted);
        }
        let base = self.depth();
        let status = CallStatus::from_code(unsafe {
            ffi::luaL_loadbufferx(
                self.as_ptr(),
                source.as_ptr().cast::<c_char>(),
                source.len(),
                CHUNK_NAME.as_ptr().cast::<c_char>(),
                ptr::null(),
            )
        });
        if !status.is_ok() {
            self.pop(self.depth() - base);
            log_chunk_error("load", status);
            return Err(StateError::Load { status });
        }

        let status = self.protected_call(0, 0);
        if !status.is_ok() {
            self.pop(self.depth() - base);
            log_chunk_error("run", status);
            return Err(StateError::Run { status });
        }
        Ok(())
    }

    /// Bind a callable handle to the global function `name`
    pub fn function<R: Results, A: PackArgs>(&self, name: impl Into<String>) -> LuaFunction<'_, R, A> {
        LuaFunction::new(self, name)
    }
}

impl Stack for State {
    #[inline]
    fn depth(&self) -> i32 {
        unsafe { ffi::lua_gettop(self.as_ptr()) }
    }

    #[inline]
    fn pop(&self, n: i32) {
        if n > 0 {
            unsafe { ffi::lua_settop(self.as_ptr(), -n - 1) };
        }
    }

    #[inline]
    fn reserve(&self, n: i32) -> bool {
        unsafe { ffi::lua_checkstack(self.as_ptr(), n) != 0 }
    }

    #[inline]
    fn push_boolean(&self, value: bool) {
        unsafe { ffi::lua_pushboolean(self.as_ptr(), c_int::from(value)) };
    }

    #[inline]
    fn push_integer(&self, value: i64) {
        unsafe { ffi::lua_pushinteger(self.as_ptr(), value) };
    }

    #[inline]
    fn push_number(&self, value: f64) {
        unsafe { ffi::lua_pushnumber(self.as_ptr(), value) };
    }

    #[inline]
    fn push_string(&self, value: &[u8]) {
        unsafe {
            ffi::lua_pushlstring(self.as_ptr(), value.as_ptr().cast::<c_char>(), value.len());
        }
    }

    #[inline]
    fn kind_at(&self, index: i32) -> ValueKind {
        ValueKind::from_tag(unsafe { ffi::lua_type(self.as_ptr(), index) })
    }

    #[inline]
    fn is_integer(&self, index: i32) -> bool {
        unsafe { ffi::lua_isinteger(self.as_ptr(), index) != 0 }
    }

    #[inline]
    fn to_boolean(&self, index: i32) -> bool {
        unsafe { ffi::lua_toboolean(self.as_ptr(), index) != 0 }
    }

    fn to_integer(&self, index: i32) -> Option<i64> {
        if !self.is_integer(index) {
            return None;
        }
        Some(unsafe { ffi::lua_tointegerx(self.as_ptr(), index, ptr::null_mut()) })
    }

    #[inline]
    fn to_number(&self, index: i32) -> f64 {
        unsafe { ffi::lua_tonumberx(self.as_ptr(), index, ptr::null_mut()) }
    }

    fn to_bytes(&self, index: i32) -> Option<Vec<u8>> {
        let mut len = 0usize;
        let data = unsafe { ffi::lua_tolstring(self.as_ptr(), index, &mut len) };
        if data.is_null() {
            return None;
        }
        // Valid while the slot stays on the stack; copied out before returning
        let bytes = unsafe { core::slice::from_raw_parts(data.cast::<u8>(), len) };
        Some(bytes.to_vec())
    }

    fn get_global(&self, name: &str) {
        match CString::new(name) {
            Ok(name) => unsafe {
                ffi::lua_getglobal(self.as_ptr(), name.as_ptr());
            },
            // No global can be reached through the C API by this name
            Err(_) => unsafe { ffi::lua_pushnil(self.as_ptr()) },
        }
    }

    fn set_global(&self, name: &str) {
        match CString::new(name) {
            Ok(name) => unsafe { ffi::lua_setglobal(self.as_ptr(), name.as_ptr()) },
            Err(_) => self.pop(1),
        }
    }

    fn protected_call(&self, nargs: i32, nresults: i32) -> CallStatus {
        let code = unsafe { ffi::lua_pcallk(self.as_ptr(), nargs, nresults, 0, 0, None) };
        CallStatus::from_code(code)
    }
}

impl Drop for State {
    fn drop(&mut self) {
        if self.owned {
            log_state_close();
            unsafe { ffi::lua_close(self.as_ptr()) };
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("raw", &self.raw)
            .field("owned", &self.owned)
            .field("depth", &self.depth())
            .finish()
    }
}
