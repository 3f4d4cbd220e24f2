//! luacall - type-safe calls into global Lua functions
//!
//! Host code binds a global name to a Rust signature and calls it like a
//! normal function. Arguments are pushed onto the Lua stack, the function runs
//! under a protected call, and results are read back into Rust types.
//!
//! ```no_run
//! use luacall::{LuaFunction, State};
//!
//! let lua = State::new()?;
//! lua.exec("function add(a, b) return a + b end")?;
//!
//! let add: LuaFunction<i64, (i64, i64)> = lua.function("add");
//! assert_eq!(add.call((2, 3))?, 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A context is single-threaded: [`State`] is neither `Send` nor `Sync`, and
//! every handle borrows the state it was built on.

pub mod config;
pub mod error;
pub mod globals;
pub mod interop;
pub mod logging;
pub mod lua;
pub mod stack;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used items
pub use config::{Config, ConfigError, StateConfig};
pub use error::{CallError, GlobalError, MarshalError, MarshalErrorKind, StateError};
pub use globals::{get_global, set_global};
pub use interop::{
    pack_args, push, read, unpack_results, CallStatus, FromSlot, LuaFunction, PackArgs, Results,
    ToSlot, ValueKind,
};
pub use logging::LogConfig;
pub use lua::State;
pub use stack::Stack;

/// Raw Lua C API, for hosts that create or share states themselves
pub use mlua_sys as ffi;
