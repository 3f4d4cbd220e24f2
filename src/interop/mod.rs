//! Interoperability - call global Lua functions with Rust types
//!
//! Design: compile-time dispatch from Rust types to stack operations
//!
//! Architecture:
//! - `types.rs` - slot kinds and call status codes
//! - `marshal.rs` - one scalar ↔ one stack slot
//! - `pack.rs` - argument tuples pushed left to right
//! - `unpack.rs` - result shapes read from the top of the stack
//! - `call.rs` - callable handles tying the pieces to one protected call

mod types;
mod marshal;
mod pack;
mod unpack;
mod call;

pub use types::{CallStatus, ValueKind};
pub use marshal::{push, read, FromSlot, ToSlot};
pub use pack::{pack_args, PackArgs};
pub use unpack::{result_slot, unpack_results, Results};
pub use call::LuaFunction;
