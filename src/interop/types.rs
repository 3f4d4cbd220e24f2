//! Type descriptors for values crossing the Lua stack
//!
//! Mirrors the runtime's own type tags and status codes so the rest of the
//! crate never handles raw integers from the C API.

use core::fmt;

/// Runtime type of a single stack slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Index does not refer to a valid slot
    None,
    Nil,
    Boolean,
    LightUserdata,
    Number,
    String,
    Table,
    Function,
    Userdata,
    Thread,
}

impl ValueKind {
    /// Map a `lua_type` tag to a kind. Unknown tags collapse to `None`.
    #[inline]
    pub const fn from_tag(tag: i32) -> Self {
        match tag {
            0 => Self::Nil,
            1 => Self::Boolean,
            2 => Self::LightUserdata,
            3 => Self::Number,
            4 => Self::String,
            5 => Self::Table,
            6 => Self::Function,
            7 => Self::Userdata,
            8 => Self::Thread,
            _ => Self::None,
        }
    }

    /// Name as the runtime spells it in its own messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "no value",
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::LightUserdata | Self::Userdata => "userdata",
            Self::Number => "number",
            Self::String => "string",
            Self::Table => "table",
            Self::Function => "function",
            Self::Thread => "thread",
        }
    }

    /// Kinds a string read accepts (numbers are converted in place)
    #[inline]
    pub const fn is_string_coercible(self) -> bool {
        matches!(self, Self::String | Self::Number)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a protected call or chunk load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStatus {
    Ok,
    Yield,
    /// Error raised while the function ran
    Runtime,
    Syntax,
    Memory,
    /// Error inside the message handler
    Handler,
    Unknown(i32),
}

impl CallStatus {
    #[inline]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::Yield,
            2 => Self::Runtime,
            3 => Self::Syntax,
            4 => Self::Memory,
            5 => Self::Handler,
            other => Self::Unknown(other),
        }
    }

    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Yield => 1,
            Self::Runtime => 2,
            Self::Syntax => 3,
            Self::Memory => 4,
            Self::Handler => 5,
            Self::Unknown(code) => code,
        }
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Yield => write!(f, "yielded"),
            Self::Runtime => write!(f, "runtime error"),
            Self::Syntax => write!(f, "syntax error"),
            Self::Memory => write!(f, "memory allocation error"),
            Self::Handler => write!(f, "error in message handler"),
            Self::Unknown(code) => write!(f, "unknown status {}", code),
        }
    }
}
