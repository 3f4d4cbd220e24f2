//! Callable handles for global Lua functions
//!
//! A [`LuaFunction`] binds a context and a global name to a type signature:
//! `A` is the argument tuple and `R` the result shape (`()`, a scalar, or a
//! tuple). Each call leaves the stack at the depth it found it, on success
//! and on every error path.

use core::fmt;
use core::marker::PhantomData;

use super::pack::PackArgs;
use super::unpack::Results;
use crate::error::CallError;
use crate::logging::{log_call, log_call_return, log_marshal_error, log_script_error, log_unbalanced};
use crate::lua::State;
use crate::stack::Stack;

/// A typed reference to a named global function
///
/// The handle borrows its context and holds no script values between calls.
/// It is deliberately not `Clone`.
pub struct LuaFunction<'s, R, A = (), S: ?Sized = State> {
    stack: &'s S,
    name: String,
    signature: PhantomData<fn(A) -> R>,
}

impl<'s, R, A, S> LuaFunction<'s, R, A, S>
where
    R: Results,
    A: PackArgs,
    S: Stack + ?Sized,
{
    pub fn new(stack: &'s S, name: impl Into<String>) -> Self {
        Self {
            stack,
            name: name.into(),
            signature: PhantomData,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn stack(&self) -> &'s S {
        self.stack
    }

    /// Number of arguments every call pushes
    #[inline]
    pub fn arg_count(&self) -> i32 {
        A::COUNT
    }

    /// Number of results every call requests from the runtime
    #[inline]
    pub fn result_count(&self) -> i32 {
        R::COUNT
    }

    /// Invoke the function
    ///
    /// Looks up the global, pushes `args` left to right, runs a protected
    /// call requesting `R::COUNT` results, reads them and pops them.
    pub fn call(&self, args: A) -> Result<R, CallError> {
        let stack = self.stack;
        let base = stack.depth();

        // function value, then room for whichever of args or results is larger
        let needed = A::COUNT.max(R::COUNT) + 1;
        if !stack.reserve(needed) {
            return Err(CallError::StackExhausted {
                function: self.name.clone(),
                needed,
            });
        }

        stack.get_global(&self.name);
        let nargs = args.pack(stack);
        log_call(&self.name, nargs, R::COUNT);

        let status = stack.protected_call(nargs, R::COUNT);
        if !status.is_ok() {
            // drop the error object unread
            stack.pop(stack.depth() - base);
            log_script_error(&self.name, status);
            return Err(CallError::Script {
                function: self.name.clone(),
                status,
            });
        }

        let result = R::unpack(stack);
        stack.pop(R::COUNT);

        let depth = stack.depth();
        if depth != base {
            log_unbalanced(&self.name, base, depth);
            if depth > base {
                stack.pop(depth - base);
            }
            return Err(CallError::Unbalanced {
                function: self.name.clone(),
                expected: base,
                found: depth,
            });
        }

        log_call_return(&self.name, result.is_ok());
        result.map_err(|err| {
            log_marshal_error(&self.name, &err);
            CallError::Marshal(err)
        })
    }
}

impl<R, A, S: ?Sized> fmt::Debug for LuaFunction<'_, R, A, S>
where
    R: Results,
    A: PackArgs,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuaFunction")
            .field("name", &self.name)
            .field("args", &A::COUNT)
            .field("results", &R::COUNT)
            .finish()
    }
}
