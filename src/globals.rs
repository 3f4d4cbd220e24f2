//! Typed access to global variables
//!
//! Built on the same marshaling layer as calls and with the same guarantee:
//! the stack depth is unchanged afterwards, whether or not the access succeeds.

use crate::error::GlobalError;
use crate::interop::{FromSlot, ToSlot};
use crate::stack::Stack;

fn reserve_one(stack: &(impl Stack + ?Sized), name: &str) -> Result<(), GlobalError> {
    if stack.reserve(1) {
        Ok(())
    } else {
        Err(GlobalError::StackExhausted {
            name: name.to_string(),
        })
    }
}

/// Assign `value` to the global `name`
pub fn set_global<T: ToSlot + ?Sized>(
    stack: &(impl Stack + ?Sized),
    name: &str,
    value: &T,
) -> Result<(), GlobalError> {
    reserve_one(stack, name)?;
    value.push_to(stack);
    stack.set_global(name);
    Ok(())
}

/// Read the global `name` as `T`
pub fn get_global<T: FromSlot>(stack: &(impl Stack + ?Sized), name: &str) -> Result<T, GlobalError> {
    reserve_one(stack, name)?;
    stack.get_global(name);
    let value = T::read_from(stack, -1);
    stack.pop(1);
    Ok(value?)
}
