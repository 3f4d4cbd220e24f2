//! Type marshaling - Rust scalars ↔ Lua stack slots
//!
//! Design: one trait impl per supported scalar, selected at compile time.
//! Reads check the slot's runtime kind before converting; the only coercions
//! allowed are number → string and float → integer truncation.

use crate::error::MarshalError;
use crate::interop::ValueKind;
use crate::stack::Stack;

/// A Rust value that can be pushed as exactly one stack slot
pub trait ToSlot {
    fn push_to<S: Stack + ?Sized>(&self, stack: &S);
}

/// A Rust value that can be read back from one stack slot
pub trait FromSlot: Sized {
    /// Type name reported when the slot holds something else
    const EXPECTED: &'static str;

    fn read_from<S: Stack + ?Sized>(stack: &S, index: i32) -> Result<Self, MarshalError>;
}

/// Push one value; stack depth grows by one
#[inline]
pub fn push<T: ToSlot + ?Sized>(stack: &(impl Stack + ?Sized), value: &T) {
    value.push_to(stack);
}

/// Read the slot at `index` as `T` without popping it
#[inline]
pub fn read<T: FromSlot>(stack: &(impl Stack + ?Sized), index: i32) -> Result<T, MarshalError> {
    T::read_from(stack, index)
}

impl<T: ToSlot + ?Sized> ToSlot for &T {
    #[inline]
    fn push_to<S: Stack + ?Sized>(&self, stack: &S) {
        (**self).push_to(stack);
    }
}

impl ToSlot for bool {
    #[inline]
    fn push_to<S: Stack + ?Sized>(&self, stack: &S) {
        stack.push_boolean(*self);
    }
}

impl FromSlot for bool {
    const EXPECTED: &'static str = "boolean";

    fn read_from<S: Stack + ?Sized>(stack: &S, index: i32) -> Result<Self, MarshalError> {
        expect_kind(stack, index, ValueKind::Boolean, Self::EXPECTED)?;
        Ok(stack.to_boolean(index))
    }
}

fn expect_kind<S: Stack + ?Sized>(
    stack: &S,
    index: i32,
    kind: ValueKind,
    expected: &'static str,
) -> Result<(), MarshalError> {
    let found = stack.kind_at(index);
    if found == kind {
        Ok(())
    } else {
        Err(MarshalError::type_mismatch(index, expected, found))
    }
}

/// Integer subtype is read exactly, floats truncate toward zero and saturate
fn read_integer<S: Stack + ?Sized>(
    stack: &S,
    index: i32,
    expected: &'static str,
) -> Result<i64, MarshalError> {
    expect_kind(stack, index, ValueKind::Number, expected)?;
    match stack.to_integer(index) {
        Some(value) => Ok(value),
        None => Ok(stack.to_number(index) as i64),
    }
}

macro_rules! impl_integer {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToSlot for $ty {
            #[inline]
            fn push_to<S: Stack + ?Sized>(&self, stack: &S) {
                stack.push_integer(i64::from(*self));
            }
        }

        impl FromSlot for $ty {
            const EXPECTED: &'static str = stringify!($ty);

            fn read_from<S: Stack + ?Sized>(stack: &S, index: i32) -> Result<Self, MarshalError> {
                let value = read_integer(stack, index, Self::EXPECTED)?;
                Ok(<$ty>::try_from(value).unwrap_or(if value < 0 { <$ty>::MIN } else { <$ty>::MAX }))
            }
        }
    )+};
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32);

impl ToSlot for f64 {
    #[inline]
    fn push_to<S: Stack + ?Sized>(&self, stack: &S) {
        stack.push_number(*self);
    }
}

impl FromSlot for f64 {
    const EXPECTED: &'static str = "f64";

    fn read_from<S: Stack + ?Sized>(stack: &S, index: i32) -> Result<Self, MarshalError> {
        expect_kind(stack, index, ValueKind::Number, Self::EXPECTED)?;
        Ok(stack.to_number(index))
    }
}

impl ToSlot for f32 {
    #[inline]
    fn push_to<S: Stack + ?Sized>(&self, stack: &S) {
        stack.push_number(f64::from(*self));
    }
}

impl FromSlot for f32 {
    const EXPECTED: &'static str = "f32";

    fn read_from<S: Stack + ?Sized>(stack: &S, index: i32) -> Result<Self, MarshalError> {
        expect_kind(stack, index, ValueKind::Number, Self::EXPECTED)?;
        Ok(stack.to_number(index) as f32)
    }
}

impl ToSlot for str {
    #[inline]
    fn push_to<S: Stack + ?Sized>(&self, stack: &S) {
        stack.push_string(self.as_bytes());
    }
}

impl ToSlot for String {
    #[inline]
    fn push_to<S: Stack + ?Sized>(&self, stack: &S) {
        stack.push_string(self.as_bytes());
    }
}

impl FromSlot for String {
    const EXPECTED: &'static str = "string";

    fn read_from<S: Stack + ?Sized>(stack: &S, index: i32) -> Result<Self, MarshalError> {
        let found = stack.kind_at(index);
        if !found.is_string_coercible() {
            return Err(MarshalError::type_mismatch(index, Self::EXPECTED, found));
        }
        let bytes = stack
            .to_bytes(index)
            .ok_or_else(|| MarshalError::type_mismatch(index, Self::EXPECTED, found))?;
        String::from_utf8(bytes).map_err(|_| MarshalError::invalid_utf8(index))
    }
}
