//! Result unpacking - read a fixed-arity result shape off the stack
//!
//! A call that returns N values leaves them in call order with the last one
//! on top. All offset arithmetic lives in [`result_slot`].

use super::marshal::FromSlot;
use crate::error::MarshalError;
use crate::stack::Stack;

/// Stack index of the `position`-th (0-based) of `count` results
///
/// The first result is the deepest: `-(count - position)`.
#[inline]
pub const fn result_slot(position: i32, count: i32) -> i32 {
    -(count - position)
}

/// The result shape of a call: nothing, one scalar, or an ordered tuple
pub trait Results: Sized {
    /// Number of results to request from the runtime
    const COUNT: i32;

    /// Read `COUNT` results from the top of the stack without popping them
    fn unpack<S: Stack + ?Sized>(stack: &S) -> Result<Self, MarshalError>;
}

/// Read `R` from the topmost `R::COUNT` slots; the caller pops them
#[inline]
pub fn unpack_results<R: Results>(stack: &(impl Stack + ?Sized)) -> Result<R, MarshalError> {
    R::unpack(stack)
}

impl Results for () {
    const COUNT: i32 = 0;

    #[inline]
    fn unpack<S: Stack + ?Sized>(_stack: &S) -> Result<Self, MarshalError> {
        Ok(())
    }
}

macro_rules! impl_scalar_results {
    ($($ty:ty),+ $(,)?) => {$(
        impl Results for $ty {
            const COUNT: i32 = 1;

            #[inline]
            fn unpack<S: Stack + ?Sized>(stack: &S) -> Result<Self, MarshalError> {
                <$ty as FromSlot>::read_from(stack, result_slot(0, 1))
            }
        }
    )+};
}

impl_scalar_results!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String);

macro_rules! impl_tuple_results {
    ($count:literal; $($idx:literal => $name:ident),+) => {
        impl<$($name: FromSlot),+> Results for ($($name,)+) {
            const COUNT: i32 = $count;

            fn unpack<S: Stack + ?Sized>(stack: &S) -> Result<Self, MarshalError> {
                Ok(($($name::read_from(stack, result_slot($idx, $count))?,)+))
            }
        }
    };
}

impl_tuple_results!(1; 0 => A);
impl_tuple_results!(2; 0 => A, 1 => B);
impl_tuple_results!(3; 0 => A, 1 => B, 2 => C);
impl_tuple_results!(4; 0 => A, 1 => B, 2 => C, 3 => D);
impl_tuple_results!(5; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_tuple_results!(6; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_tuple_results!(7; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
impl_tuple_results!(8; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);
impl_tuple_results!(9; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I);
impl_tuple_results!(10; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J);
impl_tuple_results!(11; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J, 10 => K);
impl_tuple_results!(12; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J, 10 => K, 11 => L);
