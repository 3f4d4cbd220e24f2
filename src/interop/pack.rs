//! Argument packing - push a typed argument tuple left to right
//!
//! Tuple impls are generated for arities 0 through 12, so every argument is
//! checked against its declared type at compile time.

use super::marshal::ToSlot;
use crate::stack::Stack;

/// A fixed-arity, heterogeneously typed argument list
pub trait PackArgs {
    /// Number of slots `pack` pushes
    const COUNT: i32;

    /// Push every element in declaration order and return the count pushed
    fn pack<S: Stack + ?Sized>(&self, stack: &S) -> i32;
}

/// Push `args` so the first element ends up deepest; returns the count
#[inline]
pub fn pack_args<A: PackArgs>(stack: &(impl Stack + ?Sized), args: &A) -> i32 {
    args.pack(stack)
}

impl PackArgs for () {
    const COUNT: i32 = 0;

    #[inline]
    fn pack<S: Stack + ?Sized>(&self, _stack: &S) -> i32 {
        0
    }
}

macro_rules! impl_pack_args {
    ($count:literal; $($idx:tt => $name:ident),+) => {
        impl<$($name: ToSlot),+> PackArgs for ($($name,)+) {
            const COUNT: i32 = $count;

            #[inline]
            fn pack<S: Stack + ?Sized>(&self, stack: &S) -> i32 {
                $( self.$idx.push_to(stack); )+
                Self::COUNT
            }
        }
    };
}

impl_pack_args!(1; 0 => A);
impl_pack_args!(2; 0 => A, 1 => B);
impl_pack_args!(3; 0 => A, 1 => B, 2 => C);
impl_pack_args!(4; 0 => A, 1 => B, 2 => C, 3 => D);
impl_pack_args!(5; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_pack_args!(6; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_pack_args!(7; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
impl_pack_args!(8; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);
impl_pack_args!(9; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I);
impl_pack_args!(10; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J);
impl_pack_args!(11; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J, 10 => K);
impl_pack_args!(12; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J, 10 => K, 11 => L);
