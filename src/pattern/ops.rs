//! Operator sugar over the [`Pattern`] combinator methods.

use std::ops::{BitOr, Mul, Neg, Rem, Shr, Sub};

use super::Pattern;

impl<C> Shr for Pattern<C> {
    type Output = Pattern<C>;

    fn shr(self, rhs: Pattern<C>) -> Pattern<C> {
        self.then(rhs)
    }
}

impl<C> BitOr for Pattern<C> {
    type Output = Pattern<C>;

    fn bitor(self, rhs: Pattern<C>) -> Pattern<C> {
        self.or(rhs)
    }
}

impl<C> Neg for Pattern<C> {
    type Output = Pattern<C>;

    fn neg(self) -> Pattern<C> {
        self.negate()
    }
}

/// `a - b`: `a`, provided `b` does not match at the same position.
impl<C> Sub for Pattern<C> {
    type Output = Pattern<C>;

    fn sub(self, rhs: Pattern<C>) -> Pattern<C> {
        -rhs >> self
    }
}

impl<C> Mul<usize> for Pattern<C> {
    type Output = Pattern<C>;

    fn mul(self, count: usize) -> Pattern<C> {
        self.repeat(count)
    }
}

/// `p % n` is "at least n" for `n >= 0` and "at most |n|" for `n < 0`.
impl<C> Rem<isize> for Pattern<C> {
    type Output = Pattern<C>;

    fn rem(self, n: isize) -> Pattern<C> {
        let count = n.unsigned_abs();
        if n < 0 {
            self.at_most(count)
        } else {
            self.at_least(count)
        }
    }
}

// Borrowed operands clone the handle, which is cheap.
macro_rules! forward_ref_binop {
    ($imp:ident, $method:ident) => {
        impl<C> $imp<&Pattern<C>> for &Pattern<C> {
            type Output = Pattern<C>;

            fn $method(self, rhs: &Pattern<C>) -> Pattern<C> {
                $imp::$method(self.clone(), rhs.clone())
            }
        }

        impl<C> $imp<Pattern<C>> for &Pattern<C> {
            type Output = Pattern<C>;

            fn $method(self, rhs: Pattern<C>) -> Pattern<C> {
                $imp::$method(self.clone(), rhs)
            }
        }

        impl<C> $imp<&Pattern<C>> for Pattern<C> {
            type Output = Pattern<C>;

            fn $method(self, rhs: &Pattern<C>) -> Pattern<C> {
                $imp::$method(self, rhs.clone())
            }
        }
    };
}

forward_ref_binop!(Shr, shr);
forward_ref_binop!(BitOr, bitor);
forward_ref_binop!(Sub, sub);

impl<C> Neg for &Pattern<C> {
    type Output = Pattern<C>;

    fn neg(self) -> Pattern<C> {
        self.clone().negate()
    }
}

impl<C> Mul<usize> for &Pattern<C> {
    type Output = Pattern<C>;

    fn mul(self, count: usize) -> Pattern<C> {
        self.clone().repeat(count)
    }
}

impl<C> Rem<isize> for &Pattern<C> {
    type Output = Pattern<C>;

    fn rem(self, n: isize) -> Pattern<C> {
        self.clone() % n
    }
}
