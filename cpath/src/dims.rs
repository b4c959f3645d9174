use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Position on the grid, `Dims(x, y)`.
///
/// `x` grows to the right, `y` grows downwards, so the first row of a grid is `y == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    pub const UP: Dims = Dims(0, -1);
    pub const DOWN: Dims = Dims(0, 1);
    pub const LEFT: Dims = Dims(-1, 0);
    pub const RIGHT: Dims = Dims(1, 0);

    /// Axis directions in the order neighbors are expanded.
    pub const DIRECTIONS: [Dims; 4] = [Dims::UP, Dims::DOWN, Dims::LEFT, Dims::RIGHT];

    pub fn abs(self) -> Self {
        Dims(self.0.abs(), self.1.abs())
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// Manhattan (L1) distance.
    pub fn manhattan(self, other: Dims) -> i32 {
        (self - other).abs_sum()
    }

    pub fn is_adjacent(self, other: Dims) -> bool {
        self.manhattan(other) == 1
    }

    /// Iterates positions of the `size` rectangle starting at `start` in row-major order.
    pub fn iter_fill(start: Dims, size: Dims) -> impl Iterator<Item = Dims> {
        (start.1..start.1 + size.1)
            .flat_map(move |y| (start.0..start.0 + size.0).map(move |x| Dims(x, y)))
    }
}

macro_rules! impl_op {
    ($trait:ident, $op:ident, $assign_trait:ident, $assign_op:ident) => {
        impl $trait for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: Dims) -> Dims {
                Dims(self.0.$op(other.0), self.1.$op(other.1))
            }
        }

        impl $assign_trait for Dims {
            #[inline(always)]
            fn $assign_op(&mut self, other: Dims) {
                *self = self.$op(other);
            }
        }
    };
}

impl_op!(Add, add, AddAssign, add_assign);
impl_op!(Sub, sub, SubAssign, sub_assign);

impl Mul<i32> for Dims {
    type Output = Dims;

    #[inline(always)]
    fn mul(self, scale: i32) -> Dims {
        Dims(self.0 * scale, self.1 * scale)
    }
}

impl MulAssign<i32> for Dims {
    #[inline(always)]
    fn mul_assign(&mut self, scale: i32) {
        *self = *self * scale;
    }
}

impl Neg for Dims {
    type Output = Dims;

    fn neg(self) -> Dims {
        Dims(-self.0, -self.1)
    }
}

impl From<(i32, i32)> for Dims {
    fn from((x, y): (i32, i32)) -> Self {
        Dims(x, y)
    }
}

impl From<Dims> for (i32, i32) {
    fn from(dims: Dims) -> Self {
        (dims.0, dims.1)
    }
}

impl From<[i32; 2]> for Dims {
    fn from(arr: [i32; 2]) -> Self {
        Dims(arr[0], arr[1])
    }
}

impl From<Dims> for [i32; 2] {
    fn from(dims: Dims) -> Self {
        [dims.0, dims.1]
    }
}

#[cfg(test)]
mod tests {
    use super::Dims;

    #[test]
    fn arithmetic() {
        assert_eq!(Dims(1, 2) + Dims(3, -4), Dims(4, -2));
        assert_eq!(Dims(1, 2) - Dims(3, -4), Dims(-2, 6));
        assert_eq!(Dims::LEFT * 2, Dims(-2, 0));
        assert_eq!(-Dims::UP, Dims::DOWN);

        let mut pos = Dims(1, 1);
        pos += Dims::RIGHT * 2;
        assert_eq!(pos, Dims(3, 1));
    }

    #[test]
    fn manhattan() {
        assert_eq!(Dims(0, 0).manhattan(Dims(2, 2)), 4);
        assert_eq!(Dims(4, 0).manhattan(Dims(0, 3)), 7);
        assert!(Dims(2, 3).is_adjacent(Dims(2, 4)));
        assert!(!Dims(2, 3).is_adjacent(Dims(3, 4)));
        assert!(!Dims(2, 3).is_adjacent(Dims(2, 3)));
    }

    #[test]
    fn iter_fill_is_row_major() {
        let cells: Vec<_> = Dims::iter_fill(Dims::ZERO, Dims(2, 2)).collect();
        assert_eq!(cells, vec![Dims(0, 0), Dims(1, 0), Dims(0, 1), Dims(1, 1)]);
    }
}
