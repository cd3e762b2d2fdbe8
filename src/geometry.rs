//! Points, sizes and rectangles used across pixel buffers and effects.
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use num_traits::{Num, Signed};

use crate::ParseRectangleError;

/// Integer point in image space. Also used as offset delta of effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle given by its left-top corner and dimensions.
///
/// Right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub left: T,
    pub top: T,
    pub width: T,
    pub height: T,
}

pub type Rectangle = Rect<i32>;
pub type RectangleF = Rect<f32>;

#[inline]
fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if a >= b {
        a
    } else {
        b
    }
}

#[inline]
fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if a <= b {
        a
    } else {
        b
    }
}

impl<T: Num + Copy + PartialOrd> Rect<T> {
    #[inline]
    pub fn new(left: T, top: T, width: T, height: T) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle with zero area at the origin.
    #[inline]
    pub fn empty() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::zero())
    }

    /// Rectangle placed at the origin with given dimensions.
    #[inline]
    pub fn with_size(width: T, height: T) -> Self {
        Self::new(T::zero(), T::zero(), width, height)
    }

    #[inline]
    pub fn right(&self) -> T {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> T {
        self.top + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= T::zero() || self.height <= T::zero()
    }

    #[inline]
    pub fn area(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            self.width * self.height
        }
    }

    #[inline]
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Returns `true` if `other` lies completely inside this rectangle.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the common part of two rectangles
    /// or an empty rectangle if they don't overlap.
    pub fn intersect(&self, other: &Self) -> Self {
        let left = max_of(self.left, other.left);
        let top = max_of(self.top, other.top);
        let right = min_of(self.right(), other.right());
        let bottom = min_of(self.bottom(), other.bottom());
        if right <= left || bottom <= top {
            return Self::empty();
        }
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn offset(&self, dx: T, dy: T) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}

impl<T: Num + Signed + Copy + PartialOrd> Rect<T> {
    /// Converts a rectangle with negative width or height (e.g. one that was
    /// dragged from bottom-right to top-left) into the equivalent rectangle
    /// with non-negative dimensions.
    pub fn normalized(&self) -> Self {
        let mut res = *self;
        if res.width < T::zero() {
            res.left = res.left + res.width;
            res.width = res.width.abs();
        }
        if res.height < T::zero() {
            res.top = res.top + res.height;
            res.height = res.height.abs();
        }
        res
    }
}

impl Rectangle {
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::with_size(size.width as i32, size.height as i32)
    }

    #[inline]
    pub fn location(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width.max(0) as u32, self.height.max(0) as u32)
    }
}

/// Parses `"left,top,width,height"`.
impl<T> FromStr for Rect<T>
where
    T: Num + Copy + PartialOrd + FromStr,
{
    type Err = ParseRectangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRectangleError(s.to_string());
        let mut values = [T::zero(); 4];
        let mut parts = s.split(',');
        for value in values.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            *value = part.trim().parse().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        let [left, top, width, height] = values;
        Ok(Self::new(left, top, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_negative_dimensions() {
        let rect = Rectangle::new(10, 20, -4, -6).normalized();
        assert_eq!(rect, Rectangle::new(6, 14, 4, 6));

        let rect = RectangleF::new(1.5, 1.0, -1.0, 2.0).normalized();
        assert_eq!(rect, RectangleF::new(0.5, 1.0, 1.0, 2.0));
    }

    #[test]
    fn intersect_rectangles() {
        let a = Rectangle::new(0, 0, 10, 10);
        let b = Rectangle::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), Rectangle::new(5, 0, 5, 5));

        let c = Rectangle::new(20, 20, 3, 3);
        assert!(a.intersect(&c).is_empty());
    }

    #[test]
    fn parse_rectangle() {
        let rect: Rectangle = "1, 2,30,40".parse().unwrap();
        assert_eq!(rect, Rectangle::new(1, 2, 30, 40));

        assert!("1,2,3".parse::<Rectangle>().is_err());
        assert!("1,2,3,4,5".parse::<Rectangle>().is_err());
        assert!("a,b,c,d".parse::<Rectangle>().is_err());
    }

    #[test]
    fn add_points() {
        let mut offset = Point::ZERO;
        offset += Point::new(5, 5);
        offset += Point::new(13, 13);
        assert_eq!(offset, Point::new(18, 18));
        assert_eq!(offset - Point::new(8, 3), Point::new(10, 15));
    }
}
