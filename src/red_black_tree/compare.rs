/// A strict weak ordering over keys of type `T`.
///
/// Two keys are equivalent when neither is less than the other. The set uses equivalence, never
/// `PartialEq`, to decide whether a key is already present.
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `lhs` is ordered strictly before `rhs`.
    fn less(&self, lhs: &T, rhs: &T) -> bool;

    fn equivalent(&self, lhs: &T, rhs: &T) -> bool {
        !self.less(lhs, rhs) && !self.less(rhs, lhs)
    }
}

/// The natural ascending order of an `Ord` type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Less;

impl<T> Compare<T> for Less
where
    T: Ord + ?Sized,
{
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

/// The reverse of the natural order of an `Ord` type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Greater;

impl<T> Compare<T> for Greater
where
    T: Ord + ?Sized,
{
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs > rhs
    }
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        self(lhs, rhs)
    }
}
