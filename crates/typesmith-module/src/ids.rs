//! Module index newtypes.

/// Index into the string table.
///
/// `StringId(0)` is always the empty string and stands for "no value"
/// (no namespace, no base type, no member type).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StringId(pub u16);

impl StringId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_zero() {
        assert!(StringId::NONE.is_none());
        assert!(StringId::default().is_none());
        assert!(!StringId::new(3).is_none());
        assert_eq!(StringId::new(3).get(), 3);
    }
}
