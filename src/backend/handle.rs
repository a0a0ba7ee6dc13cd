//! Opaque handles returned by registration backends.
//!
//! A handle is a success token: registration either yields one or returns
//! `None`. Backends hand out non-zero ids so the null id stays free as the
//! failure sentinel.

use std::num::NonZeroU32;

/// Handle to a registered render model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(NonZeroU32);

impl ModelHandle {
    /// Wrap a raw backend id; zero yields `None`.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw backend id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

/// Handle to a registered player skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkinHandle(NonZeroU32);

impl SkinHandle {
    /// Wrap a raw backend id; zero yields `None`.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw backend id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

/// Handle to a registered 2D image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(NonZeroU32);

impl ImageHandle {
    /// Wrap a raw backend id; zero yields `None`.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw backend id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

/// Handle to a registered sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(NonZeroU32);

impl SoundHandle {
    /// Wrap a raw backend id; zero yields `None`.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw backend id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

/// Handle to an inline collision sub-model of the loaded world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(NonZeroU32);

impl ClipHandle {
    /// Wrap a raw backend id; zero yields `None`.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw backend id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_the_failure_sentinel() {
        assert!(ModelHandle::from_raw(0).is_none());
        assert!(SoundHandle::from_raw(0).is_none());
        assert!(ClipHandle::from_raw(0).is_none());
    }

    #[test]
    fn test_raw_roundtrip() {
        let handle = ImageHandle::from_raw(7).unwrap();
        assert_eq!(handle.raw(), 7);
        let handle = SkinHandle::from_raw(u32::MAX).unwrap();
        assert_eq!(handle.raw(), u32::MAX);
    }
}
