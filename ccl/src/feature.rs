//! Feature selection flags.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

use serde::{Deserialize, Serialize};

/// Set of features to extract while labeling.
///
/// Flags compose with `|`. [`FeatureFlags::NONE`] selects the label-only
/// path. Any contour or convex hull flag routes labeling through the
/// contour-tracing scanner.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(u32);

impl FeatureFlags {
    pub const NONE: Self = Self(0x000);
    pub const AREA: Self = Self(0x001);
    pub const CENTROID: Self = Self(0x002);
    pub const POINTS: Self = Self(0x004);
    pub const BOUNDING_BOX: Self = Self(0x008);
    /// Extent is derived from the bounding box, so it implies it.
    pub const EXTENT: Self = Self(0x018);
    pub const OUTER_CONTOURS: Self = Self(0x020);
    pub const INNER_CONTOURS: Self = Self(0x040);
    pub const ALL_CONTOURS: Self = Self(0x060);
    /// Clockwise hull, same as [`FeatureFlags::CONVEX_HULL_CW`].
    pub const CONVEX_HULL: Self = Self(0x080);
    pub const CONVEX_HULL_CW: Self = Self(0x100);
    pub const CONVEX_HULL_CCW: Self = Self(0x200);
    pub const ALL: Self = Self(0x3FF);

    const ANY_HULL: Self = Self(0x380);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Flags from raw bits, dropping unknown ones.
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True when the selection needs the contour-tracing scanner.
    #[inline]
    pub const fn requires_contours(self) -> bool {
        self.intersects(Self::ALL_CONTOURS) || self.intersects(Self::ANY_HULL)
    }

    /// True when any convex hull variant is selected.
    #[inline]
    pub const fn wants_hull(self) -> bool {
        self.intersects(Self::ANY_HULL)
    }
}

impl BitOr for FeatureFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FeatureFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FeatureFlags {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for FeatureFlags {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitXor for FeatureFlags {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for FeatureFlags {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for FeatureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(FeatureFlags, &str); 10] = [
            (FeatureFlags::AREA, "AREA"),
            (FeatureFlags::CENTROID, "CENTROID"),
            (FeatureFlags::POINTS, "POINTS"),
            (FeatureFlags::BOUNDING_BOX, "BOUNDING_BOX"),
            (FeatureFlags(0x010), "EXTENT"),
            (FeatureFlags::OUTER_CONTOURS, "OUTER_CONTOURS"),
            (FeatureFlags::INNER_CONTOURS, "INNER_CONTOURS"),
            (FeatureFlags::CONVEX_HULL, "CONVEX_HULL"),
            (FeatureFlags::CONVEX_HULL_CW, "CONVEX_HULL_CW"),
            (FeatureFlags::CONVEX_HULL_CCW, "CONVEX_HULL_CCW"),
        ];
        if self.is_empty() {
            return write!(f, "FeatureFlags(NONE)");
        }
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.intersects(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "FeatureFlags({})", names.join(" | "))
    }
}
