//! Responsive breakpoints.
//!
//! Breakpoints form a closed, ordered set. Responsive values are always
//! expanded in [`Breakpoint::ALL`] order, regardless of the order in which the
//! caller wrote them.

use std::collections::BTreeMap;
use std::fmt;

/// A named minimum-viewport-width tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    /// `xs`
    Xs,
    /// `sm`
    Sm,
    /// `md`
    Md,
    /// `lg`
    Lg,
    /// `xl`
    Xl,
    /// `2xl`
    Xxl,
}

impl Breakpoint {
    /// All breakpoints in ascending order.
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    /// Parses a breakpoint from its external name.
    ///
    /// Returns `None` for anything outside the fixed set; callers drop such
    /// keys silently.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "xs" => Some(Breakpoint::Xs),
            "sm" => Some(Breakpoint::Sm),
            "md" => Some(Breakpoint::Md),
            "lg" => Some(Breakpoint::Lg),
            "xl" => Some(Breakpoint::Xl),
            "2xl" => Some(Breakpoint::Xxl),
            _ => None,
        }
    }

    /// Returns the external name of this breakpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    /// Default minimum width in pixels.
    pub fn default_width(self) -> u32 {
        match self {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => 640,
            Breakpoint::Md => 768,
            Breakpoint::Lg => 1024,
            Breakpoint::Xl => 1280,
            Breakpoint::Xxl => 1536,
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum widths, in pixels, keyed by breakpoint.
///
/// A table may be partial. Looking up a breakpoint that is not in the table
/// yields `None`, which the value resolver renders as the literal text
/// `undefined` rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointTable {
    widths: BTreeMap<Breakpoint, u32>,
}

impl BreakpointTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            widths: BTreeMap::new(),
        }
    }

    /// Sets a width, returning `self` for chaining.
    pub fn with(mut self, breakpoint: Breakpoint, width: u32) -> Self {
        self.widths.insert(breakpoint, width);
        self
    }

    /// Sets a width in place.
    pub fn insert(&mut self, breakpoint: Breakpoint, width: u32) {
        self.widths.insert(breakpoint, width);
    }

    /// Returns the width for a breakpoint, if the table defines it.
    pub fn get(&self, breakpoint: Breakpoint) -> Option<u32> {
        self.widths.get(&breakpoint).copied()
    }

    /// Overlays `other` onto this table; entries in `other` win.
    pub fn merge(&self, other: &BreakpointTable) -> BreakpointTable {
        let mut widths = self.widths.clone();
        widths.extend(other.widths.iter().map(|(bp, w)| (*bp, *w)));
        BreakpointTable { widths }
    }

    /// Iterates entries in ascending breakpoint order.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, u32)> + '_ {
        self.widths.iter().map(|(bp, w)| (*bp, *w))
    }

    /// Returns true if no breakpoint is defined.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Returns the number of defined breakpoints.
    pub fn len(&self) -> usize {
        self.widths.len()
    }
}

/// The six-tier default table: xs 0, sm 640, md 768, lg 1024, xl 1280, 2xl 1536.
impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            widths: Breakpoint::ALL
                .iter()
                .map(|bp| (*bp, bp.default_width()))
                .collect(),
        }
    }
}

impl FromIterator<(Breakpoint, u32)> for BreakpointTable {
    fn from_iter<I: IntoIterator<Item = (Breakpoint, u32)>>(iter: I) -> Self {
        Self {
            widths: iter.into_iter().collect(),
        }
    }
}
