//! # Parameter Model
//!
//! Named use-scope parameters and the identifiers used to resolve them.

use core::fmt;

// =============================================================================
// Use ID
// =============================================================================

/// Identifier of one occurrence ("use") of a device within a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UseId(u16);

impl UseId {
    /// Create a use ID from its raw index
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw index
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "use{}", self.0)
    }
}

// =============================================================================
// Use-Scope Parameters
// =============================================================================

/// Named use-scope queue parameters resolvable against (pipeline, use)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseParam {
    /// Queue new jobs are posted into to begin execution
    JobQueue,
    /// Queue used for cooperative rescheduling within a chain
    YieldQueue,
    /// Queue the synthesized completion token is posted into.
    ///
    /// Declared virtual by the device driver; pipeline assembly may or may
    /// not have connected it, so resolution can legitimately fail.
    FinalQueue,
}

/// Reserved job-slot number identifying a dynamically built job when
/// synthesizing its completion token.
pub const DYNAMIC_JOB_SLOT: u8 = 255;
