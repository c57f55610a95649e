//! Display bus addressing: one pinned bus, or a wrapping scan over a
//! prioritised candidate list.

/// Maximum number of candidate buses.
pub const MAX_CANDIDATES: usize = 8;

/// Ordered candidate buses, highest priority first.
pub type BusList = heapless::Vec<u8, MAX_CANDIDATES>;

/// Which bus the next discovery attempt targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusAddress {
    /// Always this bus; never scans.
    Fixed(u8),
    /// Cycle through the candidates on failure.
    Auto(AutoScan),
}

/// Non-empty candidate list plus a cursor that is always a valid index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoScan {
    candidates: BusList,
    cursor: usize,
}

impl AutoScan {
    /// `None` for an empty list or one longer than [`MAX_CANDIDATES`].
    pub fn new(candidates: &[u8]) -> Option<Self> {
        let candidates = BusList::from_slice(candidates).ok()?;
        if candidates.is_empty() {
            return None;
        }
        Some(Self {
            candidates,
            cursor: 0,
        })
    }

    pub fn current(&self) -> u8 {
        self.candidates[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn candidates(&self) -> &[u8] {
        &self.candidates
    }

    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.candidates.len();
    }
}

impl BusAddress {
    pub fn fixed(bus: u8) -> Self {
        Self::Fixed(bus)
    }

    pub fn auto(candidates: &[u8]) -> Option<Self> {
        AutoScan::new(candidates).map(Self::Auto)
    }

    /// Bus the next attempt should use.
    pub fn current(&self) -> u8 {
        match self {
            Self::Fixed(bus) => *bus,
            Self::Auto(scan) => scan.current(),
        }
    }

    /// Move to the next candidate.  No-op for a fixed bus.
    pub fn advance(&mut self) {
        if let Self::Auto(scan) = self {
            scan.advance();
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}
