use std::fmt;

/// Block range of a query. `to_block` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub from_block: u64,
    pub to_block: u64,
}

impl BlockRange {
    pub fn new(from_block: u64, to_block: u64) -> Self {
        Self {
            from_block,
            to_block,
        }
    }

    /// Resolves the start of a range ending at `to_block`.
    ///
    /// A non-zero `from_block` wins. Otherwise the range spans the last `block_range`
    /// blocks before `to_block` when `block_range` is non-zero, or starts at genesis.
    pub fn resolve(from_block: Option<u64>, to_block: u64, block_range: Option<u64>) -> Self {
        let from_block = match (from_block, block_range) {
            (Some(from_block), _) if from_block != 0 => from_block,
            (_, Some(block_range)) if block_range != 0 => to_block.saturating_sub(block_range),
            _ => 0,
        };

        Self::new(from_block, to_block)
    }

    /// Number of blocks in the range.
    pub fn len(&self) -> u64 {
        self.to_block.saturating_sub(self.from_block)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from_block, self.to_block)
    }
}
