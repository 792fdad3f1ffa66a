// Movement blocks - named suppressions of lateral movement input

/// Why lateral movement is currently suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementBlockReason {
    Pick,
    Aim,
    Throw,
}

/// A single movement block, optionally expiring after `remaining` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBlock {
    pub reason: MovementBlockReason,
    pub timed: bool,
    pub remaining: f32,
}

impl MovementBlock {
    /// Block that expires after `duration` seconds
    pub fn timed(reason: MovementBlockReason, duration: f32) -> Self {
        Self {
            reason,
            timed: true,
            remaining: duration,
        }
    }

    /// Block that stays until removed by reason
    pub fn untimed(reason: MovementBlockReason) -> Self {
        Self {
            reason,
            timed: false,
            remaining: 0.0,
        }
    }
}

/// The set of active movement blocks for one character
///
/// Keyed by reason: there is never more than one block per reason. Any
/// active block suppresses lateral movement.
#[derive(Debug, Default, Clone)]
pub struct MovementBlocks {
    blocks: Vec<MovementBlock>,
}

impl MovementBlocks {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Insert a block, replacing any existing block with the same reason
    pub fn add(&mut self, block: MovementBlock) {
        match self.blocks.iter_mut().find(|b| b.reason == block.reason) {
            Some(existing) => *existing = block,
            None => self.blocks.push(block),
        }
    }

    pub fn add_timed(&mut self, reason: MovementBlockReason, duration: f32) {
        self.add(MovementBlock::timed(reason, duration));
    }

    pub fn add_untimed(&mut self, reason: MovementBlockReason) {
        self.add(MovementBlock::untimed(reason));
    }

    /// Remove every block with the given reason
    pub fn remove(&mut self, reason: MovementBlockReason) {
        self.blocks.retain(|b| b.reason != reason);
    }

    /// Count down timed blocks and drop the expired ones
    pub fn tick(&mut self, dt: f32) {
        self.blocks.retain_mut(|block| {
            if !block.timed {
                return true;
            }
            block.remaining -= dt;
            block.remaining > 0.0
        });
    }

    /// Lateral movement is allowed only when no block is active
    pub fn can_move(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, reason: MovementBlockReason) -> bool {
        self.blocks.iter().any(|b| b.reason == reason)
    }

    pub fn get(&self, reason: MovementBlockReason) -> Option<&MovementBlock> {
        self.blocks.iter().find(|b| b.reason == reason)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovementBlock> {
        self.blocks.iter()
    }
}
