//! Deferred world mutations
//!
//! Contact resolution runs while the simulation step is iterating bodies, so
//! it never touches the world directly. It queues commands instead, and the
//! queue is drained once the step has finished.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Transient visual effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Sparkle where a coin was collected
    CoinPoof,
    /// Explosion where a bullet destroyed an enemy
    EnemyDestroyed,
}

/// A queued world mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RemoveEntity(u32),
    SpawnEffect { kind: EffectKind, pos: Vec2 },
    IncrementScore(u32),
}

/// FIFO of commands with at-most-once removal per body
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
    marked: BTreeSet<u32>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        if let Command::RemoveEntity(id) = command {
            self.mark_for_removal(id);
        } else {
            self.commands.push(command);
        }
    }

    /// Queue a removal; returns false if the body was already marked
    pub fn mark_for_removal(&mut self, id: u32) -> bool {
        if !self.marked.insert(id) {
            return false;
        }
        self.commands.push(Command::RemoveEntity(id));
        true
    }

    pub fn is_marked(&self, id: u32) -> bool {
        self.marked.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take every queued command in insertion order and reset the marks
    pub fn drain(&mut self) -> Vec<Command> {
        self.marked.clear();
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_marked_once() {
        let mut queue = CommandQueue::new();
        assert!(queue.mark_for_removal(7));
        assert!(!queue.mark_for_removal(7));
        queue.push(Command::RemoveEntity(7));
        assert_eq!(queue.len(), 1);
        assert!(queue.is_marked(7));
    }

    #[test]
    fn test_drain_preserves_order_and_resets() {
        let mut queue = CommandQueue::new();
        queue.push(Command::IncrementScore(1));
        queue.push(Command::SpawnEffect {
            kind: EffectKind::CoinPoof,
            pos: Vec2::new(1.0, 2.0),
        });
        queue.push(Command::RemoveEntity(3));

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                Command::IncrementScore(1),
                Command::SpawnEffect {
                    kind: EffectKind::CoinPoof,
                    pos: Vec2::new(1.0, 2.0),
                },
                Command::RemoveEntity(3),
            ]
        );
        assert!(queue.is_empty());
        assert!(!queue.is_marked(3));
    }
}
