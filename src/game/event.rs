//! Frame events
//!
//! The level session records what happened during a tick so the host can
//! react (particles, screen shake, stats) without the core knowing about
//! any of it. Queues are cleared at the start of every tick.
//!
//! Example flow:
//! 1. Overlap pass finds the fox on a coin → sends CoinCollected
//! 2. Host reads CoinCollected → spawns a sparkle at `position`

use glam::Vec2;

use super::entity::Entity;
use super::player::JumpKind;

/// A queue for events of a single type.
/// Events are collected during the frame and read or drained afterwards.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a level tick can report
#[derive(Debug, Default)]
pub struct Events {
    pub coin_collected: EventQueue<CoinCollected>,
    pub player_hit: EventQueue<PlayerHit>,
    pub door_entered: EventQueue<DoorEntered>,
    pub jumped: EventQueue<Jumped>,
    pub landed: EventQueue<Landed>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Called at the start of each tick.
    pub fn clear_all(&mut self) {
        self.coin_collected.clear();
        self.player_hit.clear();
        self.door_entered.clear();
        self.jumped.clear();
        self.landed.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// A coin was picked up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinCollected {
    /// The coin entity (already despawned)
    pub coin: Entity,
    /// Where the coin was (for VFX)
    pub position: Vec2,
    /// Score after the pickup
    pub score: u32,
}

/// A mouse hit the fox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHit {
    pub enemy: Entity,
    /// Score after the penalty
    pub score: u32,
}

/// The fox walked into a door
#[derive(Debug, Clone, PartialEq)]
pub struct DoorEntered {
    pub door: Entity,
    /// Resolved destination; `None` ends the game
    pub target: Option<String>,
}

/// The fox jumped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jumped {
    pub kind: JumpKind,
    pub position: Vec2,
}

/// The fox touched down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landed {
    pub position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();

        events.player_hit.send(PlayerHit { enemy: Entity::default(), score: 0 });
        events.landed.send(Landed { position: Vec2::ZERO });
        assert_eq!(events.player_hit.len(), 1);

        events.clear_all();
        assert!(events.player_hit.is_empty());
        assert!(events.landed.is_empty());
    }
}
