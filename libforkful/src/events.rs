//! Change notifications
//!
//! The store emits a `StoreEvent` after every successful mutation so a
//! renderer can refresh the affected views. Events go out over a
//! `tokio::sync::broadcast` channel; emitting never blocks, and events
//! are dropped when nobody is subscribed.
//!
//! # Example
//!
//! ```
//! use libforkful::events::{EventBus, StoreEvent};
//!
//! let bus = EventBus::new(16);
//! let mut receiver = bus.subscribe();
//!
//! bus.emit(StoreEvent::DarkModeToggled { enabled: true });
//!
//! assert!(matches!(
//!     receiver.try_recv(),
//!     Ok(StoreEvent::DarkModeToggled { enabled: true })
//! ));
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub type EventReceiver = broadcast::Receiver<StoreEvent>;

/// Default per-subscriber buffer
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// `capacity` is how many events a lagging subscriber may fall behind
    /// before the oldest are dropped
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: StoreEvent) {
        // Err only means there are no receivers
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    LikeToggled {
        recipe_id: String,
        liked: bool,
        likes: u32,
    },

    SaveToggled {
        recipe_id: String,
        saved: bool,
    },

    FollowToggled {
        user_id: String,
        following: bool,
    },

    CommentAdded {
        recipe_id: String,
        comment_id: String,
    },

    /// A new recipe was placed at the front of the collection
    RecipeCreated {
        recipe_id: String,
    },

    DarkModeToggled {
        enabled: bool,
    },
}
