//! Symmetric friendship table between owners.

use crate::context::Friends;
use colony_core::Owner;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alliances {
    friends: HashMap<Owner, Friends>,
}

impl Alliances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn friend(&mut self, a: &Owner, b: &Owner) {
        self.friends.entry(a.clone()).or_default().insert(b.clone());
        self.friends.entry(b.clone()).or_default().insert(a.clone());
    }

    /// Clears both directions. Unknown owners are ignored.
    pub fn unfriend(&mut self, a: &Owner, b: &Owner) {
        if let Some(friends) = self.friends.get_mut(a) {
            friends.remove(b);
        }
        if let Some(friends) = self.friends.get_mut(b) {
            friends.remove(a);
        }
    }

    pub fn friends_of(&self, owner: &Owner) -> Option<&Friends> {
        self.friends.get(owner)
    }

    pub fn are_friends(&self, a: &Owner, b: &Owner) -> bool {
        self.friends.get(a).is_some_and(|f| f.contains(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendship_is_symmetric() {
        let (red, blue) = (Owner::from("red"), Owner::from("blue"));
        let mut alliances = Alliances::new();

        alliances.friend(&red, &blue);
        assert!(alliances.are_friends(&red, &blue));
        assert!(alliances.are_friends(&blue, &red));

        alliances.unfriend(&blue, &red);
        assert!(!alliances.are_friends(&red, &blue));
        assert!(!alliances.are_friends(&blue, &red));
    }

    #[test]
    fn test_unfriend_unknown_is_noop() {
        let mut alliances = Alliances::new();
        alliances.unfriend(&Owner::from("ghost"), &Owner::from("nobody"));
        assert!(alliances.friends_of(&Owner::from("ghost")).is_none());
    }
}
