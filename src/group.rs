use serde::{Deserialize, Serialize};

/// An unordered set of members picked to work together.
///
/// Serializes as a bare sequence so stored groupings stay a plain
/// list of lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group<T> {
    pub members: Vec<T>,
}

impl<T> Group<T> {
    pub fn new() -> Self {
        Group {
            members: Vec::new(),
        }
    }

    pub fn add_member(&mut self, member: T) {
        self.members.push(member);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Group<T> {
    fn from(members: Vec<T>) -> Self {
        Group { members }
    }
}

// Convert a group index (0-based) to a label (A, B, ..., Z, AA, AB, ...)
pub fn group_label(index: usize) -> String {
    const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        label.push(ALPHABET[n % 26]);
        n /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
