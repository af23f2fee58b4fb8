use handle_trait::Handle;

use super::{Bag, Value};

/// A cursor over the top-level entries of a [`Bag`].
///
/// See [`Bag::iter`]. The cursor holds a handle on the bag and a position rather than a
/// borrow, so the bag stays writable while a cursor is alive. Entries added or removed at the
/// top level during iteration may be skipped or seen twice.
#[derive(Clone)]
pub struct Iter {
    bag: Bag,
    position: usize,
}

impl Iter {
    pub(crate) fn new(bag: Bag) -> Self {
        Self { bag, position: 0 }
    }

    /// Moves the cursor back to the first entry.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Returns the key at the cursor without advancing.
    pub fn key(&self) -> Option<String> {
        self.bag
            .all()
            .get_index(self.position)
            .map(|(key, _)| key.clone())
    }

    /// Returns true while the cursor points at an entry.
    pub fn valid(&self) -> bool {
        self.position < self.bag.count()
    }

    /// Returns the bag this cursor walks.
    pub fn bag(&self) -> Bag {
        self.bag.handle()
    }
}

impl Iterator for Iter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self
            .bag
            .all()
            .get_index(self.position)
            .map(|(key, value)| (key.clone(), value.clone()))?;
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bag.count().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}
