use std::cmp::Ordering;
use std::fmt;

use crate::error::GoError;
use crate::event::Event;

/// Orders two journal entries. `None` means the pair cannot be ordered.
pub type Comparator<E> = fn(&E, &E) -> Option<Ordering>;

/// An ordered log that accepts insertion anywhere, not just at the tail.
///
/// Entries stay sorted under the comparator after every insert. Entries that
/// compare equal keep their insertion order. Arrival is expected to be close
/// to chronological, so inserts append in O(1) and otherwise scan backward
/// from the tail.
#[derive(Clone)]
pub struct Journal<E> {
    entries: Vec<E>,
    cmp: Comparator<E>,
}

impl<E> Journal<E> {
    pub fn with_comparator(cmp: Comparator<E>) -> Self {
        Journal {
            entries: Vec::new(),
            cmp,
        }
    }

    /// Rebuild a journal from stored entries, restoring order if the input
    /// was saved out of order. Equal entries keep their relative order.
    ///
    /// Sorted input costs one comparison per entry.
    pub fn from_entries(entries: Vec<E>, cmp: Comparator<E>) -> Result<Self, GoError> {
        let mut journal = Journal {
            entries: Vec::with_capacity(entries.len()),
            cmp,
        };
        for entry in entries {
            journal.insert(entry)?;
        }
        Ok(journal)
    }

    /// Insert an entry at its ordered position and return that index.
    ///
    /// Fails with `ComparatorMismatch` if a needed comparison is undefined;
    /// the journal is untouched in that case.
    pub fn insert(&mut self, entry: E) -> Result<usize, GoError> {
        let Some(last) = self.entries.last() else {
            self.entries.push(entry);
            return Ok(0);
        };

        if self.order(last, &entry)? != Ordering::Greater {
            self.entries.push(entry);
            return Ok(self.entries.len() - 1);
        }

        // entry sorts before entries[at]; walk back past everything it precedes
        let mut at = self.entries.len() - 1;
        while at > 0 && self.order(&entry, &self.entries[at - 1])? == Ordering::Less {
            at -= 1;
        }
        self.entries.insert(at, entry);
        Ok(at)
    }

    pub fn log(&self) -> &[E] {
        &self.entries
    }

    /// Replace the ordering. Existing entries are not re-sorted.
    pub fn set_comparator(&mut self, cmp: Comparator<E>) {
        self.cmp = cmp;
    }

    /// Remove the entry at `index`, e.g. to roll back an insert.
    pub fn remove(&mut self, index: usize) -> E {
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<E> {
        self.entries
    }

    fn order(&self, a: &E, b: &E) -> Result<Ordering, GoError> {
        (self.cmp)(a, b).ok_or(GoError::ComparatorMismatch)
    }
}

impl<E: PartialOrd> Journal<E> {
    /// Journal ordered by the entries' own `PartialOrd`.
    pub fn natural() -> Self {
        Self::with_comparator(|a, b| a.partial_cmp(b))
    }
}

impl Default for Journal<Event> {
    fn default() -> Self {
        Self::with_comparator(Event::by_timestamp)
    }
}

impl<E: fmt::Debug> fmt::Debug for Journal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
