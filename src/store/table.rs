//! Store implementation
//!
//! Arena-backed sorted singly-linked chain.

use super::Record;
use crate::fingerprint::fingerprint;

/// What an [`Store::upsert`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new record was spliced in
    Inserted,

    /// A record with the same fingerprint was overwritten in place
    Updated,
}

struct Node {
    record: Record,
    next: Option<usize>,
}

/// Ordered record chain
///
/// Invariant: following `head` through `next` links visits every live slot
/// exactly once, in strictly ascending fingerprint order.
#[derive(Default)]
pub struct Store {
    /// Live and freed nodes; freed ones are listed in `free`
    slots: Vec<Node>,

    /// Slots available for reuse
    free: Vec<usize>,

    /// First node of the chain
    head: Option<usize>,

    /// Live record count
    len: usize,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` or overwrite the record sharing its fingerprint
    ///
    /// Two distinct names with equal fingerprints end up as one record
    /// holding the most recent name and value.
    pub fn upsert(&mut self, name: &str, value: u32) -> Upsert {
        let fp = fingerprint(name);
        let (prev, cursor) = self.seek(fp);

        if let Some(idx) = cursor {
            let record = &mut self.slots[idx].record;
            if record.fingerprint == fp {
                record.name.clear();
                record.name.push_str(name);
                record.value = value;
                return Upsert::Updated;
            }
        }

        let node = Node {
            record: Record {
                fingerprint: fp,
                name: name.to_string(),
                value,
            },
            next: cursor,
        };
        let idx = self.alloc(node);
        self.link_after(prev, Some(idx));
        self.len += 1;
        Upsert::Inserted
    }

    /// Unlink the record for `name`, if any
    ///
    /// Matches on fingerprint alone, like `upsert`. Absent names are a no-op.
    pub fn remove(&mut self, name: &str) -> Option<Record> {
        let fp = fingerprint(name);
        let (prev, cursor) = self.seek(fp);

        let idx = cursor.filter(|&idx| self.slots[idx].record.fingerprint == fp)?;
        let next = self.slots[idx].next.take();
        self.link_after(prev, next);
        self.free.push(idx);
        self.len -= 1;

        // Leave an empty husk in the slot so the name's buffer is freed now.
        let record = &mut self.slots[idx].record;
        Some(Record {
            fingerprint: record.fingerprint,
            name: std::mem::take(&mut record.name),
            value: record.value,
        })
    }

    /// Look up `name`, requiring both fingerprint and name to match
    pub fn find(&self, name: &str) -> Option<Record> {
        let fp = fingerprint(name);
        self.iter()
            .take_while(|record| record.fingerprint <= fp)
            .find(|record| record.fingerprint == fp && record.name == name)
            .cloned()
    }

    /// Copy out every record in ascending fingerprint order
    pub fn export(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }

    /// Borrowing iterator in chain order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.head,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find the last node below `fp` and the first node at or above it
    fn seek(&self, fp: u32) -> (Option<usize>, Option<usize>) {
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = &self.slots[idx];
            if node.record.fingerprint >= fp {
                break;
            }
            prev = Some(idx);
            cursor = node.next;
        }
        (prev, cursor)
    }

    /// Point `prev` (or the head when `None`) at `next`
    fn link_after(&mut self, prev: Option<usize>, next: Option<usize>) {
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
    }

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = node;
                idx
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        }
    }
}

/// Iterator over a [`Store`] in ascending fingerprint order
pub struct Iter<'a> {
    store: &'a Store,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.store.slots[self.cursor?];
        self.cursor = node.next;
        Some(&node.record)
    }
}
