//! Label equivalence table used by the scanners.
//!
//! Provisional labels are allocated in scan order starting at 1; index 0 is
//! the background sentinel. Every entry satisfies `parent[label] <= label`,
//! so a root is a label that refers to itself and chains only ever walk
//! towards smaller labels. Merging always keeps the smaller root, which makes
//! the final numbering depend only on the input image.

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    count: u32,
}

impl Default for UnionFind {
    fn default() -> Self {
        Self::new()
    }
}

impl UnionFind {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut parent = Vec::with_capacity(capacity.max(1));
        parent.push(0);
        Self { parent, count: 0 }
    }

    /// Drop all labels, keeping the allocation.
    pub fn clear(&mut self) {
        self.parent.truncate(1);
        self.count = 0;
    }

    /// Number of entries including the background sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True when no provisional label has been allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.len() == 1
    }

    /// Label the next call to [`make_set`](Self::make_set) will return.
    ///
    /// Fails with [`Error::LabelOverflow`] once the table holds `u32::MAX`
    /// provisional labels.
    #[inline]
    pub fn next_label(&self) -> Result<u32> {
        label_for_len(self.parent.len())
    }

    /// Append an entry whose parent is `label`.
    ///
    /// Appending the next free label creates a new root. Pointing a new entry
    /// at an existing smaller label is allowed, anything larger is not.
    pub fn push_back(&mut self, label: u32) -> Result<()> {
        if label > self.next_label()? {
            return Err(self.invalid(label));
        }
        self.parent.push(label);
        Ok(())
    }

    /// Allocate a new root label.
    #[inline]
    pub fn make_set(&mut self) -> Result<u32> {
        let label = self.next_label()?;
        self.parent.push(label);
        Ok(label)
    }

    /// Current value of entry `label`: its parent before flattening, its
    /// final label afterwards.
    #[inline]
    pub fn get(&self, label: u32) -> Result<u32> {
        self.parent
            .get(label as usize)
            .copied()
            .ok_or_else(|| self.invalid(label))
    }

    /// Representative of `label`.
    pub fn root(&self, label: u32) -> Result<u32> {
        self.check(label)?;
        let mut root = label;
        while self.parent[root as usize] < root {
            root = self.parent[root as usize];
        }
        Ok(root)
    }

    /// Point every entry on the chain from `label` at `root`.
    pub fn compress(&mut self, label: u32, root: u32) -> Result<()> {
        self.check(label)?;
        self.check(root)?;
        let mut current = label;
        while self.parent[current as usize] < current {
            let next = self.parent[current as usize];
            self.parent[current as usize] = root;
            current = next;
        }
        self.parent[current as usize] = root;
        Ok(())
    }

    /// Union the sets of `a` and `b`, returning the surviving root.
    ///
    /// The smaller root wins and both chains are compressed onto it.
    pub fn merge(&mut self, a: u32, b: u32) -> Result<u32> {
        let root_a = self.root(a)?;
        let root_b = self.root(b)?;
        let root = root_a.min(root_b);
        self.compress(a, root)?;
        self.compress(b, root)?;
        Ok(root)
    }

    /// Resolve every entry to a dense final label in `1..=K`.
    ///
    /// One forward pass suffices: a non-root entry points at a smaller label
    /// whose entry already holds its final value. Returns `K`. Must run once;
    /// afterwards entries hold final labels rather than parents.
    pub fn flatten(&mut self) -> u32 {
        let mut count = 0;
        for i in 1..self.parent.len() {
            let parent = self.parent[i];
            if (parent as usize) < i {
                self.parent[i] = self.parent[parent as usize];
            } else {
                count += 1;
                self.parent[i] = count;
            }
        }
        self.count = count;
        tracing::trace!(
            provisional = self.parent.len() - 1,
            components = count,
            "Flattened label table"
        );
        count
    }

    /// Number of final labels computed by the last [`flatten`](Self::flatten).
    #[inline]
    pub fn label_count(&self) -> u32 {
        self.count
    }

    #[inline]
    fn check(&self, label: u32) -> Result<()> {
        if (label as usize) < self.parent.len() {
            Ok(())
        } else {
            Err(self.invalid(label))
        }
    }

    #[inline]
    fn invalid(&self, label: u32) -> Error {
        Error::InvalidLabel {
            label,
            len: self.parent.len(),
        }
    }
}

#[inline]
fn label_for_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::LabelOverflow { count: len })
}
