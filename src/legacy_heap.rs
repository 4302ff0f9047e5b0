//! Merge queue reproducing the element order of a C++ `std::priority_queue`
//! over `std::vector` (libstdc++ `push_heap`/`pop_heap`) with a `weight >`
//! comparator. Containers in the legacy layout were built with that queue, so
//! equal weights must come out in the same order to rebuild the same tree.

use crate::huffman::{NodeQueue, Pending};

#[derive(Debug, Default)]
pub(crate) struct LegacyHeap {
    items: Vec<Pending>,
}

/// The queue comparator: `a` sorts below `b` when it is heavier.
fn below(a: &Pending, b: &Pending) -> bool {
    a.weight > b.weight
}

impl LegacyHeap {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            items: Vec::with_capacity(n),
        }
    }

    /// Move `value` from `hole` towards `top` past every parent below it.
    fn sift_up(&mut self, mut hole: usize, top: usize, value: Pending) {
        while hole > top {
            let parent = (hole - 1) / 2;
            if !below(&self.items[parent], &value) {
                break;
            }
            self.items[hole] = self.items[parent];
            hole = parent;
        }
        self.items[hole] = value;
    }
}

impl NodeQueue for LegacyHeap {
    fn push(&mut self, value: Pending) {
        self.items.push(value);
        let hole = self.items.len() - 1;
        self.sift_up(hole, 0, value);
    }

    fn pop(&mut self) -> Option<Pending> {
        let top = *self.items.first()?;
        let len = self.items.len() - 1;
        if len > 0 {
            let value = self.items[len];
            self.items[len] = top;

            // Walk the hole down to a leaf, always taking the larger child.
            let mut hole = 0;
            let mut child = 0;
            while child < (len - 1) / 2 {
                child = 2 * (child + 1);
                if below(&self.items[child], &self.items[child - 1]) {
                    child -= 1;
                }
                self.items[hole] = self.items[child];
                hole = child;
            }
            if len % 2 == 0 && child == (len - 2) / 2 {
                child = 2 * (child + 1);
                self.items[hole] = self.items[child - 1];
                hole = child - 1;
            }
            self.sift_up(hole, 0, value);
        }
        self.items.pop();
        Some(top)
    }
}
