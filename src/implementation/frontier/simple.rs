// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the implementation of a simple solver frontier (priority queue)

use binary_heap_plus::BinaryHeap;
use ordered_float::OrderedFloat;

use crate::*;

/// The frontier used by default: best bound first, oldest node first in case
/// of ties.
pub type DefaultFrontier = SimpleFrontier<MaxBound>;

/// The simplest frontier implementation you can think of: is basically consists
/// of a binary heap that pushes and pops frontier nodes. 
/// 
/// Every node is keyed by its own relaxation bound at the time it is pushed,
/// and tagged with an insertion sequence number drawn from a counter which
/// belongs to this very frontier. The ranking may use that number to break
/// ties deterministically.
pub struct SimpleFrontier<O: NodeRanking> {
    heap: BinaryHeap<FrontierEntry, CompareEntry<O>>,
    next_seq: u64,
}
impl <O> SimpleFrontier<O> where O: NodeRanking {
    /// This creates a new simple frontier which uses a custom frontier order.
    pub fn new(o: O) -> Self {
        Self{ heap: BinaryHeap::from_vec_cmp(vec![], CompareEntry::new(o)), next_seq: 0 }
    }
}
impl Default for SimpleFrontier<MaxBound> {
    fn default() -> Self {
        Self::new(MaxBound)
    }
}
impl <O> Frontier for SimpleFrontier<O> where O: NodeRanking {
    fn push(&mut self, node: Node) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry { key: OrderedFloat(node.bound()), seq, node })
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn clear(&mut self) {
        self.heap.clear()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
