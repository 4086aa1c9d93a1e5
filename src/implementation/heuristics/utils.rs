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

//! This module provide some convenient utilities to work with used defined heuristics.

use std::cmp::Ordering;

use compare::Compare;

use crate::{FrontierEntry, NodeRanking};

/// This is a thin wrapper to convert a NodeRanking into a `Compare` 
/// object as is sometimes required (e.g. to configure the order in a binary heap)
/// 
/// This struct has no behavior of its own: it simply delegates to the 
/// underlying implementation.
#[derive(Debug, Clone, Copy)]
pub struct CompareEntry<X: NodeRanking>(X);
impl <X: NodeRanking> CompareEntry<X> {
    /// Creates a new instance
    pub fn new(x: X) -> Self {
        Self(x)
    }
}
impl <X: NodeRanking> Compare<FrontierEntry> for CompareEntry<X> {
    fn compare(&self, l: &FrontierEntry, r: &FrontierEntry) -> Ordering {
        self.0.compare(l, r)
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;
    use compare::Compare;
    use ordered_float::OrderedFloat;
    use crate::*;

    /// A dummy ranking that only looks at the sequence numbers
    struct SeqRanking;
    impl NodeRanking for SeqRanking {
        fn compare(&self, a: &FrontierEntry, b: &FrontierEntry) -> Ordering {
            a.seq.cmp(&b.seq)
        }
    }

    fn entry(key: f64, seq: u64) -> FrontierEntry {
        let pb = Problem::new(vec!["z".to_string()], vec![], Variable(0)).unwrap();
        FrontierEntry { key: OrderedFloat(key), seq, node: Node::root(&pb) }
    }

    #[test]
    fn when_the_ranking_says_a_is_less_than_b_then_compare_entry_agrees() {
        let cmp = CompareEntry::new(SeqRanking);
        assert_eq!(Ordering::Less, cmp.compare(&entry(9.0, 0), &entry(1.0, 1)));
    }
    #[test]
    fn when_the_ranking_says_a_is_greater_than_b_then_compare_entry_agrees() {
        let cmp = CompareEntry::new(SeqRanking);
        assert_eq!(Ordering::Greater, cmp.compare(&entry(1.0, 4), &entry(9.0, 3)));
    }
    #[test]
    fn when_the_ranking_says_a_is_equal_to_b_then_compare_entry_agrees() {
        let cmp = CompareEntry::new(SeqRanking);
        assert_eq!(Ordering::Equal, cmp.compare(&entry(1.0, 2), &entry(9.0, 2)));
    }
    #[test]
    fn compare_entry_delegates_to_max_bound() {
        let cmp = CompareEntry::new(MaxBound);
        assert_eq!(Ordering::Greater, cmp.compare(&entry(9.0, 7), &entry(1.0, 0)));
    }
}
