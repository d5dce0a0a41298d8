use std::cmp::Ordering;

/// Binary min-heap over a flat vector.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Ord> MinHeap<T> {
    /// Heapifies `source` in place, bottom up.
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.min_heapify(i);
        }
        heap
    }

    pub fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }

    /// Sifts the element at `i` down until both children are not smaller.
    fn min_heapify(&mut self, mut i: usize) {
        let n = self.heap_size();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.heap_size() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[p] <= self.elements[i] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    pub fn extract_min(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let last = self.heap_size() - 1;
        self.elements.swap(0, last);
        let result = self.elements.pop();
        self.min_heapify(0);
        result
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A queued item with its weight and insertion sequence number.
#[derive(Debug)]
struct Slot<T> {
    weight: u64,
    seq: u64,
    item: T,
}

// Ordered by weight, then by insertion order. The item itself never takes
// part in the comparison.
impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<T> Eq for Slot<T> {}

impl<T> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-priority queue keyed by weight.
///
/// Equal weights come out in the order they were pushed, so a fixed push
/// order always yields the same pop order.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: MinHeap<Slot<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: MinHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, item: T, weight: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.insert(Slot { weight, seq, item });
    }

    /// Removes the lightest item, returning it with its weight.
    pub fn pop_min(&mut self) -> Option<(T, u64)> {
        self.heap.extract_min().map(|slot| (slot.item, slot.weight))
    }

    pub fn peek_weight(&self) -> Option<u64> {
        self.heap.peek().map(|slot| slot.weight)
    }

    pub fn len(&self) -> usize {
        self.heap.heap_size()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(T, u64)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, u64)>>(iter: I) -> Self {
        let mut next_seq = 0;
        let slots = iter
            .into_iter()
            .map(|(item, weight)| {
                let seq = next_seq;
                next_seq += 1;
                Slot { weight, seq, item }
            })
            .collect();
        PriorityQueue {
            heap: MinHeap::build(slots),
            next_seq,
        }
    }
}
