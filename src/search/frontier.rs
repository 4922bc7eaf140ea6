use std::collections::{HashMap, VecDeque};

/// One BFS wavefront: a FIFO queue of titles to expand plus the parent map
/// recording where each title was first discovered. The parent map doubles
/// as the visited set; the root maps to `None`.
pub struct Frontier {
    queue: VecDeque<String>,
    parents: HashMap<String, Option<String>>,
}

impl Frontier {
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let mut parents = HashMap::new();
        parents.insert(root.clone(), None);

        Self {
            queue: VecDeque::from([root]),
            parents,
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn visited_len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.parents.contains_key(title)
    }

    /// Records `child` as discovered from `parent` and enqueues it. The
    /// first insertion wins; rediscoveries are no-ops, which keeps the
    /// parent map a forest and the reconstructed path cycle-free.
    pub fn insert(&mut self, child: &str, parent: &str) -> bool {
        if self.parents.contains_key(child) {
            return false;
        }

        self.parents
            .insert(child.to_string(), Some(parent.to_string()));
        self.queue.push_back(child.to_string());
        true
    }

    pub fn pop_batch(&mut self, max: usize) -> Vec<String> {
        let take = max.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    /// Walks the parent chain from `title` back to the root. The result
    /// starts at `title` and ends at the root.
    pub fn chain_to_root(&self, title: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = Some(title.to_string());

        while let Some(node) = current {
            current = self.parents.get(&node).cloned().flatten();
            chain.push(node);
        }

        chain
    }
}

/// Builds the full start-to-end path once the frontiers meet, with the
/// meeting node appearing exactly once.
pub fn reconstruct_path(forward: &Frontier, backward: &Frontier, meeting: &str) -> Vec<String> {
    let mut path = forward.chain_to_root(meeting);
    path.reverse();

    let backward_chain = backward.chain_to_root(meeting);
    path.extend(backward_chain.into_iter().skip(1));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_visited_and_queued() {
        let frontier = Frontier::new("Alpha");

        assert!(frontier.contains("Alpha"));
        assert_eq!(frontier.queue_len(), 1);
        assert_eq!(frontier.visited_len(), 1);
    }

    #[test]
    fn test_first_insertion_wins() {
        let mut frontier = Frontier::new("Alpha");

        assert!(frontier.insert("Beta", "Alpha"));
        assert!(frontier.insert("Gamma", "Alpha"));
        // Rediscovery through a different parent must not rewire the tree.
        assert!(!frontier.insert("Beta", "Gamma"));

        assert_eq!(frontier.chain_to_root("Beta"), vec!["Beta", "Alpha"]);
        assert_eq!(frontier.queue_len(), 3);
    }

    #[test]
    fn test_pop_batch_is_fifo_and_bounded() {
        let mut frontier = Frontier::new("Alpha");
        frontier.insert("Beta", "Alpha");
        frontier.insert("Gamma", "Alpha");

        assert_eq!(frontier.pop_batch(2), vec!["Alpha", "Beta"]);
        assert_eq!(frontier.pop_batch(10), vec!["Gamma"]);
        assert!(frontier.is_exhausted());
        // Popped titles stay visited.
        assert!(frontier.contains("Alpha"));
    }

    #[test]
    fn test_reconstruct_two_hop_path() {
        // X -> Y discovered forward; Z's backlink Y discovered backward.
        let mut forward = Frontier::new("X");
        forward.insert("Y", "X");

        let mut backward = Frontier::new("Z");
        backward.insert("Y", "Z");

        assert_eq!(reconstruct_path(&forward, &backward, "Y"), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_reconstruct_meeting_at_backward_root() {
        let mut forward = Frontier::new("Alpha");
        forward.insert("Beta", "Alpha");

        let backward = Frontier::new("Beta");

        assert_eq!(
            reconstruct_path(&forward, &backward, "Beta"),
            vec!["Alpha", "Beta"]
        );
    }

    #[test]
    fn test_reconstruct_longer_chain() {
        let mut forward = Frontier::new("A");
        forward.insert("B", "A");
        forward.insert("C", "B");

        let mut backward = Frontier::new("F");
        backward.insert("E", "F");
        backward.insert("D", "E");
        backward.insert("C", "D");

        assert_eq!(
            reconstruct_path(&forward, &backward, "C"),
            vec!["A", "B", "C", "D", "E", "F"]
        );
    }
}
