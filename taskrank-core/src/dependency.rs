//! Dependency analyzer: blocking graph, cycle detection and impact multiplier.
//!
//! Nodes are tasks keyed by position in the batch. References in
//! `Task::dependencies` are 1-based on the wire and converted once, by
//! [`resolve_reference`], to 0-based indices for the adjacency lists.
//! References outside the batch resolve to nothing: they behave like edges to
//! a sink node and can never close a cycle.

use crate::task::Task;

/// Multiplier for a task that blocks nothing.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;
/// Multiplier for a task that blocks exactly one other task.
pub const SINGLE_BLOCK_MULTIPLIER: f64 = 1.2;
/// Multiplier for a task that blocks two or more tasks.
pub const MULTI_BLOCK_MULTIPLIER: f64 = 1.5;
/// Replaces the fan-out bonus when a task blocks something caught in a cycle.
pub const CYCLE_PENALTY: f64 = 0.5;

/// Map a 1-based batch reference to a 0-based index, if it is in range.
pub fn resolve_reference(reference: i64, len: usize) -> Option<usize> {
    let index = usize::try_from(reference).ok()?.checked_sub(1)?;
    (index < len).then_some(index)
}

/// References that point outside the batch, as `(position, reference)` pairs.
pub fn dangling_references(tasks: &[Task]) -> Vec<(usize, i64)> {
    let len = tasks.len();
    tasks
        .iter()
        .enumerate()
        .flat_map(|(i, t)| {
            t.dependencies
                .iter()
                .filter(move |&&d| resolve_reference(d, len).is_none())
                .map(move |&d| (i + 1, d))
        })
        .collect()
}

/// Directed graph of blocking relationships for one batch.
///
/// Crate-internal: callers get the cycle analysis through [`CycleReport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DependencyGraph {
    adjacency: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub(crate) fn from_tasks(tasks: &[Task]) -> Self {
        let len = tasks.len();
        let adjacency = tasks
            .iter()
            .map(|t| {
                t.dependencies
                    .iter()
                    .filter_map(|&d| resolve_reference(d, len))
                    .collect()
            })
            .collect();
        Self { adjacency }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Outgoing edges of the node at 0-based `index`.
    #[cfg(test)]
    fn successors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Depth-first search with a recursion-stack marker: reaching a node that
    /// is still on the stack means a back edge, hence a cycle.
    ///
    /// Iterative, so batch size does not bound call-stack depth.
    pub(crate) fn has_cycle(&self) -> bool {
        let n = self.len();
        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        // (node, next edge to explore)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            on_stack[root] = true;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, edge) = *frame;
                match self.adjacency[node].get(edge) {
                    Some(&next) => {
                        frame.1 += 1;
                        if on_stack[next] {
                            return true;
                        }
                        if !visited[next] {
                            visited[next] = true;
                            on_stack[next] = true;
                            stack.push((next, 0));
                        }
                    }
                    None => {
                        on_stack[node] = false;
                        stack.pop();
                    }
                }
            }
        }

        false
    }

    /// For each node, whether it lies on some cycle.
    ///
    /// A node is on a cycle iff its strongly connected component has more
    /// than one node, or it has an edge to itself. Components come from
    /// Kosaraju's two-pass algorithm.
    pub(crate) fn cycle_members(&self) -> Vec<bool> {
        let n = self.len();
        let order = self.finish_order();

        let mut reversed = vec![Vec::new(); n];
        for (from, edges) in self.adjacency.iter().enumerate() {
            for &to in edges {
                reversed[to].push(from);
            }
        }

        let mut component = vec![usize::MAX; n];
        let mut sizes: Vec<usize> = Vec::new();
        for &root in order.iter().rev() {
            if component[root] != usize::MAX {
                continue;
            }
            let id = sizes.len();
            let mut size = 0;
            let mut pending = vec![root];
            component[root] = id;
            while let Some(node) = pending.pop() {
                size += 1;
                for &prev in &reversed[node] {
                    if component[prev] == usize::MAX {
                        component[prev] = id;
                        pending.push(prev);
                    }
                }
            }
            sizes.push(size);
        }

        (0..n)
            .map(|node| sizes[component[node]] > 1 || self.adjacency[node].contains(&node))
            .collect()
    }

    pub(crate) fn cycle_report(&self) -> CycleReport {
        CycleReport {
            has_cycle: self.has_cycle(),
            members: self.cycle_members(),
        }
    }

    /// Nodes in order of DFS completion.
    fn finish_order(&self) -> Vec<usize> {
        let n = self.len();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, edge) = *frame;
                match self.adjacency[node].get(edge) {
                    Some(&next) => {
                        frame.1 += 1;
                        if !visited[next] {
                            visited[next] = true;
                            stack.push((next, 0));
                        }
                    }
                    None => {
                        order.push(node);
                        stack.pop();
                    }
                }
            }
        }

        order
    }
}

/// Whole-batch cycle context, computed once and shared read-only while each
/// task is scored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    has_cycle: bool,
    members: Vec<bool>,
}

impl CycleReport {
    pub fn analyze(tasks: &[Task]) -> Self {
        DependencyGraph::from_tasks(tasks).cycle_report()
    }

    pub fn has_cycle(&self) -> bool {
        self.has_cycle
    }

    /// Whether the task at 0-based `index` lies on a cycle.
    pub fn is_member(&self, index: usize) -> bool {
        self.members.get(index).copied().unwrap_or(false)
    }

    /// 1-based positions of every task on a cycle.
    pub fn member_positions(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, on_cycle)| **on_cycle)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Whether `task` blocks any task that lies on a cycle.
    pub fn references_cycle(&self, task: &Task) -> bool {
        self.has_cycle
            && task
                .dependencies
                .iter()
                .filter_map(|&d| resolve_reference(d, self.members.len()))
                .any(|i| self.members[i])
    }
}

/// Blocking fan-out multiplier.
///
/// Without batch context (`cycles` is `None`) only the fan-out counts. With
/// context, a task that blocks a cycle member gets [`CYCLE_PENALTY`] instead.
pub fn dependency_multiplier(task: &Task, cycles: Option<&CycleReport>) -> f64 {
    if cycles.is_some_and(|report| report.references_cycle(task)) {
        return CYCLE_PENALTY;
    }
    match task.dependencies.len() {
        0 => NEUTRAL_MULTIPLIER,
        1 => SINGLE_BLOCK_MULTIPLIER,
        _ => MULTI_BLOCK_MULTIPLIER,
    }
}
