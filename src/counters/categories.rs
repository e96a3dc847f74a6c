use std::collections::HashMap;

use crate::ids;

use super::source::{CategoryCountRow, CountSource, CountTriple, IdSet};
use super::types::{CounterError, CounterRecord, RecordKind};
use super::CounterEngine;

// ============================================================================
// Category Arena
// ============================================================================

/// Flat arena over one owner's category tree.
///
/// Built from a single all-categories query; parent links are resolved to
/// arena indexes up front so traversal never goes back to the store. Nodes
/// are kept in ascending id order, which fixes the emission order of
/// category records.
pub(super) struct CategoryForest {
    nodes: Vec<Node>,
    index: HashMap<i64, usize>,
}

struct Node {
    id: i64,
    parent: Option<i64>,
    counts: CountTriple,
    children: Vec<usize>,
}

struct Frame {
    node: usize,
    cursor: usize,
    acc: CountTriple,
}

impl CategoryForest {
    pub(super) fn new(mut rows: Vec<CategoryCountRow>) -> Self {
        rows.sort_by_key(|row| row.id);

        let mut nodes: Vec<Node> = rows
            .into_iter()
            .map(|row| Node {
                id: row.id,
                parent: row.parent,
                counts: row.counts,
                children: Vec::new(),
            })
            .collect();
        let index: HashMap<i64, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();

        // Resolve child links; a dangling parent leaves the node a root.
        let links: Vec<(usize, usize)> = nodes
            .iter()
            .enumerate()
            .filter_map(|(child, node)| {
                node.parent
                    .and_then(|pid| index.get(&pid).map(|&parent| (parent, child)))
            })
            .collect();
        for (parent, child) in links {
            nodes[parent].children.push(child);
        }

        Self { nodes, index }
    }

    pub(super) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn id(&self, idx: usize) -> i64 {
        self.nodes[idx].id
    }

    /// Own-plus-descendant totals for one category.
    ///
    /// Iterative post-order walk with results memoized across calls sharing
    /// the same `memo`, so overlapping subtrees of one assembly are resolved
    /// once. Re-entering a node that is still on the walk stack means the
    /// parent chain loops; that fails the whole assembly rather than hang.
    pub(super) fn rollup(
        &self,
        start: usize,
        memo: &mut HashMap<usize, CountTriple>,
    ) -> Result<CountTriple, CounterError> {
        if let Some(&total) = memo.get(&start) {
            return Ok(total);
        }

        let mut on_stack = vec![false; self.nodes.len()];
        let mut stack = vec![Frame {
            node: start,
            cursor: 0,
            acc: self.nodes[start].counts,
        }];
        on_stack[start] = true;

        loop {
            let top = stack.len() - 1;
            let node = stack[top].node;
            let cursor = stack[top].cursor;
            let children = &self.nodes[node].children;

            if cursor < children.len() {
                let child = children[cursor];
                stack[top].cursor += 1;

                if let Some(&total) = memo.get(&child) {
                    stack[top].acc.add(total);
                } else if on_stack[child] {
                    return Err(CounterError::CategoryCycle(self.nodes[child].id));
                } else {
                    let counts = self.nodes[child].counts;
                    on_stack[child] = true;
                    stack.push(Frame {
                        node: child,
                        cursor: 0,
                        acc: counts,
                    });
                }
            } else {
                let Some(done) = stack.pop() else { break };
                on_stack[done.node] = false;
                memo.insert(done.node, done.acc);
                match stack.last_mut() {
                    Some(parent) => parent.acc.add(done.acc),
                    None => return Ok(done.acc),
                }
            }
        }

        unreachable!("post-order walk drained without completing the start node")
    }

    /// Widens a category id set with every member's ancestor chain, so the
    /// rollups enclosing a changed feed stay addressable. Unknown ids pass
    /// through untouched; the walk terminates on revisit, leaving cycle
    /// reporting to [`Self::rollup`].
    pub(super) fn with_ancestors(&self, seed: &IdSet) -> IdSet {
        let mut out = seed.clone();
        for &id in seed {
            let Some(&idx) = self.index.get(&id) else {
                continue;
            };
            let mut cur = self.nodes[idx].parent;
            while let Some(pid) = cur {
                if !out.insert(pid) {
                    break;
                }
                cur = self.index.get(&pid).and_then(|&p| self.nodes[p].parent);
            }
        }
        out
    }
}

// ============================================================================
// Category Counters
// ============================================================================

impl<S: CountSource> CounterEngine<S> {
    /// Category records: the labels pseudo-category first, then one record
    /// per (filtered) category with rolled-up totals, then the
    /// uncategorized bucket.
    ///
    /// A present filter is widened with ancestor chains before matching. An
    /// explicit empty filter suppresses every category record, the labels
    /// pseudo-category and uncategorized bucket included.
    pub(super) async fn get_cats(
        &self,
        owner: i64,
        filter: Option<&IdSet>,
    ) -> Result<Vec<CounterRecord>, CounterError> {
        if filter.is_some_and(|ids| ids.is_empty()) {
            return Ok(Vec::new());
        }

        let labeled = self.source.labeled_unread(owner).await?;
        let mut ret = vec![CounterRecord {
            kind: Some(RecordKind::Category),
            ..CounterRecord::new(ids::CAT_LABELS, labeled)
        }];

        let forest = CategoryForest::new(self.source.category_counts(owner).await?);
        let scope = filter.map(|ids| forest.with_ancestors(ids));

        let mut memo = HashMap::new();
        for idx in 0..forest.len() {
            let id = forest.id(idx);
            if let Some(scope) = &scope {
                if !scope.contains(&id) {
                    continue;
                }
            }
            let total = forest.rollup(idx, &mut memo)?;
            ret.push(CounterRecord {
                kind: Some(RecordKind::Category),
                marked_counter: Some(total.marked),
                published_counter: Some(total.published),
                ..CounterRecord::new(id, total.unread)
            });
        }

        // Feeds with no category; direct counts only, never any rollup.
        let unc = self.source.uncategorized_counts(owner).await?;
        ret.push(CounterRecord {
            kind: Some(RecordKind::Category),
            marked_counter: Some(unc.marked),
            published_counter: Some(unc.published),
            ..CounterRecord::new(ids::CAT_UNCATEGORIZED, unc.unread)
        });

        Ok(ret)
    }

    /// Category scope derived from a changed-feed set: the categories owning
    /// those feeds. Uncategorized feeds contribute the bucket id 0; the
    /// ancestor widening happens later, against the arena.
    pub(super) async fn cats_of(&self, owner: i64, feed_ids: &IdSet) -> Result<IdSet, CounterError> {
        if feed_ids.is_empty() {
            return Ok(IdSet::new());
        }
        let cats = self.source.categories_of_feeds(owner, feed_ids).await?;
        Ok(cats.into_iter().collect())
    }
}
