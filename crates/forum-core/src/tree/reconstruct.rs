//! Rebuild a thread's reply forest in one pass over path-ordered rows
//!
//! Rows sorted by path are a pre-order traversal, so a parent always precedes
//! its children and siblings already appear in insertion order. The builder
//! indexes rows by id, links each row to its parent, then assembles nodes
//! bottom-up. No secondary sort is needed.
//!
//! Soft-deleted replies are handled with a placeholder policy:
//!
//! - a deleted reply with at least one visible descendant stays in the tree
//!   as a placeholder at its original position, children attached;
//! - a deleted reply with no visible descendants is left out;
//! - a reply whose parent is not among the rows is dropped (never an error).

use std::collections::HashMap;

use crate::entities::Reply;
use crate::value_objects::ReplyId;

/// A reply with its visible children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyNode {
    pub reply: Reply,
    pub replies: Vec<ReplyNode>,
}

impl ReplyNode {
    /// Soft-deleted reply kept only to anchor its descendants
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.reply.is_deleted()
    }
}

/// Count every node in a forest, placeholders included
pub fn count_nodes(forest: &[ReplyNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(&node.replies))
        .sum()
}

/// Build the reply forest of one thread.
///
/// `replies` must hold every row of the thread, deleted ones included,
/// ordered by path ascending.
pub fn build_reply_tree(replies: Vec<Reply>) -> Vec<ReplyNode> {
    let n = replies.len();

    // first pass: id -> position
    let index: HashMap<ReplyId, usize> = replies
        .iter()
        .enumerate()
        .map(|(i, reply)| (reply.id, i))
        .collect();

    // second pass: link to parents, in fetch order
    let mut roots: Vec<usize> = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, reply) in replies.iter().enumerate() {
        match reply.parent_id {
            None => roots.push(i),
            Some(parent_id) => match index.get(&parent_id) {
                // a parent sorts before its children; anything else is corrupt
                Some(&parent) if parent < i => children[parent].push(i),
                _ => {}
            },
        }
    }

    // assemble bottom-up: every child index is greater than its parent's
    let mut built: Vec<Option<ReplyNode>> = (0..n).map(|_| None).collect();
    for (i, reply) in replies.into_iter().enumerate().rev() {
        let replies: Vec<ReplyNode> = children[i]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();

        if reply.is_deleted() && replies.is_empty() {
            continue;
        }
        built[i] = Some(ReplyNode { reply, replies });
    }

    roots
        .into_iter()
        .filter_map(|root| built[root].take())
        .collect()
}
