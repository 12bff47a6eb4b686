//! Rotation and recoloring primitives, plus the recursive insert and remove
//! routines built on them.
//!
//! Every routine takes ownership of a subtree root and hands back the new
//! root. Callers re-attach the returned link, so no parent pointers are ever
//! needed. Invariants may be violated transiently inside a call; `fix_up`
//! restores them on every return path.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

use crate::compare::Comparator;
use crate::error::Violation;
use crate::node::{Color, Link, Node};

// =============================================================================
// Color queries
// =============================================================================

/// Absent children are black.
#[inline]
pub(crate) fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|n| n.is_red())
}

#[inline]
fn is_red_left<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|n| is_red(&n.left))
}

#[inline]
fn is_red_right<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|n| is_red(&n.right))
}

// =============================================================================
// Primitives
// =============================================================================

//          h                  x
//         / \                / \
//        a   x     =>       h   c
//           / \            / \
//          b   c          a   b
//
pub(crate) fn rotate_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut x) = h.right.take() else {
        return h;
    };
    h.right = x.left.take();
    x.color = h.color;
    h.color = Color::Red;
    x.left = Some(h);
    x
}

//          h                  x
//         / \                / \
//        x   c     =>       a   h
//       / \                    / \
//      a   b                  b   c
//
pub(crate) fn rotate_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut x) = h.left.take() else {
        return h;
    };
    h.left = x.right.take();
    x.color = h.color;
    h.color = Color::Red;
    x.right = Some(h);
    x
}

/// Toggles `h` and both of its present children.
pub(crate) fn flip_colors<K, V>(h: &mut Node<K, V>) {
    h.color = h.color.flip();
    if let Some(left) = h.left.as_mut() {
        left.color = left.color.flip();
    }
    if let Some(right) = h.right.as_mut() {
        right.color = right.color.flip();
    }
}

/// Assuming `h` is red and both `h.left` and `h.left.left` are black, makes
/// `h.left` or one of its children red.
pub(crate) fn move_red_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if is_red_left(&h.right) {
        h.right = h.right.take().map(rotate_right);
        h = rotate_left(h);
        flip_colors(&mut h);
        if is_red_right(&h.right) {
            h.right = h.right.take().map(rotate_left);
        }
    }
    h
}

/// Assuming `h` is red and both `h.right` and `h.right.left` are black, makes
/// `h.right` or one of its children red.
pub(crate) fn move_red_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if is_red_left(&h.left) {
        h = rotate_right(h);
        flip_colors(&mut h);
    }
    h
}

/// Restores the local invariants at `h` on the way back up.
pub(crate) fn fix_up<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&h.right) {
        h = rotate_left(h);
    }
    if is_red(&h.left) && is_red_left(&h.left) {
        h = rotate_right(h);
    }
    if is_red(&h.left) && is_red(&h.right) {
        flip_colors(&mut h);
    }
    if is_red_right(&h.left) && !is_red_left(&h.left) {
        h.left = h.left.take().map(rotate_left);
    }
    h
}

// =============================================================================
// Insertion
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InsertMode {
    /// Leave an existing entry untouched and hand the new pair back.
    Reject,
    /// Overwrite the value of an existing entry.
    Replace,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Inserted<K, V> {
    New,
    Rejected(K, V),
    Replaced(V),
}

pub(crate) fn insert<K, V, C>(
    link: Link<K, V>,
    key: K,
    value: V,
    mode: InsertMode,
    cmp: &C,
) -> (Box<Node<K, V>>, Inserted<K, V>)
where
    C: Comparator<K>,
{
    let Some(mut h) = link else {
        return (Node::leaf(key, value), Inserted::New);
    };

    let outcome = match cmp.compare(&key, &h.key) {
        Ordering::Less => {
            let (left, outcome) = insert(h.left.take(), key, value, mode, cmp);
            h.left = Some(left);
            outcome
        }
        Ordering::Greater => {
            let (right, outcome) = insert(h.right.take(), key, value, mode, cmp);
            h.right = Some(right);
            outcome
        }
        Ordering::Equal => match mode {
            // Nothing below changed, so the subtree is still balanced.
            InsertMode::Reject => return (h, Inserted::Rejected(key, value)),
            InsertMode::Replace => Inserted::Replaced(mem::replace(&mut h.value, value)),
        },
    };

    (fix_up(h), outcome)
}

// =============================================================================
// Removal
// =============================================================================

/// Detaches the minimum of the subtree. Returns the new subtree root and the
/// detached node.
pub(crate) fn remove_min<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    if h.left.is_some() && !is_red(&h.left) && !is_red_left(&h.left) {
        h = move_red_left(h);
    }
    match h.left.take() {
        None => (h.right.take(), h),
        Some(left) => {
            let (left, min) = remove_min(left);
            h.left = left;
            (Some(fix_up(h)), min)
        }
    }
}

/// Detaches the maximum of the subtree. Returns the new subtree root and the
/// detached node.
pub(crate) fn remove_max<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    if is_red(&h.left) {
        h = rotate_right(h);
    }
    if h.right.is_some() && !is_red(&h.right) && !is_red_left(&h.right) {
        h = move_red_right(h);
    }
    match h.right.take() {
        None => (h.left.take(), h),
        Some(right) => {
            let (right, max) = remove_max(right);
            h.right = right;
            (Some(fix_up(h)), max)
        }
    }
}

/// Removes `key` from the subtree rooted at `h`.
///
/// The key must be present: red links are pushed down the search path before
/// the comparison outcome is known, so a miss would still restructure the
/// tree.
pub(crate) fn remove<K, V, Q, C>(
    mut h: Box<Node<K, V>>,
    key: &Q,
    cmp: &C,
) -> (Link<K, V>, Option<(K, V)>)
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    if cmp.compare(key, h.key.borrow()) == Ordering::Less {
        if !is_red(&h.left) && !is_red_left(&h.left) {
            h = move_red_left(h);
        }
        let removed = match h.left.take() {
            Some(left) => {
                let (left, removed) = remove(left, key, cmp);
                h.left = left;
                removed
            }
            None => None,
        };
        return (Some(fix_up(h)), removed);
    }

    if is_red(&h.left) {
        h = rotate_right(h);
    }
    // A node with no right child has no left child either (black balance).
    if cmp.compare(key, h.key.borrow()) == Ordering::Equal && h.right.is_none() {
        return (None, Some(h.into_entry()));
    }
    if !is_red(&h.right) && !is_red_left(&h.right) {
        h = move_red_right(h);
    }

    let removed = match h.right.take() {
        Some(right) if cmp.compare(key, h.key.borrow()) == Ordering::Equal => {
            let (right, successor) = remove_min(right);
            h.right = right;
            let (k, v) = successor.into_entry();
            Some((mem::replace(&mut h.key, k), mem::replace(&mut h.value, v)))
        }
        Some(right) => {
            let (right, removed) = remove(right, key, cmp);
            h.right = right;
            removed
        }
        None => None,
    };
    (Some(fix_up(h)), removed)
}

// =============================================================================
// Verification
// =============================================================================

/// Checks the red rules and black balance below `link`, returning its black
/// height. Counts reachable nodes and records the deepest path.
pub(crate) fn check_subtree<K, V>(
    link: &Link<K, V>,
    depth: usize,
    reachable: &mut usize,
    max_depth: &mut usize,
) -> Result<usize, Violation> {
    let Some(node) = link else {
        *max_depth = (*max_depth).max(depth);
        return Ok(0);
    };
    *reachable += 1;

    if is_red(&node.right) {
        return Err(Violation::RightLeaningRed);
    }
    if node.is_red() && is_red(&node.left) {
        return Err(Violation::ConsecutiveReds);
    }

    let left = check_subtree(&node.left, depth + 1, reachable, max_depth)?;
    let right = check_subtree(&node.right, depth + 1, reachable, max_depth)?;
    if left != right {
        return Err(Violation::UnbalancedBlacks { left, right });
    }
    Ok(left + usize::from(!node.is_red()))
}
