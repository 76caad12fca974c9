//! Traversal algorithms
//!
//! Every operation reads the live host tree, collects a plain working list
//! and wraps it through [`Selection::derive`], so results inherit the source
//! selection's context. Walks that can reach a node along several paths drop
//! repeats, keeping the first-seen position. Members that do not support
//! traversal are skipped.

use std::collections::HashSet;

use crate::{Host, Input, Selection};

/// Member filter: a host pattern or a predicate over `(index, node)`
pub enum Matcher<'a, N> {
    Pattern(&'a str),
    Predicate(Box<dyn Fn(usize, N) -> bool + 'a>),
}

impl<'a, N> Matcher<'a, N> {
    pub fn predicate(f: impl Fn(usize, N) -> bool + 'a) -> Self {
        Self::Predicate(Box::new(f))
    }
}

impl<'a, N> From<&'a str> for Matcher<'a, N> {
    fn from(pattern: &'a str) -> Self {
        Self::Pattern(pattern)
    }
}

impl<'a, N> From<&'a String> for Matcher<'a, N> {
    fn from(pattern: &'a String) -> Self {
        Self::Pattern(pattern)
    }
}

type Step<H> = fn(&H, <H as Host>::Node) -> Option<<H as Host>::Node>;

fn walk<H: Host>(host: &H, from: H::Node, step: Step<H>) -> impl Iterator<Item = H::Node> + '_ {
    std::iter::successors(step(host, from), move |&node| step(host, node))
}

impl<'h, H: Host> Selection<'h, H> {
    fn traversable(&self) -> impl Iterator<Item = H::Node> + '_ {
        self.iter().filter(|&node| self.host().supports_traversal(node))
    }

    fn accepts(&self, node: H::Node, pattern: Option<&str>) -> Result<bool, H::Error> {
        match pattern {
            Some(pattern) => self.host().matches(node, pattern),
            None => Ok(true),
        }
    }

    fn finish(&self, op: &'static str, found: Vec<H::Node>) -> Self {
        let result = self.derive_unique(found);
        tracing::trace!(op, from = self.len(), to = result.len(), "traversal");
        result
    }

    /// One step per member, optionally filtered
    fn collect_step(
        &self,
        op: &'static str,
        step: Step<H>,
        pattern: Option<&str>,
    ) -> Result<Self, H::Error> {
        let mut found = Vec::new();
        for member in self.traversable() {
            if let Some(node) = step(self.host(), member) {
                if self.accepts(node, pattern)? {
                    found.push(node);
                }
            }
        }
        Ok(self.finish(op, found))
    }

    /// Repeated steps per member, ending before a node matching `stop`
    fn collect_walk(
        &self,
        op: &'static str,
        step: Step<H>,
        stop: Option<&str>,
        filter: Option<&str>,
    ) -> Result<Self, H::Error> {
        let mut found = Vec::new();
        for member in self.traversable() {
            for node in walk(self.host(), member, step) {
                if let Some(stop) = stop {
                    if self.host().matches(node, stop)? {
                        break;
                    }
                }
                if self.accepts(node, filter)? {
                    found.push(node);
                }
            }
        }
        Ok(self.finish(op, found))
    }

    /// Nearest node matching `pattern`, starting with each member itself
    pub fn closest(&self, pattern: &str) -> Result<Self, H::Error> {
        let mut found = Vec::new();
        for member in self.traversable() {
            let mut cursor = Some(member);
            while let Some(node) = cursor {
                if self.host().matches(node, pattern)? {
                    found.push(node);
                    break;
                }
                cursor = self.host().parent(node);
            }
        }
        Ok(self.finish("closest", found))
    }

    /// Direct parent of each member
    pub fn parent(&self) -> Self {
        let found = self
            .traversable()
            .filter_map(|node| self.host().parent(node))
            .collect();
        self.finish("parent", found)
    }

    /// Direct children of each member, in member order
    pub fn children(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        let mut found = Vec::new();
        for member in self.traversable() {
            for child in self.host().children(member) {
                if self.accepts(child, pattern)? {
                    found.push(child);
                }
            }
        }
        Ok(self.finish("children", found))
    }

    /// Descendants of each member matching `pattern`
    pub fn find_all(&self, pattern: &str) -> Result<Self, H::Error> {
        let mut found = Vec::new();
        for member in self.traversable() {
            found.extend(self.host().query_all(member, pattern)?);
        }
        Ok(self.finish("find_all", found))
    }

    /// Every descendant of each member
    pub fn descendants(&self) -> Result<Self, H::Error> {
        self.find_all(self.host().universal_pattern())
    }

    /// All ancestors of each member, nearest first
    pub fn parents(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.collect_walk("parents", H::parent, None, pattern)
    }

    /// Ancestors of each member up to, not including, one matching `stop`
    pub fn parents_until(&self, stop: &str, filter: Option<&str>) -> Result<Self, H::Error> {
        self.collect_walk("parents_until", H::parent, Some(stop), filter)
    }

    /// Preorder walk of each member's subtree, pruning every branch whose
    /// root matches `stop`. Pruned nodes are neither collected nor entered.
    pub fn descendants_until(&self, stop: &str, filter: Option<&str>) -> Result<Self, H::Error> {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        for member in self.traversable() {
            stack.extend(self.host().children(member).into_iter().rev());
            while let Some(node) = stack.pop() {
                if self.host().matches(node, stop)? {
                    continue;
                }
                if self.accepts(node, filter)? {
                    found.push(node);
                }
                stack.extend(self.host().children(node).into_iter().rev());
            }
        }
        Ok(self.finish("descendants_until", found))
    }

    /// Following sibling of each member
    pub fn next(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.collect_step("next", H::next_sibling, pattern)
    }

    /// Preceding sibling of each member
    pub fn prev(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.collect_step("prev", H::prev_sibling, pattern)
    }

    /// Alias of [`Selection::next`]
    pub fn next_sibling(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.next(pattern)
    }

    /// Alias of [`Selection::prev`]
    pub fn prev_sibling(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.prev(pattern)
    }

    /// Alias of [`Selection::next`]
    pub fn sibling(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.next(pattern)
    }

    /// Every following sibling of each member
    pub fn next_all(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.collect_walk("next_all", H::next_sibling, None, pattern)
    }

    /// Every preceding sibling of each member, nearest first
    pub fn prev_all(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        self.collect_walk("prev_all", H::prev_sibling, None, pattern)
    }

    /// Following siblings up to, not including, one matching `stop`
    pub fn next_until(&self, stop: &str, filter: Option<&str>) -> Result<Self, H::Error> {
        self.collect_walk("next_until", H::next_sibling, Some(stop), filter)
    }

    /// Preceding siblings up to, not including, one matching `stop`
    pub fn prev_until(&self, stop: &str, filter: Option<&str>) -> Result<Self, H::Error> {
        self.collect_walk("prev_until", H::prev_sibling, Some(stop), filter)
    }

    /// Siblings of each member in document order. Members of this selection
    /// are never part of the result.
    pub fn siblings(&self, pattern: Option<&str>) -> Result<Self, H::Error> {
        let members: HashSet<H::Node> = self.iter().collect();
        let mut found = Vec::new();
        for member in self.traversable() {
            let mut before: Vec<_> = walk(self.host(), member, H::prev_sibling).collect();
            before.reverse();
            for node in before.into_iter().chain(walk(self.host(), member, H::next_sibling)) {
                if !members.contains(&node) && self.accepts(node, pattern)? {
                    found.push(node);
                }
            }
        }
        Ok(self.finish("siblings", found))
    }

    /// Member at `index`; negative indices count from the end
    pub fn eq(&self, index: isize) -> Self {
        let len = self.len() as isize;
        let position = if index < 0 { len + index } else { index };
        let found = if (0..len).contains(&position) {
            vec![self[position as usize]]
        } else {
            Vec::new()
        };
        self.finish("eq", found)
    }

    pub fn first(&self) -> Self {
        self.eq(0)
    }

    pub fn last(&self) -> Self {
        self.eq(-1)
    }

    fn partition_by<'a>(
        &self,
        matcher: Matcher<'a, H::Node>,
        keep: bool,
    ) -> Result<Self, H::Error> {
        let mut found = Vec::new();
        for (index, node) in self.iter().enumerate() {
            let hit = match &matcher {
                Matcher::Pattern(pattern) => {
                    self.host().supports_traversal(node) && self.host().matches(node, pattern)?
                }
                Matcher::Predicate(predicate) => predicate(index, node),
            };
            if hit == keep {
                found.push(node);
            }
        }
        Ok(self.derive(found))
    }

    /// Members matching a pattern or accepted by a predicate
    pub fn filter_by<'a>(&self, matcher: impl Into<Matcher<'a, H::Node>>) -> Result<Self, H::Error> {
        self.partition_by(matcher.into(), true)
    }

    /// Members rejected by [`Selection::filter_by`] with the same matcher
    pub fn not<'a>(&self, matcher: impl Into<Matcher<'a, H::Node>>) -> Result<Self, H::Error> {
        self.partition_by(matcher.into(), false)
    }

    /// Whether any member matches `pattern`
    pub fn is(&self, pattern: &str) -> Result<bool, H::Error> {
        for member in self.traversable() {
            if self.host().matches(member, pattern)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// This selection followed by the nodes `input` resolves to
    pub fn add(&self, input: impl Into<Input<H::Node>>) -> Result<Self, H::Error> {
        let extra = self.select(input)?;
        let mut nodes = self.to_vec();
        nodes.extend(extra.iter());
        Ok(self.finish("add", nodes))
    }
}
