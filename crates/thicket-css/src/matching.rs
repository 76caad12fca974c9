//! Selector matching against a DOM tree
//!
//! Complex selectors are matched right to left: the subject compound is
//! tested first, then each combinator walks outward from the candidate.

use thicket_dom::{DomTree, ElementData, NodeId};

use crate::selectors::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList, SimpleSelector,
};

impl SelectorList {
    /// Check if `node` matches any selector in the list. Non-elements never match.
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.element(node).is_some() && self.0.iter().any(|sel| sel.matches(tree, node))
    }
}

impl ComplexSelector {
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, node, n - 1),
        }
    }

    fn matches_at(&self, tree: &DomTree, node: NodeId, index: usize) -> bool {
        if !self.compounds[index].matches(tree, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let next = index - 1;
        match self.combinators[next] {
            Combinator::Descendant => {
                element_ancestors(tree, node).any(|a| self.matches_at(tree, a, next))
            }
            Combinator::Child => {
                parent_element(tree, node).is_some_and(|p| self.matches_at(tree, p, next))
            }
            Combinator::NextSibling => {
                prev_element(tree, node).is_some_and(|s| self.matches_at(tree, s, next))
            }
            Combinator::SubsequentSibling => {
                preceding_elements(tree, node).any(|s| self.matches_at(tree, s, next))
            }
        }
    }
}

impl CompoundSelector {
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.element(node) else {
            return false;
        };
        self.0.iter().all(|simple| matches_simple(simple, tree, node, elem))
    }
}

fn matches_simple(simple: &SimpleSelector, tree: &DomTree, node: NodeId, elem: &ElementData) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.name.eq_ignore_ascii_case(tag),
        SimpleSelector::Id(id) => elem.id.as_deref() == Some(id.as_str()),
        SimpleSelector::Class(class) => elem.has_class(class),
        SimpleSelector::Attribute(attr) => attr.matches(elem.get_attr(&attr.name)),
        SimpleSelector::PseudoClass(pseudo) => matches_pseudo_class(pseudo, tree, node, elem),
    }
}

fn matches_pseudo_class(pseudo: &PseudoClass, tree: &DomTree, node: NodeId, elem: &ElementData) -> bool {
    match pseudo {
        PseudoClass::Root => tree.parent(node) == Some(tree.root()),
        PseudoClass::Empty => tree
            .children(node)
            .all(|(_, child)| !child.is_element() && child.as_text().is_none_or(str::is_empty)),
        PseudoClass::Not(list) => !list.matches(tree, node),
        _ => {
            let position = SiblingPosition::of(tree, node, &elem.name);
            match pseudo {
                PseudoClass::FirstChild => position.index == 1,
                PseudoClass::LastChild => position.index == position.count,
                PseudoClass::OnlyChild => position.count == 1,
                PseudoClass::FirstOfType => position.type_index == 1,
                PseudoClass::LastOfType => position.type_index == position.type_count,
                PseudoClass::OnlyOfType => position.type_count == 1,
                PseudoClass::NthChild(expr) => expr.matches(position.index),
                PseudoClass::NthLastChild(expr) => {
                    expr.matches(position.count - position.index + 1)
                }
                PseudoClass::NthOfType(expr) => expr.matches(position.type_index),
                PseudoClass::NthLastOfType(expr) => {
                    expr.matches(position.type_count - position.type_index + 1)
                }
                PseudoClass::Root | PseudoClass::Empty | PseudoClass::Not(_) => false,
            }
        }
    }
}

/// 1-based position of an element among its element siblings
struct SiblingPosition {
    index: i32,
    count: i32,
    type_index: i32,
    type_count: i32,
}

impl SiblingPosition {
    fn of(tree: &DomTree, node: NodeId, tag: &str) -> Self {
        let mut position = Self {
            index: 1,
            count: 1,
            type_index: 1,
            type_count: 1,
        };
        let same_type = |id: NodeId| tree.element(id).is_some_and(|e| e.name == tag);

        for sibling in preceding_elements(tree, node) {
            position.index += 1;
            position.count += 1;
            if same_type(sibling) {
                position.type_index += 1;
                position.type_count += 1;
            }
        }
        for sibling in following_elements(tree, node) {
            position.count += 1;
            if same_type(sibling) {
                position.type_count += 1;
            }
        }
        position
    }
}

fn parent_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    tree.parent(node).filter(|&p| tree.element(p).is_some())
}

fn element_ancestors(tree: &DomTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.ancestors(node).take_while(|&a| tree.element(a).is_some())
}

fn prev_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    preceding_elements(tree, node).next()
}

fn preceding_elements(tree: &DomTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(tree.prev_sibling(node), |&s| tree.prev_sibling(s))
        .filter(|&s| tree.element(s).is_some())
}

fn following_elements(tree: &DomTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(tree.next_sibling(node), |&s| tree.next_sibling(s))
        .filter(|&s| tree.element(s).is_some())
}

/// Elements strictly inside `root` that match `selectors`, in document order
pub fn select_all(tree: &DomTree, root: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
    let found: Vec<NodeId> = tree
        .descendants(root)
        .filter(|&node| selectors.matches(tree, node))
        .collect();
    tracing::trace!(root = ?root, matched = found.len(), "select_all");
    found
}
