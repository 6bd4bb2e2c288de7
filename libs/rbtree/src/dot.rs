// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::alloc::Allocator;
use core::fmt;

use crate::RbTree;
use crate::node::{Color, NodeRef};
use crate::utils::Side;

/// Formats a [`RbTree`] in [graphviz format].
///
/// Created by [`RbTree::dot`].
///
/// [graphviz format]: https://graphviz.org/doc/info/lang.html
pub struct Dot<'a, T, X, C, A: Allocator> {
    pub(crate) tree: &'a RbTree<T, X, C, A>,
}

impl<T: fmt::Debug, X, C, A: Allocator> Dot<'_, T, X, C, A> {
    fn node_fmt(&self, f: &mut fmt::Formatter<'_>, node: NodeRef) -> fmt::Result {
        let pool = &self.tree.pool;
        let id = node.index();
        let (fill, font) = match node.color(pool) {
            Color::Red => ("red", "white"),
            Color::Black => ("black", "white"),
        };

        // Safety: only live nodes reachable from the root are visited
        let value = unsafe { node.value(pool) };
        writeln!(
            f,
            r#"    {id} [label="{value:?}", style=filled, fillcolor={fill}, fontcolor={font}];"#
        )?;

        for side in [Side::Left, Side::Right] {
            let child = node.child(side, pool);
            if child.is_nil() {
                continue;
            }
            writeln!(f, r#"    {id} -> {} [label="{side}"];"#, child.index())?;
            self.node_fmt(f, child)?;
        }

        Ok(())
    }
}

impl<T: fmt::Debug, X, C, A: Allocator> fmt::Display for Dot<'_, T, X, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("digraph {\n")?;
        if !self.tree.root.is_nil() {
            self.node_fmt(f, self.tree.root)?;
        }
        f.write_str("}\n")
    }
}

impl<T: fmt::Debug, X, C, A: Allocator> fmt::Debug for Dot<'_, T, X, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Identity, RbTree};

    #[test]
    fn renders_colored_nodes() {
        let mut tree: RbTree<u32, Identity> = RbTree::new();
        for i in [1, 2, 3] {
            tree.insert(i);
        }

        let out = tree.dot().to_string();
        assert!(out.starts_with("digraph {\n"));
        assert!(out.ends_with("}\n"));
        assert!(out.contains(r#"[label="2", style=filled, fillcolor=black"#));
        assert!(out.contains(r#"[label="1", style=filled, fillcolor=red"#));
        assert!(out.contains(r#"[label="left"]"#));
        assert!(out.contains(r#"[label="right"]"#));
    }
}
