//! Level source over tree view items.

use super::{Direction, LevelSource, Unit, UnitKind};
use crate::error::{Error, Result};
use std::fmt;

/// Host tree view exposing flat next/previous iteration with depth info.
pub trait TreeProvider {
    type Node: Clone + fmt::Debug;

    /// The focused item, if any.
    fn focused(&self) -> Option<Self::Node>;

    fn next(&self, node: &Self::Node) -> Option<Self::Node>;

    fn previous(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Reported depth. `None` when the item has no position info.
    fn level(&self, node: &Self::Node) -> Option<usize>;

    /// Accessible name of the item.
    fn label(&self, node: &Self::Node) -> String;

    fn set_focus(&mut self, node: &Self::Node) -> Result<()>;
}

/// Walks a [`TreeProvider`] from the focused item.
pub struct TreeSource<'a, T: TreeProvider> {
    host: &'a mut T,
    node: T::Node,
}

impl<'a, T: TreeProvider> TreeSource<'a, T> {
    pub fn acquire(host: &'a mut T) -> Result<Self> {
        let node = host.focused().ok_or(Error::NoFocus)?;
        Ok(Self { host, node })
    }
}

impl<T: TreeProvider> LevelSource for TreeSource<'_, T> {
    type Position = T::Node;

    fn kind(&self) -> UnitKind {
        UnitKind::Tree
    }

    fn move_by(&mut self, direction: Direction) -> Result<bool> {
        let next = match direction {
            Direction::Forward => self.host.next(&self.node),
            Direction::Backward => self.host.previous(&self.node),
        };
        match next {
            Some(node) => {
                self.node = node;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn current(&mut self) -> Result<Unit<T::Node>> {
        Ok(Unit {
            position: self.node.clone(),
            text: self.host.label(&self.node),
            level: self.host.level(&self.node),
            blank: false,
        })
    }

    fn relocate_to(&mut self, position: &T::Node) -> Result<()> {
        self.host.set_focus(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Outline;

    #[test]
    fn test_walks_outline_items() {
        let mut outline = Outline::from_markdown("# A\n## B\n## C\n");
        let mut source = TreeSource::acquire(&mut outline).unwrap();

        let unit = source.current().unwrap();
        assert_eq!(unit.text, "A");
        assert_eq!(unit.level, Some(1));

        assert!(source.move_by(Direction::Forward).unwrap());
        assert_eq!(source.current().unwrap().text, "B");
        assert!(source.move_by(Direction::Backward).unwrap());
        assert!(!source.move_by(Direction::Backward).unwrap());
    }

    #[test]
    fn test_empty_tree_has_no_focus() {
        let mut outline = Outline::from_markdown("no headings here");
        assert!(matches!(
            TreeSource::acquire(&mut outline),
            Err(Error::NoFocus)
        ));
    }

    #[test]
    fn test_relocate_sets_focus() {
        let mut outline = Outline::from_markdown("# A\n## B\n## C\n");
        {
            let mut source = TreeSource::acquire(&mut outline).unwrap();
            source.relocate_to(&2).unwrap();
        }
        assert_eq!(outline.focus(), 2);
    }
}
