use std::rc::Rc;

use chase_core::Maze;
use chase_paths::NavGraph;

/// A maze layout together with its navigation graph.
///
/// Both halves are shared read-only between the hunters of a pack; cloning
/// is cheap. A new layout means a new `Navigation`, handed to every hunter
/// through `on_maze_changed`.
#[derive(Debug, Clone)]
pub struct Navigation {
    maze: Rc<Maze>,
    graph: Rc<NavGraph>,
}

impl Navigation {
    /// Build the graph for `maze`.
    pub fn new(maze: Maze) -> Self {
        let graph = NavGraph::build(&maze);
        Self {
            maze: Rc::new(maze),
            graph: Rc::new(graph),
        }
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    /// Whether both snapshots are the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.maze, &other.maze) && Rc::ptr_eq(&self.graph, &other.graph)
    }
}

impl From<Maze> for Navigation {
    fn from(maze: Maze) -> Self {
        Self::new(maze)
    }
}
