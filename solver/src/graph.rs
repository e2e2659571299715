//! Reduction of a [`PixelGrid`] into a sparse graph of topologically
//! interesting points.
//!
//! The grid is scanned once, row by row from the top. Open cells in the middle
//! of a straight corridor never become nodes; only openings on the border,
//! dead ends, turns and junctions do. Each edge is created when the second of
//! its two endpoints is reached by the scan, so edges are always axis aligned
//! and never duplicated.

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{GraphDefect, SolveError};
use crate::grid::{Cell, Direction, PixelGrid, Point};

/// Index of a node inside its [`Graph`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub point: Point,
    pub connections: Vec<NodeId>,
}

/// An undirected graph of maze nodes with a designated entry and exit.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<Point, NodeId>,
    initial: NodeId,
    goal: NodeId,
}

impl Graph {
    /// Assemble a graph from prepared nodes without running the reducer
    #[cfg(test)]
    pub(crate) fn from_nodes(nodes: Vec<Node>, initial: NodeId, goal: NodeId) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.point, NodeId(i)))
            .collect();
        Self {
            nodes,
            index,
            initial,
            goal,
        }
    }

    pub fn initial(&self) -> NodeId {
        self.initial
    }

    pub fn goal(&self) -> NodeId {
        self.goal
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up the node placed at `point`, if any
    pub fn id_at(&self, point: Point) -> Option<NodeId> {
        self.index.get(&point).copied()
    }

    pub fn node_at(&self, point: Point) -> Option<&Node> {
        self.id_at(point).map(|id| self.node(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every undirected edge once, lower id first
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(i, node)| {
            node.connections
                .iter()
                .filter(move |c| c.0 > i)
                .map(move |c| (NodeId(i), *c))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

/// Accumulates nodes and edges while the grid is being scanned
#[derive(Default)]
struct GraphBuilder {
    nodes: Vec<Node>,
    index: HashMap<Point, NodeId>,
    openings: Vec<NodeId>,
    /// row being scanned and every connection made with the row it was made on
    #[cfg(test)]
    row: usize,
    #[cfg(test)]
    links: Vec<(NodeId, NodeId, usize)>,
}

impl GraphBuilder {
    fn add_node(&mut self, point: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            point,
            connections: Vec::new(),
        });
        self.index.insert(point, id);
        id
    }

    fn connect(&mut self, a: NodeId, b: NodeId) {
        self.nodes[a.0].connections.push(b);
        self.nodes[b.0].connections.push(a);
        #[cfg(test)]
        self.links.push((a, b, self.row));
    }

    fn add_opening(&mut self, id: NodeId) -> Result<(), GraphDefect> {
        if let [initial, goal] = self.openings[..] {
            return Err(GraphDefect::TooManyOpenings {
                initial: self.nodes[initial.0].point,
                goal: self.nodes[goal.0].point,
                extra: self.nodes[id.0].point,
            });
        }
        debug!("boundary opening at {}", self.nodes[id.0].point);
        self.openings.push(id);
        Ok(())
    }

    fn finish(self) -> Result<Graph, GraphDefect> {
        match self.openings[..] {
            [initial, goal] => Ok(Graph {
                nodes: self.nodes,
                index: self.index,
                initial,
                goal,
            }),
            _ => Err(GraphDefect::MissingOpenings {
                found: self.openings.len(),
            }),
        }
    }
}

/// Scan state carried from one row to the next: for every column, the most
/// recent node that still has an open cell below it and is waiting for the
/// next node in that column to close the vertical corridor.
#[derive(Default)]
struct ScanState {
    verticals: HashMap<usize, NodeId>,
}

/// How a single cell takes part in the reduction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CellKind {
    Wall,
    /// straight corridor, compressed away
    Passage,
    /// open cell on the border of the grid
    Opening,
    /// dead end, turn or junction
    Junction,
}

fn classify(grid: &PixelGrid, point: Point) -> CellKind {
    if grid.get(point) == Cell::Wall {
        return CellKind::Wall;
    }
    if grid.is_boundary(point) {
        return CellKind::Opening;
    }

    let left = grid.get(Point::new(point.x - 1, point.y));
    let right = grid.get(Point::new(point.x + 1, point.y));
    let top = grid.get(Point::new(point.x, point.y - 1));
    let bottom = grid.get(Point::new(point.x, point.y + 1));

    let walls = [left, right, top, bottom]
        .iter()
        .filter(|c| **c == Cell::Wall)
        .count();
    let horizontal = left == Cell::Open || right == Cell::Open;
    let vertical = top == Cell::Open || bottom == Cell::Open;

    if walls == 3 || (horizontal && vertical) {
        CellKind::Junction
    } else {
        CellKind::Passage
    }
}

fn scan_row(
    grid: &PixelGrid,
    row: usize,
    state: &mut ScanState,
    builder: &mut GraphBuilder,
) -> Result<(), GraphDefect> {
    #[cfg(test)]
    {
        builder.row = row;
    }

    // the most recently placed node in this row, if no wall has been crossed since
    let mut last_horizontal: Option<NodeId> = None;

    for col in 0..grid.columns {
        let point = Point::new(col, row);

        match classify(grid, point) {
            CellKind::Wall => {
                last_horizontal = None;
                state.verticals.remove(&col);
            }
            CellKind::Passage => {}
            kind @ (CellKind::Opening | CellKind::Junction) => {
                let id = builder.add_node(point);
                if kind == CellKind::Opening {
                    builder.add_opening(id)?;
                }

                if let Some(left) = last_horizontal {
                    builder.connect(left, id);
                }
                if let Some(above) = state.verticals.remove(&col) {
                    builder.connect(above, id);
                }

                last_horizontal = Some(id);
                if grid.is_open_below(point) {
                    state.verticals.insert(col, id);
                }
            }
        }
    }

    Ok(())
}

/// Reduce a grid into a graph whose first and second boundary openings (in
/// scan order) become the initial and goal nodes.
pub fn reduce(grid: &PixelGrid) -> Result<Graph, SolveError> {
    if grid.is_empty() {
        return Err(GraphDefect::EmptyGrid.into());
    }

    let mut builder = GraphBuilder::default();
    let mut state = ScanState::default();

    for row in 0..grid.rows {
        scan_row(grid, row, &mut state, &mut builder)?;
    }

    let graph = builder.finish()?;
    info!(
        "reduced {}x{} grid to {} nodes and {} edges",
        grid.columns,
        grid.rows,
        graph.len(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Checks that every connection is axis aligned, returning the direction of
/// each connection of `id` in order.
pub fn connection_directions(graph: &Graph, id: NodeId) -> Result<Vec<Direction>, GraphDefect> {
    let node = graph.node(id);
    node.connections
        .iter()
        .map(|c| {
            let to = graph.node(*c).point;
            Direction::between(node.point, to).ok_or(GraphDefect::NotAxisAligned {
                from: node.point,
                to,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn grid(rows: &[&str]) -> PixelGrid {
        rows.join("\n").parse().unwrap()
    }

    fn points(graph: &Graph, id: NodeId) -> HashSet<Point> {
        graph
            .node(id)
            .connections
            .iter()
            .map(|c| graph.node(*c).point)
            .collect()
    }

    #[test]
    fn test_straight_corridor_is_two_nodes() {
        let g = reduce(&grid(&[
            "#####", //
            "#####",
            ".....",
            "#####",
            "#####",
        ]))
        .unwrap();

        assert_eq!(g.len(), 2);
        assert_eq!(g.node(g.initial()).point, Point::new(0, 2));
        assert_eq!(g.node(g.goal()).point, Point::new(4, 2));
        assert_eq!(g.node(g.initial()).connections, vec![g.goal()]);
        assert_eq!(g.node(g.goal()).connections, vec![g.initial()]);
    }

    #[test]
    fn test_vertical_corridor_is_two_nodes() {
        let g = reduce(&grid(&[
            "##.##", //
            "##.##",
            "##.##",
            "##.##",
            "##.##",
        ]))
        .unwrap();

        assert_eq!(g.len(), 2);
        assert_eq!(g.node(g.initial()).point, Point::new(2, 0));
        assert_eq!(g.node(g.goal()).point, Point::new(2, 4));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_turn_and_dead_end() {
        // entry on top, a turn at (2,2) heading right to the exit, and a dead end below the turn
        let g = reduce(&grid(&[
            "##.###", //
            "##.###",
            "##....",
            "##.###",
            "######",
        ]))
        .unwrap();

        let turn = g.id_at(Point::new(2, 2)).unwrap();
        let dead_end = g.id_at(Point::new(2, 3)).unwrap();

        assert_eq!(g.len(), 4);
        assert_eq!(
            points(&g, turn),
            HashSet::from([Point::new(2, 0), Point::new(5, 2), Point::new(2, 3)])
        );
        assert_eq!(points(&g, dead_end), HashSet::from([Point::new(2, 2)]));
        // the corridor cells between nodes are compressed away
        assert!(g.id_at(Point::new(2, 1)).is_none());
        assert!(g.id_at(Point::new(4, 2)).is_none());
    }

    #[test]
    fn test_walls_break_corridors() {
        // two separate corridors in the same row and column never get joined across a wall
        let maze = grid(&[
            "#.###", //
            "#.#..",
            "#####",
        ]);
        let g = reduce(&maze).unwrap();

        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 2);
        for (a, b) in g.edges() {
            let (pa, pb) = (g.node(a).point, g.node(b).point);
            for x in pa.x.min(pb.x)..=pa.x.max(pb.x) {
                for y in pa.y.min(pb.y)..=pa.y.max(pb.y) {
                    assert_eq!(maze.get(Point::new(x, y)), Cell::Open);
                }
            }
        }
        assert!(points(&g, g.id_at(Point::new(3, 1)).unwrap()).contains(&Point::new(4, 1)));
    }

    #[test]
    fn test_missing_openings() {
        let res = reduce(&grid(&[
            "#####", //
            "#...#",
            "#####",
        ]));
        assert!(matches!(
            res,
            Err(SolveError::MalformedGraph(GraphDefect::MissingOpenings { found: 0 }))
        ));

        let res = reduce(&grid(&[
            "#####", //
            "....#",
            "#####",
        ]));
        assert!(matches!(
            res,
            Err(SolveError::MalformedGraph(GraphDefect::MissingOpenings { found: 1 }))
        ));
    }

    #[test]
    fn test_too_many_openings() {
        let res = reduce(&grid(&[
            "##.##", //
            ".....",
            "#####",
        ]));

        match res {
            Err(SolveError::MalformedGraph(GraphDefect::TooManyOpenings {
                initial,
                goal,
                extra,
            })) => {
                assert_eq!(initial, Point::new(2, 0));
                assert_eq!(goal, Point::new(0, 1));
                assert_eq!(extra, Point::new(4, 1));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_grid() {
        let res = reduce(&PixelGrid::new(0, 0, Cell::Wall));
        assert!(matches!(
            res,
            Err(SolveError::MalformedGraph(GraphDefect::EmptyGrid))
        ));
    }

    #[test]
    fn test_connections_made_while_scanning_lower_node() {
        let maze = grid(&[
            "#.#######", //
            "#.......#",
            "#.#.#.#.#",
            "#...#...#",
            "#.###.#.#",
            "#.......#",
            "#######.#",
        ]);
        let mut builder = GraphBuilder::default();
        let mut state = ScanState::default();
        for row in 0..maze.rows {
            scan_row(&maze, row, &mut state, &mut builder).unwrap();
        }

        assert!(!builder.links.is_empty());
        for (a, b, row) in &builder.links {
            let (older, newer) = (builder.nodes[a.0].point, builder.nodes[b.0].point);
            // the newer endpoint is the cell under the scan, the older one is
            // either earlier in the same row or pending above in the same column
            assert_eq!(newer.y, *row, "{} - {}", older, newer);
            if older.y == *row {
                assert!(older.x < newer.x, "{} - {}", older, newer);
            } else {
                assert_eq!(older.x, newer.x, "{} - {}", older, newer);
                assert!(older.y < newer.y, "{} - {}", older, newer);
            }
        }

        // every connection in the graph was made through the scan
        let total: usize = builder.nodes.iter().map(|n| n.connections.len()).sum();
        assert_eq!(total, 2 * builder.links.len());
    }

    #[test]
    fn test_one_connection_per_direction() {
        // a node only ever gains connections while it is the row's last node or
        // the column's pending vertical, so it ends up with at most one per side
        let g = reduce(&grid(&[
            "#.#######", //
            "#.......#",
            "#.#.#.#.#",
            "#.......#",
            "#.#.#.#.#",
            "#.......#",
            "#######.#",
        ]))
        .unwrap();

        for i in 0..g.len() {
            let dirs = connection_directions(&g, NodeId(i)).unwrap();
            let unique: HashSet<_> = dirs.iter().collect();
            assert_eq!(unique.len(), dirs.len(), "node {}", g.node(NodeId(i)).point);
        }
    }
}
