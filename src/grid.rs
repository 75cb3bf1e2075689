//! ASCII grid world: a ready-made [`Waypoint`] implementation for scenario
//! tests, demos, and doc examples.
//!
//! The world is a rectangular field of terrain tiles parsed from text:
//!
//! ```text
//! .....~......
//! .....MM.....
//! .F........T.
//! ....MMM.....
//! ............
//! ```
//!
//! `.` plain (cost 1), `~` river (cost 2), `M` mountain (cost 3), `X`
//! impassable, `F` start, `T` goal. Movement is 4-directional and the
//! heuristic is the Manhattan distance, which is admissible and consistent
//! because every step costs at least 1.
//!
//! This module is a collaborator for exercising the search, not part of its
//! contract; any caller-supplied graph works the same way.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHashSet;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::search::Route;
use crate::waypoint::Waypoint;

/// Scenario parse failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("unrecognized tile character {0:?} at row {1}, column {2}")]
    UnknownTile(char, usize, usize),
    #[error("grid has no start tile 'F'")]
    MissingStart,
    #[error("grid has no goal tile 'T'")]
    MissingGoal,
}

/// Terrain kind of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Plain,
    River,
    Mountain,
    Blocker,
    Start,
    Goal,
}

impl Tile {
    fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Plain),
            '~' => Some(Tile::River),
            'M' => Some(Tile::Mountain),
            'X' => Some(Tile::Blocker),
            'F' => Some(Tile::Start),
            'T' => Some(Tile::Goal),
            _ => None,
        }
    }

    fn glyph(self) -> char {
        match self {
            Tile::Plain => '.',
            Tile::River => '~',
            Tile::Mountain => 'M',
            Tile::Blocker => 'X',
            Tile::Start => 'F',
            Tile::Goal => 'T',
        }
    }

    /// Cost of stepping onto this tile. Infinite for impassable terrain.
    pub fn cost(self) -> f64 {
        match self {
            Tile::Plain | Tile::Start | Tile::Goal => 1.0,
            Tile::River => 2.0,
            Tile::Mountain => 3.0,
            Tile::Blocker => f64::INFINITY,
        }
    }
}

/// A parsed scenario grid with its start and goal squares.
#[derive(Debug)]
pub struct GridWorld {
    rows: Vec<Vec<Tile>>,
    start: (i32, i32),
    goal: (i32, i32),
}

impl GridWorld {
    /// Parse a scenario from text. Blank lines are skipped, so worlds can
    /// be written as indented raw strings in tests.
    pub fn parse(input: &str) -> Result<GridWorld, GridError> {
        let mut rows = Vec::new();
        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let y = rows.len();
            let mut row = Vec::with_capacity(line.len());
            for (x, c) in line.chars().enumerate() {
                let tile = Tile::from_char(c).ok_or(GridError::UnknownTile(c, y, x))?;
                row.push(tile);
            }
            rows.push(row);
        }
        Self::from_tiles(rows)
    }

    /// Build a world from an explicit tile grid (used by generated tests).
    pub fn from_tiles(rows: Vec<Vec<Tile>>) -> Result<GridWorld, GridError> {
        let mut start = None;
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                match tile {
                    Tile::Start => start = Some((x as i32, y as i32)),
                    Tile::Goal => goal = Some((x as i32, y as i32)),
                    _ => {}
                }
            }
        }
        Ok(GridWorld {
            rows,
            start: start.ok_or(GridError::MissingStart)?,
            goal: goal.ok_or(GridError::MissingGoal)?,
        })
    }

    /// Tile at a coordinate, or `None` outside the grid.
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The square carrying the `F` tile.
    pub fn start(&self) -> Square<'_> {
        Square {
            x: self.start.0,
            y: self.start.1,
            world: self,
        }
    }

    /// The square carrying the `T` tile.
    pub fn goal(&self) -> Square<'_> {
        Square {
            x: self.goal.0,
            y: self.goal.1,
            world: self,
        }
    }

    pub fn square(&self, x: i32, y: i32) -> Option<Square<'_>> {
        self.tile(x, y).map(|_| Square { x, y, world: self })
    }

    /// Render the grid with a route overlaid as `*`, keeping the start and
    /// goal glyphs visible.
    pub fn render_route(&self, route: &Route<Square<'_>>) -> String {
        let on_route: FxHashSet<(i32, i32)> =
            route.waypoints.iter().map(|s| (s.x, s.y)).collect();
        let mut out = String::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let covered = on_route.contains(&(x as i32, y as i32));
                let glyph = match tile {
                    Tile::Start | Tile::Goal => tile.glyph(),
                    _ if covered => '*',
                    _ => tile.glyph(),
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

/// One cell of a [`GridWorld`], borrowed from it.
///
/// Identity is the coordinate pair: two squares at the same position compare
/// equal regardless of which borrow produced them.
#[derive(Debug, Clone, Copy)]
pub struct Square<'w> {
    pub x: i32,
    pub y: i32,
    world: &'w GridWorld,
}

impl PartialEq for Square<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Square<'_> {}

impl Hash for Square<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl Serialize for Square<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Square", 2)?;
        s.serialize_field("x", &self.x)?;
        s.serialize_field("y", &self.y)?;
        s.end()
    }
}

impl Waypoint for Square<'_> {
    fn neighbors(&self) -> Vec<Self> {
        const OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let (x, y) = (self.x + dx, self.y + dy);
                match self.world.tile(x, y) {
                    None | Some(Tile::Blocker) => None,
                    Some(_) => Some(Square {
                        x,
                        y,
                        world: self.world,
                    }),
                }
            })
            .collect()
    }

    fn edge_cost(&self, to: &Self) -> f64 {
        self.world.tile(to.x, to.y).map_or(f64::INFINITY, Tile::cost)
    }

    fn heuristic(&self, target: &Self) -> f64 {
        ((self.x - target.x).abs() + (self.y - target.y).abs()) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_locates_start_and_goal() {
        let world = GridWorld::parse("..F..\n....T").unwrap();
        assert_eq!((world.start().x, world.start().y), (2, 0));
        assert_eq!((world.goal().x, world.goal().y), (4, 1));
        assert_eq!(world.width(), 5);
        assert_eq!(world.height(), 2);
    }

    #[test]
    fn parse_rejects_unknown_tiles() {
        assert_eq!(
            GridWorld::parse("F?T").unwrap_err(),
            GridError::UnknownTile('?', 0, 1)
        );
    }

    #[test]
    fn parse_requires_both_endpoints() {
        assert_eq!(GridWorld::parse("...T").unwrap_err(), GridError::MissingStart);
        assert_eq!(GridWorld::parse("F...").unwrap_err(), GridError::MissingGoal);
    }

    #[test]
    fn neighbors_exclude_blockers_and_edges() {
        let world = GridWorld::parse("FX\n.T").unwrap();
        let start = world.start();
        let neighbors = start.neighbors();
        // Right is a blocker and up/left are off-grid; only down remains.
        assert_eq!(neighbors.len(), 1);
        assert_eq!((neighbors[0].x, neighbors[0].y), (0, 1));
    }

    #[test]
    fn edge_cost_reflects_terrain() {
        let world = GridWorld::parse("F~MT").unwrap();
        let start = world.start();
        let river = world.square(1, 0).unwrap();
        let mountain = world.square(2, 0).unwrap();
        assert_eq!(start.edge_cost(&river), 2.0);
        assert_eq!(river.edge_cost(&mountain), 3.0);
        assert_eq!(start.heuristic(&world.goal()), 3.0);
    }

    #[test]
    fn render_overlays_route_between_endpoints() {
        let world = GridWorld::parse("F..T").unwrap();
        let route = crate::path(&world.start(), &world.goal()).unwrap();
        assert_eq!(world.render_route(&route), "F**T\n");
    }
}
