//! Rooms and the connector that carves tunnels between them.
//!
//! Rooms live in a plain `Vec` and refer to each other by index. Connection is
//! greedy: rooms are visited nearest-to-main first and each one is tunnelled to
//! the closest room that can already reach the main room. Accessibility spreads
//! over the connection graph whenever a new tunnel touches an accessible room.

use std::collections::{HashSet, VecDeque};

use log::{debug, info};
use serde::Serialize;

use crate::error::{CaveError, Result};
use crate::grid::{CaveGrid, Cell, Tile};

/// Half-width of a carved tunnel; each stepped point clears a 3x3 block.
pub const TUNNEL_RADIUS: i64 = 1;

/// A surviving floor region plus its connectivity state.
#[derive(Clone, Debug, Serialize)]
pub struct Room {
    pub cells: Vec<Cell>,
    /// Cells with at least one 4-connected wall neighbour, fixed at construction.
    pub edge_cells: Vec<Cell>,
    pub is_main_room: bool,
    pub is_accessible_from_main_room: bool,
    /// Indices of rooms joined to this one by a tunnel.
    pub connected_rooms: Vec<usize>,
    /// Squared distance between the nearest edge cells of this room and the
    /// main room. `Some(0)` for the main room itself.
    pub distance_to_main: Option<u64>,
    #[serde(skip)]
    cell_lookup: HashSet<Cell>,
    #[serde(skip)]
    edge_lookup: HashSet<Cell>,
}

impl Room {
    pub fn new(cells: Vec<Cell>, grid: &CaveGrid) -> Self {
        let edge_cells: Vec<Cell> = cells
            .iter()
            .copied()
            .filter(|c| grid.touches_wall(c.x, c.y))
            .collect();
        let edge_lookup = edge_cells.iter().copied().collect();
        let cell_lookup = cells.iter().copied().collect();

        Self {
            cells,
            edge_cells,
            is_main_room: false,
            is_accessible_from_main_room: false,
            connected_rooms: Vec::new(),
            distance_to_main: None,
            cell_lookup,
            edge_lookup,
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cell_lookup.contains(&cell)
    }

    pub fn is_edge_cell(&self, cell: Cell) -> bool {
        self.edge_lookup.contains(&cell)
    }

    /// Cells with no wall on any side; safe spots to place something.
    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied().filter(|c| !self.edge_lookup.contains(c))
    }

    pub fn is_connected(&self, other: usize) -> bool {
        self.connected_rooms.contains(&other)
    }
}

/// A carved corridor between two rooms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tunnel {
    pub from_room: usize,
    pub to_room: usize,
    pub start: Cell,
    pub end: Cell,
    /// Stepped centre line; every cell within `TUNNEL_RADIUS` of it is floor.
    pub path: Vec<Cell>,
}

/// Closest pair of edge cells between two rooms as `(distance_sq, a, b)`.
/// Ties keep the first pair found.
pub fn closest_edge_pair(a: &Room, b: &Room) -> Option<(u64, Cell, Cell)> {
    let mut best: Option<(u64, Cell, Cell)> = None;

    for &ca in &a.edge_cells {
        for &cb in &b.edge_cells {
            let dist = ca.distance_sq(&cb);
            if best.map_or(true, |(d, _, _)| dist < d) {
                best = Some((dist, ca, cb));
            }
        }
    }

    best
}

/// Index of the largest room; ties go to the room discovered first.
pub fn select_main_room(rooms: &[Room]) -> Result<usize> {
    let mut best: Option<usize> = None;
    for (i, room) in rooms.iter().enumerate() {
        if best.map_or(true, |b| room.size() > rooms[b].size()) {
            best = Some(i);
        }
    }
    best.ok_or(CaveError::EmptyRoomSet)
}

/// Tunnel every room to the main room's network. Returns the carved tunnels.
///
/// With a single room nothing is carved.
pub fn connect_rooms(grid: &mut CaveGrid, rooms: &mut [Room], main_room: usize) -> Vec<Tunnel> {
    let mut tunnels = Vec::new();
    if rooms.is_empty() {
        return tunnels;
    }

    rooms[main_room].is_main_room = true;
    rooms[main_room].is_accessible_from_main_room = true;
    rooms[main_room].distance_to_main = Some(0);

    for i in 0..rooms.len() {
        if i != main_room {
            let distance = closest_edge_pair(&rooms[i], &rooms[main_room]).map(|(d, _, _)| d);
            rooms[i].distance_to_main = distance;
        }
    }

    let mut order: Vec<usize> = (0..rooms.len()).filter(|&i| i != main_room).collect();
    // Stable sort keeps discovery order among equal distances.
    order.sort_by_key(|&i| rooms[i].distance_to_main.unwrap_or(u64::MAX));

    for room in order {
        if rooms[room].is_accessible_from_main_room {
            continue;
        }

        let mut best: Option<(u64, usize, Cell, Cell)> = None;
        for (target, candidate) in rooms.iter().enumerate() {
            if target == room || !candidate.is_accessible_from_main_room {
                continue;
            }
            if let Some((dist, a, b)) = closest_edge_pair(&rooms[room], candidate) {
                if best.map_or(true, |(d, ..)| dist < d) {
                    best = Some((dist, target, a, b));
                }
            }
        }

        let Some((dist, target, start, end)) = best else {
            continue;
        };

        let path = carve_tunnel(grid, start, end);
        link_rooms(rooms, room, target);
        debug!(
            "tunnel room {} -> room {}: {:?} to {:?} (dist² {}, {} steps)",
            room,
            target,
            start,
            end,
            dist,
            path.len()
        );

        tunnels.push(Tunnel {
            from_room: room,
            to_room: target,
            start,
            end,
            path,
        });
    }

    info!("carved {} tunnels between {} rooms", tunnels.len(), rooms.len());
    tunnels
}

/// Record a bidirectional connection and spread accessibility across
/// everything now reachable from an accessible endpoint.
pub fn link_rooms(rooms: &mut [Room], a: usize, b: usize) {
    if !rooms[a].is_connected(b) {
        rooms[a].connected_rooms.push(b);
        rooms[b].connected_rooms.push(a);
    }

    let source = if rooms[a].is_accessible_from_main_room {
        a
    } else if rooms[b].is_accessible_from_main_room {
        b
    } else {
        return;
    };

    let mut queue = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        for i in 0..rooms[current].connected_rooms.len() {
            let next = rooms[current].connected_rooms[i];
            if !rooms[next].is_accessible_from_main_room {
                rooms[next].is_accessible_from_main_room = true;
                queue.push_back(next);
            }
        }
    }
}

/// Stepped line from `from` to `to`, inclusive of both ends.
///
/// Walks the axis with the larger delta one cell at a time and advances the
/// other axis whenever the accumulated slope crosses a whole cell.
pub fn line_cells(from: Cell, to: Cell) -> Vec<Cell> {
    let mut x = from.x as i64;
    let mut y = from.y as i64;
    let dx = to.x as i64 - x;
    let dy = to.y as i64 - y;

    let mut step = dx.signum();
    let mut gradient_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    let inverted = longest < shortest;
    if inverted {
        std::mem::swap(&mut longest, &mut shortest);
        step = dy.signum();
        gradient_step = dx.signum();
    }

    let mut line = Vec::with_capacity(longest as usize + 1);
    let mut accumulation = longest / 2;
    for _ in 0..longest {
        line.push(Cell::new(x as usize, y as usize));
        if inverted {
            y += step;
        } else {
            x += step;
        }
        accumulation += shortest;
        if accumulation >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulation -= longest;
        }
    }
    line.push(to);

    line
}

/// Clear a corridor along the line between two cells. Cleared cells are
/// clipped to the grid interior so the border stays wall.
pub fn carve_tunnel(grid: &mut CaveGrid, from: Cell, to: Cell) -> Vec<Cell> {
    let path = line_cells(from, to);
    let max_x = grid.width as i64 - 2;
    let max_y = grid.height as i64 - 2;

    for point in &path {
        for dy in -TUNNEL_RADIUS..=TUNNEL_RADIUS {
            for dx in -TUNNEL_RADIUS..=TUNNEL_RADIUS {
                let x = point.x as i64 + dx;
                let y = point.y as i64 + dy;
                if x >= 1 && y >= 1 && x <= max_x && y <= max_y {
                    grid.set(x as usize, y as usize, Tile::Floor);
                }
            }
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::parse_grid;
    use crate::regions::{extract_rooms, find_regions};

    fn two_pockets() -> CaveGrid {
        parse_grid(
            "###########\n\
             ###########\n\
             #...###...#\n\
             #...###...#\n\
             #...###...#\n\
             ###########\n\
             ###########",
        )
        .unwrap()
    }

    #[test]
    fn test_edge_cells_exclude_surrounded_cells() {
        let mut grid = two_pockets();
        let rooms = extract_rooms(&mut grid, 0, 1);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].edge_cells.len(), 8);
        let interior: Vec<Cell> = rooms[0].interior_cells().collect();
        assert_eq!(interior, vec![Cell::new(2, 3)]);
        assert!(rooms[0].is_edge_cell(Cell::new(1, 2)));
    }

    #[test]
    fn test_main_room_is_largest_first_on_ties() {
        let mut grid = two_pockets();
        let rooms = extract_rooms(&mut grid, 0, 1);
        assert_eq!(select_main_room(&rooms).unwrap(), 0);

        let mut grid = parse_grid("########\n#.##...#\n########").unwrap();
        let rooms = extract_rooms(&mut grid, 0, 1);
        assert_eq!(select_main_room(&rooms).unwrap(), 1);
    }

    #[test]
    fn test_no_rooms_is_an_error() {
        assert!(matches!(select_main_room(&[]), Err(CaveError::EmptyRoomSet)));
    }

    #[test]
    fn test_two_pockets_get_one_tunnel() {
        let mut grid = two_pockets();
        let mut rooms = extract_rooms(&mut grid, 0, 4);
        let main = select_main_room(&rooms).unwrap();
        let tunnels = connect_rooms(&mut grid, &mut rooms, main);

        assert_eq!(tunnels.len(), 1);
        assert!(rooms.iter().all(|r| r.is_accessible_from_main_room));
        assert!(rooms[0].is_connected(1) && rooms[1].is_connected(0));
        assert_eq!(rooms[1].distance_to_main, Some(16));
        assert_eq!(find_regions(&grid, Tile::Floor).len(), 1);
        assert!(grid.border_is_solid());
    }

    #[test]
    fn test_far_room_tunnels_to_nearest_accessible_room() {
        // main room, then B beside it, then C beside B and far from main
        let mut grid = parse_grid(
            "#################\n\
             #.....##...##...#\n\
             #################",
        )
        .unwrap();
        let mut rooms = extract_rooms(&mut grid, 0, 1);
        assert_eq!(rooms.len(), 3);
        let main = select_main_room(&rooms).unwrap();
        assert_eq!(main, 0);

        let tunnels = connect_rooms(&mut grid, &mut rooms, main);
        let links: Vec<(usize, usize)> = tunnels.iter().map(|t| (t.from_room, t.to_room)).collect();
        assert_eq!(links, vec![(1, 0), (2, 1)]);
        assert_eq!(tunnels[1].start, Cell::new(13, 1));
        assert_eq!(tunnels[1].end, Cell::new(10, 1));

        assert!(rooms.iter().all(|r| r.is_accessible_from_main_room));
        assert!(rooms[2].is_connected(1));
        assert!(!rooms[2].is_connected(0));
        assert_eq!(rooms[2].distance_to_main, Some(64));
        assert_eq!(find_regions(&grid, Tile::Floor).len(), 1);
    }

    #[test]
    fn test_contains_matches_cells() {
        let mut grid = two_pockets();
        let rooms = extract_rooms(&mut grid, 0, 1);
        assert!(rooms[0].contains(Cell::new(2, 3)));
        assert!(rooms[0].contains(Cell::new(1, 2)));
        assert!(!rooms[0].contains(Cell::new(8, 3)));
        assert!(!rooms[0].contains(Cell::new(5, 3)));
        for cell in &rooms[1].cells {
            assert!(rooms[1].contains(*cell));
            assert!(!rooms[0].contains(*cell));
        }
    }

    #[test]
    fn test_single_room_carves_nothing() {
        let mut grid = parse_grid("#####\n#...#\n#...#\n#####").unwrap();
        let before = grid.clone();
        let mut rooms = extract_rooms(&mut grid, 0, 1);
        let tunnels = connect_rooms(&mut grid, &mut rooms, 0);
        assert!(tunnels.is_empty());
        assert_eq!(grid, before);
        assert!(rooms[0].is_main_room && rooms[0].is_accessible_from_main_room);
    }

    #[test]
    fn test_link_propagates_through_chain() {
        let mut grid = parse_grid("###########\n#.#.#.#.#.#\n###########").unwrap();
        let mut rooms = extract_rooms(&mut grid, 0, 1);
        assert_eq!(rooms.len(), 5);
        rooms[0].is_accessible_from_main_room = true;

        // 1-2-3 are linked among themselves before touching room 0.
        link_rooms(&mut rooms, 1, 2);
        link_rooms(&mut rooms, 2, 3);
        assert!(!rooms[3].is_accessible_from_main_room);

        link_rooms(&mut rooms, 3, 0);
        assert!(rooms[1].is_accessible_from_main_room);
        assert!(rooms[2].is_accessible_from_main_room);
        assert!(!rooms[4].is_accessible_from_main_room);
    }

    #[test]
    fn test_line_cells_steps_along_longest_axis() {
        let line = line_cells(Cell::new(0, 0), Cell::new(4, 2));
        assert_eq!(
            line,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(3, 2),
                Cell::new(4, 2),
            ]
        );

        let steep = line_cells(Cell::new(5, 9), Cell::new(3, 1));
        assert_eq!(steep.len(), 9);
        assert_eq!(steep.first(), Some(&Cell::new(5, 9)));
        assert_eq!(steep.last(), Some(&Cell::new(3, 1)));
        for pair in steep.windows(2) {
            assert!(pair[0].x.abs_diff(pair[1].x) <= 1);
            assert_eq!(pair[0].y.abs_diff(pair[1].y), 1);
        }
    }

    #[test]
    fn test_carve_is_clipped_to_interior() {
        let mut grid = CaveGrid::new_with(6, 6, Tile::Wall);
        carve_tunnel(&mut grid, Cell::new(1, 1), Cell::new(1, 4));
        assert!(grid.border_is_solid());
        assert_eq!(*grid.get(2, 3), Tile::Floor);
        assert_eq!(*grid.get(3, 3), Tile::Wall);
    }
}
