use crate::{
    maze::Maze,
    mazes::{MazeError, PlayerId, Players},
    types::IndexSet,
};
use core::str::FromStr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Error produced while reading a [`GridMaze`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseMazeError {
    /// The maze file could not be read.
    #[error("failed to read maze from {path}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The text contains no cells.
    #[error("maze is empty")]
    Empty,
    /// No `S` tile.
    #[error("maze has no start tile")]
    MissingStart,
    /// More than one `S` tile.
    #[error("maze has a second start tile at row {}, column {}", .second.0, .second.1)]
    MultipleStarts {
        /// Position of the first start tile.
        first: (usize, usize),
        /// Position of the offending start tile.
        second: (usize, usize),
    },
    /// A character that is not a known tile.
    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile {
        /// Offending character.
        tile: char,
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
    },
    /// The maze has more cells than node identifiers.
    #[error("maze with {cells} cells is too large")]
    TooLarge {
        /// Number of cells of the padded rectangle.
        cells: usize,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Tile {
    Wall,
    Open,
    Goal,
}

/// Rectangular maze read from text.
///
/// Tiles: `#` wall, `S` start, `G` goal, `.` or space open floor. Rows shorter
/// than the widest row are padded with walls. Nodes are cell indices
/// (`row * width + col`); moves go up, right, down and left.
///
/// ```
/// use fjmaze::{maze::Maze, mazes::GridMaze};
///
/// let maze: GridMaze = "#####\n#S.G#\n#####".parse().unwrap();
/// assert_eq!(maze.coordinates(maze.start()), Some((1, 1)));
/// assert!(maze.has_goal(maze.node_at(1, 3).unwrap()));
/// ```
#[derive(Debug)]
pub struct GridMaze {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    start: u32,
    players: Players,
}

impl GridMaze {
    /// Parse a maze from its text form.
    ///
    /// # Errors
    /// If the text is empty, has zero or several start tiles, contains an
    /// unknown character, or is too large to index with `u32`.
    pub fn parse(text: &str) -> Result<Self, ParseMazeError> {
        let rows: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let cells = width * height;
        if cells == 0 {
            return Err(ParseMazeError::Empty);
        }
        if u32::try_from(cells).is_err() {
            return Err(ParseMazeError::TooLarge { cells });
        }

        let mut tiles = vec![Tile::Wall; cells];
        let mut start = None;
        for (row, line) in rows.iter().enumerate() {
            for (col, tile) in line.chars().enumerate() {
                let tile = match tile {
                    '#' => Tile::Wall,
                    '.' | ' ' => Tile::Open,
                    'G' => Tile::Goal,
                    'S' => {
                        if let Some(first) = start {
                            return Err(ParseMazeError::MultipleStarts {
                                first,
                                second: (row, col),
                            });
                        }
                        start = Some((row, col));
                        Tile::Open
                    }
                    tile => return Err(ParseMazeError::UnknownTile { tile, row, col }),
                };
                tiles[row * width + col] = tile;
            }
        }
        let (row, col) = start.ok_or(ParseMazeError::MissingStart)?;
        let start = u32::try_from(row * width + col).expect("GridMaze::parse: [1]");
        Ok(Self {
            width,
            height,
            tiles,
            start,
            players: Players::default(),
        })
    }

    /// Read and parse a maze file.
    ///
    /// # Errors
    /// If the file cannot be read or does not hold a valid maze.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseMazeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParseMazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Node of the cell at (`row`, `col`), if inside the grid.
    #[must_use]
    pub fn node_at(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        u32::try_from(row * self.width + col).ok()
    }

    /// (`row`, `col`) of `node`, if inside the grid.
    #[must_use]
    pub fn coordinates(&self, node: u32) -> Option<(usize, usize)> {
        let idx = node as usize;
        (idx < self.tiles.len()).then(|| (idx / self.width, idx % self.width))
    }

    /// Whether `node` is a floor cell (start and goals included).
    #[must_use]
    pub fn is_open(&self, node: u32) -> bool {
        self.tile(node).is_some_and(|tile| tile != Tile::Wall)
    }

    /// Current position of every player registered so far.
    #[must_use]
    pub fn player_positions(&self) -> Vec<u32> {
        self.players.positions()
    }

    fn tile(&self, node: u32) -> Option<Tile> {
        self.tiles.get(node as usize).copied()
    }
}

impl FromStr for GridMaze {
    type Err = ParseMazeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl Maze for GridMaze {
    type Node = u32;
    type Player = PlayerId;
    type Error = MazeError;

    fn start(&self) -> u32 {
        self.start
    }

    fn neighbors(&self, node: u32) -> Result<IndexSet<u32>, MazeError> {
        if !self.is_open(node) {
            return Err(MazeError::UnknownNode(node));
        }
        let (row, col) = self.coordinates(node).expect("GridMaze::neighbors: [1]");
        let candidates = [
            row.checked_sub(1).map(|up| (up, col)),
            Some((row, col + 1)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|left| (row, left)),
        ];
        Ok(candidates
            .into_iter()
            .flatten()
            .filter_map(|(row, col)| self.node_at(row, col))
            .filter(|&node| self.is_open(node))
            .collect())
    }

    fn has_goal(&self, node: u32) -> bool {
        self.tile(node) == Some(Tile::Goal)
    }

    fn new_player(&self, node: u32) -> PlayerId {
        self.players.register(node)
    }

    fn move_player(&self, player: &PlayerId, node: u32) {
        self.players.place(*player, node);
    }
}
