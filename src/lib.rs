use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod patrol;

pub use patrol::{Outcome, PatrolReport};

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    MultipleGuards(Guard, Guard),
    InvalidChar(char),
    NoGuard,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, real_col_n) => write!(
                f,
                "Expect {} columns in this row, given {}.",
                expect_col_n, real_col_n
            ),
            Error::MultipleGuards(guard0, guard1) => write!(
                f,
                "Found multiple guards({}, {}) in given laboratory, expect one only.",
                guard0, guard1
            ),
            Error::InvalidChar(c) => {
                write!(f, "Invalid character({}) in text of laboratory layout.", c)
            }
            Error::NoGuard => write!(f, "There's no guard in given laboratory, but expect one."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

/// Sends diagnostics to stderr, so stdout only carries the answers.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "^"),
            Direction::Right => write!(f, ">"),
            Direction::Down => write!(f, "v"),
            Direction::Left => write!(f, "<"),
        }
    }
}

impl Direction {
    pub fn turn_right(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn row(&self) -> usize {
        self.r
    }

    pub fn col(&self) -> usize {
        self.c
    }

    pub fn along(&self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guard {
    pos: Position,
    dir: Direction,
}

impl Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.dir, self.pos())
    }
}

impl Guard {
    pub fn new(pos: &Position, dir: Direction) -> Self {
        Self {
            pos: pos.clone(),
            dir,
        }
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn ahead_pos(&self) -> Option<Position> {
        self.pos.along(self.dir)
    }

    pub fn go_to(&mut self, pos: Position) {
        self.pos = pos;
    }

    pub fn turn_right(&mut self) {
        self.dir = self.dir.turn_right();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Start,
}

impl TryFrom<char> for Tile {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(Tile::Empty),
            '#' => Ok(Tile::Wall),
            '^' => Ok(Tile::Start),
            other => Err(Error::InvalidChar(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Laboratory {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
    guard: Guard,
}

impl Laboratory {
    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn tile(&self, pos: &Position) -> Option<&Tile> {
        self.tile_ind(pos).and_then(|ind| self.tiles.get(ind))
    }

    pub fn tile_mut(&mut self, pos: &Position) -> Option<&mut Tile> {
        self.tile_ind(pos).and_then(|ind| self.tiles.get_mut(ind))
    }

    pub fn is_inside(&self, pos: &Position) -> bool {
        pos.r < self.row_n && pos.c < self.col_n
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.row_n).flat_map(move |r| (0..self.col_n).map(move |c| Position::new(r, c)))
    }

    fn is_wall(&self, pos: &Position) -> bool {
        self.tile(pos).is_some_and(|tile| *tile == Tile::Wall)
    }

    fn tile_ind(&self, pos: &Position) -> Option<usize> {
        if self.is_inside(pos) {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }
}

impl FromStr for Laboratory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = LaboratoryBuilder::new();
        for line in s.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

struct LaboratoryBuilder {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: Option<usize>,
    guard: Option<Guard>,
}

impl LaboratoryBuilder {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
            guard: None,
        }
    }

    pub fn add_row(&mut self, row_text: &str) -> Result<(), Error> {
        let this_col_n = row_text.chars().count();
        let expect_col_n = *self.col_n.get_or_insert(this_col_n);
        if expect_col_n != this_col_n {
            return Err(Error::InconsistentRow(expect_col_n, this_col_n));
        }

        for (ind, c) in row_text.chars().enumerate() {
            let tile = Tile::try_from(c)?;
            if tile == Tile::Start {
                let guard = Guard::new(&Position::new(self.row_n, ind), Direction::Up);
                if let Some(last_guard) = self.guard.take() {
                    return Err(Error::MultipleGuards(last_guard, guard));
                }

                self.guard = Some(guard);
            }

            self.tiles.push(tile);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Laboratory, Error> {
        let guard = self.guard.ok_or(Error::NoGuard)?;
        let lab = Laboratory {
            tiles: self.tiles,
            row_n: self.row_n,
            col_n: self.col_n.unwrap_or(0),
            guard,
        };
        debug!(
            rows = lab.row_n,
            cols = lab.col_n,
            guard = %lab.guard,
            "built laboratory"
        );

        Ok(lab)
    }
}

pub fn read_lab<P: AsRef<Path>>(path: P) -> Result<Laboratory> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = LaboratoryBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} from given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder
            .add_row(line.as_str())
            .with_context(|| format!("Invalid layout in line {}.", ind + 1))?;
    }

    Ok(builder.build()?)
}
