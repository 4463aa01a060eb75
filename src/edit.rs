use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use strata_grid::{TileChange, TileGrid, within_reach};

#[derive(Clone, Debug, PartialEq)]
pub enum EditOp {
    Place { material: String, x: i32, y: i32 },
    Remove { x: i32, y: i32 },
}

impl EditOp {
    pub fn coord(&self) -> (i32, i32) {
        match *self {
            EditOp::Place { x, y, .. } | EditOp::Remove { x, y } => (x, y),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Place { material, x, y } => write!(f, "place {material}@{x},{y}"),
            EditOp::Remove { x, y } => write!(f, "remove {x},{y}"),
        }
    }
}

/// `x,y` cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell(pub i32, pub i32);

impl FromStr for Cell {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("expected x,y but got '{s}'"))?;
        let x = x.trim().parse().with_context(|| format!("bad x in '{s}'"))?;
        let y = y.trim().parse().with_context(|| format!("bad y in '{s}'"))?;
        Ok(Cell(x, y))
    }
}

/// `material@x,y` placement request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceSpec {
    pub material: String,
    pub cell: Cell,
}

impl FromStr for PlaceSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (material, cell) = s
            .split_once('@')
            .ok_or_else(|| anyhow!("expected material@x,y but got '{s}'"))?;
        if material.is_empty() {
            bail!("missing material in '{s}'");
        }
        Ok(PlaceSpec {
            material: material.to_string(),
            cell: cell.parse()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied(Vec<TileChange>),
    OutOfReach,
    UnknownMaterial,
    Rejected,
}

/// Applies `op` on behalf of an actor standing at `actor`. Placement uses the
/// background-overwrite rule; removal fails on empty cells.
pub fn apply_edit(grid: &mut TileGrid, actor: (f32, f32), reach: f32, op: &EditOp) -> EditOutcome {
    let (x, y) = op.coord();
    if !within_reach(actor, (x, y), reach) {
        return EditOutcome::OutOfReach;
    }
    let ok = match op {
        EditOp::Place { material, .. } => {
            let Some(def) = grid.catalog().by_key(material) else {
                return EditOutcome::UnknownMaterial;
            };
            let (id, background) = (def.id, def.is_background);
            grid.check_and_place(id, x, y, background)
        }
        EditOp::Remove { .. } => grid.remove(x, y),
    };
    if ok {
        EditOutcome::Applied(grid.drain_changes())
    } else {
        EditOutcome::Rejected
    }
}
