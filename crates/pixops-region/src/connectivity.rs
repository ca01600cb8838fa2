//! Pixel connectivity

use crate::{RegionError, RegionResult};

const FOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

const EIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Neighbourhood used when walking from a pixel to its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Edge-sharing neighbours only
    Four,
    /// Edge- and corner-sharing neighbours
    #[default]
    Eight,
}

impl Connectivity {
    /// Parse a connectivity value.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] unless `value` is 4 or 8.
    pub fn from_value(value: u32) -> RegionResult<Self> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            _ => Err(RegionError::InvalidParameters(format!(
                "connectivity must be 4 or 8, got {value}"
            ))),
        }
    }

    /// Parse a connectivity value, treating anything other than 4 as 8.
    pub fn from_value_lenient(value: u32) -> Self {
        if value == 4 {
            Connectivity::Four
        } else {
            Connectivity::Eight
        }
    }

    /// Number of neighbours (4 or 8).
    pub fn value(self) -> u32 {
        match self {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }

    /// Neighbour offsets, counter-clockwise starting from the right.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &FOUR_OFFSETS,
            Connectivity::Eight => &EIGHT_OFFSETS,
        }
    }

    /// In-bounds neighbours of `(x, y)` in a `width x height` grid.
    pub(crate) fn neighbours(
        self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> impl Iterator<Item = (u32, u32)> {
        self.offsets().iter().filter_map(move |&(dx, dy)| {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                Some((nx as u32, ny as u32))
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        assert_eq!(Connectivity::from_value(4).unwrap(), Connectivity::Four);
        assert_eq!(Connectivity::from_value(8).unwrap(), Connectivity::Eight);
        assert!(Connectivity::from_value(6).is_err());
        assert_eq!(Connectivity::from_value_lenient(6), Connectivity::Eight);
        assert_eq!(Connectivity::from_value_lenient(0), Connectivity::Eight);
        assert_eq!(Connectivity::from_value_lenient(4), Connectivity::Four);
    }

    #[test]
    fn test_neighbours_clipped() {
        let corner: Vec<_> = Connectivity::Eight.neighbours(0, 0, 3, 3).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1), (1, 1)]);
        let centre: Vec<_> = Connectivity::Four.neighbours(1, 1, 3, 3).collect();
        assert_eq!(centre, vec![(2, 1), (1, 0), (0, 1), (1, 2)]);
    }
}
