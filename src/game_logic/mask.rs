use crate::game_logic::ALPHA_THRESHOLD;
use bevy::prelude::*;

const WORD_BITS: u32 = u64::BITS;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("Pixel buffer has {actual} bytes, expected {expected} for a {width}x{height} mask")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("ASCII mask row {row} is {actual} columns wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Rectangle at ({x}, {y}) sized {width}x{height} overflows the mask coordinates")]
    RectOverflow {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Per-pixel silhouette used for exact-shape collision tests.
///
/// Rows are packed into `u64` words, row-major, with bit `x % 64` of word
/// `x / 64` holding column `x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl CollisionMask {
    /// Empty mask, nothing set
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS) as usize;
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    pub fn from_fn(width: u32, height: u32, mut solid: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Build a silhouette from one alpha byte per pixel
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(MaskError::BufferSize {
                width,
                height,
                expected,
                actual: alpha.len(),
            });
        }

        Ok(Self::from_fn(width, height, |x, y| {
            alpha[(y * width + x) as usize] > ALPHA_THRESHOLD
        }))
    }

    /// Build a silhouette from tightly packed RGBA8 pixels, only alpha is read
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(MaskError::BufferSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self::from_fn(width, height, |x, y| {
            rgba[(y * width + x) as usize * 4 + 3] > ALPHA_THRESHOLD
        }))
    }

    /// Union of rectangles, clipped to the mask. `max` is exclusive.
    pub fn from_rects(width: u32, height: u32, rects: &[URect]) -> Self {
        let mut mask = Self::new(width, height);
        for rect in rects {
            for y in rect.min.y..rect.max.y.min(height) {
                for x in rect.min.x..rect.max.x.min(width) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Parse ASCII art, `#` or `X` marks a solid pixel. Blank lines are skipped.
    pub fn from_ascii(art: &str) -> Result<Self, MaskError> {
        let rows: Vec<&str> = art
            .lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.is_empty())
            .collect();

        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MaskError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
        }

        let mut mask = Self::new(width as u32, rows.len() as u32);
        for (y, line) in rows.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                if matches!(c, '#' | 'X') {
                    mask.set(x as u32, y as u32, true);
                }
            }
        }
        Ok(mask)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn word_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.words_per_row + (x / WORD_BITS) as usize
    }

    /// Out of range pixels read as unset
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[self.word_index(x, y)] & (1u64 << (x % WORD_BITS)) != 0
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.word_index(x, y);
        if value {
            self.bits[index] |= 1u64 << (x % WORD_BITS);
        } else {
            self.bits[index] &= !(1u64 << (x % WORD_BITS));
        }
    }

    pub fn count(&self) -> u32 {
        self.bits.iter().map(|word| word.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|word| *word == 0)
    }

    /// First pixel set in both masks, with `other`'s origin placed at
    /// `offset` inside this mask. The point is in this mask's frame.
    /// Rows are scanned top to bottom, each row left to right.
    pub fn overlap(&self, other: &CollisionMask, offset: IVec2) -> Option<UVec2> {
        let x_start = offset.x.max(0);
        let y_start = offset.y.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);

        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            // skip rows that are empty on our side
            let row = y as usize * self.words_per_row;
            if self.bits[row..row + self.words_per_row].iter().all(|word| *word == 0) {
                continue;
            }

            for x in x_start..x_end {
                if self.get(x as u32, y as u32)
                    && other.get((x - offset.x) as u32, (y - offset.y) as u32)
                {
                    return Some(UVec2::new(x as u32, y as u32));
                }
            }
        }

        None
    }

    pub fn overlaps(&self, other: &CollisionMask, offset: IVec2) -> bool {
        self.overlap(other, offset).is_some()
    }
}

/// Where a car's silhouette touched a track region, in both local frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    /// Relative to the car mask's top-left pixel
    pub body: UVec2,
    /// Relative to the region mask's top-left pixel
    pub region: UVec2,
}

/// Test a body silhouette at a world position against a region silhouette
/// placed at `region_offset`. The pixel offset between the two origins is
/// truncated toward zero.
pub fn overlap(
    body_mask: &CollisionMask,
    body_position: Vec2,
    region_mask: &CollisionMask,
    region_offset: Vec2,
) -> Option<Contact> {
    let offset = (body_position - region_offset).as_ivec2();
    let region = region_mask.overlap(body_mask, offset)?;
    let body = (region.as_ivec2() - offset).as_uvec2();
    Some(Contact { body, region })
}
