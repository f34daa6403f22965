//! Constant lookup tables shared by every decode.
//!
//! The step, width and offset tables are fixed data. The interpolation table is derived from the step table by a
//! `const fn` at compile time, so it exists before the first decode and is never written afterwards.

pub const STEP_COUNT: usize = 89;
pub const MAX_INDEX: u8 = 88;
pub const PHASE_COUNT: usize = 64;
pub const INTERPOLATION_LEN: usize = STEP_COUNT * PHASE_COUNT;

pub const MIN_WIDTH: u8 = 2;
pub const MAX_WIDTH: u8 = 7;

#[rustfmt::skip]
pub const STEP_TABLE: [u16; STEP_COUNT] = [
    7, 8, 9, 10, 11, 12, 13, 14, 16, 17,
    19, 21, 23, 25, 28, 31, 34, 37, 41, 45,
    50, 55, 60, 66, 73, 80, 88, 97, 107, 118,
    130, 143, 157, 173, 190, 209, 230, 253, 279, 307,
    337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
    876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066,
    2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358,
    5894, 6484, 7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899,
    15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

// symbol width in bits for each adaptation index
#[rustfmt::skip]
pub static WIDTH_TABLE: [u8; STEP_COUNT] = [
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
];

/// Narrowest width `WIDTH_TABLE` ever selects.
pub const MIN_SYMBOL_WIDTH: usize = 4;

#[rustfmt::skip]
static OFFSETS_2: [i8; 4] = [
    -1, 4,
    -1, 4,
];

#[rustfmt::skip]
static OFFSETS_3: [i8; 8] = [
    -1, -1, 2, 6,
    -1, -1, 2, 6,
];

#[rustfmt::skip]
static OFFSETS_4: [i8; 16] = [
    -1, -1, -1, -1, 1, 2, 4, 6,
    -1, -1, -1, -1, 1, 2, 4, 6,
];

#[rustfmt::skip]
static OFFSETS_5: [i8; 32] = [
    -1, -1, -1, -1, -1, -1, -1, -1,  1,  1,  1,  2,  2,  4,  5,  6,
    -1, -1, -1, -1, -1, -1, -1, -1,  1,  1,  1,  2,  2,  4,  5,  6,
];

#[rustfmt::skip]
static OFFSETS_6: [i8; 64] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
     1,  1,  1,  1,  1,  2,  2,  2,  2,  4,  4,  4,  5,  5,  6,  6,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
     1,  1,  1,  1,  1,  2,  2,  2,  2,  4,  4,  4,  5,  5,  6,  6,
];

#[rustfmt::skip]
static OFFSETS_7: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
     1,  1,  1,  1,  1,  1,  1,  1,  1,  1,  2,  2,  2,  2,  2,  2,
     2,  2,  4,  4,  4,  4,  4,  4,  5,  5,  5,  5,  6,  6,  6,  6,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
     1,  1,  1,  1,  1,  1,  1,  1,  1,  1,  2,  2,  2,  2,  2,  2,
     2,  2,  4,  4,  4,  4,  4,  4,  5,  5,  5,  5,  6,  6,  6,  6,
];

/// Adaptation index adjustments keyed by `width - MIN_WIDTH`, then by the raw symbol value.
pub static OFFSET_TABLES: [&[i8]; 6] = [&OFFSETS_2, &OFFSETS_3, &OFFSETS_4, &OFFSETS_5, &OFFSETS_6, &OFFSETS_7];

pub static INTERPOLATION_TABLE: [u16; INTERPOLATION_LEN] = build_interpolation_table(&STEP_TABLE);

/// Builds the interpolation table for `steps`.
///
/// Entry `index * 64 + phase` sums `steps[index] >> (5 - k)` over every bit `k` set in the 6-bit `phase`, so the most
/// significant phase bit carries the full step.
pub const fn build_interpolation_table(steps: &[u16; STEP_COUNT]) -> [u16; INTERPOLATION_LEN] {
    let mut table = [0u16; INTERPOLATION_LEN];

    let mut index = 0;
    while index < STEP_COUNT {
        let mut phase = 0;
        while phase < PHASE_COUNT {
            let mut put = 0u32;
            let mut bit = 0;
            while bit < 6 {
                if phase & (1 << bit) != 0 {
                    put += (steps[index] >> (5 - bit)) as u32;
                }
                bit += 1;
            }
            table[index * PHASE_COUNT + phase] = put as u16;
            phase += 1;
        }
        index += 1;
    }

    table
}

pub fn interpolation_table() -> &'static [u16; INTERPOLATION_LEN] {
    &INTERPOLATION_TABLE
}

/// Offset table for a symbol width, or `None` outside `MIN_WIDTH..=MAX_WIDTH`.
pub fn offset_table(width: u8) -> Option<&'static [i8]> {
    OFFSET_TABLES.get(width.checked_sub(MIN_WIDTH)? as usize).copied()
}
