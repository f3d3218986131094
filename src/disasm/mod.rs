//! Category renderers: turn a classified word into assembly text.
//!
//! Output layout is `<mnemonic padded to 8 columns> <operands>`, operands
//! separated by commas without spaces. Renderers are pure; the carried link
//! value for Thumb `bl` pairs is supplied by the caller.

pub mod arm;
pub mod thumb;

use bitvec::prelude::*;
use std::fmt::Display;

use crate::lexicon::reg;

pub const UNDEFINED: &str = "Undefined";

/// Placeholder for the first half of a Thumb `bl` pair.
pub const BL_SETUP: &str = "<setup>";

const MNEMONIC_WIDTH: usize = 8;

fn ins(mnemonic: impl Display, operands: impl Display) -> String {
    let mnemonic = mnemonic.to_string();
    format!("{mnemonic:<width$} {operands}", width = MNEMONIC_WIDTH)
}

fn hex(value: u32) -> String {
    format!("{value:#X}")
}

/// `{r0,r2,pc}`: registers in ascending order, `{}` when empty.
pub fn register_list(list: u16) -> String {
    let names: Vec<&str> = list
        .view_bits::<Lsb0>()
        .iter_ones()
        .map(|i| reg(i as u32))
        .collect();
    format!("{{{}}}", names.join(","))
}
