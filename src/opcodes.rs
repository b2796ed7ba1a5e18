//! Script opcodes used by P2SH, P2PKH and multisig scripts

use crate::error::{MultisigError, Result};

/// Closed set of opcodes this crate emits or parses.
///
/// `OP_1` through `OP_16` are sequential, so `OP_k = OP_1 + (k - 1)`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Pushes an empty array. Absorbs the extra pop of OP_CHECKMULTISIG.
    OP_0 = 0x00,
    /// Next byte is the push length
    OP_PUSHDATA1 = 0x4c,
    /// Next two bytes (little-endian) are the push length
    OP_PUSHDATA2 = 0x4d,
    OP_1 = 0x51,
    OP_2 = 0x52,
    OP_3 = 0x53,
    OP_4 = 0x54,
    OP_5 = 0x55,
    OP_6 = 0x56,
    OP_7 = 0x57,
    OP_8 = 0x58,
    OP_9 = 0x59,
    OP_10 = 0x5a,
    OP_11 = 0x5b,
    OP_12 = 0x5c,
    OP_13 = 0x5d,
    OP_14 = 0x5e,
    OP_15 = 0x5f,
    OP_16 = 0x60,
    OP_DUP = 0x76,
    OP_EQUAL = 0x87,
    OP_EQUALVERIFY = 0x88,
    OP_HASH160 = 0xa9,
    OP_CHECKSIG = 0xac,
    OP_CHECKMULTISIG = 0xae,
}

const SMALL_INTS: [Opcode; 16] = [
    Opcode::OP_1,
    Opcode::OP_2,
    Opcode::OP_3,
    Opcode::OP_4,
    Opcode::OP_5,
    Opcode::OP_6,
    Opcode::OP_7,
    Opcode::OP_8,
    Opcode::OP_9,
    Opcode::OP_10,
    Opcode::OP_11,
    Opcode::OP_12,
    Opcode::OP_13,
    Opcode::OP_14,
    Opcode::OP_15,
    Opcode::OP_16,
];

/// Largest push a bare length-prefix opcode can express
pub const MAX_DIRECT_PUSH: usize = 75;

impl Opcode {
    /// `OP_n` for n in 1..=16
    pub fn small_int(n: usize) -> Option<Opcode> {
        if (1..=16).contains(&n) {
            Some(SMALL_INTS[n - 1])
        } else {
            None
        }
    }

    /// Inverse of [`Opcode::small_int`]
    pub fn small_int_value(self) -> Option<usize> {
        SMALL_INTS.iter().position(|op| *op == self).map(|i| i + 1)
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = MultisigError;

    fn try_from(byte: u8) -> Result<Self> {
        if (0x51..=0x60).contains(&byte) {
            return Ok(SMALL_INTS[(byte - 0x51) as usize]);
        }
        match byte {
            0x00 => Ok(Opcode::OP_0),
            0x4c => Ok(Opcode::OP_PUSHDATA1),
            0x4d => Ok(Opcode::OP_PUSHDATA2),
            0x76 => Ok(Opcode::OP_DUP),
            0x87 => Ok(Opcode::OP_EQUAL),
            0x88 => Ok(Opcode::OP_EQUALVERIFY),
            0xa9 => Ok(Opcode::OP_HASH160),
            0xac => Ok(Opcode::OP_CHECKSIG),
            0xae => Ok(Opcode::OP_CHECKMULTISIG),
            other => Err(MultisigError::EncodingFailure(format!(
                "unsupported opcode 0x{:02x}",
                other
            ))),
        }
    }
}
