//! Core consensus arithmetic
//!
//! Big-integer helpers, monetary amounts and proof-of-work target checks.

pub mod amount;
pub mod bignum;
pub mod proof_of_work;

pub use amount::{
    block_reward, from_decimal_string, is_valid_money, to_decimal_string, Unit, COIN,
    MAX_MONEY, MAX_SAFE_VALUE,
};
pub use bignum::{BigNumExt, Endian};
pub use proof_of_work::{
    decode_compact, difficulty_from_bits, encode_compact, work_from_bits, ProofOfWork,
};
