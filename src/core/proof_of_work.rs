use crate::config::NetworkParams;
use crate::error::{PrimitivesError, Result};
use log::debug;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Decode a compact "bits" value into a signed target.
///
/// A set sign bit yields a negative target, which no hash can satisfy.
pub fn decode_compact(bits: u32) -> BigInt {
    let exponent = bits >> 24;
    let mantissa = bits & MANTISSA_MASK;

    let magnitude = if exponent <= 3 {
        BigUint::from(mantissa >> (8 * (3 - exponent)))
    } else {
        BigUint::from(mantissa) << (8 * (exponent - 3))
    };

    let sign = if bits & SIGN_BIT != 0 {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_biguint(sign, magnitude)
}

/// Encode a target into compact form, the inverse of [`decode_compact`].
///
/// Precision beyond the three mantissa bytes is truncated. Fails with a range
/// error when the target is too wide for a one-byte exponent.
pub fn encode_compact(target: &BigInt) -> Result<u32> {
    if target.is_zero() {
        return Ok(0);
    }

    let magnitude = target.magnitude();
    let mut exponent = magnitude.bits().div_ceil(8);
    let mut mantissa = if exponent <= 3 {
        low_u32(magnitude) << (8 * (3 - exponent))
    } else {
        low_u32(&(magnitude >> (8 * (exponent - 3))))
    };

    // keep the sign bit clear
    if mantissa & SIGN_BIT != 0 {
        mantissa >>= 8;
        exponent += 1;
    }

    if exponent > 0xff {
        return Err(PrimitivesError::Range(format!(
            "Target of {} bits does not fit in compact form",
            magnitude.bits()
        )));
    }

    let mut bits = ((exponent as u32) << 24) | mantissa;
    if target.sign() == Sign::Minus {
        bits |= SIGN_BIT;
    }
    Ok(bits)
}

fn low_u32(n: &BigUint) -> u32 {
    n.to_u32_digits().first().copied().unwrap_or(0)
}

/// Proof-of-work checks against a fixed network limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOfWork {
    pow_limit: BigUint,
}

impl ProofOfWork {
    pub fn new(pow_limit: BigUint) -> ProofOfWork {
        ProofOfWork { pow_limit }
    }

    pub fn for_network(params: &NetworkParams) -> ProofOfWork {
        ProofOfWork::new(params.pow_limit.clone())
    }

    pub fn pow_limit(&self) -> &BigUint {
        &self.pow_limit
    }

    /// The decoded target if it is positive and within the limit
    pub fn target(&self, bits: u32) -> Option<BigUint> {
        let target = decode_compact(bits);
        match target.sign() {
            Sign::Minus => {
                debug!("Rejecting bits {bits:#010x}: negative target");
                return None;
            }
            Sign::NoSign => {
                debug!("Rejecting bits {bits:#010x}: zero target");
                return None;
            }
            Sign::Plus => {}
        }

        let (_, target) = target.into_parts();
        if target > self.pow_limit {
            debug!("Rejecting bits {bits:#010x}: target above pow limit");
            return None;
        }
        Some(target)
    }

    /// Check a block hash against the difficulty claimed by `bits`.
    ///
    /// The hash is read as a little-endian 256-bit integer and must not exceed
    /// the target. Invalid targets simply fail.
    pub fn verify(&self, hash: &[u8; 32], bits: u32) -> bool {
        let Some(target) = self.target(bits) else {
            return false;
        };

        let hash_int = BigUint::from_bytes_le(hash);
        if hash_int > target {
            debug!("Rejecting bits {bits:#010x}: hash above target");
            return false;
        }
        true
    }
}

/// Verify `hash` against `bits` under an explicit pow limit.
pub fn verify(hash: &[u8; 32], bits: u32, pow_limit: &BigUint) -> bool {
    ProofOfWork::new(pow_limit.clone()).verify(hash, bits)
}

/// Expected number of hashes to meet `bits`: 2^256 / (target + 1).
///
/// Negative and zero targets carry no work.
pub fn work_from_bits(bits: u32) -> BigUint {
    let target = decode_compact(bits);
    if target.sign() != Sign::Plus {
        return BigUint::zero();
    }
    let (_, target) = target.into_parts();
    (BigUint::one() << 256u32) / (target + 1u32)
}

/// Difficulty relative to the `0x1d00ffff` target.
pub fn difficulty_from_bits(bits: u32) -> f64 {
    let mut shift = (bits >> 24) & 0xff;
    let mantissa = bits & 0x00ff_ffff;
    if mantissa == 0 {
        return 0.0;
    }

    let mut difficulty = 0x0000_ffff as f64 / mantissa as f64;
    while shift < 29 {
        difficulty *= 256.0;
        shift += 1;
    }
    while shift > 29 {
        difficulty /= 256.0;
        shift -= 1;
    }
    difficulty
}
