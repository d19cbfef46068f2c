// Entry point for the primitives CLI: a small tool I use to poke at the codecs
// and double-check proof-of-work vectors by hand
use architect_primitives::core::amount::{format_units, parse_units};
use architect_primitives::core::bignum::{BigNumExt, Endian};
use architect_primitives::core::proof_of_work::{
    decode_compact, difficulty_from_bits, work_from_bits,
};
use architect_primitives::encoding::{base58, varint};
use architect_primitives::{Command, Config, Opt, PrimitivesError, ProofOfWork, GLOBAL_CONFIG};
use clap::Parser;
use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use log::{error, info, LevelFilter};
use num_bigint::BigUint;
use std::process;

fn main() {
    // Info by default, RUST_LOG still wins
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    if let Err(e) = run(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// Resolve configuration: --config file first, then --network, else the environment
fn resolve_config(opt: &Opt) -> Result<Config, PrimitivesError> {
    let config = match &opt.config {
        Some(path) => Config::load(path)?,
        None => (*GLOBAL_CONFIG).clone(),
    };
    Ok(match opt.network {
        Some(network) => config.with_network(network),
        None => config,
    })
}

fn decode_hex(text: &str) -> Result<Vec<u8>, PrimitivesError> {
    HEXLOWER_PERMISSIVE
        .decode(text.as_bytes())
        .map_err(|e| PrimitivesError::Encoding(format!("Invalid hex {text:?}: {e}")))
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&opt)?;
    info!("Using {} network parameters", config.network());

    match opt.command {
        Command::Base58Encode { hex } => {
            let bytes = decode_hex(&hex)?;
            println!("{}", base58::encode(&bytes));
        }
        Command::Base58Decode { text } => {
            let bytes = base58::decode(&text)?;
            println!("{}", HEXLOWER.encode(&bytes));
        }
        Command::VarintEncode { value } => {
            let value = BigUint::parse_bytes(value.as_bytes(), 10)
                .ok_or_else(|| PrimitivesError::Value(format!("Invalid integer: {value}")))?;
            println!("{}", HEXLOWER.encode(&varint::write_varint2_big(&value)));
        }
        Command::VarintDecode { hex } => {
            let bytes = decode_hex(&hex)?;
            let (value, end) = varint::read_varint2_big(&bytes, 0)?;
            println!("{value}");
            if end < bytes.len() {
                println!("({} trailing bytes ignored)", bytes.len() - end);
            }
        }
        Command::FormatAmount { units, unit } => {
            println!("{} {unit}", format_units(units, unit));
        }
        Command::ParseAmount { text, unit } => {
            println!("{}", parse_units(&text, unit)?);
        }
        Command::DecodeBits { bits } => {
            let target = decode_compact(bits);
            match target.to_fixed_bytes(32, Endian::Big) {
                Ok(bytes) => println!("Target: {}", HEXLOWER.encode(&bytes)),
                Err(_) => println!("Target: {target:x}"),
            }
            if target.sign() == num_bigint::Sign::Minus {
                println!("Target is negative and can never be met");
            }
            println!("Work: {:#x}", work_from_bits(bits));
            println!("Difficulty: {}", difficulty_from_bits(bits));
        }
        Command::VerifyPow { hash, bits } => {
            let bytes = decode_hex(&hash)?;
            let hash: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
                PrimitivesError::Encoding(format!("Hash must be 32 bytes, got {}", bytes.len()))
            })?;
            let pow = ProofOfWork::for_network(config.params());
            if pow.verify(&hash, bits) {
                println!("Valid proof of work");
            } else {
                println!("Invalid proof of work");
                process::exit(2);
            }
        }
        Command::ShowConfig => {
            let params = config.params();
            println!("Network: {}", params.network);
            println!("Pow limit: {:#066x}", params.pow_limit);
            println!("Pow limit bits: {:#010x}", params.pow_limit_bits);
        }
    }
    Ok(())
}
