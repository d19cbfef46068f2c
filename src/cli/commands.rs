use crate::config::Network;
use crate::core::amount::Unit;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse `0x`-prefixed hex or plain decimal into compact bits
pub fn parse_bits(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("Invalid bits: {s}: {e}"))
}

#[derive(Debug, Parser)]
#[command(name = "architect-primitives")]
pub struct Opt {
    #[arg(long = "config", global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,
    #[arg(
        long = "network",
        global = true,
        help = "Network parameters to use (main, testnet, regtest)"
    )]
    pub network: Option<Network>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "base58-encode", about = "Encode hex bytes as base58")]
    Base58Encode {
        #[arg(help = "Bytes to encode, in hex")]
        hex: String,
    },
    #[command(name = "base58-decode", about = "Decode base58 text to hex bytes")]
    Base58Decode {
        #[arg(help = "Base58 text")]
        text: String,
    },
    #[command(name = "varint-encode", about = "Encode a decimal integer as VarInt-2")]
    VarintEncode {
        #[arg(help = "Non-negative integer of any size")]
        value: String,
    },
    #[command(name = "varint-decode", about = "Decode VarInt-2 hex bytes")]
    VarintDecode {
        #[arg(help = "Encoded bytes, in hex")]
        hex: String,
    },
    #[command(name = "format-amount", about = "Format base units as a decimal amount")]
    FormatAmount {
        #[arg(help = "Amount in base units", allow_hyphen_values = true)]
        units: i64,
        #[arg(long = "unit", default_value = "coin", help = "coin, mcoin, bits or base")]
        unit: Unit,
    },
    #[command(name = "parse-amount", about = "Parse a decimal amount into base units")]
    ParseAmount {
        #[arg(help = "Decimal amount", allow_hyphen_values = true)]
        text: String,
        #[arg(long = "unit", default_value = "coin", help = "coin, mcoin, bits or base")]
        unit: Unit,
    },
    #[command(name = "decode-bits", about = "Show the target, work and difficulty of compact bits")]
    DecodeBits {
        #[arg(help = "Compact bits (0x-prefixed hex or decimal)", value_parser = parse_bits)]
        bits: u32,
    },
    #[command(name = "verify-pow", about = "Check a block hash against compact bits")]
    VerifyPow {
        #[arg(help = "32-byte hash in hex, little-endian byte order")]
        hash: String,
        #[arg(help = "Compact bits (0x-prefixed hex or decimal)", value_parser = parse_bits)]
        bits: u32,
    },
    #[command(name = "show-config", about = "Print the resolved network parameters")]
    ShowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("0x1d00ffff").unwrap(), 0x1d00ffff);
        assert_eq!(parse_bits("486604799").unwrap(), 0x1d00ffff);
        assert!(parse_bits("0xzz").is_err());
        assert!(parse_bits("0x1d00ffff00").is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let opt = Opt::try_parse_from([
            "architect-primitives",
            "--network",
            "regtest",
            "verify-pow",
            "00",
            "0x207fffff",
        ])
        .unwrap();
        assert_eq!(opt.network, Some(Network::Regtest));
        assert!(matches!(
            opt.command,
            Command::VerifyPow { bits: 0x207fffff, .. }
        ));

        let opt = Opt::try_parse_from([
            "architect-primitives",
            "format-amount",
            "-5460",
            "--unit",
            "bits",
        ])
        .unwrap();
        assert!(matches!(
            opt.command,
            Command::FormatAmount {
                units: -5460,
                unit: Unit::Bits
            }
        ));
    }

    #[test]
    fn test_cli_rejects_bad_unit() {
        let result = Opt::try_parse_from([
            "architect-primitives",
            "parse-amount",
            "1.0",
            "--unit",
            "satoshi",
        ]);
        assert!(result.is_err());
    }
}
