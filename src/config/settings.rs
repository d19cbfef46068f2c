use crate::core::bignum::parse_hex;
use crate::core::proof_of_work::encode_compact;
use crate::error::{PrimitivesError, Result};
use num_bigint::{BigInt, BigUint};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

const CONFIG_PATH_KEY: &str = "ARCHITECT_CONFIG";
const NETWORK_KEY: &str = "ARCHITECT_NETWORK";

const MAIN_POW_LIMIT_BITS: u32 = 0x1d00ffff;
const REGTEST_POW_LIMIT_BITS: u32 = 0x207fffff;

/// Networks with built-in consensus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Main,
    Testnet,
    Regtest,
}

impl FromStr for Network {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(PrimitivesError::Config(format!(
                "Invalid network: {s}. Valid options: main, testnet, regtest"
            ))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => write!(f, "main"),
            Network::Testnet => write!(f, "testnet"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

/// Consensus parameters the primitives layer needs from a network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParams {
    pub network: Network,
    /// Highest target a valid block may claim
    pub pow_limit: BigUint,
    /// `pow_limit` in compact form
    pub pow_limit_bits: u32,
}

impl NetworkParams {
    pub fn for_network(network: Network) -> NetworkParams {
        match network {
            Network::Main | Network::Testnet => NetworkParams {
                network,
                // 0x00000000ffff...ff
                pow_limit: (BigUint::from(1u8) << 224u32) - 1u32,
                pow_limit_bits: MAIN_POW_LIMIT_BITS,
            },
            Network::Regtest => NetworkParams {
                network,
                // 0x7fff...ff
                pow_limit: (BigUint::from(1u8) << 255u32) - 1u32,
                pow_limit_bits: REGTEST_POW_LIMIT_BITS,
            },
        }
    }
}

/// On-disk configuration (TOML)
///
/// ```toml
/// network = "regtest"
/// pow_limit = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub network: Option<String>,
    /// Hex override for the network's proof-of-work limit
    pub pow_limit: Option<String>,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Settings> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let text = fs::read_to_string(path)?;
        Settings::from_toml_str(&text)
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    params: NetworkParams,
}

impl Default for Config {
    fn default() -> Self {
        Config::for_network(Network::Main)
    }
}

impl Config {
    pub fn for_network(network: Network) -> Config {
        Config {
            params: NetworkParams::for_network(network),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Config> {
        let network = match &settings.network {
            Some(name) => name.parse()?,
            None => Network::default(),
        };
        let mut params = NetworkParams::for_network(network);

        if let Some(hex) = &settings.pow_limit {
            let limit = parse_hex(hex)
                .map_err(|e| PrimitivesError::Config(format!("Invalid pow_limit: {e}")))?;
            params.pow_limit = limit.to_biguint().ok_or_else(|| {
                PrimitivesError::Config(format!("pow_limit must not be negative: {hex}"))
            })?;
            if params.pow_limit.bits() > 256 {
                return Err(PrimitivesError::Config(format!(
                    "pow_limit exceeds 256 bits: {hex}"
                )));
            }
            params.pow_limit_bits = encode_compact(&BigInt::from(params.pow_limit.clone()))?;
        }

        Ok(Config { params })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        Config::from_settings(&Settings::load(path)?)
    }

    /// Build from `ARCHITECT_CONFIG` / `ARCHITECT_NETWORK`, falling back to mainnet.
    pub fn from_env() -> Config {
        let mut config = match env::var(CONFIG_PATH_KEY) {
            Ok(path) => Config::load(&path).unwrap_or_else(|e| {
                log::warn!("Could not load config from {path}: {e}");
                Config::default()
            }),
            Err(_) => Config::default(),
        };

        if let Ok(name) = env::var(NETWORK_KEY) {
            match name.parse::<Network>() {
                Ok(network) => config = config.with_network(network),
                Err(e) => log::warn!("Ignoring {NETWORK_KEY}: {e}"),
            }
        }
        config
    }

    /// Switch network, keeping a custom pow limit only if the network is unchanged.
    pub fn with_network(self, network: Network) -> Config {
        if self.params.network == network {
            self
        } else {
            Config::for_network(network)
        }
    }

    pub fn network(&self) -> Network {
        self.params.network
    }

    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    pub fn pow_limit(&self) -> &BigUint {
        &self.params.pow_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parsing() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("MainNet".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("regtest".parse::<Network>().unwrap(), Network::Regtest);
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert!(matches!(
            "simnet".parse::<Network>(),
            Err(PrimitivesError::Config(_))
        ));
    }

    #[test]
    fn test_main_pow_limit() {
        let params = NetworkParams::for_network(Network::Main);
        assert_eq!(params.pow_limit.bits(), 224);
        assert_eq!(params.pow_limit_bits, 0x1d00ffff);
        assert_eq!(
            NetworkParams::for_network(Network::Testnet).pow_limit,
            params.pow_limit
        );
    }

    #[test]
    fn test_regtest_pow_limit() {
        let params = NetworkParams::for_network(Network::Regtest);
        assert_eq!(params.pow_limit.bits(), 255);
        assert_eq!(params.pow_limit_bits, 0x207fffff);
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = Settings::from_toml_str("network = \"regtest\"").unwrap();
        let config = Config::from_settings(&settings).unwrap();
        assert_eq!(config.network(), Network::Regtest);

        let empty = Settings::from_toml_str("").unwrap();
        assert_eq!(Config::from_settings(&empty).unwrap(), Config::default());
    }

    #[test]
    fn test_pow_limit_override() {
        let settings = Settings::from_toml_str("pow_limit = \"0xffff\"").unwrap();
        let config = Config::from_settings(&settings).unwrap();
        assert_eq!(config.pow_limit(), &BigUint::from(0xffffu32));
        assert_eq!(config.params().pow_limit_bits, 0x0300ffff);

        let wide = format!("0x7f{}", "ff".repeat(31));
        let settings = Settings::from_toml_str(&format!("pow_limit = \"{wide}\"")).unwrap();
        let config = Config::from_settings(&settings).unwrap();
        assert_eq!(config.network(), Network::Main);
        assert_eq!(config.params().pow_limit_bits, 0x207fffff);

        let negative = Settings::from_toml_str("pow_limit = \"-1\"").unwrap();
        assert!(Config::from_settings(&negative).is_err());

        let garbage = Settings::from_toml_str("pow_limit = \"xyz\"").unwrap();
        assert!(Config::from_settings(&garbage).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::from_toml_str("network = "),
            Err(PrimitivesError::Config(_))
        ));
    }

    #[test]
    fn test_with_network() {
        let custom = Config::from_settings(&Settings {
            network: Some("main".to_string()),
            pow_limit: Some("ff".to_string()),
        })
        .unwrap();
        let same = custom.clone().with_network(Network::Main);
        assert_eq!(same.pow_limit(), &BigUint::from(0xffu32));

        let switched = custom.with_network(Network::Regtest);
        assert_eq!(switched, Config::for_network(Network::Regtest));
    }
}
