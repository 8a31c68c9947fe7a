//! Chain-ID → factory-address registry.
//!
//! The platform is deployed per network; each supported chain has one factory
//! contract slot. A slot that has not been filled yet resolves to `None` —
//! callers never see a zero-address placeholder.

use alloy::primitives::Address;

/// Networks the platform recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownChain {
    /// Ethereum Mainnet (chain ID 1)
    Mainnet,
    /// Polygon PoS (chain ID 137)
    Polygon,
    /// Arbitrum One (chain ID 42161)
    Arbitrum,
    /// Base (chain ID 8453)
    Base,
    /// Sepolia testnet (chain ID 11155111)
    Sepolia,
}

impl KnownChain {
    /// Look up a chain by its EIP-155 chain ID.
    #[must_use]
    pub const fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            1 => Some(Self::Mainnet),
            137 => Some(Self::Polygon),
            42161 => Some(Self::Arbitrum),
            8453 => Some(Self::Base),
            11_155_111 => Some(Self::Sepolia),
            _ => None,
        }
    }

    /// The EIP-155 chain ID.
    #[must_use]
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Polygon => 137,
            Self::Arbitrum => 42161,
            Self::Base => 8453,
            Self::Sepolia => 11_155_111,
        }
    }

    /// Human-readable network name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Polygon => "polygon",
            Self::Arbitrum => "arbitrum",
            Self::Base => "base",
            Self::Sepolia => "sepolia",
        }
    }

    /// The deployed factory address on this chain, if one has been deployed.
    ///
    /// All slots are currently unfilled; they are populated per network as
    /// the factory contract ships.
    #[must_use]
    pub const fn factory(self) -> Option<Address> {
        match self {
            Self::Mainnet
            | Self::Polygon
            | Self::Arbitrum
            | Self::Base
            | Self::Sepolia => None,
        }
    }
}

/// Resolve the factory address for a chain ID.
///
/// Returns `None` both for unrecognized chains and for recognized chains
/// whose factory has not been deployed yet.
#[must_use]
pub fn factory_address(chain_id: u64) -> Option<Address> {
    deployed(KnownChain::from_chain_id(chain_id).and_then(KnownChain::factory))
}

/// Normalize an optional address: the zero address means "not deployed" and
/// collapses to `None`.
///
/// This is the single gate through which every configured or on-chain address
/// passes before the client treats it as a live contract.
#[must_use]
pub fn deployed(address: Option<Address>) -> Option<Address> {
    address.filter(|addr| *addr != Address::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn known_chain_ids_round_trip() {
        for chain in [
            KnownChain::Mainnet,
            KnownChain::Polygon,
            KnownChain::Arbitrum,
            KnownChain::Base,
            KnownChain::Sepolia,
        ] {
            assert_eq!(KnownChain::from_chain_id(chain.chain_id()), Some(chain));
        }
    }

    #[test]
    fn unknown_chain_resolves_to_none() {
        assert_eq!(KnownChain::from_chain_id(5), None);
        assert_eq!(factory_address(5), None);
        assert_eq!(factory_address(0), None);
    }

    #[test]
    fn undeployed_known_chain_resolves_to_none() {
        // Slots are unfilled until the factory ships on that network.
        assert_eq!(factory_address(1), None);
        assert_eq!(factory_address(11_155_111), None);
    }

    #[test]
    fn zero_address_collapses_to_none() {
        assert_eq!(deployed(Some(Address::ZERO)), None);
        assert_eq!(deployed(None), None);

        let live = address!("00000000000000000000000000000000000000A1");
        assert_eq!(deployed(Some(live)), Some(live));
    }
}
