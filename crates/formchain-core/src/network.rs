use serde::{Deserialize, Serialize};

/// Ledger network an identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkType {
    MainNet,
    TestNet,
    Mijin,
    MijinTest,
}

impl NetworkType {
    /// First character of every plain address on this network.
    pub fn address_prefix(self) -> char {
        match self {
            Self::MainNet => 'N',
            Self::TestNet => 'T',
            Self::Mijin => 'M',
            Self::MijinTest => 'S',
        }
    }

    pub fn from_address_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'N' => Some(Self::MainNet),
            'T' => Some(Self::TestNet),
            'M' => Some(Self::Mijin),
            'S' => Some(Self::MijinTest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [NetworkType; 4] = [
        NetworkType::MainNet,
        NetworkType::TestNet,
        NetworkType::Mijin,
        NetworkType::MijinTest,
    ];

    #[test]
    fn prefix_round_trip() {
        for network in ALL {
            assert_eq!(
                NetworkType::from_address_prefix(network.address_prefix()),
                Some(network)
            );
        }
    }

    #[test]
    fn unknown_prefix() {
        assert_eq!(NetworkType::from_address_prefix('X'), None);
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&NetworkType::MijinTest).unwrap();
        assert_eq!(json, "\"MIJIN_TEST\"");
    }
}
