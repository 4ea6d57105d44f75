use serde::{Deserialize, Serialize};

/// Role of a node in an influence diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Distribution given by nature.
    Chance,
    /// Distribution chosen by the agent.
    Decision,
    /// Real-valued reward, summed into total utility.
    Utility,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [Self::Chance, Self::Decision, Self::Utility];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chance => "chance",
            Self::Decision => "decision",
            Self::Utility => "utility",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
