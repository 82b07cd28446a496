use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status definitions. The set is closed: every transition targets one
/// of these four and every persisted order carries exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed by a customer, waiting in the queue (or returned to it by a chef)
    Created,
    /// Claimed by a chef and currently being prepared
    Cooking,
    /// Completed by the chef that cooked it
    Done,
    /// Withdrawn by the customer before cooking started
    Canceled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [OrderStatus; 4] = [
        Self::Created,
        Self::Cooking,
        Self::Done,
        Self::Canceled,
    ];

    /// Check if this is a terminal status (no handler accepts it as predecessor)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }

    /// Check if an order in this status must have a chef assigned
    pub fn requires_chef(&self) -> bool {
        matches!(self, Self::Cooking | Self::Done)
    }

    /// Status name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Cooking => "COOKING",
            Self::Done => "DONE",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "COOKING" => Ok(Self::Cooking),
            "DONE" => Ok(Self::Done),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

/// Default status for new orders
impl Default for OrderStatus {
    fn default() -> Self {
        Self::Created
    }
}
