//! Application/action context that every spend proof is scoped to.

use energy_crypto::external_context;
use energy_types::FieldHash;
use serde::{Deserialize, Serialize};

/// The fixed action tag for spending Energy.
pub const SPEND_ACTION: &str = "spend-energy";

/// The identity set of verified humans.
pub const VERIFIED_HUMANS_GROUP: u64 = 1;

/// Which application and action proofs must be scoped to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    pub app_id: String,
    pub action: String,
    pub group_id: u64,
}

impl ActionContext {
    /// Context for spending Energy within `app_id`.
    pub fn spend(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            action: SPEND_ACTION.to_string(),
            group_id: VERIFIED_HUMANS_GROUP,
        }
    }

    /// `hash(hash(app_id) || action)`, see `energy_crypto::external_context`.
    pub fn external_context(&self) -> FieldHash {
        external_context(&self.app_id, &self.action)
    }
}
