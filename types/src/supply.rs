//! Total token supply.

use serde::{Deserialize, Serialize};

use crate::amount::Int;

/// Process-wide supply aggregate. Only explicit mint and burn notifications change it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub total: Int,
}

impl Supply {
    pub fn new(total: Int) -> Self {
        Self { total }
    }
}
