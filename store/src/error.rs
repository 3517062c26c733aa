use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database is corrupted: {0}")]
    Corruption(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = StoreError::Corruption("supply record truncated".into());
        assert_eq!(err.to_string(), "database is corrupted: supply record truncated");
        let err = StoreError::Backend("mutex poisoned".into());
        assert_eq!(err.to_string(), "storage backend error: mutex poisoned");
    }
}
