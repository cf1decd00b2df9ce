use alloy_primitives::Address;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("rpc error from {endpoint}: {message}")]
    Rpc { endpoint: String, message: String },
    #[error("missing result in rpc response from {0}")]
    MissingResult(String),
    #[error("failed to decode {call} returned by {address}: {source}")]
    Decode {
        call: &'static str,
        address: Address,
        #[source]
        source: alloy_sol_types::Error,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}
