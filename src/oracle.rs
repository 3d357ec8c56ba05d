use alloy::primitives::{hex, Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use std::str::FromStr;
use tracing::{debug, info};

use crate::client::ContractCaller;
use crate::types::RoundData;
use crate::OracleError;

sol! {
    /// Read side of a Chainlink aggregator. Only the one function we call.
    interface AggregatorV3Interface {
        function latestRoundData()
            external
            view
            returns (
                uint80 roundId,
                int256 answer,
                uint256 startedAt,
                uint256 updatedAt,
                uint80 answeredInRound
            );
    }
}

/// Parse a 20-byte hex contract address, with or without the `0x` prefix.
/// Checksum casing is not enforced.
pub fn parse_contract_address(address: &str) -> Result<Address, OracleError> {
    Address::from_str(address.trim())
        .map_err(|e| OracleError::AddressFormat(format!("'{}': {}", address, e)))
}

/// Decode the return data of `latestRoundData()` positionally into a [`RoundData`].
/// Words that are not canonical for their declared width are rejected.
pub fn decode_round_data(data: &[u8]) -> Result<RoundData, OracleError> {
    let ret = AggregatorV3Interface::latestRoundDataCall::abi_decode_returns_validate(data)
        .map_err(|e| {
            OracleError::Decode(format!(
                "latestRoundData returned {} bytes that do not match the aggregator interface: {}",
                data.len(),
                e
            ))
        })?;

    Ok(RoundData {
        round_id: U256::from(ret.roundId),
        answer: ret.answer,
        started_at: ret.startedAt,
        updated_at: ret.updatedAt,
        answered_in_round: U256::from(ret.answeredInRound),
    })
}

pub struct OracleReader<C> {
    caller: C,
    address: Address,
}

impl<C: ContractCaller> OracleReader<C> {
    pub fn new(caller: C, address: Address) -> Self {
        Self { caller, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// One `latestRoundData()` call against the latest block.
    pub async fn latest_round_data(&self) -> Result<RoundData, OracleError> {
        let calldata = AggregatorV3Interface::latestRoundDataCall {}.abi_encode();
        debug!(
            "Calling latestRoundData on {} with calldata {}",
            self.address,
            hex::encode_prefixed(&calldata)
        );

        let output = self.caller.call(self.address, Bytes::from(calldata)).await?;
        let round = decode_round_data(&output)?;
        info!("Read round {} from {}", round.round_id, self.address);

        Ok(round)
    }
}
