//! MEV-Commit events: commitments, bidder and provider registries, and validator staking.

use hyperquery_types::DataType;
use once_cell::sync::Lazy;

use crate::{event, EventTable};

/// PreconfManager contract on the MEV-Commit chain, emitter of commitment events.
pub const PRECONF_MANAGER: &str = "0xCAC68D97a56b19204Dd3dbDC103CB24D47A825A3";

pub static EVENTS: Lazy<EventTable> = Lazy::new(|| {
    EventTable::from([
        (
            "NewL1Block",
            event(
                "NewL1Block",
                "NewL1Block(uint256 indexed blockNumber,address indexed winner,uint256 indexed window)",
                &[("blockNumber", DataType::Int64), ("window", DataType::Int64)],
            ),
        ),
        (
            "CommitmentProcessed",
            event(
                "CommitmentProcessed",
                "CommitmentProcessed(bytes32 indexed commitmentIndex, bool isSlash)",
                &[],
            ),
        ),
        (
            "BidderRegistered",
            event(
                "BidderRegistered",
                "BidderRegistered(address indexed bidder, uint256 depositedAmount, uint256 windowNumber)",
                &[
                    ("depositedAmount", DataType::Int64),
                    ("windowNumber", DataType::Int64),
                ],
            ),
        ),
        (
            "BidderWithdrawal",
            event(
                "BidderWithdrawal",
                "BidderWithdrawal(address indexed bidder, uint256 window, uint256 amount)",
                &[("amount", DataType::Int64), ("window", DataType::Int64)],
            ),
        ),
        (
            "OpenedCommitmentStored",
            event(
                "OpenedCommitmentStored",
                "OpenedCommitmentStored(bytes32 indexed commitmentIndex, address bidder, \
                 address commiter, uint256 bid, uint64 blockNumber, bytes32 bidHash, \
                 uint64 decayStartTimeStamp, uint64 decayEndTimeStamp, string txnHash, \
                 string revertingTxHashes, bytes32 commitmentHash, bytes bidSignature, \
                 bytes commitmentSignature, uint64 dispatchTimestamp, bytes sharedSecretKey)",
                &[
                    ("bid", DataType::UInt64),
                    ("blockNumber", DataType::UInt64),
                    ("decayStartTimeStamp", DataType::UInt64),
                    ("decayEndTimeStamp", DataType::UInt64),
                    ("dispatchTimestamp", DataType::UInt64),
                ],
            ),
        ),
        (
            "FundsRetrieved",
            event(
                "FundsRetrieved",
                "FundsRetrieved(bytes32 indexed commitmentDigest,address indexed bidder,\
                 uint256 window,uint256 amount)",
                &[("window", DataType::UInt64), ("amount", DataType::UInt64)],
            ),
        ),
        (
            "FundsRewarded",
            event(
                "FundsRewarded",
                "FundsRewarded(bytes32 indexed commitmentDigest, address indexed bidder, \
                 address indexed provider, uint256 window, uint256 amount)",
                &[("window", DataType::UInt64), ("amount", DataType::UInt64)],
            ),
        ),
        (
            "FundsSlashed",
            event(
                "FundsSlashed",
                "FundsSlashed(address indexed provider, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "FundsDeposited",
            event(
                "FundsDeposited",
                "FundsDeposited(address indexed provider, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "Withdraw",
            event(
                "Withdraw",
                "Withdraw(address indexed provider, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "ProviderRegistered",
            event(
                "ProviderRegistered",
                "ProviderRegistered(address indexed provider, uint256 stakedAmount, bytes blsPublicKey)",
                &[("stakedAmount", DataType::UInt64)],
            ),
        ),
        (
            "UnopenedCommitmentStored",
            event(
                "UnopenedCommitmentStored",
                "UnopenedCommitmentStored(bytes32 indexed commitmentIndex,address committer,\
                 bytes32 commitmentDigest,bytes commitmentSignature,uint64 dispatchTimestamp)",
                &[("dispatchTimestamp", DataType::UInt64)],
            ),
        ),
        (
            // Staked before withdrawal addresses were introduced
            "Staked_old",
            event(
                "Staked_old",
                "Staked(address indexed txOriginator, bytes valBLSPubKey, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "Staked",
            event(
                "Staked",
                "Staked(address indexed msgSender, address indexed withdrawalAddress, \
                 bytes valBLSPubKey, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "StakeAdded",
            event(
                "StakeAdded",
                "StakeAdded(address indexed msgSender, address indexed withdrawalAddress, \
                 bytes valBLSPubKey, uint256 amount, uint256 newBalance)",
                &[("amount", DataType::UInt64), ("newBalance", DataType::UInt64)],
            ),
        ),
        (
            "Unstaked",
            event(
                "Unstaked",
                "Unstaked(address indexed msgSender, address indexed withdrawalAddress, \
                 bytes valBLSPubKey, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "StakeWithdrawn",
            event(
                "StakeWithdrawn",
                "StakeWithdrawn(address indexed msgSender, address indexed withdrawalAddress, \
                 bytes valBLSPubKey, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "Slashed",
            event(
                "Slashed",
                "Slashed(address indexed msgSender, address indexed slashReceiver, \
                 address indexed withdrawalAddress, bytes valBLSPubKey, uint256 amount)",
                &[("amount", DataType::UInt64)],
            ),
        ),
        (
            "MinStakeSet",
            event(
                "MinStakeSet",
                "MinStakeSet(address indexed msgSender, uint256 newMinStake)",
                &[("newMinStake", DataType::UInt64)],
            ),
        ),
        (
            "SlashAmountSet",
            event(
                "SlashAmountSet",
                "SlashAmountSet(address indexed msgSender, uint256 newSlashAmount)",
                &[("newSlashAmount", DataType::UInt64)],
            ),
        ),
    ])
});

/// Commitment events with the PreconfManager as their contract: unopened, opened and
/// processed, in that order.
pub fn commitment_events() -> [hyperquery_types::EventConfig; 3] {
    [
        "UnopenedCommitmentStored",
        "OpenedCommitmentStored",
        "CommitmentProcessed",
    ]
    .map(|name| EVENTS[name].clone().with_contract(PRECONF_MANAGER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(EVENTS.len(), 20);
    }

    #[test]
    fn test_old_staked_shares_the_event_name() {
        let old = EVENTS["Staked_old"].event().unwrap();
        let new = EVENTS["Staked"].event().unwrap();

        assert_eq!(old.name, "Staked");
        assert_ne!(
            EVENTS["Staked_old"].topic().unwrap(),
            EVENTS["Staked"].topic().unwrap()
        );
        assert_eq!(new.inputs.len(), 4);
    }

    #[test]
    fn test_commitment_events() {
        let [unopened, opened, processed] = commitment_events();

        assert_eq!(unopened.name(), "UnopenedCommitmentStored");
        assert_eq!(opened.name(), "OpenedCommitmentStored");
        assert_eq!(processed.name(), "CommitmentProcessed");
        assert_eq!(
            processed.contract(),
            Some("0xcac68d97a56b19204dd3dbdc103cb24d47a825a3")
        );
    }
}
