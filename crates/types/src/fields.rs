//! Columns served by the indexer for logs, transactions and blocks.

use core::{fmt, str::FromStr};

/// A column of one of the indexer's record kinds.
pub trait Field: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Every column of the record kind, in the order they are laid out in tables.
    const ALL: &'static [Self];

    /// Wire and column name of the field.
    fn as_str(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} field: {name}")]
pub struct FieldParseError {
    pub kind: &'static str,
    pub name: String,
}

macro_rules! fields {
    ($(#[$meta:meta])* $ty:ident ($kind:literal) { $($variant:ident => $column:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $ty {
            $($variant),+
        }

        impl Field for $ty {
            const ALL: &'static [Self] = &[$($ty::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $column),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = FieldParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($column => Ok($ty::$variant),)+
                    _ => Err(FieldParseError {
                        kind: $kind,
                        name: s.to_string(),
                    }),
                }
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;

                $ty::from_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fields! {
    /// Fields of an event log.
    LogField ("log") {
        Removed => "removed",
        LogIndex => "log_index",
        TransactionIndex => "transaction_index",
        TransactionHash => "transaction_hash",
        BlockHash => "block_hash",
        BlockNumber => "block_number",
        Address => "address",
        Data => "data",
        Topic0 => "topic0",
        Topic1 => "topic1",
        Topic2 => "topic2",
        Topic3 => "topic3",
    }
}

fields! {
    /// Fields of a transaction, including its receipt.
    TransactionField ("transaction") {
        BlockHash => "block_hash",
        BlockNumber => "block_number",
        From => "from",
        Gas => "gas",
        GasPrice => "gas_price",
        Hash => "hash",
        Input => "input",
        Nonce => "nonce",
        To => "to",
        TransactionIndex => "transaction_index",
        Value => "value",
        V => "v",
        R => "r",
        S => "s",
        YParity => "y_parity",
        MaxPriorityFeePerGas => "max_priority_fee_per_gas",
        MaxFeePerGas => "max_fee_per_gas",
        ChainId => "chain_id",
        AccessList => "access_list",
        MaxFeePerBlobGas => "max_fee_per_blob_gas",
        BlobVersionedHashes => "blob_versioned_hashes",
        CumulativeGasUsed => "cumulative_gas_used",
        EffectiveGasPrice => "effective_gas_price",
        GasUsed => "gas_used",
        ContractAddress => "contract_address",
        LogsBloom => "logs_bloom",
        Type => "type",
        Root => "root",
        Status => "status",
        L1Fee => "l1_fee",
        L1GasPrice => "l1_gas_price",
        L1GasUsed => "l1_gas_used",
        L1FeeScalar => "l1_fee_scalar",
        GasUsedForL1 => "gas_used_for_l1",
    }
}

fields! {
    /// Fields of a block header.
    BlockField ("block") {
        Number => "number",
        Hash => "hash",
        ParentHash => "parent_hash",
        Nonce => "nonce",
        Sha3Uncles => "sha3_uncles",
        LogsBloom => "logs_bloom",
        TransactionsRoot => "transactions_root",
        StateRoot => "state_root",
        ReceiptsRoot => "receipts_root",
        Miner => "miner",
        Difficulty => "difficulty",
        TotalDifficulty => "total_difficulty",
        ExtraData => "extra_data",
        Size => "size",
        GasLimit => "gas_limit",
        GasUsed => "gas_used",
        Timestamp => "timestamp",
        Uncles => "uncles",
        BaseFeePerGas => "base_fee_per_gas",
        BlobGasUsed => "blob_gas_used",
        ExcessBlobGas => "excess_blob_gas",
        ParentBeaconBlockRoot => "parent_beacon_block_root",
        WithdrawalsRoot => "withdrawals_root",
        Withdrawals => "withdrawals",
        L1BlockNumber => "l1_block_number",
        SendCount => "send_count",
        SendRoot => "send_root",
        MixHash => "mix_hash",
    }
}
