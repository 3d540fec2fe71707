//! Account and asset identifiers.

use uuid::Uuid;

pub use alloy_primitives::Address;

/// Deterministic constructors for [`Address`].
pub trait AddressExt {
    /// Address whose low eight bytes hold `value`, big-endian.
    /// Handy for test and demo accounts.
    fn from_u64(value: u64) -> Address;

    /// Address whose low sixteen bytes hold the UUID.
    fn from_uuid(id: Uuid) -> Address;
}

impl AddressExt for Address {
    fn from_u64(value: u64) -> Address {
        Address::left_padding_from(&value.to_be_bytes())
    }

    fn from_uuid(id: Uuid) -> Address {
        Address::left_padding_from(id.as_bytes())
    }
}
