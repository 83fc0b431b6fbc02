use crate::foundation::util::encoding::parse_hex_fixed;
use crate::foundation::{PoolError, ADDRESS_SIZE, HASH_SIZE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

pub type Hash32 = [u8; HASH_SIZE];
pub type Address20 = [u8; ADDRESS_SIZE];

macro_rules! define_fixed_id_type {
    ($name:ident, $bytes:ty) => {
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
        pub struct $name($bytes);

        impl $name {
            pub const fn new(value: $bytes) -> Self {
                Self(value)
            }

            pub fn as_bytes(&self) -> &$bytes {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for byte in self.0 {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if f.alternate() {
                    f.write_str("0x")?;
                }
                for byte in self.0 {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }

        impl FromStr for $name {
            type Err = PoolError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(parse_hex_fixed(s)?))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_string())
                } else {
                    self.0.serialize(serializer)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                if deserializer.is_human_readable() {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                } else {
                    let bytes = <$bytes>::deserialize(deserializer)?;
                    Ok(Self(bytes))
                }
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = $bytes;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$bytes> for $name {
            fn from(value: $bytes) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $bytes {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_fixed_id_type!(MessageHash, Hash32);
define_fixed_id_type!(ValidatorAddress, Address20);
