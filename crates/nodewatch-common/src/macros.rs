/// Macro to implement hex text encoding for fixed-size key newtypes.
///
/// Generates `from_bytes`, `as_bytes`, `to_hex`, `Display`, `FromStr`,
/// `Serialize` and `Deserialize` for a tuple struct wrapping `[u8; N]`.
/// The serde form is the lower-case hex string, matching what the registry
/// sends and expects.
///
/// # Usage
/// ```ignore
/// pub struct NodeIdentity([u8; 33]);
/// impl_hex_key!(NodeIdentity, 33);
/// ```
#[macro_export]
macro_rules! impl_hex_key {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Length of the key in bytes
            pub const LEN: usize = $len;

            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                ::const_hex::encode(self.0)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::identity::IdentityError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::identity::decode_fixed::<$len>(s.trim()).map(Self)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}
