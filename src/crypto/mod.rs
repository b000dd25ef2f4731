pub mod address_codec;
pub mod hash;
pub mod keys;
pub mod signature_utils;

pub use self::address_codec::{convert_and_encode, decode_and_convert};
pub use self::keys::{AccAddress, LegacyPubKey, PrivKey, PubKey};
pub use self::signature_utils::recover_pubkey;
