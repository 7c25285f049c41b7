//! Typed Move call arguments.
//!
//! An [`Args`] value is the raw BCS encoding of one argument, with no type
//! tag. Factories range-check their input and fail with
//! [`TransactionError::OutOfRange`] rather than truncating.

use num_bigint::BigInt;
use rooch_address::RoochAddress;
use rooch_bcs::{Encode, Serializer, U256};
use rooch_primitives::util::decode_hex;
use std::fmt;

use crate::TransactionError;

/// Byte length of an object id.
pub const OBJECT_ID_LENGTH: usize = 32;

/// One BCS-encoded call argument.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Args(Vec<u8>);

fn out_of_range(ty: &'static str, value: impl fmt::Display) -> TransactionError {
    TransactionError::OutOfRange {
        ty,
        value: value.to_string(),
    }
}

fn narrow<T, U>(ty: &'static str, value: T) -> Result<U, TransactionError>
where
    T: TryInto<U> + Copy + fmt::Display,
{
    value.try_into().map_err(|_| out_of_range(ty, value))
}

fn to_u256(value: BigInt) -> Result<U256, TransactionError> {
    U256::try_from(&value).map_err(|_| out_of_range("u256", value))
}

fn parse_object_id(s: &str) -> Result<[u8; OBJECT_ID_LENGTH], TransactionError> {
    let bytes = decode_hex(s)
        .map_err(|e| TransactionError::InvalidInput(format!("object id {:?}: {}", s, e)))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        TransactionError::InvalidInput(format!(
            "object id must be {} bytes, got {}",
            OBJECT_ID_LENGTH,
            b.len()
        ))
    })
}

fn encode_with(f: impl FnOnce(&mut Serializer)) -> Args {
    let mut ser = Serializer::new();
    f(&mut ser);
    Args(ser.into_bytes())
}

macro_rules! int_factories {
    ($(($name:ident, $vec_name:ident, $ty:ty, $label:literal, $write:ident)),* $(,)?) => {
        $(
            #[doc = concat!("A `", $label, "` argument; fails `OutOfRange` outside the type's domain.")]
            pub fn $name<T>(value: T) -> Result<Args, TransactionError>
            where
                T: TryInto<$ty> + Copy + fmt::Display,
            {
                let v: $ty = narrow($label, value)?;
                Ok(encode_with(|ser| ser.$write(v)))
            }

            #[doc = concat!("A `vector<", $label, ">` argument.")]
            pub fn $vec_name<T>(values: &[T]) -> Result<Args, TransactionError>
            where
                T: TryInto<$ty> + Copy + fmt::Display,
            {
                let narrowed = values
                    .iter()
                    .map(|v| narrow::<T, $ty>($label, *v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(encode_with(|ser| ser.write_seq(&narrowed)))
            }
        )*
    };
}

impl Args {
    int_factories! {
        (u8, vec_u8, u8, "u8", write_u8),
        (u16, vec_u16, u16, "u16", write_u16),
        (u32, vec_u32, u32, "u32", write_u32),
        (u64, vec_u64, u64, "u64", write_u64),
        (u128, vec_u128, u128, "u128", write_u128),
    }

    /// A `u256` argument. Accepts anything convertible to a `BigInt`;
    /// negative values and values of 2^256 or more are rejected.
    pub fn u256<T: Into<BigInt>>(value: T) -> Result<Args, TransactionError> {
        let v = to_u256(value.into())?;
        Ok(encode_with(|ser| ser.write_u256(&v)))
    }

    pub fn vec_u256<T: Into<BigInt> + Clone>(values: &[T]) -> Result<Args, TransactionError> {
        let converted = values
            .iter()
            .map(|v| to_u256(v.clone().into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(encode_with(|ser| ser.write_seq(&converted)))
    }

    pub fn bool(value: bool) -> Args {
        encode_with(|ser| ser.write_bool(value))
    }

    pub fn vec_bool(values: &[bool]) -> Args {
        encode_with(|ser| ser.write_seq(values))
    }

    /// A Move `String`: length-prefixed UTF-8.
    pub fn string(value: &str) -> Args {
        encode_with(|ser| ser.write_str(value))
    }

    pub fn vec_string<S: AsRef<str>>(values: &[S]) -> Args {
        encode_with(|ser| {
            ser.write_len(values.len());
            for v in values {
                ser.write_str(v.as_ref());
            }
        })
    }

    /// An `address` argument from a [`RoochAddress`] or any text form it
    /// parses (hex, short hex, bech32).
    pub fn address<A>(value: A) -> Result<Args, TransactionError>
    where
        A: TryInto<RoochAddress>,
        A::Error: Into<TransactionError>,
    {
        let addr: RoochAddress = value.try_into().map_err(Into::into)?;
        Ok(Args(addr.to_bcs_bytes()))
    }

    pub fn vec_address<A>(values: &[A]) -> Result<Args, TransactionError>
    where
        A: TryInto<RoochAddress> + Clone,
        A::Error: Into<TransactionError>,
    {
        let addrs = values
            .iter()
            .map(|v| v.clone().try_into().map_err(Into::into))
            .collect::<Result<Vec<RoochAddress>, TransactionError>>()?;
        Ok(encode_with(|ser| ser.write_seq(&addrs)))
    }

    /// An `ObjectID` argument: exactly 32 bytes of hex, `0x` optional.
    pub fn object_id(value: &str) -> Result<Args, TransactionError> {
        let id = parse_object_id(value)?;
        Ok(encode_with(|ser| ser.write_fixed_bytes(&id)))
    }

    pub fn vec_object_id<S: AsRef<str>>(values: &[S]) -> Result<Args, TransactionError> {
        let ids = values
            .iter()
            .map(|v| parse_object_id(v.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(encode_with(|ser| ser.write_seq(&ids)))
    }

    /// Wrap bytes that are already a BCS encoding.
    pub fn raw(bytes: Vec<u8>) -> Args {
        Args(bytes)
    }

    /// Wrap a hex string that is already a BCS encoding.
    pub fn from_hex(s: &str) -> Result<Args, TransactionError> {
        decode_hex(s)
            .map(Args)
            .map_err(|e| TransactionError::InvalidInput(format!("argument hex {:?}: {}", s, e)))
    }

    /// Infer a Move type for an untyped value.
    ///
    /// Integers become `u256`, `0x`-prefixed 64-digit strings become
    /// addresses, other strings become `String`, lists become vectors of
    /// the inferred element type. Mixed lists fail `HeterogeneousList`.
    pub fn infer(value: impl Into<UntypedArg>) -> Result<Args, TransactionError> {
        match value.into() {
            UntypedArg::Bool(b) => Ok(Args::bool(b)),
            UntypedArg::Int(n) => Args::u256(n),
            UntypedArg::Str(s) if looks_like_address(&s) => Args::address(s.as_str()),
            UntypedArg::Str(s) => Ok(Args::string(&s)),
            UntypedArg::List(items) => infer_list(items),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Args {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Args> for Vec<u8> {
    fn from(args: Args) -> Self {
        args.0
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Args({})", hex::encode(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// A dynamically typed argument value awaiting type inference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UntypedArg {
    Bool(bool),
    Int(BigInt),
    Str(String),
    List(Vec<UntypedArg>),
}

impl UntypedArg {
    fn kind(&self) -> &'static str {
        match self {
            UntypedArg::Bool(_) => "bool",
            UntypedArg::Int(_) => "integer",
            UntypedArg::Str(_) => "string",
            UntypedArg::List(_) => "list",
        }
    }
}

impl From<bool> for UntypedArg {
    fn from(b: bool) -> Self {
        UntypedArg::Bool(b)
    }
}

macro_rules! untyped_int_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for UntypedArg {
                fn from(n: $t) -> Self {
                    UntypedArg::Int(BigInt::from(n))
                }
            }
        )*
    };
}

untyped_int_from!(i32, i64, i128, u32, u64, u128);

impl From<BigInt> for UntypedArg {
    fn from(n: BigInt) -> Self {
        UntypedArg::Int(n)
    }
}

impl From<&str> for UntypedArg {
    fn from(s: &str) -> Self {
        UntypedArg::Str(s.to_string())
    }
}

impl From<String> for UntypedArg {
    fn from(s: String) -> Self {
        UntypedArg::Str(s)
    }
}

impl<T: Into<UntypedArg>> From<Vec<T>> for UntypedArg {
    fn from(items: Vec<T>) -> Self {
        UntypedArg::List(items.into_iter().map(Into::into).collect())
    }
}

fn looks_like_address(s: &str) -> bool {
    s.len() == 66 && s.starts_with("0x") && s[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

fn infer_list(items: Vec<UntypedArg>) -> Result<Args, TransactionError> {
    let Some(first) = items.first() else {
        // Every empty vector encodes as a single zero length byte.
        return Ok(Args::vec_bool(&[]));
    };
    let kind = first.kind();
    if let Some(other) = items.iter().find(|i| i.kind() != kind) {
        return Err(TransactionError::HeterogeneousList(format!(
            "{} and {}",
            kind,
            other.kind()
        )));
    }

    let mut bools = Vec::new();
    let mut ints = Vec::new();
    let mut strs = Vec::new();
    for item in items {
        match item {
            UntypedArg::Bool(b) => bools.push(b),
            UntypedArg::Int(n) => ints.push(n),
            UntypedArg::Str(s) => strs.push(s),
            UntypedArg::List(_) => {
                return Err(TransactionError::InvalidInput(
                    "nested lists cannot be inferred; use a typed factory".to_string(),
                ))
            }
        }
    }

    match kind {
        "bool" => Ok(Args::vec_bool(&bools)),
        "integer" => Args::vec_u256(&ints),
        _ if strs.iter().all(|s| looks_like_address(s)) => Args::vec_address(&strs),
        _ => Ok(Args::vec_string(&strs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1bb5f31f040703fd8924871dfd8ec4a02d7f2053c2a0faff8ce4164dd005752e";

    #[test]
    fn test_address_is_raw_32_bytes() {
        let arg = Args::address(ADDR).unwrap();
        assert_eq!(hex::encode(arg.as_bytes()), &ADDR[2..]);
        assert_eq!(arg.len(), 32);

        let from_typed = Args::address(RoochAddress::from_hex(ADDR).unwrap()).unwrap();
        assert_eq!(from_typed, arg);
        assert_eq!(Args::address("0x3").unwrap().as_bytes()[31], 3);
        assert!(Args::address("0xnothex").is_err());
    }

    #[test]
    fn test_u256_one_little_endian() {
        let arg = Args::u256(1u8).unwrap();
        assert_eq!(
            hex::encode(arg.as_bytes()),
            "0100000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_u256_bounds() {
        let max: BigInt = (BigInt::from(1) << 256) - 1;
        assert_eq!(Args::u256(max.clone()).unwrap().as_bytes(), &[0xff; 32]);
        assert!(matches!(
            Args::u256(max + 1),
            Err(TransactionError::OutOfRange { ty: "u256", .. })
        ));
        assert!(matches!(
            Args::u256(-1),
            Err(TransactionError::OutOfRange { ty: "u256", .. })
        ));
    }

    #[test]
    fn test_integer_widths_and_ranges() {
        assert_eq!(Args::u8(255).unwrap().as_bytes(), &[0xff]);
        assert_eq!(Args::u16(0x1234).unwrap().as_bytes(), &[0x34, 0x12]);
        assert_eq!(Args::u32(1).unwrap().len(), 4);
        assert_eq!(Args::u64(1u64 << 40).unwrap().len(), 8);
        assert_eq!(Args::u128(u128::MAX).unwrap().as_bytes(), &[0xff; 16]);

        match Args::u8(256) {
            Err(TransactionError::OutOfRange { ty, value }) => {
                assert_eq!(ty, "u8");
                assert_eq!(value, "256");
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert!(Args::u16(-1).is_err());
        assert!(Args::u32(u64::MAX).is_err());
        assert!(Args::u64(-5i64).is_err());
    }

    #[test]
    fn test_bool_and_string() {
        assert_eq!(Args::bool(true).as_bytes(), &[1]);
        assert_eq!(Args::bool(false).as_bytes(), &[0]);
        assert_eq!(Args::string("abc").as_bytes(), &[3, b'a', b'b', b'c']);
        assert_eq!(Args::string("").as_bytes(), &[0]);
    }

    #[test]
    fn test_object_id() {
        let arg = Args::object_id(ADDR).unwrap();
        assert_eq!(hex::encode(arg.as_bytes()), &ADDR[2..]);
        assert!(matches!(Args::object_id("0x01"), Err(TransactionError::InvalidInput(_))));
        assert!(matches!(Args::object_id("0xzz"), Err(TransactionError::InvalidInput(_))));
    }

    #[test]
    fn test_vectors() {
        assert_eq!(Args::vec_u8(&[1, 2, 3]).unwrap().as_bytes(), &[3, 1, 2, 3]);
        assert_eq!(
            Args::vec_u16(&[1u16, 2]).unwrap().as_bytes(),
            &[2, 1, 0, 2, 0]
        );
        assert!(matches!(
            Args::vec_u8(&[1, 300]),
            Err(TransactionError::OutOfRange { ty: "u8", .. })
        ));
        assert_eq!(Args::vec_bool(&[true, false]).as_bytes(), &[2, 1, 0]);
        assert_eq!(
            Args::vec_string(&["a", "bc"]).as_bytes(),
            &[2, 1, b'a', 2, b'b', b'c']
        );
        let addrs = Args::vec_address(&[ADDR, "0x1"]).unwrap();
        assert_eq!(addrs.len(), 1 + 64);
        assert_eq!(addrs.as_bytes()[0], 2);
        assert_eq!(addrs.as_bytes()[64], 1);
        assert_eq!(Args::vec_u256(&[1u8, 2]).unwrap().len(), 1 + 64);
        assert_eq!(Args::vec_object_id(&[ADDR]).unwrap().len(), 33);
        assert_eq!(Args::vec_u64::<u64>(&[]).unwrap().as_bytes(), &[0]);
    }

    #[test]
    fn test_raw_and_hex() {
        assert_eq!(Args::raw(vec![9, 9]).into_bytes(), vec![9, 9]);
        assert_eq!(Args::from_hex("0x0a0b").unwrap().as_bytes(), &[10, 11]);
        assert_eq!(Args::from_hex("0xabc").unwrap().as_bytes(), &[0x0a, 0xbc]);
        assert!(Args::from_hex("0xgg").is_err());
    }

    #[test]
    fn test_infer_scalars() {
        assert_eq!(Args::infer(true).unwrap(), Args::bool(true));
        assert_eq!(Args::infer(7).unwrap(), Args::u256(7).unwrap());
        assert_eq!(Args::infer(ADDR).unwrap(), Args::address(ADDR).unwrap());
        assert_eq!(Args::infer("0x1").unwrap(), Args::string("0x1"));
        assert_eq!(Args::infer("hello").unwrap(), Args::string("hello"));
        assert!(Args::infer(-1).is_err());
    }

    #[test]
    fn test_infer_lists() {
        assert_eq!(
            Args::infer(vec![1u64, 2]).unwrap(),
            Args::vec_u256(&[1u64, 2]).unwrap()
        );
        assert_eq!(
            Args::infer(vec![true, false]).unwrap(),
            Args::vec_bool(&[true, false])
        );
        assert_eq!(
            Args::infer(vec!["a", "b"]).unwrap(),
            Args::vec_string(&["a", "b"])
        );
        assert_eq!(
            Args::infer(vec![ADDR]).unwrap(),
            Args::vec_address(&[ADDR]).unwrap()
        );
        assert_eq!(Args::infer(Vec::<u64>::new()).unwrap().as_bytes(), &[0]);

        let mixed = UntypedArg::List(vec![UntypedArg::from(1), UntypedArg::from("x")]);
        assert!(matches!(
            Args::infer(mixed),
            Err(TransactionError::HeterogeneousList(_))
        ));
        let nested = UntypedArg::from(vec![vec![1u64]]);
        assert!(matches!(
            Args::infer(nested),
            Err(TransactionError::InvalidInput(_))
        ));
    }
}
