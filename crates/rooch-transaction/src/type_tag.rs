//! Move type tags.
//!
//! `TypeTag` is encoded as its variant index followed by the payload: nothing
//! for primitives, the element tag for `vector`, a [`StructTag`] for structs.
//! Indices are fixed by the chain: bool=0, u8=1, u64=2, u128=3, address=4,
//! signer=5, vector=6, struct=7, u16=8, u32=9, u256=10.

use rooch_address::RoochAddress;
use rooch_bcs::{BcsError, Decode, Deserializer, Encode, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::function::Identifier;
use crate::TransactionError;

/// Deepest type nesting accepted by the text parser.
const MAX_PARSE_DEPTH: usize = 64;

/// A Move type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    /// Only appears in stored type tags; never a valid call argument type.
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

/// A fully qualified Move struct type, `address::module::Name<params>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructTag {
    pub address: RoochAddress,
    pub module: Identifier,
    pub name: Identifier,
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    pub fn vector(inner: TypeTag) -> Self {
        TypeTag::Vector(Box::new(inner))
    }

    pub fn struct_tag(tag: StructTag) -> Self {
        TypeTag::Struct(Box::new(tag))
    }

    fn variant_index(&self) -> u32 {
        match self {
            TypeTag::Bool => 0,
            TypeTag::U8 => 1,
            TypeTag::U64 => 2,
            TypeTag::U128 => 3,
            TypeTag::Address => 4,
            TypeTag::Signer => 5,
            TypeTag::Vector(_) => 6,
            TypeTag::Struct(_) => 7,
            TypeTag::U16 => 8,
            TypeTag::U32 => 9,
            TypeTag::U256 => 10,
        }
    }
}

impl StructTag {
    pub fn new(
        address: RoochAddress,
        module: Identifier,
        name: Identifier,
        type_params: Vec<TypeTag>,
    ) -> Self {
        StructTag {
            address,
            module,
            name,
            type_params,
        }
    }
}

impl Encode for TypeTag {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_variant_index(self.variant_index());
        match self {
            TypeTag::Vector(inner) => inner.encode(ser),
            TypeTag::Struct(tag) => tag.encode(ser),
            _ => {}
        }
    }
}

impl Decode for TypeTag {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        let tag = match de.read_variant_index()? {
            0 => TypeTag::Bool,
            1 => TypeTag::U8,
            2 => TypeTag::U64,
            3 => TypeTag::U128,
            4 => TypeTag::Address,
            5 => TypeTag::Signer,
            6 => TypeTag::Vector(Box::<TypeTag>::decode(de)?),
            7 => TypeTag::Struct(Box::<StructTag>::decode(de)?),
            8 => TypeTag::U16,
            9 => TypeTag::U32,
            10 => TypeTag::U256,
            index => {
                return Err(BcsError::InvalidVariant {
                    type_name: "TypeTag",
                    index,
                })
            }
        };
        Ok(tag)
    }
}

impl Encode for StructTag {
    fn encode(&self, ser: &mut Serializer) {
        self.address.encode(ser);
        self.module.encode(ser);
        self.name.encode(ser);
        ser.write_seq(&self.type_params);
    }
}

impl Decode for StructTag {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(StructTag {
            address: RoochAddress::decode(de)?,
            module: Identifier::decode(de)?,
            name: Identifier::decode(de)?,
            type_params: de.read_seq()?,
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U16 => f.write_str("u16"),
            TypeTag::U32 => f.write_str("u32"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::U128 => f.write_str("u128"),
            TypeTag::U256 => f.write_str("u256"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_hex_literal(),
            self.module,
            self.name
        )?;
        if let Some((first, rest)) = self.type_params.split_first() {
            write!(f, "<{}", first)?;
            for param in rest {
                write!(f, ", {}", param)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeTag {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeTagParser::new(s);
        let tag = parser.parse_type(0)?;
        parser.expect_end()?;
        Ok(tag)
    }
}

impl FromStr for StructTag {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<TypeTag>()? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(TransactionError::InvalidTypeTag(format!(
                "{} is not a struct type",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Text parser
// ---------------------------------------------------------------------------

/// Recursive-descent parser over `vector<...>`, primitives and
/// `address::module::Name<...>`.
struct TypeTagParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeTagParser<'a> {
    fn new(input: &'a str) -> Self {
        TypeTagParser { input, pos: 0 }
    }

    fn error(&self, msg: &str) -> TransactionError {
        TransactionError::InvalidTypeTag(format!(
            "{} at offset {} in {:?}",
            msg, self.pos, self.input
        ))
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, token: &str) -> Result<(), TransactionError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", token)))
        }
    }

    fn expect_end(&mut self) -> Result<(), TransactionError> {
        self.skip_whitespace();
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing input"))
        }
    }

    fn word(&mut self) -> Result<&'a str, TransactionError> {
        self.skip_whitespace();
        let input: &'a str = self.input;
        let rest = &input[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected a name"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn parse_type(&mut self, depth: usize) -> Result<TypeTag, TransactionError> {
        if depth > MAX_PARSE_DEPTH {
            return Err(self.error("type nesting too deep"));
        }
        let word = self.word()?;
        if self.eat("::") {
            return self.parse_struct(word, depth).map(TypeTag::struct_tag);
        }
        let tag = match word {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect_token("<")?;
                let inner = self.parse_type(depth + 1)?;
                self.expect_token(">")?;
                TypeTag::vector(inner)
            }
            other => return Err(self.error(&format!("unknown type `{}`", other))),
        };
        Ok(tag)
    }

    fn parse_struct(&mut self, address: &str, depth: usize) -> Result<StructTag, TransactionError> {
        let address: RoochAddress = address.parse()?;
        let module = Identifier::new(self.word()?)?;
        self.expect_token("::")?;
        let name = Identifier::new(self.word()?)?;
        let mut type_params = Vec::new();
        if self.eat("<") {
            loop {
                type_params.push(self.parse_type(depth + 1)?);
                if self.eat(",") {
                    continue;
                }
                self.expect_token(">")?;
                break;
            }
        }
        Ok(StructTag::new(address, module, name, type_params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas_coin() -> StructTag {
        StructTag::new(
            RoochAddress::ROOCH_FRAMEWORK,
            Identifier::new("gas_coin").unwrap(),
            Identifier::new("RGas").unwrap(),
            vec![],
        )
    }

    #[test]
    fn test_vector_u64_encoding() {
        let tag = TypeTag::Vector(Box::new(TypeTag::U64));
        assert_eq!(hex::encode(tag.to_bcs_bytes()), "0602");
    }

    #[test]
    fn test_primitive_indices() {
        let cases = [
            (TypeTag::Bool, 0u8),
            (TypeTag::U8, 1),
            (TypeTag::U64, 2),
            (TypeTag::U128, 3),
            (TypeTag::Address, 4),
            (TypeTag::Signer, 5),
            (TypeTag::U16, 8),
            (TypeTag::U32, 9),
            (TypeTag::U256, 10),
        ];
        for (tag, index) in cases {
            assert_eq!(tag.to_bcs_bytes(), vec![index], "{}", tag);
            assert_eq!(TypeTag::from_bcs_bytes(&[index]).unwrap(), tag);
        }
    }

    #[test]
    fn test_struct_tag_encoding() {
        let tag = gas_coin();
        assert_eq!(
            hex::encode(tag.to_bcs_bytes()),
            concat!(
                "0000000000000000000000000000000000000000000000000000000000000003",
                "086761735f636f696e",
                "0452476173",
                "00"
            )
        );
        let as_type = TypeTag::struct_tag(tag.clone());
        let bytes = as_type.to_bcs_bytes();
        assert_eq!(bytes[0], 7);
        assert_eq!(&bytes[1..], tag.to_bcs_bytes().as_slice());
        assert_eq!(TypeTag::from_bcs_bytes(&bytes).unwrap(), as_type);
    }

    #[test]
    fn test_decode_unknown_variant() {
        assert!(matches!(
            TypeTag::from_bcs_bytes(&[11]),
            Err(BcsError::InvalidVariant { type_name: "TypeTag", index: 11 })
        ));
        assert!(matches!(TypeTag::from_bcs_bytes(&[6]), Err(BcsError::ShortRead { .. })));
    }

    #[test]
    fn test_display_and_parse() {
        let tag: TypeTag = "0x3::coin_store::CoinStore<0x3::gas_coin::RGas>".parse().unwrap();
        assert_eq!(tag.to_string(), "0x3::coin_store::CoinStore<0x3::gas_coin::RGas>");
        match &tag {
            TypeTag::Struct(s) => assert_eq!(s.type_params, vec![TypeTag::struct_tag(gas_coin())]),
            other => panic!("expected struct, got {}", other),
        }

        let nested: TypeTag = " vector< vector<u8> > ".parse().unwrap();
        assert_eq!(nested, TypeTag::vector(TypeTag::vector(TypeTag::U8)));
        assert_eq!(nested.to_string(), "vector<vector<u8>>");

        let multi: StructTag = "0x1::pair::Pair<u64, address>".parse().unwrap();
        assert_eq!(multi.type_params, vec![TypeTag::U64, TypeTag::Address]);
        assert_eq!(multi.to_string(), "0x1::pair::Pair<u64, address>");
    }

    #[test]
    fn test_parse_errors() {
        assert!("u7".parse::<TypeTag>().is_err());
        assert!("vector<u8".parse::<TypeTag>().is_err());
        assert!("vector<u8>>".parse::<TypeTag>().is_err());
        assert!("0x3::gas_coin".parse::<TypeTag>().is_err());
        assert!("0x3::9coin::RGas".parse::<TypeTag>().is_err());
        assert!("u64".parse::<StructTag>().is_err());
        assert!("".parse::<TypeTag>().is_err());
    }
}
