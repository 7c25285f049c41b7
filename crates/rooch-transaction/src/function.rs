//! Identifiers, module and function ids, and the `FunctionCall` payload.

use rooch_address::RoochAddress;
use rooch_bcs::{BcsError, Decode, Deserializer, Encode, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::type_tag::TypeTag;
use crate::TransactionError;

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// A Move identifier: `[A-Za-z_][A-Za-z0-9_]*`, excluding a lone `_`.
///
/// Decoding from BCS does not re-validate; the chain is the authority for
/// identifiers it hands back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap `s`.
    pub fn new(s: impl Into<String>) -> Result<Self, TransactionError> {
        let s = s.into();
        if Self::is_valid(&s) {
            Ok(Identifier(s))
        } else {
            Err(TransactionError::InvalidIdentifier(s))
        }
    }

    /// Check the identifier grammar without allocating.
    pub fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            Some('_') if s.len() > 1 => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = TransactionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Identifier::new(s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl Encode for Identifier {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_str(&self.0);
    }
}

impl Decode for Identifier {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        de.read_string().map(Identifier)
    }
}

// ---------------------------------------------------------------------------
// ModuleId / FunctionId
// ---------------------------------------------------------------------------

/// `address::module`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId {
    pub address: RoochAddress,
    pub name: Identifier,
}

impl ModuleId {
    pub fn new(address: RoochAddress, name: Identifier) -> Self {
        ModuleId { address, name }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_hex_literal(), self.name)
    }
}

impl Encode for ModuleId {
    fn encode(&self, ser: &mut Serializer) {
        self.address.encode(ser);
        self.name.encode(ser);
    }
}

impl Decode for ModuleId {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(ModuleId {
            address: RoochAddress::decode(de)?,
            name: Identifier::decode(de)?,
        })
    }
}

/// A Move entry function, `address::module::function`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId {
    pub module_id: ModuleId,
    pub function_name: Identifier,
}

impl FunctionId {
    pub fn new(module_id: ModuleId, function_name: Identifier) -> Self {
        FunctionId {
            module_id,
            function_name,
        }
    }
}

/// Parses `address::module::function`; the address may be hex (with or
/// without `0x`, short forms left-padded) or `rooch1...` bech32.
impl FromStr for FunctionId {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split("::").collect();
        let [address, module, function] = parts.as_slice() else {
            return Err(TransactionError::InvalidFunctionId(format!(
                "expected address::module::function, got {:?}",
                s
            )));
        };
        let address: RoochAddress = address
            .parse()
            .map_err(|e| TransactionError::InvalidFunctionId(format!("{}: {}", s, e)))?;
        Ok(FunctionId::new(
            ModuleId::new(address, Identifier::new(*module)?),
            Identifier::new(*function)?,
        ))
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module_id, self.function_name)
    }
}

impl Encode for FunctionId {
    fn encode(&self, ser: &mut Serializer) {
        self.module_id.encode(ser);
        self.function_name.encode(ser);
    }
}

impl Decode for FunctionId {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(FunctionId {
            module_id: ModuleId::decode(de)?,
            function_name: Identifier::decode(de)?,
        })
    }
}

// ---------------------------------------------------------------------------
// FunctionCall
// ---------------------------------------------------------------------------

/// A call to an entry function with type arguments and BCS-encoded arguments.
///
/// `args[i]` holds the raw argument encoding (an address is 32 bytes, no
/// type tag). On the wire each argument travels as an independently encoded
/// `Vec<u8>` blob inside the outer sequence, so it carries two length
/// prefixes: `02 | 21 | 20 <32 bytes> | ...` for two addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall {
    pub function_id: FunctionId,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

impl FunctionCall {
    pub fn new(function_id: FunctionId, ty_args: Vec<TypeTag>, args: Vec<Vec<u8>>) -> Self {
        FunctionCall {
            function_id,
            ty_args,
            args,
        }
    }
}

impl Encode for FunctionCall {
    fn encode(&self, ser: &mut Serializer) {
        self.function_id.encode(ser);
        ser.write_seq(&self.ty_args);
        ser.write_len(self.args.len());
        for arg in &self.args {
            ser.write_bytes(&arg.to_bcs_bytes());
        }
    }
}

impl Decode for FunctionCall {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(FunctionCall {
            function_id: FunctionId::decode(de)?,
            ty_args: de.read_seq()?,
            args: decode_arg_blobs(de)?,
        })
    }
}

fn decode_arg_blobs(de: &mut Deserializer<'_>) -> Result<Vec<Vec<u8>>, BcsError> {
    let count = de.read_len()?;
    let mut args = Vec::with_capacity(count.min(de.remaining()));
    for _ in 0..count {
        let blob = de.read_bytes()?;
        args.push(Vec::<u8>::from_bcs_bytes(&blob)?);
    }
    Ok(args)
}
