//! The operation a transaction performs.

use rooch_bcs::{BcsError, Decode, Deserializer, Encode, Serializer};

use crate::function::FunctionCall;

/// A Move action: run a script, call an entry function, or publish modules.
///
/// Variant indices on the wire: Script=0, Function=1, ModuleBundle=2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveAction {
    Script(Vec<u8>),
    Function(FunctionCall),
    /// Compiled module bytecode, one blob per module.
    ModuleBundle(Vec<Vec<u8>>),
}

impl MoveAction {
    pub fn new_function_call(call: FunctionCall) -> Self {
        MoveAction::Function(call)
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            MoveAction::Function(call) => Some(call),
            _ => None,
        }
    }
}

impl From<FunctionCall> for MoveAction {
    fn from(call: FunctionCall) -> Self {
        MoveAction::Function(call)
    }
}

impl Encode for MoveAction {
    fn encode(&self, ser: &mut Serializer) {
        match self {
            MoveAction::Script(code) => {
                ser.write_variant_index(0);
                ser.write_bytes(code);
            }
            MoveAction::Function(call) => {
                ser.write_variant_index(1);
                call.encode(ser);
            }
            MoveAction::ModuleBundle(modules) => {
                ser.write_variant_index(2);
                ser.write_seq(modules);
            }
        }
    }
}

impl Decode for MoveAction {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        match de.read_variant_index()? {
            0 => Ok(MoveAction::Script(de.read_bytes()?)),
            1 => Ok(MoveAction::Function(FunctionCall::decode(de)?)),
            2 => Ok(MoveAction::ModuleBundle(de.read_seq()?)),
            index => Err(BcsError::InvalidVariant {
                type_name: "MoveAction",
                index,
            }),
        }
    }
}
