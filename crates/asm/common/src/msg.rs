//! Message related types using strata-msg-fmt.

use std::any::Any;

use borsh::{BorshDeserialize, BorshSerialize};
use strata_l1_txfmt::SubprotocolId;
// Re-export standard types for convenience
pub use strata_msg_fmt::{Error as MessageError, Msg, OwnedMsg as Message, TypeId as MessageType};
use strata_msg_fmt::{OwnedMsg, TypeId};

use crate::AsmError;

/// Generic wrapper around a inter-proto msg.
pub trait InterprotoMsg: Any + 'static {
    /// Returns the ID of the subprotocol that produced this messages.
    fn id(&self) -> SubprotocolId;

    /// Converts the message ref into a `&dyn Any` for upcasting.
    ///
    /// The impl of this function should always be `self`.  For technical type
    /// system reasons, this cannot be provided as a default impl.
    ///
    /// This can be removed by using trait upcasting in Rust 1.86.
    fn as_dyn_any(&self) -> &dyn Any;
}

/// Empty impl that can't be constructed.
#[derive(Copy, Clone, Debug)]
pub struct NullMsg<const ID: SubprotocolId>;

impl<const ID: SubprotocolId> InterprotoMsg for NullMsg<ID> {
    fn id(&self) -> SubprotocolId {
        ID
    }

    fn as_dyn_any(&self) -> &dyn Any {
        self
    }
}

/// Encodes a message type and body into SPS-msg-fmt format
fn encode_sps_msg(ty: TypeId, body: &[u8]) -> Result<Vec<u8>, AsmError> {
    let mut result = Vec::new();
    if ty < 0x80 {
        // Single byte encoding
        result.push(ty as u8);
    } else if ty < 0x8000 {
        // Two byte encoding
        result.push(0x80 | ((ty >> 8) as u8));
        result.push(ty as u8);
    } else {
        // Use strata_msg_fmt::Error directly - AsmError will convert it
        return Err(MessageError::TypeOutOfBounds(ty).into());
    }
    result.extend_from_slice(body);
    Ok(result)
}

/// Decodes SPS-msg-fmt format into message type and body
fn decode_sps_msg(encoded: &[u8]) -> Result<(TypeId, &[u8]), AsmError> {
    if encoded.is_empty() {
        return Err(MessageError::BufEmpty.into());
    }

    let (ty, body_start) = if encoded[0] < 0x80 {
        // Single byte encoding
        (encoded[0] as TypeId, 1)
    } else {
        // Two byte encoding
        if encoded.len() < 2 {
            return Err(MessageError::BufTooShort.into());
        }
        let ty = (((encoded[0] & 0x7F) as TypeId) << 8) | (encoded[1] as TypeId);
        (ty, 2)
    };

    Ok((ty, &encoded[body_start..]))
}

/// Generic message from OL to ASM using strata-msg-fmt
///
/// This type wraps messages in the SPS-msg-fmt format, allowing for
/// different message types to be sent from OL to ASM (e.g., withdrawals,
/// upgrade messages, etc.)
///
/// We store the type and body separately for Borsh compatibility while
/// maintaining full SPS-msg-fmt compliance through encoding/decoding.
#[derive(Clone, Debug, BorshSerialize, BorshDeserialize, PartialEq, Eq)]
pub struct OLToASMMessage {
    /// Message type identifier
    ty: TypeId,
    /// Message body
    body: Vec<u8>,
}

impl OLToASMMessage {
    /// Creates a new OL to ASM message from type and body
    pub fn new(ty: TypeId, body: Vec<u8>) -> Result<Self, AsmError> {
        // Validate type is within SPS-msg-fmt bounds
        if ty > 0x7FFF {
            return Err(MessageError::TypeOutOfBounds(ty).into());
        }
        Ok(Self { ty, body })
    }

    /// Creates an OL to ASM message from an OwnedMsg
    pub fn from_msg(msg: &OwnedMsg) -> Self {
        Self {
            ty: msg.ty(),
            body: msg.body().to_vec(),
        }
    }

    /// Creates a new OL to ASM message from raw encoded bytes
    pub fn from_encoded(encoded_bytes: Vec<u8>) -> Result<Self, AsmError> {
        let (ty, body) = decode_sps_msg(&encoded_bytes)?;
        Ok(Self {
            ty,
            body: body.to_vec(),
        })
    }

    /// Creates an OwnedMsg from this message
    pub fn to_msg(&self) -> Result<OwnedMsg, MessageError> {
        OwnedMsg::new(self.ty, self.body.clone())
    }

    /// Returns the message type
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Returns the message body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the message body as Vec
    pub fn body_vec(&self) -> Vec<u8> {
        self.body.clone()
    }

    /// Encodes the message to SPS-msg-fmt bytes
    pub fn encode(&self) -> Result<Vec<u8>, AsmError> {
        encode_sps_msg(self.ty, &self.body)
    }

    /// Returns the raw encoded message bytes (alias for encode)
    pub fn encoded(&self) -> Result<Vec<u8>, AsmError> {
        self.encode()
    }

    /// Compatibility method for old API - returns OwnedMsg
    pub fn decode(&self) -> Result<OwnedMsg, MessageError> {
        self.to_msg()
    }
}

/// Temporary alias for backwards compatibility
/// TODO: Remove once all code is updated to use OLToASMMessage
pub type L2ToL1Msg = OLToASMMessage;

/// Generic container for multiple messages following SPS-msg-fmt
#[derive(Clone, Debug)]
pub struct MessagesContainer {
    /// The target subprotocol ID
    target_subprotocol: SubprotocolId,
    /// Messages using strata-msg-fmt
    pub messages: Vec<OwnedMsg>,
}

impl MessagesContainer {
    /// Creates a new messages container for a specific subprotocol
    pub fn new(target_subprotocol: SubprotocolId) -> Self {
        Self {
            target_subprotocol,
            messages: Vec::new(),
        }
    }

    /// Adds a message to the container
    pub fn add_message(&mut self, message: OwnedMsg) {
        self.messages.push(message);
    }

    /// Creates a new container with the provided messages
    pub fn with_messages(target_subprotocol: SubprotocolId, messages: Vec<OwnedMsg>) -> Self {
        Self {
            target_subprotocol,
            messages,
        }
    }
}

impl InterprotoMsg for MessagesContainer {
    fn id(&self) -> SubprotocolId {
        self.target_subprotocol
    }

    fn as_dyn_any(&self) -> &dyn Any {
        self
    }
}

/// Alias for OwnedMsg to maintain compatibility
pub type Log = OwnedMsg;
