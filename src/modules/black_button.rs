//! Black Button sub-protocol
//!
//! A request/response exchange between a physical button and the broker,
//! carried inside `BT` segments. Field 2 selects the operation.
//!
//! ```text
//!  S ──────────────────────────────► (answered in the same exchange)
//!  C ──► request id allocated ──► P (poll, repeatable) ──► X (close)
//! ```
//!
//! Nothing is remembered between frames: a `Poll` or `Close` names its
//! request id explicitly in field 3.

use super::{ModuleDelta, ParseContext};
use crate::error::{DecodeError, Result};
use crate::model::Attribute;
use crate::protocol::field;

/// `op_status` values written by the decoder
pub mod states {
    pub const PENDING: &str = "PENDING";
    pub const CLOSED: &str = "CLOSED";
}

/// Lifecycle state of a Black Button request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    Closed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Pending => states::PENDING,
            RequestState::Closed => states::CLOSED,
        }
    }
}

/// Black Button operation selected by field 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `S`: answered synchronously, no request id
    Synchronous,

    /// `C`: open an asynchronous request
    Create,

    /// `P`: ask for the status and result of a request
    Poll,

    /// `X`: close a request
    Close,
}

impl Operation {
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "S" => Some(Operation::Synchronous),
            "C" => Some(Operation::Create),
            "P" => Some(Operation::Poll),
            "X" => Some(Operation::Close),
            _ => None,
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            Operation::Synchronous => "S",
            Operation::Create => "C",
            Operation::Poll => "P",
            Operation::Close => "X",
        }
    }
}

/// Parse a `BT` segment
pub(super) fn parse(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Black Button module");
    let operation =
        Operation::from_selector(field(fields, 2)?).ok_or_else(|| DecodeError::bad_payload(fields))?;

    let mut delta = match operation {
        Operation::Synchronous => request(fields, ctx, None)?,
        Operation::Create => {
            let request_id = ctx.ids.generate()?;
            request(fields, ctx, Some(request_id))?
        }
        Operation::Poll => poll(fields)?,
        Operation::Close => close(fields)?,
    };
    delta.operation = Some(operation.selector().to_string());
    Ok(delta)
}

/// `S` and `C`: a new action for the broker to perform
fn request(
    fields: &[&str],
    ctx: &ParseContext<'_>,
    request_id: Option<String>,
) -> Result<ModuleDelta> {
    let selector = field(fields, 2)?;
    let extra = match field(fields, 4)? {
        "" => " ",
        extra => extra,
    };

    let mut attributes = vec![Attribute::string("internal_id", ctx.stack_id)];
    if let Some(id) = &request_id {
        attributes.push(Attribute::string("req_internal_id", id.as_str()));
    }
    attributes.extend([
        Attribute::string("last_operation", selector),
        Attribute::string("op_status", RequestState::Pending.as_str()),
        Attribute::string("op_action", field(fields, 3)?),
        Attribute::string("op_extra", extra),
    ]);

    Ok(ModuleDelta {
        attributes,
        request_id,
        ..ModuleDelta::default()
    })
}

/// `P`: the broker answers with the current `op_status` and `op_result`
fn poll(fields: &[&str]) -> Result<ModuleDelta> {
    Ok(ModuleDelta {
        attributes: vec![Attribute::string("last_operation", field(fields, 2)?)],
        queries: vec!["op_status".to_string(), "op_result".to_string()],
        request_id: Some(field(fields, 3)?.to_string()),
        ..ModuleDelta::default()
    })
}

/// `X`: mark the request closed
fn close(fields: &[&str]) -> Result<ModuleDelta> {
    Ok(ModuleDelta {
        attributes: vec![
            Attribute::string("op_status", RequestState::Closed.as_str()),
            Attribute::string("last_operation", field(fields, 2)?),
        ],
        request_id: Some(field(fields, 3)?.to_string()),
        ..ModuleDelta::default()
    })
}
