//! Oneof fields.
//!
//! A oneof is an `Option` of a Rust enum, one variant per alternative. Encode
//! emits only the selected alternative. Decode selects whichever alternative
//! it sees last: a tag for a different alternative discards the current one.

use stream::Source;

use crate::error::DecodeResult;
use crate::field::message;
use crate::message::{Empty, Message};

/// Merges a submessage alternative into a oneof.
///
/// `select` projects the oneof onto the target alternative. If another
/// alternative (or none) is selected, the oneof is first reset to
/// `wrap(M::default())`; if the target is already selected, the wire contents
/// are merged into it.
///
/// # Errors
///
/// See [`message::merge`].
pub fn merge_message<T, M, R>(
    slot: &mut Option<T>,
    select: impl Fn(&mut T) -> Option<&mut M>,
    wrap: impl FnOnce(M) -> T,
    source: &mut R,
) -> DecodeResult<()>
where
    M: Message,
    R: Source + ?Sized,
{
    if slot.as_mut().and_then(&select).is_none() {
        *slot = Some(wrap(M::default()));
    }
    match slot.as_mut().and_then(&select) {
        Some(inner) => message::merge(inner, source),
        None => Ok(()),
    }
}

/// Consumes an empty-message alternative and selects it.
///
/// # Errors
///
/// See [`message::merge`].
pub fn merge_empty<T, R: Source + ?Sized>(
    slot: &mut Option<T>,
    variant: T,
    source: &mut R,
) -> DecodeResult<()> {
    message::merge(&mut Empty, source)?;
    *slot = Some(variant);
    Ok(())
}
