// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property kinds and the codec path used for each kind's value.

mod kind;

pub use kind::{InvalidPropertyName, PropertyKind};

use crate::keyword::{
    KW_METHOD_ADD, KW_METHOD_CANCEL, KW_METHOD_COUNTER, KW_METHOD_DECLINECOUNTER,
    KW_METHOD_PUBLISH, KW_METHOD_REFRESH, KW_METHOD_REPLY, KW_METHOD_REQUEST,
    KW_STATUS_CANCELLED, KW_STATUS_COMPLETED, KW_STATUS_CONFIRMED, KW_STATUS_DRAFT,
    KW_STATUS_FINAL, KW_STATUS_IN_PROCESS, KW_STATUS_NEEDS_ACTION, KW_STATUS_TENTATIVE,
};
use crate::parameter::{ValueType, impl_keyword_enum};
use crate::value::{Value, ValueError, split_text_list};

impl_keyword_enum! {
    /// iTIP methods of the METHOD property, RFC 5546 Section 1.4
    #[expect(missing_docs)]
    enum Method {
        Publish         => KW_METHOD_PUBLISH,
        Request         => KW_METHOD_REQUEST,
        Reply           => KW_METHOD_REPLY,
        Add             => KW_METHOD_ADD,
        Cancel          => KW_METHOD_CANCEL,
        Refresh         => KW_METHOD_REFRESH,
        Counter         => KW_METHOD_COUNTER,
        DeclineCounter  => KW_METHOD_DECLINECOUNTER,
    }
}

impl_keyword_enum! {
    /// Status values of the STATUS property, RFC 5545 Section 3.8.1.11
    #[expect(missing_docs)]
    enum Status {
        Tentative   => KW_STATUS_TENTATIVE,
        Confirmed   => KW_STATUS_CONFIRMED,
        Cancelled   => KW_STATUS_CANCELLED,
        NeedsAction => KW_STATUS_NEEDS_ACTION,
        Completed   => KW_STATUS_COMPLETED,
        InProcess   => KW_STATUS_IN_PROCESS,
        Draft       => KW_STATUS_DRAFT,
        Final       => KW_STATUS_FINAL,
    }
}

/// Value type a property is decoded with: the `VALUE` parameter when the kind
/// allows it, the kind's default type otherwise.
#[must_use]
pub fn effective_value_type(kind: &PropertyKind, value_param: Option<&str>) -> Option<ValueType> {
    let selected = value_param
        .and_then(|v| v.parse::<ValueType>().ok())
        .filter(|ty| kind.allows(*ty));
    match kind {
        PropertyKind::XName(_) | PropertyKind::Unrecognized(_) => None,
        _ => selected.or_else(|| kind.default_value_type()),
    }
}

/// Decode the raw value text of a property.
///
/// Experimental, unrecognized and REQUEST-STATUS values are kept verbatim,
/// GEO is a float pair, CATEGORIES and RESOURCES are text lists. Everything
/// else goes through the value codec of [`effective_value_type`]. A DATE-TIME
/// value without time part reads as a DATE when the kind allows dates.
///
/// # Errors
/// Returns [`ValueError`] if the text does not match the value type.
pub fn decode_value(
    kind: &PropertyKind,
    value_param: Option<&str>,
    raw: &str,
) -> Result<Value, ValueError> {
    match kind {
        PropertyKind::Geo => Value::parse_geo(raw),
        PropertyKind::RequestStatus => Ok(Value::Raw(raw.to_owned())),
        k if k.is_multi_text() => Ok(Value::TextList(split_text_list(raw))),
        _ => match effective_value_type(kind, value_param) {
            Some(ValueType::DateTime) if kind.allows(ValueType::Date) => {
                Value::parse(ValueType::DateTime, raw)
                    .or_else(|err| Value::parse(ValueType::Date, raw).map_err(|_| err))
            }
            Some(ty) => Value::parse(ty, raw),
            None => Ok(Value::Raw(raw.to_owned())),
        },
    }
}
