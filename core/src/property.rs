// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Properties, their parameters and the views of attached properties.

use std::fmt;
use std::ops::Deref;

use calmodel_ical::formatter::format_property;
use calmodel_ical::property::decode_value;
use calmodel_ical::{
    ErrorCode, ParameterKind, ParameterName, PropertyKind, RawParameter, RawProperty, Value,
    parse_content_line,
};

use crate::attribution;
use crate::{ComponentId, ComponentRef, ComponentTree, DateTime, IcsError, Period, Timezone};

/// A property parameter, values are kept decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: ParameterName,
    values: Vec<String>,
}

impl Parameter {
    /// Canonical name for registered parameters, the literal one otherwise.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Values joined back with commas.
    #[must_use]
    pub fn value(&self) -> String {
        self.values.join(",")
    }

    fn is_named(&self, name: &ParameterName) -> bool {
        match (&self.name, name) {
            (ParameterName::Known(a), ParameterName::Known(b)) => a == b,
            (a, b) => a.as_str() == b.as_str(),
        }
    }
}

/// One property: a kind, ordered parameters and an optional value.
///
/// A `Property` on its own is detached. Adding it to a component moves it into
/// the component's tree, where it is reached through [`PropertyRef`] and
/// [`PropertyMut`].
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    kind: PropertyKind,
    parameters: Vec<Parameter>,
    value: Option<Value>,
    zone: Option<Timezone>,
}

impl Property {
    /// A property without value or parameters.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            parameters: Vec::new(),
            value: None,
            zone: None,
        }
    }

    /// A property holding a decoded value.
    #[must_use]
    pub const fn with_value(kind: PropertyKind, value: Value) -> Self {
        Self {
            kind,
            parameters: Vec::new(),
            value: Some(value),
            zone: None,
        }
    }

    /// A property of a registered or experimental kind.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for names that are neither.
    pub fn from_name(name: &str) -> Result<Self, IcsError> {
        match name.parse::<PropertyKind>() {
            Ok(PropertyKind::Unrecognized(name)) => {
                Err(IcsError::invalid(format!("unknown property `{name}`")))
            }
            Ok(kind) => Ok(Self::new(kind)),
            Err(err) => Err(IcsError::invalid(err.to_string())),
        }
    }

    /// Parse one content line, a trailing line break is optional.
    ///
    /// # Errors
    /// [`IcsError::ParseError`] if the line is malformed.
    pub fn from_ical_string(text: &str) -> Result<Self, IcsError> {
        let raw = parse_content_line(text)?;
        Ok(Self::from_raw(&raw))
    }

    /// Decode a codec property. Values the codec rejects are kept verbatim.
    pub(crate) fn from_raw(raw: &RawProperty) -> Self {
        let kind = raw
            .name
            .parse()
            .unwrap_or_else(|_| PropertyKind::Unrecognized(raw.name.clone()));
        let parameters = raw
            .parameters
            .iter()
            .map(|p| Parameter {
                name: ParameterName::classify(&p.name)
                    .unwrap_or_else(|| ParameterName::Iana(p.name.clone())),
                values: p.values.clone(),
            })
            .collect();

        let value_param = raw.parameter(ParameterKind::ValueType.name()).map(RawParameter::joined);
        let value = decode_value(&kind, value_param.as_deref(), &raw.value).unwrap_or_else(|err| {
            tracing::warn!(property = %kind, %err, "keeping undecodable value verbatim");
            Value::Raw(raw.value.clone())
        });

        Self {
            kind,
            parameters,
            value: Some(value),
            zone: None,
        }
    }

    pub(crate) fn to_raw(&self) -> RawProperty {
        RawProperty {
            name: self.kind.name().to_owned(),
            parameters: self
                .parameters
                .iter()
                .map(|p| RawParameter {
                    name: p.name.as_str().to_owned(),
                    values: p.values.clone(),
                })
                .collect(),
            value: self.value.as_ref().map(ToString::to_string).unwrap_or_default(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Canonical name for registered kinds, the literal name otherwise.
    #[must_use]
    pub fn property_name(&self) -> &str {
        self.kind.name()
    }

    /// The value as plain text, `None` if the property has none.
    ///
    /// TEXT values come back unescaped, lists joined with commas, every
    /// other type in its iCalendar encoding.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.value.as_ref().map(|v| match v {
            Value::Text(s) | Value::Raw(s) => s.clone(),
            Value::TextList(items) => items.join(","),
            other => other.to_string(),
        })
    }

    /// Replace the value from plain text, `None` clears it.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] if the text is no valid value of the
    /// property's type.
    pub fn set_value(&mut self, text: Option<&str>) -> Result<(), IcsError> {
        let Some(text) = text else {
            self.value = None;
            return Ok(());
        };

        let value = if self.kind.is_multi_text() {
            Value::TextList(vec![text.to_owned()])
        } else if self.kind.is_text() {
            Value::Text(text.to_owned())
        } else if self.kind.is_registered() {
            self.decode(text)?
        } else {
            Value::Raw(text.to_owned())
        };
        self.value = Some(value);
        self.zone = None;
        Ok(())
    }

    /// The value in its iCalendar encoding.
    #[must_use]
    pub fn value_as_ical_string(&self) -> Option<String> {
        self.value.as_ref().map(ToString::to_string)
    }

    /// Replace the value from its iCalendar encoding, `None` clears it.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] if the text is no valid encoding.
    pub fn set_value_as_ical_string(&mut self, text: Option<&str>) -> Result<(), IcsError> {
        self.value = text.map(|text| self.decode(text)).transpose()?;
        self.zone = None;
        Ok(())
    }

    fn decode(&self, text: &str) -> Result<Value, IcsError> {
        let value_param = self.find_parameter(&ParameterName::Known(ParameterKind::ValueType));
        decode_value(&self.kind, value_param.map(Parameter::value).as_deref(), text)
            .map_err(|err| IcsError::invalid(err.to_string()))
    }

    #[must_use]
    pub const fn typed_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn set_typed_value(&mut self, value: Option<Value>) {
        self.value = value;
        self.zone = None;
    }

    /// Timezone handle the value was last written with.
    #[must_use]
    pub const fn embedded_timezone(&self) -> Option<&Timezone> {
        self.zone.as_ref()
    }

    /// The whole content line, CRLF terminated and folded.
    ///
    /// # Errors
    /// [`IcsError::SerializationError`] if the codec fails to write.
    pub fn ical_string(&self) -> Result<String, IcsError> {
        format_property(&self.to_raw()).map_err(|err| IcsError::SerializationError {
            code: ErrorCode::Internal,
            message: err.to_string(),
        })
    }

    /// All parameters, in order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parameter names in order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.parameters.iter().map(Parameter::name)
    }

    /// Value of a parameter, several values joined with commas.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for malformed parameter names.
    pub fn parameter(&self, name: &str) -> Result<Option<String>, IcsError> {
        let name = classify(name)?;
        Ok(self.find_parameter(&name).map(Parameter::value))
    }

    /// Set a parameter to a single value.
    ///
    /// Registered parameters are replaced and moved to the end, experimental
    /// and IANA ones are updated where they are.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for malformed parameter names.
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), IcsError> {
        let name = classify(name)?;
        self.put_parameter(name, value);
        Ok(())
    }

    /// Remove every parameter of that name, `true` if one was there.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for malformed parameter names.
    pub fn remove_parameter(&mut self, name: &str) -> Result<bool, IcsError> {
        let name = classify(name)?;
        Ok(self.drop_parameter(&name))
    }

    /// Remove every experimental `X-` parameter.
    pub fn clear_x_parameters(&mut self) {
        loop {
            let before = self.parameters.len();
            if let Some(pos) = self.parameters.iter().position(|p| p.name.is_experimental()) {
                self.parameters.remove(pos);
            }
            if self.parameters.len() == before {
                break;
            }
        }
    }

    pub(crate) fn find_parameter(&self, name: &ParameterName) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.is_named(name))
    }

    pub(crate) fn put_parameter(&mut self, name: ParameterName, value: &str) {
        let values = vec![value.to_owned()];
        if matches!(name, ParameterName::Known(_)) {
            self.drop_parameter(&name);
        } else if let Some(param) = self.parameters.iter_mut().find(|p| p.is_named(&name)) {
            param.values = values;
            return;
        }
        self.parameters.push(Parameter { name, values });
    }

    pub(crate) fn drop_parameter(&mut self, name: &ParameterName) -> bool {
        let before = self.parameters.len();
        self.parameters.retain(|p| !p.is_named(name));
        self.parameters.len() != before
    }

    /// The TZID parameter.
    pub(crate) fn tzid(&self) -> Option<String> {
        self.find_parameter(&ParameterName::Known(ParameterKind::TimeZoneIdentifier))
            .map(Parameter::value)
    }

    pub(crate) fn set_zone(&mut self, zone: Option<Timezone>) {
        self.zone = zone;
    }

    /// The value as a date-time, resolved without any enclosing calendar.
    ///
    /// # Errors
    /// [`IcsError::Unexpected`] if the value is neither DATE nor DATE-TIME.
    pub fn value_as_datetime(&self) -> Result<Option<DateTime>, IcsError> {
        attribution::read(self, None)
    }

    /// Store a date-time on this detached property.
    ///
    /// With no calendar to record its timezone in, a date-time in a real zone
    /// is stored as UTC; dates and phantom zones are stored floating.
    pub fn set_value_as_datetime(&mut self, value: &DateTime) {
        attribution::store(self, value, false);
    }

    /// The value as a period, `None` for other value types.
    #[must_use]
    pub fn value_as_period(&self) -> Option<Period> {
        match self.value.as_ref()? {
            Value::Period(period) => Some(Period::from(*period)),
            _ => None,
        }
    }
}

fn classify(name: &str) -> Result<ParameterName, IcsError> {
    ParameterName::classify(name)
        .ok_or_else(|| IcsError::invalid(format!("invalid parameter name `{name}`")))
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.ical_string().map_err(|_| fmt::Error)?;
        f.write_str(line.trim_end_matches("\r\n"))
    }
}

/// Shared view of a property inside a component tree.
#[derive(Debug, Clone, Copy)]
pub struct PropertyRef<'a> {
    tree: &'a ComponentTree,
    owner: ComponentId,
    property: &'a Property,
}

impl<'a> PropertyRef<'a> {
    pub(crate) const fn new(
        tree: &'a ComponentTree,
        owner: ComponentId,
        property: &'a Property,
    ) -> Self {
        Self {
            tree,
            owner,
            property,
        }
    }

    /// The component holding this property.
    #[must_use]
    pub fn parent(&self) -> ComponentRef<'a> {
        ComponentRef::new(self.tree, self.owner)
    }

    /// The property itself, for the lifetime of the tree borrow.
    #[must_use]
    pub const fn property(&self) -> &'a Property {
        self.property
    }

    /// A detached copy.
    #[must_use]
    pub fn to_property(&self) -> Property {
        self.property.clone()
    }

    /// The value as a date-time, its timezone resolved through the
    /// enclosing calendar; a resolved timezone gets registered there.
    ///
    /// # Errors
    /// [`IcsError::Unexpected`] if the value is neither DATE nor DATE-TIME.
    pub fn value_as_datetime(&self) -> Result<Option<DateTime>, IcsError> {
        attribution::read(self.property, Some(self.parent()))
    }
}

impl Deref for PropertyRef<'_> {
    type Target = Property;

    fn deref(&self) -> &Property {
        self.property
    }
}

/// Exclusive view of a property inside a component tree.
///
/// Reads go through [`Deref`], writes through the methods here so the
/// caches of the owning components stay valid.
#[derive(Debug)]
pub struct PropertyMut<'a> {
    tree: &'a mut ComponentTree,
    owner: ComponentId,
    index: usize,
}

impl<'a> PropertyMut<'a> {
    /// Requires `index` to be a property of `owner`.
    pub(crate) const fn new(tree: &'a mut ComponentTree, owner: ComponentId, index: usize) -> Self {
        Self { tree, owner, index }
    }

    #[must_use]
    pub fn as_ref(&self) -> PropertyRef<'_> {
        PropertyRef::new(self.tree, self.owner, self.get())
    }

    fn get(&self) -> &Property {
        &self.tree.node(self.owner).properties[self.index]
    }

    fn update<T>(&mut self, f: impl FnOnce(&mut Property) -> T) -> T {
        self.tree.touch(self.owner);
        f(&mut self.tree.node_mut(self.owner).properties[self.index])
    }

    /// See [`Property::set_value`].
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for text the value codec rejects.
    pub fn set_value(&mut self, text: Option<&str>) -> Result<(), IcsError> {
        self.update(|p| p.set_value(text))
    }

    /// See [`Property::set_value_as_ical_string`].
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for text the value codec rejects.
    pub fn set_value_as_ical_string(&mut self, text: Option<&str>) -> Result<(), IcsError> {
        self.update(|p| p.set_value_as_ical_string(text))
    }

    pub fn set_typed_value(&mut self, value: Option<Value>) {
        self.update(|p| p.set_typed_value(value));
    }

    /// See [`Property::set_parameter`].
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for malformed parameter names.
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), IcsError> {
        self.update(|p| p.set_parameter(name, value))
    }

    /// See [`Property::remove_parameter`].
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for malformed parameter names.
    pub fn remove_parameter(&mut self, name: &str) -> Result<bool, IcsError> {
        self.update(|p| p.remove_parameter(name))
    }

    pub fn clear_x_parameters(&mut self) {
        self.update(Property::clear_x_parameters);
    }

    /// See [`PropertyRef::value_as_datetime`].
    ///
    /// # Errors
    /// [`IcsError::Unexpected`] if the value is neither DATE nor DATE-TIME.
    pub fn value_as_datetime(&self) -> Result<Option<DateTime>, IcsError> {
        self.as_ref().value_as_datetime()
    }

    /// Store a date-time, referencing its timezone by TZID.
    ///
    /// UTC and floating values carry no TZID. Any other timezone is
    /// registered on the enclosing calendar unless it is a phantom.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for a timezone with an empty id.
    pub fn set_value_as_datetime(&mut self, value: &DateTime) -> Result<(), IcsError> {
        let tz = value.timezone();
        if tz.needs_tzid() {
            if tz.id().is_empty() {
                return Err(IcsError::invalid("timezone without id"));
            }
            if !tz.is_phantom() {
                let calendar = self.tree.enclosing_calendar(self.owner);
                self.tree.register(calendar, tz);
            }
        }
        self.update(|p| attribution::store(p, value, true));
        Ok(())
    }
}

impl Deref for PropertyMut<'_> {
    type Target = Property;

    fn deref(&self) -> &Property {
        self.get()
    }
}
