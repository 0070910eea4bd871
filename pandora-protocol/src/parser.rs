//! Parsing of XML-RPC method responses into a small value model.

use std::collections::HashMap;

use xmltree::Element;

use crate::{fault::Fault, ProtocolError};

/// A parsed XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Array(Vec<Value>),
    Struct(HashMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Struct member lookup.
    pub fn get(&self, member: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.get(member),
            _ => None,
        }
    }

    /// Array elements.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Parse a `<methodResponse>` document.  A `<fault>` response surfaces as
/// [`ProtocolError::Fault`]; no partial value is ever returned.
pub fn parse_response(xml: &str) -> Result<Value, ProtocolError> {
    let root = Element::parse(xml.as_bytes())?;
    if root.name != "methodResponse" {
        return Err(ProtocolError::Malformed(format!(
            "expected methodResponse, got {:?}",
            root.name
        )));
    }

    if let Some(fault) = root.get_child("fault") {
        let value = fault
            .get_child("value")
            .ok_or_else(|| ProtocolError::Malformed("fault without value".into()))?;
        let parsed = parse_value(value)?;
        return Err(ProtocolError::Fault(Fault::from_value(&parsed)));
    }

    let value = root
        .get_child("params")
        .and_then(|params| params.get_child("param"))
        .and_then(|param| param.get_child("value"))
        .ok_or_else(|| ProtocolError::Malformed("response carries no value".into()))?;
    parse_value(value)
}

fn parse_value(value: &Element) -> Result<Value, ProtocolError> {
    let typed = value.children.iter().find_map(|node| node.as_element());
    let Some(typed) = typed else {
        // A <value> without a type element defaults to string.
        return Ok(Value::Str(
            value.get_text().unwrap_or_default().into_owned(),
        ));
    };

    let text = || typed.get_text().unwrap_or_default().into_owned();
    match typed.name.as_str() {
        "int" | "i4" => text()
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| ProtocolError::Malformed(format!("invalid int {:?}", text()))),
        "boolean" => match text().trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(ProtocolError::Malformed(format!(
                "invalid boolean {:?}",
                other
            ))),
        },
        "string" => Ok(Value::Str(text())),
        "array" => {
            let data = typed
                .get_child("data")
                .ok_or_else(|| ProtocolError::Malformed("array without data".into()))?;
            data.children
                .iter()
                .filter_map(|node| node.as_element())
                .map(parse_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "struct" => {
            let mut members = HashMap::new();
            for member in typed.children.iter().filter_map(|node| node.as_element()) {
                if member.name != "member" {
                    continue;
                }
                let name = member
                    .get_child("name")
                    .and_then(|name| name.get_text())
                    .ok_or_else(|| ProtocolError::Malformed("struct member without name".into()))?
                    .into_owned();
                let value = member
                    .get_child("value")
                    .ok_or_else(|| ProtocolError::Malformed("struct member without value".into()))?;
                members.insert(name, parse_value(value)?);
            }
            Ok(Value::Struct(members))
        }
        other => Err(ProtocolError::Malformed(format!(
            "unsupported value type {:?}",
            other
        ))),
    }
}
