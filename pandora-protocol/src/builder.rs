//! Construction of XML-RPC method calls.
//!
//! The service requires every request twice: once as the XML-RPC document in
//! the (encrypted) POST body, and once as plaintext `argN` mirrors in the
//! request query string.  Both renderings of a parameter come from the same
//! [`Param`] value, so the two encodings cannot drift apart.

use url::form_urlencoded;
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::ProtocolError;

/// A single logical RPC parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Param {
    /// Render as an XML-RPC `<value>` node.  String content is escaped by
    /// the XML writer.
    fn to_value_node(&self) -> Element {
        let typed = match self {
            Param::Int(n) => {
                let mut elem = Element::new("int");
                elem.children.push(XMLNode::Text(n.to_string()));
                elem
            }
            Param::Str(s) => {
                let mut elem = Element::new("string");
                if !s.is_empty() {
                    elem.children.push(XMLNode::Text(s.clone()));
                }
                elem
            }
            Param::Bool(b) => {
                let mut elem = Element::new("boolean");
                elem.children
                    .push(XMLNode::Text(if *b { "1" } else { "0" }.to_string()));
                elem
            }
        };
        let mut value = Element::new("value");
        value.children.push(XMLNode::Element(typed));
        value
    }

    /// Render as the percent-encoded plaintext mirror for the query string.
    pub fn to_url_escaped(&self) -> String {
        match self {
            Param::Int(n) => n.to_string(),
            Param::Str(s) => form_urlencoded::byte_serialize(s.as_bytes()).collect(),
            Param::Bool(b) => b.to_string(),
        }
    }
}

/// Builder for one XML-RPC request.
///
/// Parameters pushed with [`MethodCall::param`] appear only in the XML body
/// (the leading timestamp, the auth token, credentials).  Parameters pushed
/// with [`MethodCall::arg`] additionally appear as `arg1..argN` in the
/// request query string.
#[derive(Debug, Clone)]
pub struct MethodCall {
    name: String,
    params: Vec<(Param, bool)>,
}

impl MethodCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Push a body-only parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push((param, false));
        self
    }

    /// Push a parameter mirrored into the query string.
    pub fn arg(mut self, param: Param) -> Self {
        self.params.push((param, true));
        self
    }

    /// Full dotted method name, e.g. `station.getStations`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Method name as it appears in the request URL: the last segment of the
    /// dotted name.
    pub fn url_method(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Serialize the complete `<methodCall>` document.
    pub fn to_xml(&self) -> Result<String, ProtocolError> {
        let mut method_name = Element::new("methodName");
        method_name.children.push(XMLNode::Text(self.name.clone()));

        let mut params = Element::new("params");
        for (param, _) in &self.params {
            let mut holder = Element::new("param");
            holder.children.push(XMLNode::Element(param.to_value_node()));
            params.children.push(XMLNode::Element(holder));
        }

        let mut call = Element::new("methodCall");
        call.children.push(XMLNode::Element(method_name));
        call.children.push(XMLNode::Element(params));

        let mut buf = Vec::new();
        let config = EmitterConfig::new().write_document_declaration(true);
        call.write_with_config(&mut buf, config)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// URL-escaped mirrors of the mirrored parameters, in push order.
    pub fn query_args(&self) -> Vec<String> {
        self.params
            .iter()
            .filter(|(_, mirrored)| *mirrored)
            .map(|(param, _)| param.to_url_escaped())
            .collect()
    }
}
