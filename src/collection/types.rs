//! Request-tree model for Postman collections
//!
//! Only the parts of a collection this crate rewrites are typed: the folder
//! structure, each request's `request` descriptor and its `event` list.
//! Everything else is carried in `meta` maps and written back verbatim.
//!
//! Conversion from JSON never fails. Nodes that are neither folders nor
//! requests become [`Item::Opaque`] instead of aborting the whole document.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Name reported for requests that carry no `name`
pub const UNNAMED_REQUEST: &str = "Unnamed Request";

/// A full collection document
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Top-level `item` tree, if the document has one
    pub items: Option<Vec<Item>>,

    /// All other top-level fields (`info`, `variable`, `requests`, ...)
    pub meta: Map<String, Value>,
}

/// A node of the request tree
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Folder(Folder),
    Request(Request),
    /// Neither a folder nor a request; preserved as-is
    Opaque(Value),
}

/// Grouping node with ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub name: Option<String>,
    pub children: Vec<Item>,
    pub meta: Map<String, Value>,
}

/// Leaf node describing a single HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub name: Option<String>,

    /// Method, URL, headers, body. Opaque apart from the URL.
    pub request: Value,

    /// Lifecycle hooks; `None` when the source node had no `event` field
    pub events: Option<Vec<Value>>,

    pub meta: Map<String, Value>,
}

/// A lifecycle hook entry as written into a request's `event` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,
    pub script: Script,
}

/// Script body of an [`Event`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "type")]
    pub script_type: String,
    pub exec: Vec<String>,
}

impl Event {
    /// Build a JavaScript hook whose body is `source` split into lines
    pub fn javascript(listen: impl Into<String>, source: &str) -> Self {
        Self {
            listen: listen.into(),
            script: Script {
                script_type: "text/javascript".to_string(),
                exec: source.split('\n').map(str::to_string).collect(),
            },
        }
    }

    /// Serialize into the JSON shape stored in `event` arrays
    pub fn to_value(&self) -> Value {
        json!({
            "listen": self.listen,
            "script": {
                "type": self.script.script_type,
                "exec": self.script.exec,
            }
        })
    }
}

/// Read the `listen` name of a raw event entry
pub fn event_listen(event: &Value) -> Option<&str> {
    event.get("listen").and_then(Value::as_str)
}

/// JavaScript-style truthiness for JSON values
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn take_name(meta: &mut Map<String, Value>) -> Option<String> {
    match meta.remove("name") {
        Some(Value::String(name)) => Some(name),
        Some(other) => {
            meta.insert("name".to_string(), other);
            None
        }
        None => None,
    }
}

fn items_from_array(values: Vec<Value>) -> Vec<Item> {
    values.into_iter().map(Item::from_value).collect()
}

fn items_to_array(items: &[Item]) -> Value {
    Value::Array(items.iter().map(Item::to_value).collect())
}

impl Item {
    /// Classify a raw JSON node. A node with an `item` array is a folder even
    /// if it also carries a `request`.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut meta) = value else {
            return Item::Opaque(value);
        };

        match meta.remove("item") {
            Some(Value::Array(children)) => {
                let name = take_name(&mut meta);
                return Item::Folder(Folder {
                    name,
                    children: items_from_array(children),
                    meta,
                });
            }
            Some(other) => {
                meta.insert("item".to_string(), other);
            }
            None => {}
        }

        if meta.get("request").is_some_and(is_truthy) {
            let request = meta.remove("request").unwrap_or(Value::Null);
            let events = match meta.remove("event") {
                Some(Value::Array(events)) => Some(events),
                Some(other) => {
                    // Not a list we can edit; keep it untouched
                    meta.insert("event".to_string(), other);
                    None
                }
                None => None,
            };
            let name = take_name(&mut meta);
            return Item::Request(Request {
                name,
                request,
                events,
                meta,
            });
        }

        Item::Opaque(Value::Object(meta))
    }

    /// Rebuild the JSON form of this node
    pub fn to_value(&self) -> Value {
        match self {
            Item::Folder(folder) => {
                let mut map = folder.meta.clone();
                if let Some(name) = &folder.name {
                    map.insert("name".to_string(), Value::String(name.clone()));
                }
                map.insert("item".to_string(), items_to_array(&folder.children));
                Value::Object(map)
            }
            Item::Request(request) => {
                let mut map = request.meta.clone();
                if let Some(name) = &request.name {
                    map.insert("name".to_string(), Value::String(name.clone()));
                }
                map.insert("request".to_string(), request.request.clone());
                if let Some(events) = &request.events {
                    map.insert("event".to_string(), Value::Array(events.clone()));
                }
                Value::Object(map)
            }
            Item::Opaque(value) => value.clone(),
        }
    }

    /// Node name, if it has one
    pub fn name(&self) -> Option<&str> {
        match self {
            Item::Folder(folder) => folder.name.as_deref(),
            Item::Request(request) => request.name.as_deref(),
            Item::Opaque(value) => value.get("name").and_then(Value::as_str),
        }
    }
}

impl Request {
    /// Name used in diagnostics
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_REQUEST)
    }

    /// Events with the given `listen` name
    pub fn events_for<'a>(&'a self, listen: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.events
            .iter()
            .flatten()
            .filter(move |event| event_listen(event) == Some(listen))
    }
}

impl Collection {
    /// Split a parsed document into its request tree and remaining fields
    pub fn from_value(value: Value) -> Self {
        let mut meta = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let items = match meta.remove("item") {
            Some(Value::Array(items)) => Some(items_from_array(items)),
            Some(other) => {
                meta.insert("item".to_string(), other);
                None
            }
            None => None,
        };

        Self { items, meta }
    }

    /// Rebuild the full JSON document
    pub fn to_value(&self) -> Value {
        let mut map = self.meta.clone();
        if let Some(items) = &self.items {
            map.insert("item".to_string(), items_to_array(items));
        }
        Value::Object(map)
    }

    /// Collection display name from `info.name`
    pub fn name(&self) -> Option<&str> {
        self.meta
            .get("info")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
    }

    /// Iterate over every request in the tree, depth-first
    pub fn requests(&self) -> Vec<&Request> {
        fn walk<'a>(items: &'a [Item], out: &mut Vec<&'a Request>) {
            for item in items {
                match item {
                    Item::Folder(folder) => walk(&folder.children, out),
                    Item::Request(request) => out.push(request),
                    Item::Opaque(_) => {}
                }
            }
        }

        let mut out = Vec::new();
        if let Some(items) = &self.items {
            walk(items, &mut out);
        }
        out
    }
}

impl Serialize for Collection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Collection::from_value)
    }
}
