use serde_json::{Map, Value};

/// Bracket segments expanded per key; anything deeper stays one literal key.
const MAX_KEY_DEPTH: usize = 5;
/// Larger numeric segments are treated as object keys, not array positions.
const MAX_ARRAY_INDEX: usize = 20;

/// Parse a request body based on Content-Type header.
///
/// An empty body always yields an empty object. JSON bodies must be an
/// object or an array at the top level.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let ct = content_type.unwrap_or("");

    if ct.contains("application/json") {
        parse_json(body)
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)
    } else {
        // Try JSON first, then form-urlencoded
        parse_json(body)
            .or_else(|_| parse_form_urlencoded(body))
            .map_err(|e| format!("Unable to parse body: {e}"))
    }
}

fn parse_json(body: &[u8]) -> Result<Value, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => Err("Invalid JSON: top-level value must be an object or array".to_string()),
    }
}

/// Decode `key=value` pairs, expanding bracket keys the way the `qs` format
/// does: `a[]=x` appends to an array, `a[0]=x` sets an array position and
/// `a[b]=x` nests an object. Repeated plain keys collect into an array.
fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body) {
        let (root, segments) = split_key(&k);
        let slot = map.entry(root).or_insert(Value::Null);
        insert(slot, &segments, Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}

#[derive(Debug, PartialEq)]
enum Segment {
    Append,
    Index(usize),
    Key(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Segment::Append;
        }
        match raw.parse::<usize>() {
            Ok(i) if i <= MAX_ARRAY_INDEX && !raw.starts_with('+') => Segment::Index(i),
            _ => Segment::Key(raw.to_string()),
        }
    }
}

/// `a[b][]` -> ("a", [Key("b"), Append]). Keys without a well-formed bracket
/// suffix come back whole with no segments.
fn split_key(key: &str) -> (String, Vec<Segment>) {
    let Some(open) = key.find('[').filter(|&i| i > 0) else {
        return (key.to_string(), Vec::new());
    };

    let root = &key[..open];
    let mut rest = &key[open..];
    let mut segments = Vec::new();

    while segments.len() < MAX_KEY_DEPTH && rest.starts_with('[') {
        let Some(close) = rest.find(']') else {
            break;
        };
        segments.push(Segment::parse(&rest[1..close]));
        rest = &rest[close + 1..];
    }

    if segments.is_empty() {
        return (key.to_string(), Vec::new());
    }
    if !rest.is_empty() {
        segments.push(Segment::Key(rest.to_string()));
    }

    (root.to_string(), segments)
}

/// `Null` marks a slot that has not received a value yet.
fn insert(slot: &mut Value, segments: &[Segment], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        match slot {
            Value::Null => *slot = value,
            Value::Array(values) => values.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
        return;
    };

    match first {
        Segment::Append => {
            let values = as_array(slot);
            values.push(Value::Null);
            if let Some(last) = values.last_mut() {
                insert(last, rest, value);
            }
        }
        Segment::Index(i) => {
            let values = as_array(slot);
            if *i >= values.len() {
                values.push(Value::Null);
            }
            let at = (*i).min(values.len() - 1);
            insert(&mut values[at], rest, value);
        }
        Segment::Key(name) => {
            let child = as_object(slot).entry(name.clone()).or_insert(Value::Null);
            insert(child, rest, value);
        }
    }
}

fn as_array(slot: &mut Value) -> &mut Vec<Value> {
    match slot {
        Value::Null => *slot = Value::Array(Vec::new()),
        Value::Array(_) => {}
        _ => {
            let first = slot.take();
            *slot = Value::Array(vec![first]);
        }
    }
    match slot {
        Value::Array(values) => values,
        _ => unreachable!("slot was just made an array"),
    }
}

/// A scalar or array already in the slot is kept by turning the slot into an
/// array whose last element is the new object.
fn as_object(slot: &mut Value) -> &mut Map<String, Value> {
    match slot {
        Value::Null => *slot = Value::Object(Map::new()),
        Value::Object(_) => {}
        _ => {
            let values = as_array(slot);
            if !matches!(values.last(), Some(Value::Object(_))) {
                values.push(Value::Object(Map::new()));
            }
        }
    }
    match slot {
        Value::Object(map) => map,
        Value::Array(values) => match values.last_mut() {
            Some(Value::Object(map)) => map,
            _ => unreachable!("last element was just made an object"),
        },
        _ => unreachable!("slot was just made an object or array"),
    }
}
