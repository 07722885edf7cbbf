//! Mixed dot/bracket paths into nested data instances.
//!
//! A path such as `customer.positions[2].name` is split into property and
//! index segments. [`get`] reads through a data instance without touching it,
//! [`set`] writes a value and creates every missing container on the way.

use std::{convert::Infallible, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde_json::{Map, Value};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)|\[(\d+)\]").expect("path token pattern is valid"));

/// Largest number of `null` slots [`set`] pads into an array.
pub const MAX_INDEX_GAP: usize = 10_000;

/// One step of a [`DataPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property access: `.name`
    Property(String),
    /// Array index access: `[0]`
    Index(usize),
}

impl PathSegment {
    /// Container kind this segment needs to step into.
    fn container_name(&self) -> &'static str {
        match self {
            PathSegment::Property(_) => "object",
            PathSegment::Index(_) => "array",
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Property(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// Parsed address of a value inside a data instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DataPath {
    segments: Vec<PathSegment>,
}

impl DataPath {
    /// The empty path, addressing the instance itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Tokenize a path string.
    ///
    /// Word runs become property segments and bracketed digit runs become
    /// index segments, in source order. Anything else (dots, stray brackets)
    /// only separates tokens.
    ///
    /// An index too large for `usize` saturates to `usize::MAX`, which no
    /// array reaches: [`get`] finds nothing there and [`set`] refuses it.
    pub fn parse(s: &str) -> Self {
        let segments = TOKEN
            .captures_iter(s)
            .filter_map(|caps| {
                if let Some(name) = caps.get(1) {
                    return Some(PathSegment::Property(name.as_str().to_string()));
                }
                let digits = caps.get(2)?.as_str();
                let idx = digits.parse::<usize>().unwrap_or_else(|e| {
                    warn!("index `[{digits}]` in path `{s}` is unreachable: {e}");
                    usize::MAX
                });
                Some(PathSegment::Index(idx))
            })
            .collect();
        Self { segments }
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Same as [`DataPath::is_root`].
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// All segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Path without its last segment.
    pub fn parent(&self) -> Self {
        let mut new = self.clone();
        new.segments.pop();
        new
    }

    /// New path with a property segment appended.
    pub fn push_property(&self, name: &str) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Property(name.to_string()));
        new
    }

    /// New path with an index segment appended.
    pub fn push_index(&self, idx: usize) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Index(idx));
        new
    }
}

impl FromIterator<PathSegment> for DataPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl FromStr for DataPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for DataPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for DataPath {
    /// Dot-notation with bracketed indices: `items[0].name`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Property(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Property(name) => write!(f, ".{name}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// A value that [`set`] replaced with a container of a different kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Overwrite {
    /// Where the replaced value lived.
    pub at: DataPath,
    /// The value that was dropped from the instance.
    pub replaced: Value,
}

/// Read the value at `path`.
///
/// Returns `None` as soon as a segment does not resolve: a missing key, an
/// index past the end, or a segment of the wrong kind for its container.
pub fn get<'a>(data: &'a Value, path: &DataPath) -> Option<&'a Value> {
    path.segments.iter().try_fold(data, |cur, seg| match seg {
        PathSegment::Property(name) => cur.as_object()?.get(name),
        PathSegment::Index(idx) => cur.as_array()?.get(*idx),
    })
}

/// Mutable counterpart of [`get`]. Never creates anything.
pub fn get_mut<'a>(data: &'a mut Value, path: &DataPath) -> Option<&'a mut Value> {
    path.segments.iter().try_fold(data, |cur, seg| match seg {
        PathSegment::Property(name) => cur.as_object_mut()?.get_mut(name),
        PathSegment::Index(idx) => cur.as_array_mut()?.get_mut(*idx),
    })
}

/// Write `value` at `path`, creating intermediate containers.
///
/// Every value on the way that is not the container kind the next segment
/// needs is replaced: `null` or missing slots silently, anything else is
/// reported back as an [`Overwrite`] and logged. Index writes past the end
/// of an array pad the gap with `null`.
///
/// Returns `None` and leaves `data` untouched when an index lies more than
/// [`MAX_INDEX_GAP`] slots past the end of its array.
///
/// An empty path replaces the whole instance.
pub fn set(data: &mut Value, path: &DataPath, value: Value) -> Option<Vec<Overwrite>> {
    if let Some(depth) = unreachable_index(data, path) {
        let at: DataPath = path.segments[..depth].iter().cloned().collect();
        warn!("refusing to write `{path}`: index at `{at}` is too far past the end");
        return None;
    }

    let mut overwrites = Vec::new();
    let mut cur = data;
    for (depth, seg) in path.segments.iter().enumerate() {
        if let Some(replaced) = coerce_container(cur, seg) {
            let at: DataPath = path.segments[..depth].iter().cloned().collect();
            warn!(
                "overwriting {} at `{at}` with an {} to reach `{path}`",
                kind_name(&replaced),
                seg.container_name()
            );
            overwrites.push(Overwrite { at, replaced });
        }
        cur = child_slot(cur, seg);
    }
    *cur = value;
    Some(overwrites)
}

/// Depth of the first index segment that would need more than
/// [`MAX_INDEX_GAP`] padding slots.
fn unreachable_index(data: &Value, path: &DataPath) -> Option<usize> {
    let mut cur = Some(data);
    for (depth, seg) in path.segments.iter().enumerate() {
        cur = match seg {
            PathSegment::Property(name) => {
                cur.and_then(Value::as_object).and_then(|map| map.get(name))
            }
            PathSegment::Index(idx) => {
                let items = cur.and_then(Value::as_array);
                let len = items.map_or(0, Vec::len);
                match idx.checked_add(1) {
                    Some(needed) if needed.saturating_sub(len) <= MAX_INDEX_GAP => {}
                    _ => return Some(depth),
                }
                items.and_then(|items| items.get(*idx))
            }
        };
    }
    None
}

/// Make `cur` the container `seg` steps into. Returns the dropped value when
/// something other than `null` had to go.
fn coerce_container(cur: &mut Value, seg: &PathSegment) -> Option<Value> {
    let fits = match seg {
        PathSegment::Property(_) => cur.is_object(),
        PathSegment::Index(_) => cur.is_array(),
    };
    if fits {
        return None;
    }
    let fresh = match seg {
        PathSegment::Property(_) => Value::Object(Map::new()),
        PathSegment::Index(_) => Value::Array(Vec::new()),
    };
    let old = std::mem::replace(cur, fresh);
    if old.is_null() {
        trace!("created {} container", seg.container_name());
        None
    } else {
        Some(old)
    }
}

/// Slot for `seg` inside a container already coerced to the right kind.
fn child_slot<'a>(cur: &'a mut Value, seg: &PathSegment) -> &'a mut Value {
    match (cur, seg) {
        (Value::Object(map), PathSegment::Property(name)) => {
            map.entry(name.clone()).or_insert(Value::Null)
        }
        (Value::Array(arr), PathSegment::Index(idx)) => {
            if arr.len() <= *idx {
                arr.resize(*idx + 1, Value::Null);
            }
            &mut arr[*idx]
        }
        (cur, _) => unreachable!("container was coerced before descending: {cur}"),
    }
}

/// JSON kind of a value, for messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segs(path: &str) -> Vec<PathSegment> {
        DataPath::parse(path).segments().to_vec()
    }

    fn prop(name: &str) -> PathSegment {
        PathSegment::from(name)
    }

    fn idx(i: usize) -> PathSegment {
        PathSegment::from(i)
    }

    #[test]
    fn test_parse_mixed_path() {
        assert_eq!(
            segs("positions[0].qty"),
            vec![prop("positions"), idx(0), prop("qty")]
        );
        assert_eq!(
            segs("a.b[0].c"),
            vec![prop("a"), prop("b"), idx(0), prop("c")]
        );
        assert_eq!(
            segs("customer.positions[2].name"),
            vec![prop("customer"), prop("positions"), idx(2), prop("name")]
        );
    }

    #[test]
    fn test_parse_consecutive_indices() {
        assert_eq!(segs("grid[1][12]"), vec![prop("grid"), idx(1), idx(12)]);
    }

    #[test]
    fn test_parse_empty_and_separators() {
        assert!(DataPath::parse("").is_root());
        assert!(DataPath::parse("..").is_root());
        assert_eq!(segs(".a..b."), vec![prop("a"), prop("b")]);
    }

    #[test]
    fn test_display_round_trip() {
        let path = DataPath::parse("customer.positions[2].name");
        assert_eq!(path.to_string(), "customer.positions[2].name");
        assert_eq!(DataPath::parse(&path.to_string()), path);
    }

    #[test]
    fn test_get_missing_is_none() {
        let data = json!({"a": {"b": [1, 2]}});
        assert_eq!(get(&data, &"a.b[1]".into()), Some(&json!(2)));
        assert_eq!(get(&data, &"a.b[5]".into()), None);
        assert_eq!(get(&data, &"a.c".into()), None);
        assert_eq!(get(&data, &"a[0]".into()), None);
        assert_eq!(get(&data, &"a.b.x".into()), None);
        assert_eq!(get(&data, &DataPath::root()), Some(&data));
    }

    #[test]
    fn test_set_creates_containers() {
        let mut data = json!({});
        let overwrites = set(&mut data, &"positions[0].qty".into(), json!(5));
        assert_eq!(overwrites, Some(vec![]));
        assert_eq!(data, json!({"positions": [{"qty": 5}]}));
    }

    #[test]
    fn test_set_pads_arrays_with_null() {
        let mut data = json!({});
        set(&mut data, &"rows[2]".into(), json!("c"));
        assert_eq!(data, json!({"rows": [null, null, "c"]}));
    }

    #[test]
    fn test_set_refuses_far_indices() {
        let mut data = json!({});
        let max = DataPath::parse("rows").push_index(usize::MAX);
        assert_eq!(set(&mut data, &max, json!(1)), None);
        assert_eq!(set(&mut data, &"a.rows[4000000000].x".into(), json!(1)), None);
        assert_eq!(data, json!({}));

        let mut data = json!({"rows": [1, 2]});
        let last = MAX_INDEX_GAP + 1;
        let rows = DataPath::parse("rows");
        assert!(set(&mut data, &rows.push_index(last), json!(0)).is_some());
        assert_eq!(data["rows"].as_array().map(Vec::len), Some(last + 1));
        assert_eq!(set(&mut data, &rows.push_index(2 * last + 2), json!(0)), None);
    }

    #[test]
    fn test_oversized_index_is_unresolvable() {
        let path = DataPath::parse("rows[99999999999999999999999].x");
        assert_eq!(path.segments(), &[prop("rows"), idx(usize::MAX), prop("x")]);

        let mut data = json!({"rows": [{"x": 1}, {"x": 2}]});
        let before = data.clone();
        assert_eq!(get(&data, &path), None);
        assert!(get_mut(&mut data, &path).is_none());
        assert_eq!(set(&mut data, &path, json!(9)), None);
        assert_eq!(data, before);
    }

    #[test]
    fn test_set_then_get() {
        let mut data = json!({"customer": {"name": "Ada"}});
        let path = DataPath::parse("customer.addresses[1].city");
        set(&mut data, &path, json!("Berlin"));
        assert_eq!(get(&data, &path), Some(&json!("Berlin")));
        assert_eq!(get(&data, &"customer.name".into()), Some(&json!("Ada")));
    }

    #[test]
    fn test_set_overwrites_conflicting_scalar() {
        let mut data = json!({"positions": "none"});
        let overwrites = set(&mut data, &"positions[0]".into(), json!(1));
        assert_eq!(data, json!({"positions": [1]}));
        assert_eq!(
            overwrites,
            Some(vec![Overwrite {
                at: "positions".into(),
                replaced: json!("none"),
            }])
        );
    }

    #[test]
    fn test_set_replaces_object_with_array_for_index() {
        let mut data = json!({"a": {"x": 1}});
        let overwrites = set(&mut data, &"a[0]".into(), json!(true)).unwrap();
        assert_eq!(data, json!({"a": [true]}));
        assert_eq!(overwrites[0].replaced, json!({"x": 1}));
    }

    #[test]
    fn test_set_root_scalar_becomes_object() {
        let mut data = json!(3);
        let overwrites = set(&mut data, &"a".into(), json!(1)).unwrap();
        assert_eq!(data, json!({"a": 1}));
        assert_eq!(overwrites.len(), 1);
        assert!(overwrites[0].at.is_root());
    }

    #[test]
    fn test_set_empty_path_replaces_instance() {
        let mut data = json!({"a": 1});
        set(&mut data, &DataPath::root(), json!([1]));
        assert_eq!(data, json!([1]));
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut data = json!({"a": [{"b": 1}]});
        if let Some(v) = get_mut(&mut data, &"a[0].b".into()) {
            *v = json!(2);
        }
        assert_eq!(data, json!({"a": [{"b": 2}]}));
        assert!(get_mut(&mut data, &"a[3]".into()).is_none());
    }
}
