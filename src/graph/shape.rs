//! JSON payload reader.
//!
//! Content arrives in the component's original shape, where the kind of a
//! payload is inferred from which fields are present:
//!
//! | kind       | discriminator                          |
//! |------------|----------------------------------------|
//! | `video`    | `src` (alias `source`)                 |
//! | `options`  | `options`                              |
//! | `form`     | `formName`                             |
//! | `redirect` | `redirectUrl` (alias `url`)            |
//!
//! A payload may instead carry an explicit `"kind"` tag, in which case the tag
//! decides and the fields for that kind are required. Exactly one kind must
//! match; anything else becomes [`Payload::Malformed`].

use std::rc::Rc;

use serde_json::{Map, Value};

use super::{
    Choice, ClassificationError, FormRequest, GraphError, Kind, OptionList, Payload, Redirect,
    VideoNode,
};

type Object = Map<String, Value>;

const ID_FIELDS: &[&str] = &["_id", "id"];
const SOURCE_FIELDS: &[&str] = &["src", "source"];
const FORM_FIELDS: &[&str] = &["formName"];
const REDIRECT_FIELDS: &[&str] = &["redirectUrl", "url"];
const RENDERER_FIELDS: &[&str] = &["renderer", "customHTML"];

/// Read the graph root, which must be a well-formed video node.
pub fn read_root(value: &Value) -> Result<Rc<VideoNode>, GraphError> {
    match read_payload(value) {
        Payload::Video(node) => Ok(node),
        Payload::Malformed(err) => Err(GraphError::MalformedRoot(err)),
        Payload::Options(_) => Err(GraphError::RootNotVideo(Kind::Options)),
        Payload::Form(_) => Err(GraphError::RootNotVideo(Kind::Form)),
        Payload::Redirect(_) => Err(GraphError::RootNotVideo(Kind::Redirect)),
    }
}

/// Read a node action or option value.
pub fn read_payload(value: &Value) -> Payload {
    match classify_shape(value) {
        Ok((kind, obj)) => build(kind, obj).unwrap_or_else(Payload::Malformed),
        Err(err) => Payload::Malformed(err),
    }
}

/// Decide which kind a JSON payload is, without building it.
pub fn classify_shape(value: &Value) -> Result<(Kind, &Object), ClassificationError> {
    let obj = value.as_object().ok_or(ClassificationError::NotAnObject)?;

    if let Some(tag) = obj.get("kind") {
        let tag = tag.as_str().unwrap_or_default();
        let kind =
            Kind::from_tag(tag).ok_or_else(|| ClassificationError::UnknownKind(tag.to_string()))?;
        return Ok((kind, obj));
    }

    let mut kinds = Vec::new();
    if has_any(obj, SOURCE_FIELDS) {
        kinds.push(Kind::Video);
    }
    if has_any(obj, &["options"]) {
        kinds.push(Kind::Options);
    }
    if has_any(obj, FORM_FIELDS) {
        kinds.push(Kind::Form);
    }
    if has_any(obj, REDIRECT_FIELDS) {
        kinds.push(Kind::Redirect);
    }

    match kinds.as_slice() {
        [] => Err(ClassificationError::NoMatch),
        [kind] => Ok((*kind, obj)),
        _ => Err(ClassificationError::Ambiguous { kinds }),
    }
}

fn build(kind: Kind, obj: &Object) -> Result<Payload, ClassificationError> {
    match kind {
        Kind::Video => read_node(obj).map(Payload::Video),
        Kind::Options => read_options(obj).map(Payload::Options),
        Kind::Form => {
            let form_name = string_field(obj, FORM_FIELDS).ok_or(
                ClassificationError::MissingField {
                    kind,
                    field: "formName",
                },
            )?;
            Ok(Payload::Form(FormRequest { form_name }))
        }
        Kind::Redirect => {
            let url = string_field(obj, REDIRECT_FIELDS).ok_or(
                ClassificationError::MissingField {
                    kind,
                    field: "redirectUrl",
                },
            )?;
            Ok(Payload::Redirect(Redirect { url }))
        }
    }
}

fn read_node(obj: &Object) -> Result<Rc<VideoNode>, ClassificationError> {
    let id = ID_FIELDS
        .iter()
        .find_map(|field| obj.get(*field).and_then(Value::as_u64))
        .ok_or(ClassificationError::MissingField {
            kind: Kind::Video,
            field: "_id",
        })?;
    let source = string_field(obj, SOURCE_FIELDS).ok_or(ClassificationError::MissingField {
        kind: Kind::Video,
        field: "src",
    })?;

    // A broken action belongs to this node, not to whoever references it.
    let action = match obj.get("action") {
        Some(action) => read_payload(action),
        None => Payload::Malformed(ClassificationError::MissingAction { node: id }),
    };

    Ok(VideoNode::new(id, source, action))
}

fn read_options(obj: &Object) -> Result<OptionList, ClassificationError> {
    let items = obj
        .get("options")
        .and_then(Value::as_array)
        .ok_or(ClassificationError::MissingField {
            kind: Kind::Options,
            field: "options",
        })?;

    let options = items.iter().map(read_choice).collect();
    Ok(OptionList { options })
}

fn read_choice(value: &Value) -> Choice {
    let Some(obj) = value.as_object() else {
        return Choice {
            label: None,
            value: Payload::Malformed(ClassificationError::NotAnObject),
            renderer: None,
        };
    };

    Choice {
        label: obj.get("label").and_then(Value::as_str).map(str::to_string),
        value: obj
            .get("value")
            .map(read_payload)
            .unwrap_or(Payload::Malformed(ClassificationError::NoMatch)),
        renderer: string_field(obj, RENDERER_FIELDS),
    }
}

fn has_any(obj: &Object, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| obj.get(*field).is_some_and(|v| !v.is_null()))
}

fn string_field(obj: &Object, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| obj.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}
