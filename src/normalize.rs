//! Metadata normalizer: JSON chunk to [`AvatarMetadata`].
//!
//! Two merge strategies:
//!
//! * [`replace_with_sample`]: the container failed, the JSON does not
//!   parse, or `extensions.VRM` is missing/empty.  The caller gets the
//!   sample record, untouched.
//! * [`fill_from_extension`]: the VRM block exists.  Each field is read
//!   from `meta` on its own and falls back to [`FIELD_DEFAULTS`] on its own
//!   when missing or `null`.  Sub-blocks of the wrong JSON type are still
//!   `MalformedJson` and end in the sample record.

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::error::FallbackSignal;
use crate::metadata::{
    to_owned_list, AvatarMetadata, FIELD_DEFAULTS, SAMPLE_BLENDSHAPES, SAMPLE_BONES, UNKNOWN_BLENDSHAPE,
};

pub const VRM_EXTENSION_POINTER: &str = "/extensions/VRM";

/// Turn reader output into a record.  Never fails.
pub fn normalize(input: Result<&str, &FallbackSignal>) -> AvatarMetadata {
    match input {
        Ok(json_text) => try_normalize(json_text).unwrap_or_else(|sig| {
            debug!("Document rejected: {sig}");
            replace_with_sample()
        }),
        Err(sig) => {
            debug!("Container rejected: {sig}");
            replace_with_sample()
        }
    }
}

/// Parse `json_text` and build a record from its VRM extension block.
///
/// Errors with `MalformedJson` or `MissingExtension`.  Once the block is
/// found, missing keys are filled field by field, but a `meta`,
/// `blendShapeMaster` or group of the wrong JSON type still rejects the
/// whole document.
pub fn try_normalize(json_text: &str) -> Result<AvatarMetadata, FallbackSignal> {
    let doc: Value = serde_json::from_str(json_text)?;
    if !doc.is_object() {
        return Err(FallbackSignal::MalformedJson("document root is not an object".into()));
    }

    match doc.pointer(VRM_EXTENSION_POINTER) {
        Some(Value::Object(ext)) if !ext.is_empty() => fill_from_extension(ext),
        _ => Err(FallbackSignal::MissingExtension),
    }
}

/// Whole-record replacement.
pub fn replace_with_sample() -> AvatarMetadata {
    AvatarMetadata::sample().clone()
}

/// Field-wise fill from a non-empty `extensions.VRM` object.
pub fn fill_from_extension(ext: &Map<String, Value>) -> Result<AvatarMetadata, FallbackSignal> {
    let meta = optional_object(ext, "meta")?;
    let d = &FIELD_DEFAULTS;

    let title = field_text(meta, "title", d.title);
    let blendshapes = match blendshape_names(ext)? {
        names if names.is_empty() => to_owned_list(SAMPLE_BLENDSHAPES),
        names => names,
    };
    trace!("VRM meta: title={title:?}, {} blendshapes", blendshapes.len());

    Ok(AvatarMetadata {
        name:                field_text(meta, "title", d.name),
        version:             field_text(meta, "version", d.version),
        author:              field_text(meta, "author", d.author),
        contact_information: field_text(meta, "contactInformation", d.contact_information),
        reference:           field_text(meta, "reference", d.reference),
        title,
        allowed_user_name:   field_text(meta, "allowedUserName", d.allowed_user_name),
        violent_usage:       field_text(meta, "violentUssageName", d.violent_usage),
        sexual_usage:        field_text(meta, "sexualUssageName", d.sexual_usage),
        commercial_usage:    field_text(meta, "commercialUssageName", d.commercial_usage),
        license_type:        field_text(meta, "licenseName", d.license_type),
        blendshapes,
        // Bone names live in the node tree, which is not walked.
        bones:               to_owned_list(SAMPLE_BONES),
    })
}

/// `parent[key]` as an object.  Missing is fine; any other type is not.
fn optional_object<'a>(
    parent: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, FallbackSignal> {
    match parent.get(key) {
        None                   => Ok(None),
        Some(Value::Object(m)) => Ok(Some(m)),
        Some(other)            => Err(wrong_type(key, "an object", other)),
    }
}

/// `map[key]` as text; missing and `null` mean `default`.
fn field_text(map: Option<&Map<String, Value>>, key: &str, default: &str) -> String {
    match map.and_then(|m| m.get(key)) {
        None | Some(Value::Null) => default.to_owned(),
        Some(Value::String(s))   => s.clone(),
        Some(other)              => other.to_string(),
    }
}

fn blendshape_names(ext: &Map<String, Value>) -> Result<Vec<String>, FallbackSignal> {
    let Some(master) = optional_object(ext, "blendShapeMaster")? else {
        return Ok(Vec::new());
    };
    let groups = match master.get("blendShapeGroups") {
        None                  => return Ok(Vec::new()),
        Some(Value::Array(g)) => g,
        Some(other)           => return Err(wrong_type("blendShapeGroups", "an array", other)),
    };

    groups
        .iter()
        .map(|g| match g {
            Value::Object(group) => Ok(field_text(Some(group), "name", UNKNOWN_BLENDSHAPE)),
            other => Err(wrong_type("blendShapeGroups entry", "an object", other)),
        })
        .collect()
}

fn wrong_type(what: &str, expected: &str, found: &Value) -> FallbackSignal {
    let kind = match found {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "an array",
        Value::Object(_) => "an object",
    };
    FallbackSignal::MalformedJson(format!("{what} is {kind}, expected {expected}"))
}
